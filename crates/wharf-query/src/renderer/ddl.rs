use crate::ast::ddl::{AlterTableDropColumn, CreateTableAsSelect, CreateTableLike, DropTable, Truncate};
use crate::renderer::{Render, Renderer};

impl Render for CreateTableLike {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("CREATE TEMPORARY TABLE ");
        r.render_table_ref(&self.table);
        r.sql.push_str(" (LIKE ");
        r.render_table_ref(&self.like);
        r.sql.push_str(" INCLUDING DEFAULTS)");
    }
}

impl Render for CreateTableAsSelect {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("CREATE TEMPORARY TABLE ");
        r.render_table_ref(&self.table);
        r.sql.push_str(" AS ");
        r.sql.push_str(&self.select_body);
    }
}

impl Render for Truncate {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("TRUNCATE TABLE ");
        r.render_table_ref(&self.table);
    }
}

impl Render for DropTable {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("DROP TABLE ");
        r.render_table_ref(&self.table);
    }
}

impl Render for AlterTableDropColumn {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("ALTER TABLE ");
        r.render_table_ref(&self.table);
        r.sql.push_str(" DROP COLUMN ");
        r.sql.push_str(&r.dialect.quote_identifier(&self.column));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::common::TableRef;
    use crate::dialect::Redshift;

    #[test]
    fn renders_create_staging_like() {
        let ast = CreateTableLike {
            table: TableRef::new("t_staging"),
            like: TableRef::with_schema(Some("public"), "t"),
        };
        let mut r = Renderer::new(&Redshift);
        ast.render(&mut r);
        assert_eq!(
            r.finish(),
            "CREATE TEMPORARY TABLE t_staging (LIKE public.t INCLUDING DEFAULTS)"
        );
    }

    #[test]
    fn renders_truncate_and_drop() {
        let mut r = Renderer::new(&Redshift);
        Truncate { table: TableRef::new("t") }.render(&mut r);
        assert_eq!(r.finish(), "TRUNCATE TABLE t");

        let mut r = Renderer::new(&Redshift);
        DropTable { table: TableRef::new("t_rnums") }.render(&mut r);
        assert_eq!(r.finish(), "DROP TABLE t_rnums");
    }
}
