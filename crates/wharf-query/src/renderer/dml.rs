use crate::ast::dml::{DeleteNullHash, DeleteUsingMaxRowNum, InsertAntiJoin, InsertUnconditional, Merge};
use crate::renderer::{Render, Renderer};

impl Render for DeleteUsingMaxRowNum {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("DELETE FROM ");
        r.render_table_ref(&self.table);
        r.sql.push_str(" WHERE row_num NOT IN (SELECT MAX(row_num) FROM ");
        r.render_table_ref(&self.table);
        r.sql.push_str(" GROUP BY ");
        for (i, col) in self.pk_columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.sql.push_str(&r.dialect.quote_identifier(col));
        }
        r.sql.push(')');
    }
}

impl Render for Merge {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("MERGE INTO ");
        r.render_table_ref(&self.target);
        r.sql.push_str(" AS ");
        r.sql.push_str(&r.dialect.quote_identifier(&self.target_alias));
        r.sql.push_str(" USING ");
        r.render_table_ref(&self.source);
        r.sql.push_str(" AS ");
        r.sql.push_str(&r.dialect.quote_identifier(&self.source_alias));
        r.sql.push_str(" ON ");
        self.join_predicate.render(r);

        r.sql.push_str(" WHEN MATCHED THEN UPDATE SET ");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.sql.push_str(&r.dialect.quote_identifier(&col.name));
            r.sql.push_str(" = ");
            col.source_expr.render(r);
        }

        r.sql.push_str(" WHEN NOT MATCHED THEN INSERT (");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.sql.push_str(&r.dialect.quote_identifier(&col.name));
        }
        r.sql.push_str(") VALUES (");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            col.source_expr.render(r);
        }
        r.sql.push(')');
    }
}

impl Render for DeleteNullHash {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("DELETE FROM ");
        r.render_table_ref(&self.target);
        r.sql.push_str(" WHERE (");
        for (i, col) in self.group_columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.sql.push_str(&r.dialect.quote_identifier(col));
        }
        r.sql.push_str(") IN (SELECT ");
        for (i, col) in self.group_columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.sql.push_str(&r.dialect.quote_identifier(col));
        }
        r.sql.push_str(" FROM ");
        r.render_table_ref(&self.staging);
        r.sql.push_str(") AND hash IS NULL");

        if let Some(sources) = &self.data_sources {
            r.sql.push_str(" AND ");
            r.sql.push_str(&r.dialect.quote_identifier("data_source"));
            r.sql.push_str(" IN (");
            for (i, source) in sources.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                r.sql.push('\'');
                r.sql.push_str(&source.replace('\'', "''"));
                r.sql.push('\'');
            }
            r.sql.push(')');
        }
    }
}

impl Render for InsertAntiJoin {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("INSERT INTO ");
        r.render_table_ref(&self.target);
        r.sql.push(' ');
        r.render_column_list(&self.columns);
        r.sql.push_str(" SELECT ");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.sql.push_str(&r.dialect.quote_identifier("s"));
            r.sql.push('.');
            r.sql.push_str(&r.dialect.quote_identifier(col));
        }
        r.sql.push_str(" FROM ");
        r.render_table_ref(&self.staging);
        r.sql.push_str(" AS ");
        r.sql.push_str(&r.dialect.quote_identifier("s"));
        r.sql.push_str(" WHERE NOT EXISTS (SELECT 1 FROM ");
        r.render_table_ref(&self.target);
        r.sql.push_str(" AS ");
        r.sql.push_str(&r.dialect.quote_identifier("t"));
        r.sql.push_str(" WHERE ");
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(" AND ");
            }
            r.sql.push_str(&r.dialect.quote_identifier("t"));
            r.sql.push('.');
            r.sql.push_str(&r.dialect.quote_identifier(key));
            r.sql.push_str(" = ");
            r.sql.push_str(&r.dialect.quote_identifier("s"));
            r.sql.push('.');
            r.sql.push_str(&r.dialect.quote_identifier(key));
        }
        r.sql.push(')');
    }
}

impl Render for InsertUnconditional {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("INSERT INTO ");
        r.render_table_ref(&self.target);
        r.sql.push_str(" SELECT ");
        r.sql.push_str(&self.select_body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::common::TableRef;
    use crate::ast::expr::{and_all, qualified_ident, raw, BinaryOp, BinaryOperator, Expr, FunctionCall};
    use crate::dialect::Redshift;

    #[test]
    fn renders_delete_using_max_row_num() {
        let ast = DeleteUsingMaxRowNum {
            table: TableRef::new("t_rnums"),
            pk_columns: vec!["id".into()],
        };
        let mut r = Renderer::new(&Redshift);
        ast.render(&mut r);
        assert_eq!(
            r.finish(),
            "DELETE FROM t_rnums WHERE row_num NOT IN (SELECT MAX(row_num) FROM t_rnums GROUP BY id)"
        );
    }

    #[test]
    fn renders_merge_with_coalesced_pk_null_join_and_getdate_substitution() {
        let join = and_all(vec![
            Expr::BinaryOp(Box::new(BinaryOp {
                left: qualified_ident("t", "id"),
                op: BinaryOperator::Eq,
                right: qualified_ident("s", "id"),
            })),
            Expr::BinaryOp(Box::new(BinaryOp {
                left: Expr::FunctionCall(FunctionCall {
                    name: "COALESCE".into(),
                    args: vec![qualified_ident("t", "region"), Expr::StringLiteral("".into())],
                }),
                op: BinaryOperator::Eq,
                right: Expr::FunctionCall(FunctionCall {
                    name: "COALESCE".into(),
                    args: vec![qualified_ident("s", "region"), Expr::StringLiteral("".into())],
                }),
            })),
        ]);

        let ast = Merge {
            target: TableRef::new("t"),
            target_alias: "t".into(),
            source: TableRef::new("t_rnums"),
            source_alias: "s".into(),
            join_predicate: join,
            columns: vec![
                crate::ast::dml::MergeColumn { name: "id".into(), source_expr: qualified_ident("s", "id") },
                crate::ast::dml::MergeColumn { name: "update_ts".into(), source_expr: raw("getdate()") },
            ],
        };

        let mut r = Renderer::new(&Redshift);
        ast.render(&mut r);
        let sql = r.finish();
        assert!(sql.starts_with("MERGE INTO t AS t USING t_rnums AS s ON"));
        assert!(sql.contains("COALESCE(t.region, '') = COALESCE(s.region, '')"));
        assert!(sql.contains("WHEN MATCHED THEN UPDATE SET id = s.id, update_ts = getdate()"));
        assert!(sql.contains("VALUES (s.id, getdate())"));
    }

    #[test]
    fn renders_delete_null_hash_with_data_source_restriction() {
        let ast = DeleteNullHash {
            target: TableRef::new("t"),
            staging: TableRef::new("t_staging"),
            group_columns: vec![
                "report_date".into(),
                "data_source".into(),
                "data_type".into(),
                "partner_company_id".into(),
            ],
            data_sources: Some(vec!["feed-a".into()]),
        };
        let mut r = Renderer::new(&Redshift);
        ast.render(&mut r);
        let sql = r.finish();
        assert!(sql.starts_with(
            "DELETE FROM t WHERE (report_date, data_source, data_type, partner_company_id) IN"
        ));
        assert!(sql.ends_with("AND data_source IN ('feed-a')"));
    }

    #[test]
    fn renders_insert_anti_join() {
        let ast = InsertAntiJoin {
            target: TableRef::new("t"),
            staging: TableRef::new("t_staging"),
            columns: vec!["id".into(), "v".into()],
            keys: vec!["id".into()],
        };
        let mut r = Renderer::new(&Redshift);
        ast.render(&mut r);
        let sql = r.finish();
        assert!(sql.contains("WHERE NOT EXISTS"));
        assert!(sql.contains("t.id = s.id"));
    }
}
