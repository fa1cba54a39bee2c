use crate::ast::copy::{Copy, CopyAuth};
use crate::renderer::{Render, Renderer};

impl Render for Copy {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("COPY ");
        r.render_table_ref(&self.table);
        r.sql.push(' ');
        r.render_column_list(&self.columns);
        r.sql.push_str(" FROM '");
        r.sql.push_str(&self.manifest_url);
        r.sql.push_str("' ");

        match &self.auth {
            CopyAuth::IamRole(role) => {
                r.sql.push_str("IAM_ROLE '");
                r.sql.push_str(role);
                r.sql.push('\'');
            }
            CopyAuth::Credentials { access_key_id, secret_access_key } => {
                r.sql.push_str(&format!(
                    "CREDENTIALS 'aws_access_key_id={access_key_id};aws_secret_access_key={secret_access_key}'"
                ));
            }
        }

        for option in &self.options {
            r.sql.push(' ');
            r.sql.push_str(option);
        }

        r.sql.push_str(" manifest");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::common::TableRef;
    use crate::dialect::Redshift;

    #[test]
    fn renders_copy_with_iam_role() {
        let ast = Copy {
            table: TableRef::with_schema(Some("public"), "t_staging"),
            columns: vec!["id".into(), "v".into()],
            manifest_url: "s3://bucket/abc.manifest".into(),
            auth: CopyAuth::IamRole("arn:aws:iam::1:role/wharf".into()),
            options: vec!["GZIP".into(), "TIMEFORMAT 'auto'".into()],
        };
        let mut r = Renderer::new(&Redshift);
        ast.render(&mut r);
        assert_eq!(
            r.finish(),
            "COPY public.t_staging (id, v) FROM 's3://bucket/abc.manifest' \
             IAM_ROLE 'arn:aws:iam::1:role/wharf' GZIP TIMEFORMAT 'auto' manifest"
        );
    }

    #[test]
    fn renders_copy_with_static_credentials() {
        let ast = Copy {
            table: TableRef::new("t_staging"),
            columns: vec!["id".into()],
            manifest_url: "s3://bucket/def.manifest".into(),
            auth: CopyAuth::Credentials {
                access_key_id: "AKIA".into(),
                secret_access_key: "secret".into(),
            },
            options: vec![],
        };
        let mut r = Renderer::new(&Redshift);
        ast.render(&mut r);
        assert_eq!(
            r.finish(),
            "COPY t_staging (id) FROM 's3://bucket/def.manifest' \
             CREDENTIALS 'aws_access_key_id=AKIA;aws_secret_access_key=secret' manifest"
        );
    }
}
