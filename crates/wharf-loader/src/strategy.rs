//! Expands a descriptor's `strategy` into the fixed statement sequence
//! spec.md §4.3 names, run inside one transaction by `wharf-warehouse`.

use wharf_model::descriptor::{Descriptor, Strategy};
use wharf_query::ast::common::TableRef;
use wharf_query::ast::copy::CopyAuth;
use wharf_query::builder;
use wharf_query::statement::Statement;
use wharf_store::CopyAuthMode;

use crate::error::LoadError;

fn to_copy_auth(mode: &CopyAuthMode) -> CopyAuth {
    match mode {
        CopyAuthMode::IamRole(role) => CopyAuth::IamRole(role.clone()),
        CopyAuthMode::StaticCredentials { access_key_id, secret_access_key } => CopyAuth::Credentials {
            access_key_id: access_key_id.clone(),
            secret_access_key: secret_access_key.clone(),
        },
    }
}

/// Builds the full statement sequence for `descriptor`'s strategy against
/// `manifest_url`, resolving the COPY auth clause from `auth`.
pub fn build_statements(
    descriptor: &Descriptor,
    manifest_url: String,
    auth: &CopyAuthMode,
) -> Result<Vec<Statement>, LoadError> {
    let target = TableRef::qualified(&descriptor.qualified_table());
    let staging = builder::staging_table(&target);
    let copy_auth = to_copy_auth(auth);

    let copy_into = |table: &TableRef| {
        Statement::Copy(builder::build_copy(
            table,
            &descriptor.columns,
            manifest_url.clone(),
            copy_auth.clone(),
            &descriptor.options,
        ))
    };

    let statements = match descriptor.strategy {
        Strategy::Merge => merge_sequence(&target, &staging, descriptor, &copy_into, None),
        Strategy::DeleteNullHashMerge => {
            merge_sequence(&target, &staging, descriptor, &copy_into, Some(false))
        }
        Strategy::DeleteNullHashMergeCustomer => {
            merge_sequence(&target, &staging, descriptor, &copy_into, Some(true))
        }
        Strategy::Replace => vec![
            Statement::Truncate(builder::build_truncate(&target)),
            copy_into(&target),
        ],
        Strategy::Append => vec![
            Statement::CreateStaging(builder::build_create_staging(&target)),
            copy_into(&staging),
            Statement::InsertAntiJoin(builder::build_append(
                &target,
                &staging,
                &descriptor.columns,
                &descriptor.pk_columns,
            )),
            Statement::Drop(builder::build_drop(&staging)),
        ],
        Strategy::Add => vec![
            Statement::CreateStaging(builder::build_create_staging(&target)),
            copy_into(&staging),
            Statement::InsertUnconditional(builder::build_add(&target, &staging, &descriptor.staging_select)),
            Statement::Drop(builder::build_drop(&staging)),
        ],
    };

    Ok(statements)
}

/// `merge` and both `delete-null-hash-merge*` variants share this shape;
/// `null_hash_customer_variant` is `None` for plain `merge`, `Some(false)`
/// for the report-date-grouped hash delete, `Some(true)` for the
/// customer/partner-order-id-grouped one.
fn merge_sequence(
    target: &TableRef,
    staging: &TableRef,
    descriptor: &Descriptor,
    copy_into: &impl Fn(&TableRef) -> Statement,
    null_hash_customer_variant: Option<bool>,
) -> Vec<Statement> {
    let rnums = builder::rnums_table(target);
    let mut statements = vec![
        Statement::CreateStaging(builder::build_create_staging(target)),
        copy_into(staging),
    ];

    if let Some(customer_variant) = null_hash_customer_variant {
        statements.push(Statement::DeleteNullHash(builder::build_delete_null_hash(
            target,
            staging,
            customer_variant,
            descriptor.delete_null_hash_merge_data_sources.as_deref(),
        )));
    }

    statements.push(Statement::CreateRnums(builder::build_create_rnums(staging, target, &descriptor.staging_select)));
    statements.push(Statement::DedupRnums(builder::build_dedup_rnums(target, &descriptor.pk_columns)));
    statements.push(Statement::DropRowNum(builder::build_drop_row_num(target)));
    statements.push(Statement::Merge(builder::build_merge(
        target,
        &descriptor.pk_columns,
        &descriptor.pk_nulls,
        descriptor.full_columns_or_columns(),
    )));
    statements.push(Statement::Drop(builder::build_drop(staging)));
    statements.push(Statement::Drop(builder::build_drop(&rnums)));

    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use wharf_model::descriptor::{ExecuteOpts, StagingSelect};

    fn descriptor(strategy: Strategy) -> Descriptor {
        Descriptor {
            table: "events".to_string(),
            schema: Some("public".to_string()),
            jdbc_url: "jdbc:redshift://warehouse/db".to_string(),
            username: "u".to_string(),
            password: "p".to_string(),
            columns: vec!["id".to_string(), "v".to_string()],
            full_columns: vec![],
            pk_columns: vec!["id".to_string()],
            pk_nulls: vec![],
            data_pattern: ".*\\.csv".to_string(),
            strategy,
            options: vec![],
            staging_select: StagingSelect::Default,
            delete_null_hash_merge_data_sources: None,
            add_status: false,
            data_sources: None,
            execute_opts: ExecuteOpts::default(),
        }
    }

    fn auth() -> CopyAuthMode {
        CopyAuthMode::IamRole("arn:aws:iam::1:role/wharf".to_string())
    }

    #[test]
    fn merge_sequence_has_eight_statements() {
        let d = descriptor(Strategy::Merge);
        let stmts = build_statements(&d, "s3://bucket/m".to_string(), &auth()).unwrap();
        let labels: Vec<_> = stmts.iter().map(Statement::label).collect();
        assert_eq!(
            labels,
            vec![
                "create-staging",
                "copy-from-object-store",
                "create-rnums",
                "dedup-rnums",
                "drop-row-num",
                "merge-from-rnums",
                "drop",
                "drop",
            ]
        );
    }

    #[test]
    fn delete_null_hash_merge_interleaves_delete_after_copy() {
        let d = descriptor(Strategy::DeleteNullHashMerge);
        let stmts = build_statements(&d, "s3://bucket/m".to_string(), &auth()).unwrap();
        let labels: Vec<_> = stmts.iter().map(Statement::label).collect();
        assert_eq!(labels[1], "copy-from-object-store");
        assert_eq!(labels[2], "delete-null-hash");
        assert_eq!(labels[3], "create-rnums");
    }

    #[test]
    fn replace_sequence_is_truncate_then_copy() {
        let d = descriptor(Strategy::Replace);
        let stmts = build_statements(&d, "s3://bucket/m".to_string(), &auth()).unwrap();
        let labels: Vec<_> = stmts.iter().map(Statement::label).collect();
        assert_eq!(labels, vec!["truncate", "copy-from-object-store"]);
    }

    #[test]
    fn append_sequence_ends_with_anti_join_then_drop() {
        let d = descriptor(Strategy::Append);
        let stmts = build_statements(&d, "s3://bucket/m".to_string(), &auth()).unwrap();
        let labels: Vec<_> = stmts.iter().map(Statement::label).collect();
        assert_eq!(
            labels,
            vec!["create-staging", "copy-from-object-store", "append-from-staging", "drop"]
        );
    }

    #[test]
    fn merge_sequence_create_rnums_honors_a_distinct_staging_select() {
        let mut d = descriptor(Strategy::Merge);
        d.staging_select = StagingSelect::Distinct;
        let stmts = build_statements(&d, "s3://bucket/m".to_string(), &auth()).unwrap();
        let create_rnums = stmts.iter().find(|s| s.label() == "create-rnums").unwrap();
        let sql = create_rnums.to_sql(&wharf_query::dialect::Redshift);
        assert!(sql.contains("SELECT DISTINCT * FROM events_staging"));
    }

    #[test]
    fn add_sequence_honors_a_templated_staging_select() {
        let mut d = descriptor(Strategy::Add);
        d.staging_select = StagingSelect::Template("SELECT * FROM {{table}} WHERE v IS NOT NULL".to_string());
        let stmts = build_statements(&d, "s3://bucket/m".to_string(), &auth()).unwrap();
        let add = stmts.iter().find(|s| s.label() == "add-from-staging").unwrap();
        let sql = add.to_sql(&wharf_query::dialect::Redshift);
        assert!(sql.contains("events_staging WHERE v IS NOT NULL"));
    }

    #[test]
    fn add_sequence_uses_unconditional_insert() {
        let d = descriptor(Strategy::Add);
        let stmts = build_statements(&d, "s3://bucket/m".to_string(), &auth()).unwrap();
        let labels: Vec<_> = stmts.iter().map(Statement::label).collect();
        assert_eq!(
            labels,
            vec!["create-staging", "copy-from-object-store", "add-from-staging", "drop"]
        );
    }
}
