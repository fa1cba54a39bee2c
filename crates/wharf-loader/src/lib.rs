//! Strategy-to-statement-sequence composition and the `load_table` entry
//! point: applies env-var templating to the credential/connection fields of
//! a descriptor, resolves COPY auth, builds the strategy's statement
//! sequence, and runs it inside a transaction via `wharf-warehouse`.

pub mod error;
pub mod strategy;

use std::collections::HashMap;
use std::env;

use wharf_descriptor::template;
use wharf_model::descriptor::Descriptor;
use wharf_query::dialect::Redshift;

pub use error::LoadError;

/// Applies `{{NAME}}` templating (against the process environment) to the
/// connection/credential fields spec.md §4.3 names, returning a descriptor
/// safe to dispatch.
fn render_templated_fields(descriptor: &Descriptor) -> Result<Descriptor, LoadError> {
    let env_vars: HashMap<String, String> = env::vars().collect();

    let mut rendered = descriptor.clone();
    rendered.table = template::render(&descriptor.table, &env_vars)
        .map_err(|source| LoadError::Template { field: "table", source })?;
    rendered.schema = descriptor
        .schema
        .as_deref()
        .map(|schema| template::render(schema, &env_vars))
        .transpose()
        .map_err(|source| LoadError::Template { field: "schema", source })?;
    rendered.jdbc_url = template::render(&descriptor.jdbc_url, &env_vars)
        .map_err(|source| LoadError::Template { field: "jdbc-url", source })?;
    rendered.username = template::render(&descriptor.username, &env_vars)
        .map_err(|source| LoadError::Template { field: "username", source })?;
    rendered.password = template::render(&descriptor.password, &env_vars)
        .map_err(|source| LoadError::Template { field: "password", source })?;

    Ok(rendered)
}

/// Loads the data files described by `manifest_url` into `descriptor`'s
/// target table using `descriptor.strategy`'s fixed statement sequence, all
/// inside one transaction.
pub async fn load_table(
    descriptor: &Descriptor,
    manifest_url: String,
    metrics: &wharf_core::Metrics,
) -> Result<(), LoadError> {
    let descriptor = render_templated_fields(descriptor)?;
    let auth = wharf_store::resolve_copy_auth()?;
    let statements = strategy::build_statements(&descriptor, manifest_url, &auth)?;

    let dialect = Redshift;

    wharf_warehouse::with_connection(
        &descriptor.jdbc_url,
        &descriptor.username,
        &descriptor.password,
        &statements,
        &dialect,
        &descriptor.execute_opts,
        metrics,
    )
    .await?;

    Ok(())
}
