//! The per-directory load-cycle state machine: `scan -> load -> delete ->
//! scan`, with a `stl-load-error` side branch out of `load`. One call to
//! [`advance`] performs exactly one state transition; the caller
//! ([`crate::key_watcher`]) drives the loop and honors `Transition::pause`.

use std::sync::Arc;

use chrono::Utc;
use regex::Regex;
use wharf_core::{Metrics, StatusStore};
use wharf_loader::LoadError;
use wharf_model::descriptor::{Descriptor, Strategy};
use wharf_model::manifest::CopyManifest;
use wharf_model::state::{CycleState, Transition};
use wharf_model::status::StatusLabel;
use wharf_store::ObjectStore;
use wharf_warehouse::WarehouseError;

/// Everything a single directory's state machine needs across every state:
/// the object store handle, the directory's key prefix, and the (possibly
/// no-op) status-tracking side database.
pub struct CycleContext {
    store: ObjectStore,
    directory: String,
    status_store: Arc<dyn StatusStore>,
    metrics: Metrics,
}

impl CycleContext {
    pub fn new(
        store: ObjectStore,
        directory: impl Into<String>,
        status_store: Arc<dyn StatusStore>,
        metrics: Metrics,
    ) -> Self {
        Self { store, directory: directory.into(), status_store, metrics }
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }
}

/// Advances `state` by exactly one step.
pub async fn advance(state: CycleState, ctx: &CycleContext) -> Transition {
    match state {
        CycleState::Scan => scan(ctx).await,
        CycleState::Load { descriptor, files } => load(ctx, descriptor, files).await,
        CycleState::Delete { files } => delete(ctx, files).await,
        CycleState::StlLoadError { descriptor, files } => stl_load_error(ctx, descriptor, files).await,
    }
}

async fn scan(ctx: &CycleContext) -> Transition {
    let keys = match ctx.store.list_under(&ctx.directory).await {
        Ok(keys) => keys,
        Err(err) => {
            tracing::warn!(directory = %ctx.directory, %err, "object-store list failed during scan");
            return Transition::paused(CycleState::Scan);
        }
    };

    let Some(manifest_key) = keys.iter().find(|key| key.ends_with("manifest.edn")).cloned() else {
        return Transition::paused(CycleState::Scan);
    };

    let text = match ctx.store.get_object_text(&manifest_key).await {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(directory = %ctx.directory, %err, "failed to read descriptor");
            return Transition::paused(CycleState::Scan);
        }
    };

    let descriptor = match wharf_descriptor::descriptor::parse_and_validate(&text) {
        Ok(descriptor) => descriptor,
        Err(err) => {
            tracing::error!(directory = %ctx.directory, %err, "descriptor validation failed");
            return Transition::paused(CycleState::Scan);
        }
    };

    let pattern = match Regex::new(&descriptor.data_pattern) {
        Ok(pattern) => pattern,
        Err(err) => {
            tracing::error!(directory = %ctx.directory, %err, "data-pattern failed to compile");
            return Transition::paused(CycleState::Scan);
        }
    };

    let mut files: Vec<String> = keys
        .into_iter()
        .filter(|key| *key != manifest_key)
        .filter(|key| pattern.is_match(key))
        .collect();

    if files.is_empty() {
        return Transition::paused(CycleState::Scan);
    }

    // Preserve the original's determinism cap: a merge load only ever takes
    // the first matched file per scan; later files wait for the next cycle.
    if descriptor.strategy == Strategy::Merge {
        files.truncate(1);
    }

    Transition::immediate(CycleState::Load { descriptor: Arc::new(descriptor), files })
}

async fn load(ctx: &CycleContext, descriptor: Arc<Descriptor>, files: Vec<String>) -> Transition {
    let urls = file_urls(ctx, &files);
    let manifest = CopyManifest::from_urls(urls.clone());

    let uploaded = match ctx.store.put_manifest(&manifest).await {
        Ok(uploaded) => uploaded,
        Err(err) => {
            tracing::warn!(directory = %ctx.directory, %err, "COPY manifest upload failed");
            return Transition::paused(CycleState::Scan);
        }
    };

    if descriptor.add_status {
        stamp_all(ctx, &urls, StatusLabel::Processing).await;
    }

    match wharf_loader::load_table(&descriptor, uploaded.url.clone(), &ctx.metrics).await {
        Ok(()) => {
            delete_manifest(ctx, &uploaded.key).await;
            if descriptor.add_status {
                stamp_all(ctx, &urls, StatusLabel::Upserted).await;
            }
            Transition::paused(CycleState::Delete { files })
        }
        // The original never deletes the COPY manifest when a per-statement
        // timeout fires before its catch path runs. Preserved as-is per the
        // open question in DESIGN.md, not silently fixed.
        Err(err @ LoadError::Warehouse(WarehouseError::Sql { .. })) => {
            delete_manifest(ctx, &uploaded.key).await;
            if descriptor.add_status {
                stamp_all(ctx, &urls, StatusLabel::Failed).await;
            }
            // §7 governs over §4.5's literal phrasing here: a driver-level SQL
            // failure whose message references stl_load_errors (the case a
            // genuine Redshift COPY rejection actually hits) still routes to
            // the stl-load-error handler instead of unconditionally re-scanning.
            if err.to_string().contains("stl_load_errors") {
                Transition::paused(CycleState::StlLoadError { descriptor, files })
            } else {
                Transition::paused(CycleState::Scan)
            }
        }
        Err(err) => {
            if descriptor.add_status {
                stamp_all(ctx, &urls, StatusLabel::Failed).await;
            }
            if err.to_string().contains("stl_load_errors") {
                Transition::paused(CycleState::StlLoadError { descriptor, files })
            } else {
                tracing::error!(directory = %ctx.directory, %err, "load failed");
                Transition::paused(CycleState::Scan)
            }
        }
    }
}

async fn delete(ctx: &CycleContext, files: Vec<String>) -> Transition {
    for file in &files {
        if let Err(err) = ctx.store.delete_object(file).await {
            tracing::warn!(directory = %ctx.directory, file = %file, %err, "failed to delete data file");
        }
    }
    Transition::paused(CycleState::Scan)
}

async fn stl_load_error(ctx: &CycleContext, descriptor: Arc<Descriptor>, files: Vec<String>) -> Transition {
    let urls = file_urls(ctx, &files);

    let errors = match wharf_warehouse::query_recent_errors(
        &descriptor.jdbc_url,
        &descriptor.username,
        &descriptor.password,
        &urls,
    )
    .await
    {
        Ok(errors) => errors,
        Err(err) => {
            tracing::error!(directory = %ctx.directory, %err, "failed to query stl_load_errors");
            return Transition::paused(CycleState::Scan);
        }
    };

    let today = Utc::now().date_naive();
    let bucket_prefix = format!("s3://{}/", ctx.store.bucket());

    for error in errors {
        let Some(basename) = error.filename.rsplit('/').next() else { continue };
        let dest_key = format!("errors/{}/{}", today.format("%Y-%m-%d"), basename);
        let src_key = error.filename.strip_prefix(&bucket_prefix).unwrap_or(&error.filename);

        match ctx.store.copy_object(src_key, &dest_key).await {
            Ok(()) => {
                tracing::error!(
                    directory = %ctx.directory,
                    file = %error.filename,
                    query = error.query,
                    line_number = error.line_number,
                    column = %error.colname,
                    reason = %error.err_reason,
                    moved_to = %dest_key,
                    "moved source file referenced by stl_load_errors"
                );
            }
            Err(err) => {
                tracing::warn!(file = %error.filename, %err, "source file no longer present or failed to move");
            }
        }
    }

    Transition::paused(CycleState::Scan)
}

fn file_urls(ctx: &CycleContext, files: &[String]) -> Vec<String> {
    files.iter().map(|file| format!("s3://{}/{}", ctx.store.bucket(), file)).collect()
}

async fn stamp_all(ctx: &CycleContext, urls: &[String], label: StatusLabel) {
    for url in urls {
        if let Err(err) = ctx.status_store.stamp(url, label).await {
            tracing::warn!(%url, %err, "failed to stamp file status");
        }
    }
}

async fn delete_manifest(ctx: &CycleContext, key: &str) {
    if let Err(err) = ctx.store.delete_object(key).await {
        tracing::warn!(%key, %err, "failed to delete COPY manifest object");
    }
}
