//! Wiring configuration into a ready pipeline.

use crate::{CroupierConfig, LedgerKind, PipelineSettings, PostingPipeline};
use croupier_core::{Alias, AliasTable, QueryParser};
use croupier_database::{
    MemoryLedger, PgPool, PostgresLedger, database_url_from_env, establish_pool, load_aliases,
    run_migrations,
};
use croupier_error::{CroupierResult, DatabaseError, DatabaseErrorKind};
use croupier_interface::LedgerStore;
use croupier_selection::SelectionEngine;
use croupier_social::{GroupMeImageHost, GroupMeMessenger};
use croupier_storage::build_backend;
use std::sync::Arc;
use tracing::{info, instrument};

/// Open the ledger database and apply pending migrations.
///
/// The URL comes from `database.url`, falling back to `DATABASE_URL`.
///
/// # Errors
///
/// Returns error if no URL is configured, no connection can be made, or a
/// migration fails.
#[instrument(skip(config))]
pub async fn open_database(config: &CroupierConfig) -> CroupierResult<PgPool> {
    let url = match config.database().url() {
        Some(url) => url.clone(),
        None => database_url_from_env()?,
    };
    let pool_size = *config.database().pool_size();

    let pool = tokio::task::spawn_blocking(move || {
        let pool = establish_pool(&url, pool_size)?;
        run_migrations(&pool)?;
        Ok::<_, DatabaseError>(pool)
    })
    .await
    .map_err(|e| DatabaseError::new(DatabaseErrorKind::Task(e.to_string())))??;

    Ok(pool)
}

async fn open_ledger(config: &CroupierConfig) -> CroupierResult<(Arc<dyn LedgerStore>, Vec<Alias>)> {
    match config.database().ledger() {
        LedgerKind::Memory => {
            info!("Using in-memory ledger");
            let ledger: Arc<dyn LedgerStore> = Arc::new(MemoryLedger::new());
            Ok((ledger, Vec::new()))
        }
        LedgerKind::Postgres => {
            let pool = open_database(config).await?;
            let alias_pool = pool.clone();
            let aliases = tokio::task::spawn_blocking(move || load_aliases(&alias_pool))
                .await
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Task(e.to_string())))??;
            let ledger: Arc<dyn LedgerStore> = Arc::new(PostgresLedger::new(pool));
            Ok((ledger, aliases))
        }
    }
}

/// Combine configured aliases with rows loaded from the `names` table.
///
/// Configured aliases apply first; stored rows follow in the order given.
pub fn merge_aliases(configured: Vec<Alias>, stored: Vec<Alias>) -> AliasTable {
    let mut aliases = AliasTable::new(configured);
    aliases.extend(stored);
    aliases
}

/// Build every collaborator named by `config` and assemble the pipeline.
///
/// Aliases declared in the configuration come first, followed by rows of
/// the `names` table.
///
/// # Errors
///
/// Returns error if the ledger, storage backend or GroupMe clients cannot be
/// created.
#[instrument(skip(config))]
pub async fn build_pipeline(config: &CroupierConfig) -> CroupierResult<PostingPipeline> {
    let (ledger, stored_aliases) = open_ledger(config).await?;

    let aliases = merge_aliases(config.aliases().clone(), stored_aliases);
    info!(aliases = aliases.len(), "Loaded alias table");

    let parser = QueryParser::new(config.keyword().clone(), Arc::new(aliases));
    let backend = build_backend(config.storage())?;
    let selection =
        Arc::new(SelectionEngine::new(ledger).with_wildcards(config.wildcards().clone()));
    let image_host = Arc::new(GroupMeImageHost::new(config.groupme().clone())?);
    let messenger = Arc::new(GroupMeMessenger::new(config.groupme().clone())?);

    let settings = PipelineSettings {
        folder_path: config.folder_path().clone(),
        not_found_link: config.not_found_link().clone(),
        bot_id: config.groupme().bot_id.clone(),
        test_mode: *config.test_mode(),
    };

    Ok(PostingPipeline::new(
        parser, backend, selection, image_host, messenger, settings,
    ))
}
