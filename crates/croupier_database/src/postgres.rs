//! PostgreSQL implementation of LedgerStore.

use crate::schema::posts;
use crate::{DatabaseResult, PgPool, PostRow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use croupier_error::{CroupierResult, DatabaseError, DatabaseErrorKind};
use croupier_interface::LedgerStore;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::dsl::sql;
use diesel::sql_types::Timestamptz;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Keeps the later of the stored and incoming timestamps on conflict.
const LATEST_POSTED_AT: &str = "GREATEST(posts.posted_at, EXCLUDED.posted_at)";

/// Ledger stored in the `posts` table.
///
/// Each call checks a connection out of the pool on a blocking thread.
#[derive(Clone)]
pub struct PostgresLedger {
    pool: PgPool,
}

impl PostgresLedger {
    /// Create a ledger over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn with_conn<T, F>(&self, f: F) -> DatabaseResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> DatabaseResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Task(e.to_string())))?
    }
}

#[async_trait]
impl LedgerStore for PostgresLedger {
    #[instrument(skip(self))]
    async fn get(&self, path: &str) -> CroupierResult<Option<DateTime<Utc>>> {
        let path = path.to_string();
        let posted_at = self
            .with_conn(move |conn| {
                let found = posts::table
                    .find(path.as_str())
                    .select(posts::posted_at)
                    .first::<DateTime<Utc>>(conn)
                    .optional()?;
                Ok(found)
            })
            .await?;
        Ok(posted_at)
    }

    #[instrument(skip(self))]
    async fn upsert(&self, path: &str, posted_at: DateTime<Utc>) -> CroupierResult<()> {
        let row = PostRow {
            path: path.to_string(),
            posted_at,
        };
        self.with_conn(move |conn| {
            diesel::insert_into(posts::table)
                .values(&row)
                .on_conflict(posts::path)
                .do_update()
                .set(posts::posted_at.eq(sql::<Timestamptz>(LATEST_POSTED_AT)))
                .execute(conn)?;
            debug!(path = %row.path, "Recorded post in ledger");
            Ok(())
        })
        .await?;
        Ok(())
    }

    #[instrument(skip(self, paths), fields(count = paths.len()))]
    async fn get_many(&self, paths: &[String]) -> CroupierResult<HashMap<String, DateTime<Utc>>> {
        if paths.is_empty() {
            return Ok(HashMap::new());
        }
        let paths = paths.to_vec();
        let rows = self
            .with_conn(move |conn| {
                let rows = posts::table
                    .filter(posts::path.eq_any(paths))
                    .select((posts::path, posts::posted_at))
                    .load::<(String, DateTime<Utc>)>(conn)?;
                Ok(rows)
            })
            .await?;
        debug!(found = rows.len(), "Loaded ledger records");
        Ok(rows.into_iter().collect())
    }
}
