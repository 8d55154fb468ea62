//! Alias table persistence.

use crate::schema::names;
use crate::{DatabaseResult, NameRow, PgPool};
use croupier_core::Alias;
use diesel::prelude::*;
use tracing::{info, instrument};

/// Load alias substitutions from the `names` table in insertion order.
///
/// # Errors
///
/// Returns an error if a connection cannot be checked out or the query fails.
#[instrument(skip(pool))]
pub fn load_aliases(pool: &PgPool) -> DatabaseResult<Vec<Alias>> {
    let mut conn = pool.get()?;
    let rows = names::table
        .order(names::id.asc())
        .select(NameRow::as_select())
        .load(&mut conn)?;

    info!(count = rows.len(), "Loaded aliases from database");
    Ok(rows
        .into_iter()
        .map(|row| Alias::new(row.original, row.replacement))
        .collect())
}
