//! Startup maintenance tasks
//!
//! One-shot data repairs that used to run lazily on the request path.

use crate::database::DatabasePool;
use crate::utils::errors::FestBuddyError;

pub const DEFAULT_VENUE: &str = "Default Venue";

/// Backfill sub-events that were created before venues became part of the
/// admin form. Returns the number of rows repaired.
pub async fn backfill_missing_venues(pool: &DatabasePool) -> Result<u64, FestBuddyError> {
    let result = sqlx::query(
        "UPDATE sub_events SET venue = $1 WHERE venue IS NULL OR venue = ''"
    )
    .bind(DEFAULT_VENUE)
    .execute(pool)
    .await?;

    let repaired = result.rows_affected();
    if repaired > 0 {
        tracing::info!(rows = repaired, "Backfilled missing sub-event venues");
    }

    Ok(repaired)
}
