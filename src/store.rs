use crate::error::PipelineError;
use crate::models::entry::RankedEntry;
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

/// Top-N query over the game's score tables. Rank is assigned by ordered
/// window numbering so the tie-break (earliest achiever of a tied score
/// ranks higher) is decided in one place, inside the store.
const TOP_SCORES_SQL: &str = "
    SELECT
        ROW_NUMBER() OVER (ORDER BY s.high_score DESC, s.achieved_at ASC) AS position,
        u.username,
        s.high_score
    FROM user_stats s
    JOIN users u ON u.id = s.user_id
    WHERE s.high_score > 0
    ORDER BY s.high_score DESC, s.achieved_at ASC
    LIMIT ?1";

/// Read-only handle on the score store. The store is owned by the game
/// application; this pipeline never writes it.
#[derive(Debug)]
pub struct ScoreStore {
    conn: Connection,
}

impl ScoreStore {
    /// Open the store read-only. A missing or unopenable database file is a
    /// data-access failure. `busy_timeout` bounds how long a query waits on
    /// the game's write locks before giving up.
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Self, PipelineError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            PipelineError::DataAccess(format!("failed to open score store {}: {e}", path.display()))
        })?;

        conn.busy_timeout(busy_timeout)
            .map_err(|e| PipelineError::DataAccess(format!("failed to set busy timeout: {e}")))?;

        Ok(Self { conn })
    }

    /// Ranked top scorers: `high_score > 0` only, ordered by score descending
    /// then `achieved_at` ascending, at most `limit` rows. An empty result is
    /// not an error.
    pub fn top_scores(&self, limit: u32) -> Result<Vec<RankedEntry>, PipelineError> {
        let mut stmt = self
            .conn
            .prepare_cached(TOP_SCORES_SQL)
            .map_err(|e| PipelineError::DataAccess(format!("failed to prepare ranking query: {e}")))?;

        let entries = stmt
            .query_map(params![limit], |row| {
                Ok(RankedEntry {
                    rank: row.get(0)?,
                    username: row.get(1)?,
                    score: row.get(2)?,
                })
            })
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| PipelineError::DataAccess(format!("ranking query failed: {e}")))?;

        Ok(entries)
    }
}
