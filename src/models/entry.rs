use serde::{Deserialize, Serialize};

/// One row of the published leaderboard. Recomputed from the score store on
/// every run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position in the result, dense per output row.
    pub rank: u32,
    pub username: String,
    pub score: i64,
}

impl RankedEntry {
    /// Display label for the rank column, zero-padded to two digits so
    /// single-digit ranks line up with "10".
    pub fn rank_label(&self) -> String {
        format!("{:02}", self.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_label_is_zero_padded_to_two_digits() {
        let entry = RankedEntry {
            rank: 3,
            username: "ace".to_string(),
            score: 120,
        };
        assert_eq!(entry.rank_label(), "03");
    }

    #[test]
    fn rank_label_leaves_two_digit_ranks_alone() {
        let entry = RankedEntry {
            rank: 10,
            username: "ace".to_string(),
            score: 120,
        };
        assert_eq!(entry.rank_label(), "10");
    }
}
