//! Error types for timeline navigation
//!
//! Replay itself never fails. The only errors in the engine come from moving
//! through recorded history: stepping past either end, seeking outside the
//! timeline, or running the snapshot cache out of room.

/// Errors from [`Timeline`](crate::snapshot::Timeline) navigation and caching
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    /// Already at the empty snapshot
    #[error("Already at the first step")]
    AtStart,

    /// Already past the last step
    #[error("Already at the last step")]
    AtEnd,

    /// Seek target outside `0..=steps`
    #[error("Position {position} is out of range (timeline has {len} positions)")]
    OutOfRange { position: usize, len: usize },

    /// Snapshot cache memory limit reached
    #[error("Snapshot memory limit exceeded: {current} + {requested} > {limit}")]
    SnapshotLimitExceeded {
        current: usize,
        requested: usize,
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(HistoryError::AtEnd.to_string(), "Already at the last step");
        assert_eq!(
            HistoryError::OutOfRange { position: 9, len: 4 }.to_string(),
            "Position 9 is out of range (timeline has 4 positions)"
        );
    }
}
