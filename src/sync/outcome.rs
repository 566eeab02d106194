// Sync Outcome - Classifying two independent resolution results
//
// Pure reduction of the two per-side results into one status. Nothing
// here performs I/O; the orchestrator fills the slots, this module
// reads them.

use crate::node::{Block, NodeError, PeerAddress, ResolveStatus};

// ============================================================================
// SYNC OUTCOME
// ============================================================================

/// Aggregate result of running conflict resolution on both peers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Both peers reported a replacement or kept an authoritative chain
    FullySynced,
    /// Exactly one peer did
    PartiallySynced,
    /// Neither reported a change, but at least one call succeeded
    AlreadySynced,
    /// Both resolution calls errored; nothing is known about either peer
    Failed,
}

impl SyncOutcome {
    /// Reduce the two per-side results.
    ///
    /// Order independent: classify(a, b) == classify(b, a).
    pub fn classify(a: &SideReport, b: &SideReport) -> Self {
        if a.errored() && b.errored() {
            return SyncOutcome::Failed;
        }
        match (a.is_synced(), b.is_synced()) {
            (true, true) => SyncOutcome::FullySynced,
            (true, false) | (false, true) => SyncOutcome::PartiallySynced,
            (false, false) => SyncOutcome::AlreadySynced,
        }
    }
}

// ============================================================================
// SIDE REPORT
// ============================================================================

/// Result slot for one peer's resolution call
#[derive(Debug)]
pub struct SideReport {
    peer: PeerAddress,
    result: Result<ResolveStatus, NodeError>,
}

impl SideReport {
    /// Record one side's settled result
    pub fn new(peer: PeerAddress, result: Result<ResolveStatus, NodeError>) -> Self {
        Self { peer, result }
    }

    /// The peer this slot belongs to
    pub fn peer(&self) -> &PeerAddress {
        &self.peer
    }

    /// The classified status, if the call succeeded
    pub fn status(&self) -> Option<ResolveStatus> {
        self.result.as_ref().ok().copied()
    }

    /// Whether the call errored
    pub fn errored(&self) -> bool {
        self.result.is_err()
    }

    /// The underlying error's text, if the call errored
    pub fn error_text(&self) -> Option<String> {
        self.result.as_ref().err().map(|e| e.to_string())
    }

    /// Whether this side counts as synchronized. An errored call never
    /// does.
    pub fn is_synced(&self) -> bool {
        self.status().map(|s| s.is_synced()).unwrap_or(false)
    }
}

// ============================================================================
// REGISTRATION FAILURE
// ============================================================================

/// One side of mutual registration that could not be completed.
/// Partial registration is not rolled back; this is a record, not a fault.
#[derive(Debug)]
pub struct RegistrationFailure {
    /// The peer whose register call failed
    pub peer: PeerAddress,
    pub error: NodeError,
}

// ============================================================================
// SYNC REPORT
// ============================================================================

/// Everything the orchestrator learned in one synchronization run.
///
/// All state is carried here explicitly; the orchestrator holds nothing
/// between runs.
#[derive(Debug)]
pub struct SyncReport {
    outcome: SyncOutcome,
    side_a: SideReport,
    side_b: SideReport,
    registration_failures: Vec<RegistrationFailure>,
    /// Home node's chain fetched after classification; None if the
    /// refresh itself failed (callers keep their stale view).
    refreshed_chain: Option<Vec<Block>>,
}

impl SyncReport {
    pub(crate) fn new(
        side_a: SideReport,
        side_b: SideReport,
        registration_failures: Vec<RegistrationFailure>,
        refreshed_chain: Option<Vec<Block>>,
    ) -> Self {
        let outcome = SyncOutcome::classify(&side_a, &side_b);
        Self {
            outcome,
            side_a,
            side_b,
            registration_failures,
            refreshed_chain,
        }
    }

    pub fn outcome(&self) -> SyncOutcome {
        self.outcome
    }

    pub fn side_a(&self) -> &SideReport {
        &self.side_a
    }

    pub fn side_b(&self) -> &SideReport {
        &self.side_b
    }

    pub fn registration_failures(&self) -> &[RegistrationFailure] {
        &self.registration_failures
    }

    /// The post-sync chain refresh, if it succeeded
    pub fn refreshed_chain(&self) -> Option<&[Block]> {
        self.refreshed_chain.as_deref()
    }

    /// Take ownership of the refreshed chain
    pub fn into_refreshed_chain(self) -> Option<Vec<Block>> {
        self.refreshed_chain
    }

    /// Combined registration-failure message, if any side failed
    pub fn registration_message(&self) -> Option<String> {
        if self.registration_failures.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .registration_failures
            .iter()
            .map(|f| format!("registration with {} failed: {}", f.peer, f.error))
            .collect();
        Some(parts.join("; "))
    }

    /// One user-facing line describing the outcome
    pub fn status_message(&self) -> String {
        match self.outcome {
            SyncOutcome::FullySynced => "Both nodes synchronized.".to_string(),
            SyncOutcome::PartiallySynced => "Nodes partially synchronized.".to_string(),
            SyncOutcome::AlreadySynced => "Nodes already in sync.".to_string(),
            SyncOutcome::Failed => {
                let a = self.side_a.error_text().unwrap_or_default();
                let b = self.side_b.error_text().unwrap_or_default();
                format!("Synchronization failed: {}; {}", a, b)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn side(peer: &str, result: Result<ResolveStatus, NodeError>) -> SideReport {
        SideReport::new(PeerAddress::new(peer), result)
    }

    fn network_error(peer: &str) -> NodeError {
        NodeError::Connection {
            peer: PeerAddress::new(peer),
            reason: "connection refused".to_string(),
        }
    }

    #[test]
    fn test_classify_both_synced() {
        let a = side("a:1", Ok(ResolveStatus::Replaced));
        let b = side("b:2", Ok(ResolveStatus::Authoritative));
        assert_eq!(SyncOutcome::classify(&a, &b), SyncOutcome::FullySynced);
    }

    #[test]
    fn test_classify_order_independent() {
        let a = side("a:1", Ok(ResolveStatus::Replaced));
        let b = side("b:2", Ok(ResolveStatus::Unchanged));
        assert_eq!(
            SyncOutcome::classify(&a, &b),
            SyncOutcome::classify(&b, &a)
        );
    }

    #[test]
    fn test_classify_one_synced_one_errored() {
        let a = side("a:1", Ok(ResolveStatus::Replaced));
        let b = side("b:2", Err(network_error("b:2")));
        assert_eq!(SyncOutcome::classify(&a, &b), SyncOutcome::PartiallySynced);
    }

    #[test]
    fn test_classify_neither_changed() {
        let a = side("a:1", Ok(ResolveStatus::Unchanged));
        let b = side("b:2", Ok(ResolveStatus::Unchanged));
        assert_eq!(SyncOutcome::classify(&a, &b), SyncOutcome::AlreadySynced);
    }

    #[test]
    fn test_classify_one_errored_one_unchanged() {
        // A single reachable peer with no change is still "already in
        // sync", not a failure
        let a = side("a:1", Err(network_error("a:1")));
        let b = side("b:2", Ok(ResolveStatus::Unchanged));
        assert_eq!(SyncOutcome::classify(&a, &b), SyncOutcome::AlreadySynced);
    }

    #[test]
    fn test_classify_both_errored_is_failed() {
        let a = side("a:1", Err(network_error("a:1")));
        let b = side("b:2", Err(network_error("b:2")));
        assert_eq!(SyncOutcome::classify(&a, &b), SyncOutcome::Failed);
    }

    #[test]
    fn test_failed_status_message_carries_error_text() {
        let report = SyncReport::new(
            side("a:1", Err(network_error("a:1"))),
            side("b:2", Err(network_error("b:2"))),
            Vec::new(),
            None,
        );
        let message = report.status_message();
        assert!(message.contains("Synchronization failed"));
        assert!(message.contains("a:1"));
        assert!(message.contains("b:2"));
    }
}
