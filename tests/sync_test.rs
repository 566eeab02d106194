// Orchestrator Tests
// Scenario matrix for dual-node synchronization under partial failure

use coinsync::node::{Block, MockNode, PeerEndpoint};
use coinsync::sync::{Orchestrator, SyncOutcome};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn block(index: u64) -> Block {
    Block {
        index,
        timestamp: 1_700_000_000.0 + index as f64,
        proof: 100 + index,
        previous_hash: format!("hash-{}", index - 1),
        transactions: Vec::new(),
    }
}

// ============================================================================
// OUTCOME SCENARIOS
// ============================================================================

#[tokio::test]
async fn test_replaced_plus_authoritative_is_fully_synced() {
    let a = MockNode::new("http://a:10000").with_resolve_message("Our chain was replaced");
    let b = MockNode::new("http://b:10001").with_resolve_message("Our chain is authoritative");

    let report = Orchestrator::new(&a, &b).synchronize().await;
    assert_eq!(report.outcome(), SyncOutcome::FullySynced);
}

#[tokio::test]
async fn test_replaced_plus_network_error_is_partially_synced() {
    let a = MockNode::new("http://a:10000").with_resolve_message("Our chain was replaced");
    let b = MockNode::new("http://b:10001").with_resolve_failure();

    let report = Orchestrator::new(&a, &b).synchronize().await;
    assert_eq!(report.outcome(), SyncOutcome::PartiallySynced);
    assert!(report.side_b().errored());
}

#[tokio::test]
async fn test_no_changes_on_both_is_already_synced() {
    let a = MockNode::new("http://a:10000").with_resolve_message("no changes needed");
    let b = MockNode::new("http://b:10001").with_resolve_message("no changes needed");

    let report = Orchestrator::new(&a, &b).synchronize().await;
    assert_eq!(report.outcome(), SyncOutcome::AlreadySynced);
}

#[tokio::test]
async fn test_both_erroring_is_failed() {
    let a = MockNode::new("http://a:10000").with_resolve_failure();
    let b = MockNode::new("http://b:10001").with_resolve_failure();

    let report = Orchestrator::new(&a, &b).synchronize().await;
    assert_eq!(report.outcome(), SyncOutcome::Failed);
    assert!(report.status_message().contains("Synchronization failed"));
}

#[tokio::test]
async fn test_outcome_is_side_order_independent() {
    let a = MockNode::new("http://a:10000").with_resolve_message("Our chain was replaced");
    let b = MockNode::new("http://b:10001").with_resolve_message("no changes needed");

    let forward = Orchestrator::new(&a, &b).synchronize().await;
    let backward = Orchestrator::new(&b, &a).synchronize().await;
    assert_eq!(forward.outcome(), SyncOutcome::PartiallySynced);
    assert_eq!(forward.outcome(), backward.outcome());
}

// ============================================================================
// FAILURE ISOLATION
// ============================================================================

#[tokio::test]
async fn test_resolve_attempted_on_b_when_a_fails() {
    let a = MockNode::new("http://a:10000").with_resolve_failure();
    let b = MockNode::new("http://b:10001").with_resolve_message("Our chain is authoritative");

    let report = Orchestrator::new(&a, &b).synchronize().await;

    // A's failure must not have stopped B's call from being issued
    assert_eq!(a.resolve_calls(), 1);
    assert_eq!(b.resolve_calls(), 1);
    assert_eq!(report.outcome(), SyncOutcome::PartiallySynced);
}

#[tokio::test]
async fn test_registration_failure_does_not_block_resolution() {
    let a = MockNode::new("http://a:10000")
        .with_register_failure()
        .with_resolve_message("Our chain was replaced");
    let b = MockNode::new("http://b:10001").with_resolve_message("Our chain was replaced");

    let report = Orchestrator::new(&a, &b).synchronize().await;

    assert_eq!(report.registration_failures().len(), 1);
    assert_eq!(a.resolve_calls(), 1);
    assert_eq!(b.resolve_calls(), 1);
    assert_eq!(report.outcome(), SyncOutcome::FullySynced);

    let message = report.registration_message().unwrap();
    assert!(message.contains("http://a:10000"));
}

#[tokio::test]
async fn test_both_registrations_attempted_when_one_fails() {
    let a = MockNode::new("http://a:10000").with_register_failure();
    let b = MockNode::new("http://b:10001");

    Orchestrator::new(&a, &b).synchronize().await;

    assert_eq!(a.register_calls(), 1);
    assert_eq!(b.register_calls(), 1);
}

#[tokio::test]
async fn test_partial_registration_is_not_rolled_back() {
    let a = MockNode::new("http://a:10000").with_register_failure();
    let b = MockNode::new("http://b:10001");

    Orchestrator::new(&a, &b).synchronize().await;

    // B successfully learned about A and keeps it
    let known = b.list_nodes().await.unwrap();
    assert!(known.contains(&"http://a:10000".into()));
}

// ============================================================================
// MUTUAL REGISTRATION
// ============================================================================

#[tokio::test]
async fn test_each_peer_learns_the_other() {
    let a = MockNode::new("http://a:10000");
    let b = MockNode::new("http://b:10001");

    let report = Orchestrator::new(&a, &b).synchronize().await;

    assert!(report.registration_failures().is_empty());
    assert!(report.registration_message().is_none());
    let a_knows = a.list_nodes().await.unwrap();
    let b_knows = b.list_nodes().await.unwrap();
    assert_eq!(a_knows, vec!["http://b:10001".into()]);
    assert_eq!(b_knows, vec!["http://a:10000".into()]);
}

#[tokio::test]
async fn test_repeated_sync_registers_without_duplicates() {
    let a = MockNode::new("http://a:10000");
    let b = MockNode::new("http://b:10001");
    let orchestrator = Orchestrator::new(&a, &b);

    orchestrator.synchronize().await;
    orchestrator.synchronize().await;

    assert_eq!(a.list_nodes().await.unwrap().len(), 1);
    assert_eq!(b.list_nodes().await.unwrap().len(), 1);
}

// ============================================================================
// POST-SYNC CHAIN REFRESH
// ============================================================================

#[tokio::test]
async fn test_chain_refreshed_after_classification() {
    let a = MockNode::new("http://a:10000")
        .with_resolve_message("Our chain was replaced")
        .with_chain(vec![block(1), block(2)]);
    let b = MockNode::new("http://b:10001");

    let report = Orchestrator::new(&a, &b).synchronize().await;

    assert_eq!(a.chain_calls(), 1);
    assert_eq!(report.refreshed_chain().unwrap().len(), 2);
}

#[tokio::test]
async fn test_chain_refresh_attempted_even_when_sync_fails() {
    let a = MockNode::new("http://a:10000")
        .with_resolve_failure()
        .with_chain(vec![block(1)]);
    let b = MockNode::new("http://b:10001").with_resolve_failure();

    let report = Orchestrator::new(&a, &b).synchronize().await;

    assert_eq!(report.outcome(), SyncOutcome::Failed);
    assert_eq!(a.chain_calls(), 1);
    assert_eq!(report.refreshed_chain().unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_refresh_yields_no_chain() {
    let a = MockNode::new("http://a:10000").with_chain_failure();
    let b = MockNode::new("http://b:10001");

    let report = Orchestrator::new(&a, &b).synchronize().await;
    assert!(report.refreshed_chain().is_none());
}
