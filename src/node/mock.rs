// Mock Node - Scripted PeerEndpoint for tests
//
// Lets orchestrator, registry, and session tests run without a backend.
// Each operation returns a scripted response and counts invocations, so
// tests can assert a call site was reached even when its sibling fails.
// Responses sit behind mutexes so tests can reprogram a node mid-run
// through a shared Arc handle.

use super::{Block, MineReceipt, NodeError, PeerAddress, PeerEndpoint, ResolveStatus, Transaction};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

fn unreachable_error(peer: &PeerAddress) -> NodeError {
    NodeError::Connection {
        peer: peer.clone(),
        reason: "mock peer configured unreachable".to_string(),
    }
}

/// Mock implementation of [`PeerEndpoint`] with scripted responses.
/// A `None` slot makes the corresponding call fail with a connection
/// error.
pub struct MockNode {
    address: PeerAddress,
    resolve_message: Mutex<Option<String>>,
    chain: Mutex<Option<Vec<Block>>>,
    registered: Mutex<Option<Vec<PeerAddress>>>,
    reachable: bool,
    resolve_calls: AtomicUsize,
    register_calls: AtomicUsize,
    list_calls: AtomicUsize,
    chain_calls: AtomicUsize,
    mine_calls: AtomicUsize,
    transaction_calls: AtomicUsize,
}

impl MockNode {
    /// Create a reachable mock that reports no resolution change
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: PeerAddress::new(address),
            resolve_message: Mutex::new(Some("no changes needed".to_string())),
            chain: Mutex::new(Some(Vec::new())),
            registered: Mutex::new(Some(Vec::new())),
            reachable: true,
            resolve_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            chain_calls: AtomicUsize::new(0),
            mine_calls: AtomicUsize::new(0),
            transaction_calls: AtomicUsize::new(0),
        }
    }

    /// Script the resolve message
    pub fn with_resolve_message(self, message: &str) -> Self {
        self.set_resolve_message(message);
        self
    }

    /// Make resolve_conflicts fail with a connection error
    pub fn with_resolve_failure(self) -> Self {
        self.fail_resolve();
        self
    }

    /// Script the chain returned by fetch_chain
    pub fn with_chain(self, chain: Vec<Block>) -> Self {
        self.set_chain(chain);
        self
    }

    /// Make fetch_chain fail with a connection error
    pub fn with_chain_failure(self) -> Self {
        self.fail_chain();
        self
    }

    /// Make register_nodes and list_nodes fail
    pub fn with_register_failure(self) -> Self {
        *self.registered.lock().unwrap() = None;
        self
    }

    /// Make mine and submit_transaction fail
    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    /// Reprogram the resolve message on a live mock
    pub fn set_resolve_message(&self, message: &str) {
        *self.resolve_message.lock().unwrap() = Some(message.to_string());
    }

    /// Start failing resolve_conflicts on a live mock
    pub fn fail_resolve(&self) {
        *self.resolve_message.lock().unwrap() = None;
    }

    /// Reprogram the chain on a live mock
    pub fn set_chain(&self, chain: Vec<Block>) {
        *self.chain.lock().unwrap() = Some(chain);
    }

    /// Start failing fetch_chain on a live mock
    pub fn fail_chain(&self) {
        *self.chain.lock().unwrap() = None;
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn chain_calls(&self) -> usize {
        self.chain_calls.load(Ordering::SeqCst)
    }

    pub fn mine_calls(&self) -> usize {
        self.mine_calls.load(Ordering::SeqCst)
    }

    pub fn transaction_calls(&self) -> usize {
        self.transaction_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PeerEndpoint for MockNode {
    fn address(&self) -> &PeerAddress {
        &self.address
    }

    async fn mine(&self) -> Result<MineReceipt, NodeError> {
        self.mine_calls.fetch_add(1, Ordering::SeqCst);
        if !self.reachable {
            return Err(unreachable_error(&self.address));
        }
        Ok(MineReceipt {
            message: "New Block Forged".to_string(),
            index: 1,
        })
    }

    async fn submit_transaction(&self, _tx: &Transaction) -> Result<String, NodeError> {
        self.transaction_calls.fetch_add(1, Ordering::SeqCst);
        if !self.reachable {
            return Err(unreachable_error(&self.address));
        }
        Ok("Transaction will be added to Block 1".to_string())
    }

    async fn fetch_chain(&self) -> Result<Vec<Block>, NodeError> {
        self.chain_calls.fetch_add(1, Ordering::SeqCst);
        self.chain
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| unreachable_error(&self.address))
    }

    async fn register_nodes(&self, peers: &[PeerAddress]) -> Result<Vec<PeerAddress>, NodeError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.registered.lock().unwrap();
        match guard.as_mut() {
            Some(known) => {
                // Server-side registration is idempotent: no duplicates
                for peer in peers {
                    if !known.contains(peer) {
                        known.push(peer.clone());
                    }
                }
                Ok(known.clone())
            }
            None => Err(unreachable_error(&self.address)),
        }
    }

    async fn list_nodes(&self) -> Result<Vec<PeerAddress>, NodeError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let guard = self.registered.lock().unwrap();
        guard
            .clone()
            .ok_or_else(|| unreachable_error(&self.address))
    }

    async fn resolve_conflicts(&self) -> Result<ResolveStatus, NodeError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        let guard = self.resolve_message.lock().unwrap();
        match guard.as_deref() {
            Some(message) => Ok(ResolveStatus::from_message(message)),
            None => Err(unreachable_error(&self.address)),
        }
    }
}
