// Node module - HOW THE CONSOLE TALKS TO A PEER
// Wire types, the peer endpoint trait, the HTTP client, and a mock for tests

mod client;
mod mock;
mod types;

pub use client::{NodeClient, NodeError, PeerEndpoint};
pub use mock::MockNode;
pub use types::{Block, MineReceipt, PeerAddress, ResolveStatus, Transaction};
