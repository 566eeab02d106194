// CoinSync - Stateless HTTP console for a two-node coin network
//
// Mining, the transaction pool, and longest-chain consensus live in the
// node backends; this crate registers two peers with each other, runs
// conflict resolution independently on both, and classifies the result.

pub mod console;
pub mod node;
pub mod registry;
pub mod routes;
pub mod sync;
