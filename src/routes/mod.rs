// Routes module - WHERE THE NODES LIVE
// Symbolic node-name routing, so application logic never carries URLs

mod table;

pub use table::{RouteError, RouteTable, DEFAULT_NODE1, DEFAULT_NODE2};
