// Registry module - WHO THE HOME NODE KNOWS
// View over one node's registry listing, refreshed from the server

mod view;

pub use view::RegistryView;
