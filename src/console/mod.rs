// Console module - WHAT THE USER SEES
// Session state driven by the CLI; failures become status lines

mod session;

pub use session::Session;
