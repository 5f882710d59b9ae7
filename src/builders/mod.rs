pub mod grid;
pub mod session;

pub use grid::GridModelBuilder;
pub use session::AgentSessionBuilder;
