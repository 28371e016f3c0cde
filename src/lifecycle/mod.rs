//! Process-level plumbing: spawning and wiring the actors, and logging setup.

pub mod system;
pub mod tracing;

pub use system::StoreSystem;
pub use tracing::setup_tracing;
