// Library entry so integration tests and external tools can reference internal modules.
// Re-export the same modules used by the binary (`main.rs`).
pub mod constants;
pub mod database;
pub mod model;
pub mod progression;
pub mod services;

// Convenient re-exports for frequently used types (optional expansion later).
pub use model::AppState;
