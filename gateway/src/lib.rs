pub mod config;
pub mod core;
pub mod dialog;
pub mod errors;
pub mod handlers;
pub mod markup;
pub mod routes;
pub mod state;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::ServerConfig;
pub use dialog::DialogEngine;
pub use errors::{AdapterError, DialogError, DialogResult};
pub use state::AppState;
