pub mod dialog_error;

pub use dialog_error::{AdapterError, DialogError, DialogResult};
