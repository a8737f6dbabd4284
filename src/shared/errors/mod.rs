// Shared errors
pub mod slug_error;

pub use slug_error::*;
