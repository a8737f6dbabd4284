// Listings domain models
pub mod slug;

pub use slug::*;
