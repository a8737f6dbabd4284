// Fees domain models
pub mod fee;

pub use fee::*;
