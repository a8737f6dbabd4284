// Fees domain module
// 수수료 도메인 모듈
pub mod models;
pub mod services;

pub use models::*;
