// Listings domain module
// 레슨 리스팅 도메인 모듈
pub mod models;
pub mod services;

pub use models::*;
