// Fees services module
// 수수료 서비스 모듈

pub mod fee_service;

pub use fee_service::*;
