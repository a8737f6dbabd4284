// Listings services module
// 리스팅 서비스 모듈

pub mod slug_service;

pub use slug_service::*;
