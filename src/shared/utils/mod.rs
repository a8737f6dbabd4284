/// 공유 유틸리티 모듈
/// Shared Utilities Module
///
/// 역할:
/// - 랜덤 접미사 생성기 (슬러그 충돌 방지용)
/// - 기타 공통 유틸리티 함수
pub mod suffix_generator;

pub use suffix_generator::*;
