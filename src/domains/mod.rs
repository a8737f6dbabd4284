// Domains module
// 도메인 모듈: 수수료 계산과 리스팅 슬러그
pub mod fees;
pub mod listings;
