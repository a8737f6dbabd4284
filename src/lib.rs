// Marketplace Core
// 마켓플레이스 코어 라이브러리
// 역할: 수수료 계산과 슬러그 생성 비즈니스 로직 제공
//
// 이 크레이트는 역경매 과외 마켓플레이스의 핵심 유틸리티 계층입니다.
// This crate is the core utility layer of the reverse-auction tutoring marketplace.
//
// 포함:
// - fees: 단계별 수수료율, 판매자 할인, 결제 수수료 계산
// - listings: 레슨 제목 → URL 슬러그 변환 (일본어/영어 혼용 지원)
//
// 포함하지 않음 (외부 협력자):
// - 인증, 데이터베이스, 결제 처리, HTTP 라우팅은 상위 애플리케이션이 담당

pub mod domains;
pub mod shared;

// 주요 타입 재노출 (핸들러 계층에서 바로 사용)
// Re-export the main types for the handler layer
pub use domains::fees::models::{FeeBreakdown, FeeDiscounts, FeeTier, SellerStats, TotalWithFee};
pub use domains::fees::services::FeeService;
pub use domains::listings::services::{SlugExistenceCheck, SlugService};
pub use shared::errors::SlugError;
pub use shared::utils::{RandomSuffixSource, SuffixSource};
