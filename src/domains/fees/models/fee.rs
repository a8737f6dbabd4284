use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =====================================================
// 수수료 모델
// =====================================================
// 역할: 수수료 계산의 입출력 값 객체
// 설명: 플랫폼 중개 수수료(커미션)와 결제 수수료를 표현
//
// 수수료 계산:
// - 커미션 = 거래 금액 * 수수료율 (단계별 + 판매자 할인)
// - 결제 수수료 = 거래 금액 * 3.6% + 10엔 (결제 대행사 비용)
// - 정산액 = 거래 금액 - (커미션 + 결제 수수료)
//
// 금액 단위:
// - 모든 금액 필드는 엔(yen) 정수 (최소 통화 단위, 소수점 없음)
// =====================================================

/// 수수료 단계 (금액 구간 → 수수료율)
/// Fee tier (amount range mapped to a commission rate)
///
/// 단계 테이블은 min 오름차순으로 정렬되며, 구간이 겹치거나 비는 곳 없이
/// 음수가 아닌 모든 금액을 커버합니다.
/// Tier tables are sorted ascending by `min` and partition the whole
/// non-negative amount space with no gaps or overlaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeeTier {
    /// 구간 하한 (엔)
    /// Lower bound of the range (yen)
    #[schema(example = 10000)]
    pub min: i64,

    /// 구간 상한 (엔, None이면 무제한)
    /// Upper bound of the range (yen, None means unbounded above)
    #[schema(example = 50000)]
    pub max: Option<i64>,

    /// 수수료율 (소수점, 예: 0.20 = 20%)
    /// Commission rate (decimal, e.g., 0.20 = 20%)
    #[schema(value_type = String, example = "0.20")]
    pub rate: Decimal,
}

/// 판매자(강사) 실적 정보
/// Seller (teacher) qualification stats
///
/// 호출 시마다 전달되는 값 객체이며 이 컴포넌트는 저장하지 않습니다.
/// Passed in per calculation; never persisted by this component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SellerStats {
    /// 완료된 거래 수
    /// Number of completed transactions
    #[schema(example = 12)]
    pub transaction_count: u32,

    /// 본인 인증 완료 여부
    /// Identity verification status
    pub is_verified: bool,

    /// 평균 평점 (0.0 ~ 5.0)
    /// Average rating (0.0 to 5.0)
    #[schema(example = 4.9)]
    pub rating: f64,
}

/// 적용된 판매자 할인 내역
/// Seller discounts actually applied
///
/// 각 필드는 해당 할인이 적용된 경우에만 할인율을 담습니다.
/// Each field carries the discount rate only when that discount applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeeDiscounts {
    /// 신규 판매자 할인 (거래 5건 미만)
    /// New-seller discount (fewer than 5 transactions)
    #[schema(value_type = Option<String>, example = "0.05")]
    pub new_seller: Option<Decimal>,

    /// 본인 인증 할인
    /// Verified-seller discount
    #[schema(value_type = Option<String>, example = "0.02")]
    pub verified: Option<Decimal>,

    /// 우수 평점 할인 (평점 4.8 이상)
    /// Top-rated discount (rating 4.8 or higher)
    #[schema(value_type = Option<String>, example = "0.03")]
    pub top_rated: Option<Decimal>,
}

/// 수수료 상세 내역 (정산 기준)
/// Fee breakdown (settlement view)
///
/// 호출마다 새로 생성되는 불변 값 객체입니다.
/// Constructed fresh per call, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeeBreakdown {
    /// 거래 금액 (엔)
    /// Gross transaction amount (yen)
    #[schema(example = 10000)]
    pub amount: i64,

    /// 적용된 수수료율 (할인 반영, 최저 10%)
    /// Effective commission rate (discounts applied, floored at 10%)
    #[schema(value_type = String, example = "0.25")]
    pub fee_rate: Decimal,

    /// 플랫폼 커미션 (엔)
    /// Platform commission (yen)
    #[schema(example = 2500)]
    pub commission_fee: i64,

    /// 결제 수수료 (엔): 금액 * 3.6% + 10엔
    /// Payment processing fee (yen): amount * 3.6% + 10 yen
    #[schema(example = 370)]
    pub processing_fee: i64,

    /// 총 수수료 (커미션 + 결제 수수료)
    /// Total fees (commission + processing)
    #[schema(example = 2870)]
    pub total_fees: i64,

    /// 판매자 정산액 (거래 금액 - 총 수수료)
    /// Net amount paid out to the seller (amount - total fees)
    #[schema(example = 7130)]
    pub net_amount: i64,

    /// 적용된 할인 내역 (판매자 정보가 전달된 경우에만)
    /// Applied discounts (present only when seller stats were supplied)
    pub discounts: Option<FeeDiscounts>,
}

/// 구매자 총액 견적
/// Buyer-side total quote (amount plus listing fee)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TotalWithFee {
    /// 원래 금액 (엔)
    /// Original amount (yen)
    #[schema(example = 10000)]
    pub original_amount: i64,

    /// 수수료 (엔)
    /// Fee (yen)
    #[schema(example = 2000)]
    pub fee: i64,

    /// 수수료 포함 총액 (엔)
    /// Total including fee (yen)
    #[schema(example = 12000)]
    pub total: i64,

    /// 적용된 수수료율
    /// Applied fee rate
    #[schema(value_type = String, example = "0.20")]
    pub fee_rate: Decimal,
}
