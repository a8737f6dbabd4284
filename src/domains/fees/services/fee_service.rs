// Fees Service
// 수수료 서비스
// 역할: 거래 금액 → 수수료율/커미션/결제 수수료/정산액 계산

use crate::domains::fees::models::fee::{FeeBreakdown, FeeDiscounts, FeeTier, SellerStats, TotalWithFee};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// 결제 대행사 수수료율 (3.6%)
/// Payment processor rate (3.6%)
pub const PROCESSING_FEE_RATE: Decimal = dec!(0.036);

/// 결제 대행사 건당 고정 수수료 (10엔)
/// Payment processor fixed fee per transaction (10 yen)
pub const PROCESSING_FEE_FIXED: i64 = 10;

/// 할인 적용 후 수수료율 하한 (10%)
/// Floor for the effective commission rate after discounts (10%)
pub const MIN_COMMISSION_RATE: Decimal = dec!(0.10);

/// 신규 판매자 할인 (-5%)
/// New-seller discount (-5%)
pub const NEW_SELLER_DISCOUNT: Decimal = dec!(0.05);

/// 본인 인증 할인 (-2%)
/// Verified-seller discount (-2%)
pub const VERIFIED_SELLER_DISCOUNT: Decimal = dec!(0.02);

/// 우수 평점 할인 (-3%)
/// Top-rated discount (-3%)
pub const TOP_RATED_DISCOUNT: Decimal = dec!(0.03);

/// 신규 판매자 기준: 완료 거래 수가 이 값 미만
/// New-seller threshold: fewer completed transactions than this
pub const NEW_SELLER_TRANSACTION_THRESHOLD: u32 = 5;

/// 우수 평점 기준 (4.8 이상)
/// Top-rated threshold (4.8 or higher)
pub const TOP_RATED_MIN_RATING: f64 = 4.8;

/// 최소 거래 금액 (1,000엔)
/// Minimum transaction amount (1,000 yen)
///
/// 이 모듈은 최소 금액을 강제하지 않습니다. 금액 검증은 호출자(핸들러 계층)의
/// 정책입니다.
/// This module never enforces the minimum; rejecting amounts below it is
/// caller-side policy.
pub const MIN_TRANSACTION_AMOUNT: i64 = 1000;

/// 리스팅 수수료 단계 테이블 (단순 경로)
/// Listing fee tier table (simple path)
///
/// `get_fee_rate`가 사용하는 테이블입니다. 경계 금액(10,000 / 50,000 /
/// 100,000엔)은 다음(상위) 단계에 속합니다: 10,000엔은 20%.
/// Backs `get_fee_rate`. A boundary amount (10,000 / 50,000 / 100,000 yen)
/// belongs to the NEXT (upper) tier: 10,000 yen is 20%.
///
/// 협상 거래 테이블(`negotiated_fee_tiers`)과 경계 방향이 다르므로 두 테이블을
/// 합치면 안 됩니다.
/// The boundary direction differs from `negotiated_fee_tiers`; the two tables
/// must stay separate.
pub fn listing_fee_tiers() -> Vec<FeeTier> {
    vec![
        FeeTier { min: 0, max: Some(9_999), rate: dec!(0.25) },
        FeeTier { min: 10_000, max: Some(49_999), rate: dec!(0.20) },
        FeeTier { min: 50_000, max: Some(99_999), rate: dec!(0.18) },
        FeeTier { min: 100_000, max: None, rate: dec!(0.15) },
    ]
}

/// 협상 거래 수수료 단계 테이블 (상세 경로)
/// Negotiated-transaction fee tier table (breakdown path)
///
/// `calculate_fee_rate` / `calculate_total_fees`가 사용하는 테이블입니다.
/// 각 단계의 상한은 포함 경계입니다: 50,000엔은 25%.
/// Backs `calculate_fee_rate` / `calculate_total_fees`. Each tier's upper
/// bound is inclusive: 50,000 yen is 25%.
pub fn negotiated_fee_tiers() -> Vec<FeeTier> {
    vec![
        FeeTier { min: 0, max: Some(50_000), rate: dec!(0.25) },
        FeeTier { min: 50_001, max: Some(100_000), rate: dec!(0.22) },
        FeeTier { min: 100_001, max: Some(200_000), rate: dec!(0.20) },
        FeeTier { min: 200_001, max: Some(500_000), rate: dec!(0.18) },
        FeeTier { min: 500_001, max: None, rate: dec!(0.15) },
    ]
}

/// 수수료 계산 서비스
/// Fee Calculation Service
///
/// 역할:
/// - 리스팅 수수료율 조회 및 구매자 총액 계산
/// - 판매자 할인을 반영한 협상 거래 수수료율 계산
/// - 커미션/결제 수수료/정산액 상세 내역 계산
///
/// 사용처:
/// - ListingHandler: 리스팅 등록 시 구매자 총액 견적
/// - PaymentHandler: 결제 인텐트 생성 전 정산 내역 계산
///
/// 모든 연산은 순수 함수이며 실패하지 않습니다. 음수/0 금액도 정의된 출력을
/// 반환합니다 (에러 아님).
/// Every operation is a total pure function; negative or zero amounts produce
/// defined outputs, never errors.
#[derive(Clone, Default)]
pub struct FeeService;

impl FeeService {
    /// 생성자
    /// Constructor
    pub fn new() -> Self {
        Self
    }

    /// 리스팅 수수료율 조회
    /// Get the listing fee rate for an amount
    ///
    /// # Arguments
    /// * `amount` - 거래 금액 (엔, 0 이하도 허용)
    ///
    /// # Returns
    /// 수수료율 (0 초과 1 이하). 0 이하 금액은 최저 단계(25%)로 처리됩니다.
    ///
    /// # Examples
    /// ```
    /// use marketplace_core::FeeService;
    /// use rust_decimal_macros::dec;
    ///
    /// let fees = FeeService::new();
    /// assert_eq!(fees.get_fee_rate(5_000), dec!(0.25));
    /// assert_eq!(fees.get_fee_rate(10_000), dec!(0.20)); // 경계는 상위 단계
    /// ```
    pub fn get_fee_rate(&self, amount: i64) -> Decimal {
        Self::rate_for(&listing_fee_tiers(), amount)
    }

    /// 리스팅 수수료 금액 계산
    /// Calculate the listing fee amount
    ///
    /// `round(amount * rate)` 반올림(사사오입). 0 이하 금액은 0을 반환합니다.
    /// Half-up rounding; amounts at or below zero return 0 (clamped).
    pub fn calculate_fee(&self, amount: i64) -> i64 {
        if amount <= 0 {
            return 0;
        }
        Self::round_half_up(Decimal::from(amount) * self.get_fee_rate(amount))
    }

    /// 구매자 총액 견적 (금액 + 수수료)
    /// Quote the buyer-side total (amount plus fee)
    pub fn calculate_total_with_fee(&self, amount: i64) -> TotalWithFee {
        let fee = self.calculate_fee(amount);
        TotalWithFee {
            original_amount: amount,
            fee,
            total: amount + fee,
            fee_rate: self.get_fee_rate(amount),
        }
    }

    /// 협상 거래 수수료율 계산 (판매자 할인 반영)
    /// Calculate the negotiated-transaction fee rate (seller discounts applied)
    ///
    /// 기본율은 협상 거래 단계 테이블에서 조회하고, 판매자 정보가 전달되면
    /// 할인을 누적 차감합니다:
    /// - 거래 5건 미만: -5%
    /// - 본인 인증: -2%
    /// - 평점 4.8 이상: -3%
    ///
    /// 할인 결과는 10% 아래로 내려가지 않습니다.
    /// The discounted rate never drops below the 10% floor.
    pub fn calculate_fee_rate(&self, amount: i64, seller_stats: Option<&SellerStats>) -> Decimal {
        let base = Self::rate_for(&negotiated_fee_tiers(), amount);
        let rate = match seller_stats {
            Some(stats) => Self::apply_seller_discounts(base, stats).0,
            None => base,
        };
        rate.max(MIN_COMMISSION_RATE)
    }

    /// 수수료 상세 내역 계산
    /// Calculate the full fee breakdown
    ///
    /// # Arguments
    /// * `amount` - 거래 금액 (엔)
    /// * `seller_stats` - 판매자 실적 (할인 적용용, 선택)
    ///
    /// # Returns
    /// 커미션, 결제 수수료, 총 수수료, 정산액을 담은 `FeeBreakdown`.
    ///
    /// 정산액에는 하한이 없습니다. 소액 거래에서 정산액이 음수가 될 수 있으며,
    /// `MIN_TRANSACTION_AMOUNT` 미만 금액의 거절은 호출자 책임입니다.
    /// No floor is applied to `net_amount`; rejecting amounts below
    /// `MIN_TRANSACTION_AMOUNT` is the caller's responsibility.
    ///
    /// # Examples
    /// ```
    /// use marketplace_core::FeeService;
    ///
    /// let fees = FeeService::new();
    /// let breakdown = fees.calculate_total_fees(10_000, None);
    /// assert_eq!(breakdown.commission_fee, 2_500); // 25%
    /// assert_eq!(breakdown.processing_fee, 370);   // 3.6% + 10엔
    /// assert_eq!(breakdown.net_amount, 7_130);
    /// ```
    pub fn calculate_total_fees(
        &self,
        amount: i64,
        seller_stats: Option<&SellerStats>,
    ) -> FeeBreakdown {
        let base = Self::rate_for(&negotiated_fee_tiers(), amount);
        let (fee_rate, discounts) = match seller_stats {
            Some(stats) => {
                let (rate, applied) = Self::apply_seller_discounts(base, stats);
                (rate, Some(applied))
            }
            None => (base.max(MIN_COMMISSION_RATE), None),
        };

        // 수수료 산출은 0 이상 금액 기준 (수수료가 음수가 되지 않도록)
        // Percentage components are computed on max(amount, 0); fees never go negative
        let charged = Decimal::from(amount.max(0));
        let commission_fee = Self::round_half_up(charged * fee_rate);
        let processing_fee = Self::round_half_up(charged * PROCESSING_FEE_RATE) + PROCESSING_FEE_FIXED;
        let total_fees = commission_fee + processing_fee;

        FeeBreakdown {
            amount,
            fee_rate,
            commission_fee,
            processing_fee,
            total_fees,
            net_amount: amount - total_fees,
            discounts,
        }
    }

    /// 단계 테이블에서 수수료율 조회
    /// Look up the rate for an amount in a tier table
    ///
    /// 0 이하 금액은 최저 단계로 처리합니다. 테이블은 상한 포함 기준으로
    /// 연속이므로 항상 하나의 단계에 해당합니다.
    fn rate_for(tiers: &[FeeTier], amount: i64) -> Decimal {
        let amount = amount.max(0);
        for tier in tiers {
            match tier.max {
                Some(max) if amount > max => continue,
                _ => return tier.rate,
            }
        }
        // 마지막 단계는 상한이 없으므로 여기 도달하지 않음
        tiers.last().map(|tier| tier.rate).unwrap_or(Decimal::ZERO)
    }

    /// 판매자 할인 적용
    /// Apply seller discounts to a base rate
    ///
    /// 할인은 누적(가산 차감)이며, 결과는 10% 하한으로 클램프됩니다.
    /// 반환되는 할인 내역은 하한 적용 전 실제 차감된 할인율입니다.
    fn apply_seller_discounts(base: Decimal, stats: &SellerStats) -> (Decimal, FeeDiscounts) {
        let mut rate = base;
        let mut applied = FeeDiscounts {
            new_seller: None,
            verified: None,
            top_rated: None,
        };

        if stats.transaction_count < NEW_SELLER_TRANSACTION_THRESHOLD {
            rate -= NEW_SELLER_DISCOUNT;
            applied.new_seller = Some(NEW_SELLER_DISCOUNT);
        }
        if stats.is_verified {
            rate -= VERIFIED_SELLER_DISCOUNT;
            applied.verified = Some(VERIFIED_SELLER_DISCOUNT);
        }
        if stats.rating >= TOP_RATED_MIN_RATING {
            rate -= TOP_RATED_DISCOUNT;
            applied.top_rated = Some(TOP_RATED_DISCOUNT);
        }

        (rate.max(MIN_COMMISSION_RATE), applied)
    }

    /// 사사오입 반올림 후 정수(엔) 변환
    /// Round half-up and narrow to whole yen
    fn round_half_up(value: Decimal) -> i64 {
        value
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0)
    }
}
