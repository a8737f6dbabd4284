// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 수수료/슬러그 통합 테스트에서 공통으로 사용하는 픽스처 제공
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[test]
// fn test_something() {
//     let fees = fee_service();
//     // 테스트 코드...
// }
// ```
// =====================================================

use async_trait::async_trait;
use marketplace_core::{FeeService, SellerStats, SlugExistenceCheck, SlugService, SuffixSource};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

// 테스트용 상수
pub const TEST_SUFFIX: &str = "abc123";

/// 수수료 서비스 생성
pub fn fee_service() -> FeeService {
    FeeService::new()
}

/// 고정 접미사를 쓰는 슬러그 서비스 생성 (결정적 결과)
/// Slug service with a fixed suffix (deterministic output)
pub fn deterministic_slug_service() -> SlugService {
    SlugService::with_suffix_source(Arc::new(FixedSuffixSource(TEST_SUFFIX)))
}

/// 고정 접미사 스텁
/// Fixed-suffix stub
pub struct FixedSuffixSource(pub &'static str);

impl SuffixSource for FixedSuffixSource {
    fn next_alphanumeric(&self, len: usize) -> String {
        self.0.chars().take(len).collect()
    }
}

/// 인메모리 슬러그 저장소 (존재 확인 협력자 구현)
/// In-memory slug store implementing the existence-check collaborator
///
/// `insert`로 점유 상태를 만들고, 확인 호출 횟수를 기록합니다.
pub struct InMemorySlugStore {
    taken: Mutex<HashSet<String>>,
    checks: Mutex<u32>,
}

impl InMemorySlugStore {
    pub fn new() -> Self {
        Self {
            taken: Mutex::new(HashSet::new()),
            checks: Mutex::new(0),
        }
    }

    /// 슬러그를 점유 상태로 등록
    pub fn insert(&self, slug: &str) {
        self.taken.lock().expect("lock poisoned").insert(slug.to_string());
    }

    /// 존재 확인이 호출된 횟수
    pub fn check_count(&self) -> u32 {
        *self.checks.lock().expect("lock poisoned")
    }
}

#[async_trait]
impl SlugExistenceCheck for InMemorySlugStore {
    async fn slug_exists(&self, slug: &str) -> anyhow::Result<bool> {
        *self.checks.lock().expect("lock poisoned") += 1;
        Ok(self.taken.lock().expect("lock poisoned").contains(slug))
    }
}

/// 기존 판매자 실적 (할인 해당 없음)
pub fn established_seller() -> SellerStats {
    SellerStats {
        transaction_count: 50,
        is_verified: false,
        rating: 4.2,
    }
}

/// 최우수 판매자 실적 (전체 할인 해당)
pub fn top_seller() -> SellerStats {
    SellerStats {
        transaction_count: 3,
        is_verified: true,
        rating: 4.9,
    }
}
