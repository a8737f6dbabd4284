// Slug Service
// 슬러그 서비스
// 역할: 레슨 제목 → URL 안전 슬러그 변환 및 고유 슬러그 할당

use crate::domains::listings::models::slug::{
    ALLOWED_SCRIPT_RANGES, DEFAULT_MAX_UNIQUE_ATTEMPTS, MAX_FRAGMENT_LEN, SUFFIX_LEN,
};
use crate::shared::errors::SlugError;
use crate::shared::utils::{RandomSuffixSource, SuffixSource};
use async_trait::async_trait;
use std::sync::Arc;

/// 슬러그 존재 확인 협력자
/// Slug existence-check collaborator
///
/// 보통 데이터베이스 존재 쿼리로 구현됩니다. 이 크레이트는 구현을 알지 못하며
/// 계약만 사용합니다. 에러는 그대로 호출자에게 전파됩니다.
/// Typically backed by a database existence query. This crate knows only the
/// contract; errors propagate to the caller unchanged.
#[async_trait]
pub trait SlugExistenceCheck: Send + Sync {
    /// 슬러그가 이미 사용 중인지 확인
    /// Check whether a slug is already taken
    async fn slug_exists(&self, slug: &str) -> anyhow::Result<bool>;
}

/// 슬러그 생성 서비스
/// Slug Generation Service
///
/// 역할:
/// - 제목 정규화 (소문자화, 허용 문자 필터, 구분자 접기, 길이 제한)
/// - 랜덤 접미사 부착 (충돌 회피)
/// - 존재 확인 협력자를 통한 고유 슬러그 할당
/// - 외부 입력 슬러그의 문법 검증
///
/// 사용처:
/// - ListingHandler: 레슨 등록 시 슬러그 발급
///
/// 일본어 제목과 영어 제목을 모두 지원합니다. 히라가나/가타카나/한자는
/// 그대로 보존되고, 라틴 문자는 소문자로 변환됩니다.
/// Supports both Japanese and Latin titles: kana and CJK ideographs pass
/// through unchanged while Latin letters are lowercased.
#[derive(Clone)]
pub struct SlugService {
    /// 접미사 난수원 (테스트에서 교체 가능)
    /// Suffix randomness source (replaceable in tests)
    suffix_source: Arc<dyn SuffixSource>,
}

impl Default for SlugService {
    fn default() -> Self {
        Self::new()
    }
}

impl SlugService {
    /// 생성자 (프로세스 전역 난수원 사용)
    /// Constructor (process-wide RNG source)
    pub fn new() -> Self {
        Self::with_suffix_source(Arc::new(RandomSuffixSource))
    }

    /// 난수원을 주입하는 생성자
    /// Constructor with an injected suffix source
    ///
    /// 테스트에서 결정적 스텁을 주입할 때 사용합니다.
    pub fn with_suffix_source(suffix_source: Arc<dyn SuffixSource>) -> Self {
        Self { suffix_source }
    }

    /// 슬러그 생성
    /// Generate a slug from a title
    ///
    /// 정규화된 조각에 하이픈과 6자 랜덤 접미사를 붙여 반환합니다. 조각이
    /// 비면 접미사만 반환합니다 (앞 하이픈 없음).
    /// Returns `fragment-suffix`, or just the 6-character suffix when the
    /// fragment is empty (no leading hyphen).
    ///
    /// 같은 제목으로 두 번 호출하면 접미사가 달라 서로 다른 슬러그가 나옵니다.
    /// 이는 고유성을 위한 의도된 동작입니다.
    /// Two calls with the same title produce different slugs (the suffix
    /// varies); this is uniqueness-enabling, by design.
    ///
    /// # Examples
    /// ```
    /// use marketplace_core::SlugService;
    ///
    /// let slugs = SlugService::new();
    /// let slug = slugs.generate_slug("Programming Lessons");
    /// assert!(slug.starts_with("programming-lessons-"));
    /// assert_eq!(slug.chars().count(), "programming-lessons".len() + 7);
    /// ```
    pub fn generate_slug(&self, title: &str) -> String {
        let fragment = Self::normalize_fragment(title);
        let suffix = self.suffix_source.next_alphanumeric(SUFFIX_LEN);
        if fragment.is_empty() {
            suffix
        } else {
            format!("{}-{}", fragment, suffix)
        }
    }

    /// 제목 정규화 (접미사 없는 순수 조각)
    /// Normalize a title into the slug fragment (no suffix)
    ///
    /// 처리 순서:
    /// 1. 소문자화 (라틴 문자만 영향, 일본어는 그대로)
    /// 2. 양끝 공백 제거
    /// 3. 허용 범위 밖 문자 제거 (구두점, 기호, 이모지)
    /// 4. 구분자(공백/밑줄/하이픈) 연속 구간을 하이픈 하나로 접기
    /// 5. 양끝 하이픈 제거
    /// 6. 50자 초과 시 자르고, 잘린 끝의 하이픈 제거
    ///
    /// 결정적이며 멱등입니다: 정규화 결과를 다시 정규화해도 같은 값입니다.
    /// Deterministic and idempotent: normalizing a normalized fragment is the
    /// identity.
    pub fn normalize_fragment(title: &str) -> String {
        let lowered = title.to_lowercase();
        let trimmed = lowered.trim();

        // 허용 문자와 공백만 남김
        // Keep whitelisted characters and whitespace only
        let filtered: String = trimmed
            .chars()
            .filter(|ch| ch.is_whitespace() || Self::is_allowed_char(*ch))
            .collect();

        // 구분자 연속 구간 → 하이픈 하나 (양끝 구분자는 버림)
        // Collapse separator runs into one hyphen, dropping edge separators
        let mut fragment = String::with_capacity(filtered.len());
        let mut pending_separator = false;
        for ch in filtered.chars() {
            if ch.is_whitespace() || ch == '_' || ch == '-' {
                pending_separator = true;
                continue;
            }
            if pending_separator && !fragment.is_empty() {
                fragment.push('-');
            }
            pending_separator = false;
            fragment.push(ch);
        }

        // 길이 제한 (문자 수 기준), 잘린 끝 하이픈 정리
        // Truncate by character count, then strip a dangling hyphen
        if fragment.chars().count() > MAX_FRAGMENT_LEN {
            fragment = fragment.chars().take(MAX_FRAGMENT_LEN).collect();
            fragment = fragment.trim_end_matches('-').to_string();
        }

        fragment
    }

    /// 고유 슬러그 할당 (기본 재시도 상한)
    /// Allocate a unique slug (default attempt cap)
    ///
    /// `generate_slug`로 기본 후보를 만들고, 이미 존재하면 `-1`, `-2`, ...
    /// 카운터를 붙여가며 재확인합니다. 랜덤 접미사 덕분에 이 루프는 방어적
    /// 장치일 뿐 거의 돌지 않습니다.
    /// Builds one base candidate; on collision appends `-1`, `-2`, ...
    /// re-checking each. The random suffix makes this loop a defensive
    /// fallback that almost never iterates.
    ///
    /// 같은 제목으로 동시에 호출하면 양쪽 다 존재 확인을 통과할 수 있습니다.
    /// 최종 고유성은 저장소의 유니크 제약이 보장해야 합니다.
    /// Concurrent callers can race past the check; the backing store's unique
    /// constraint is the real guarantee.
    pub async fn generate_unique_slug(
        &self,
        title: &str,
        exists_check: &dyn SlugExistenceCheck,
    ) -> Result<String, SlugError> {
        self.generate_unique_slug_with_attempts(title, exists_check, DEFAULT_MAX_UNIQUE_ATTEMPTS)
            .await
    }

    /// 고유 슬러그 할당 (재시도 상한 지정)
    /// Allocate a unique slug with an explicit attempt cap
    ///
    /// # Arguments
    /// * `title` - 레슨 제목
    /// * `exists_check` - 존재 확인 협력자 (보통 DB 쿼리)
    /// * `max_attempts` - 카운터 재시도 상한
    ///
    /// # Returns
    /// * `Ok(slug)` - 존재 확인을 통과한 슬러그
    /// * `Err(SlugError::UniqueAttemptsExhausted)` - 상한까지 실패
    /// * `Err(SlugError::ExistenceCheck)` - 협력자 에러 (그대로 전파)
    pub async fn generate_unique_slug_with_attempts(
        &self,
        title: &str,
        exists_check: &dyn SlugExistenceCheck,
        max_attempts: u32,
    ) -> Result<String, SlugError> {
        let base = self.generate_slug(title);
        if !exists_check.slug_exists(&base).await? {
            return Ok(base);
        }

        for counter in 1..=max_attempts {
            let candidate = format!("{}-{}", base, counter);
            if !exists_check.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(SlugError::UniqueAttemptsExhausted {
            attempts: max_attempts,
        })
    }

    /// 슬러그 문법 검증 (외부 입력용)
    /// Validate slug grammar (for externally supplied slugs)
    ///
    /// 소문자 라틴/숫자/하이픈과 히라가나/가타카나/한자만 허용, 1~50자,
    /// 하이픈으로 시작하거나 끝나면 안 됩니다. 이 컴포넌트가 생성한 긴
    /// 슬러그(최대 57자)가 아니라 외부에서 들어온 식별자를 방어적으로
    /// 검사하는 용도입니다.
    /// Lowercase Latin/digits/hyphens plus kana and CJK, 1-50 characters,
    /// no edge hyphens. A defensive check for foreign identifiers, not for
    /// this component's own (up to 57-character) output.
    pub fn is_valid_slug(slug: &str) -> bool {
        if slug.is_empty() || slug.chars().count() > MAX_FRAGMENT_LEN {
            return false;
        }
        if slug.starts_with('-') || slug.ends_with('-') {
            return false;
        }
        slug.chars().all(|ch| {
            ch.is_ascii_lowercase()
                || ch.is_ascii_digit()
                || ch == '-'
                || Self::is_japanese_char(ch)
        })
    }

    /// 허용 범위 테이블 조회
    /// Consult the whitelist table
    fn is_allowed_char(ch: char) -> bool {
        ALLOWED_SCRIPT_RANGES.iter().any(|range| range.contains(ch))
    }

    /// 히라가나/가타카나/한자 여부
    /// Hiragana, Katakana, or CJK Unified Ideograph
    fn is_japanese_char(ch: char) -> bool {
        ALLOWED_SCRIPT_RANGES
            .iter()
            .filter(|range| matches!(range.name, "hiragana" | "katakana" | "cjk-unified"))
            .any(|range| range.contains(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// 고정 접미사 스텁 (결정적 테스트용)
    /// Fixed-suffix stub for deterministic tests
    struct FixedSuffixSource(&'static str);

    impl SuffixSource for FixedSuffixSource {
        fn next_alphanumeric(&self, len: usize) -> String {
            self.0.chars().take(len).collect()
        }
    }

    /// 존재 확인 스텁: 등록된 슬러그만 "존재"로 응답
    /// Existence-check stub answering from an in-memory set
    struct FakeSlugStore {
        taken: Mutex<HashSet<String>>,
    }

    impl FakeSlugStore {
        fn with_taken(slugs: &[&str]) -> Self {
            Self {
                taken: Mutex::new(slugs.iter().map(|s| s.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl SlugExistenceCheck for FakeSlugStore {
        async fn slug_exists(&self, slug: &str) -> anyhow::Result<bool> {
            Ok(self.taken.lock().expect("lock poisoned").contains(slug))
        }
    }

    /// 존재 확인이 항상 실패하는 협력자
    /// Collaborator whose check always errors
    struct FailingSlugStore;

    #[async_trait]
    impl SlugExistenceCheck for FailingSlugStore {
        async fn slug_exists(&self, _slug: &str) -> anyhow::Result<bool> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    fn fixed_service() -> SlugService {
        SlugService::with_suffix_source(Arc::new(FixedSuffixSource("abc123")))
    }

    #[test]
    fn test_slug_latin_title() {
        // 라틴 제목: 소문자화 + 공백 → 하이픈
        let slugs = fixed_service();
        assert_eq!(slugs.generate_slug("Programming Lessons"), "programming-lessons-abc123");
    }

    #[test]
    fn test_slug_japanese_title() {
        // 일본어 제목은 그대로 보존
        let slugs = fixed_service();
        assert_eq!(slugs.generate_slug("プログラミング学習"), "プログラミング学習-abc123");
    }

    #[test]
    fn test_slug_mixed_title() {
        // 혼용 제목: 스크립트별 처리 (일본어 보존, 라틴 소문자화)
        let slugs = fixed_service();
        assert_eq!(
            slugs.generate_slug("プログラミング Programming 学習"),
            "プログラミング-programming-学習-abc123"
        );
    }

    #[test]
    fn test_slug_strips_punctuation_and_emoji() {
        // 구두점/이모지 제거
        let slugs = fixed_service();
        assert_eq!(slugs.generate_slug("Rust入門!! (初心者向け) 🦀"), "rust入門-初心者向け-abc123");
    }

    #[test]
    fn test_slug_degenerate_input() {
        // 전부 제거되면 접미사만 (앞 하이픈 없음)
        let slugs = fixed_service();
        assert_eq!(slugs.generate_slug(""), "abc123");
        assert_eq!(slugs.generate_slug("@#$%^&*()"), "abc123");
        assert_eq!(slugs.generate_slug("   "), "abc123");
    }

    #[test]
    fn test_slug_collapses_separator_runs() {
        // 공백/밑줄 연속 구간 → 하이픈 하나
        let slugs = fixed_service();
        assert_eq!(slugs.generate_slug("math __  tutoring"), "math-tutoring-abc123");
        assert_eq!(slugs.generate_slug("_edge_ case_"), "edge-case-abc123");
    }

    #[test]
    fn test_slug_length_bound() {
        // 조각 50자 제한, 전체 57자 이하
        let slugs = fixed_service();
        let long_title = "a".repeat(80);
        let slug = slugs.generate_slug(&long_title);
        assert_eq!(slug, format!("{}-abc123", "a".repeat(50)));
        assert!(slug.chars().count() <= crate::domains::listings::models::slug::MAX_SLUG_LEN);
    }

    #[test]
    fn test_slug_truncation_strips_dangling_hyphen() {
        // 50자 경계에서 잘린 하이픈 정리
        let slugs = fixed_service();
        // 49자 + 하이픈 위치에서 잘리도록 구성: "aaa...a b..." (49 a's then space)
        let title = format!("{} {}", "a".repeat(49), "b".repeat(20));
        let slug = slugs.generate_slug(&title);
        assert_eq!(slug, format!("{}-abc123", "a".repeat(49)));
    }

    #[test]
    fn test_slug_nondeterminism() {
        // 실제 난수원: 같은 입력도 매번 다른 슬러그
        let slugs = SlugService::new();
        let first = slugs.generate_slug("プログラミング学習");
        let second = slugs.generate_slug("プログラミング学習");
        assert_ne!(first, second);
        assert!(first.starts_with("プログラミング学習-"));
        assert!(second.starts_with("プログラミング学習-"));
    }

    #[test]
    fn test_normalize_fragment_idempotent() {
        // 정규화는 멱등 (안정된 고정점)
        for title in [
            "Programming Lessons",
            "プログラミング Programming 学習",
            "  messy __ title -- here  ",
            "@#$%",
            "数学の家庭教師",
        ] {
            let once = SlugService::normalize_fragment(title);
            let twice = SlugService::normalize_fragment(&once);
            assert_eq!(once, twice, "normalization must be a fixpoint for {:?}", title);
        }
    }

    #[test]
    fn test_is_valid_slug_accepts() {
        assert!(SlugService::is_valid_slug("programming-lessons"));
        assert!(SlugService::is_valid_slug("プログラミング学習"));
        assert!(SlugService::is_valid_slug("rust-入門-2024"));
        assert!(SlugService::is_valid_slug("a"));
    }

    #[test]
    fn test_is_valid_slug_rejects() {
        // 빈 문자열, 대문자, 밑줄, 양끝 하이픈, 초과 길이, 공백
        assert!(!SlugService::is_valid_slug(""));
        assert!(!SlugService::is_valid_slug("Programming"));
        assert!(!SlugService::is_valid_slug("snake_case"));
        assert!(!SlugService::is_valid_slug("-leading"));
        assert!(!SlugService::is_valid_slug("trailing-"));
        assert!(!SlugService::is_valid_slug("has space"));
        assert!(!SlugService::is_valid_slug(&"a".repeat(51)));
    }

    #[tokio::test]
    async fn test_unique_slug_first_candidate_free() {
        // 충돌 없음 → 기본 후보 그대로 반환
        let slugs = fixed_service();
        let store = FakeSlugStore::with_taken(&[]);
        let slug = slugs
            .generate_unique_slug("Programming Lessons", &store)
            .await
            .expect("allocation should succeed");
        assert_eq!(slug, "programming-lessons-abc123");
    }

    #[tokio::test]
    async fn test_unique_slug_appends_counter_on_collision() {
        // 기본 후보와 -1이 점유됨 → -2 반환
        let slugs = fixed_service();
        let store = FakeSlugStore::with_taken(&[
            "programming-lessons-abc123",
            "programming-lessons-abc123-1",
        ]);
        let slug = slugs
            .generate_unique_slug("Programming Lessons", &store)
            .await
            .expect("allocation should succeed");
        assert_eq!(slug, "programming-lessons-abc123-2");
    }

    #[tokio::test]
    async fn test_unique_slug_exhausts_attempts() {
        // 모든 후보가 점유됨 → 상한에서 에러
        let slugs = fixed_service();
        let taken: Vec<String> = std::iter::once("math-abc123".to_string())
            .chain((1..=3).map(|n| format!("math-abc123-{}", n)))
            .collect();
        let taken_refs: Vec<&str> = taken.iter().map(|s| s.as_str()).collect();
        let store = FakeSlugStore::with_taken(&taken_refs);

        let result = slugs
            .generate_unique_slug_with_attempts("Math", &store, 3)
            .await;
        match result {
            Err(SlugError::UniqueAttemptsExhausted { attempts }) => assert_eq!(attempts, 3),
            other => panic!("expected exhaustion error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_unique_slug_propagates_check_error() {
        // 협력자 에러는 삼키지 않고 전파
        let slugs = fixed_service();
        let result = slugs.generate_unique_slug("Math", &FailingSlugStore).await;
        match result {
            Err(SlugError::ExistenceCheck(err)) => {
                assert!(err.to_string().contains("connection refused"));
            }
            other => panic!("expected existence-check error, got {:?}", other.map(|_| ())),
        }
    }
}
