use thiserror::Error;

/// 슬러그 할당 관련 에러
/// Slug allocation errors
///
/// 슬러그 정규화 자체는 실패하지 않습니다. 에러는 고유 슬러그 할당 경로에서만
/// 발생합니다.
/// Normalization itself never fails; errors originate only in the unique
/// allocation path.
#[derive(Error, Debug)]
pub enum SlugError {
    /// 재시도 상한까지 고유 슬러그를 찾지 못함
    /// Could not allocate a unique slug within the attempt cap
    #[error("Failed to allocate unique slug after {attempts} attempts")]
    UniqueAttemptsExhausted { attempts: u32 },

    /// 존재 확인 협력자가 실패함 (원본 에러 그대로 전파)
    /// The existence-check collaborator failed (original error propagated)
    #[error("Slug existence check failed: {0}")]
    ExistenceCheck(#[from] anyhow::Error),
}
