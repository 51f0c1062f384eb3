//! 계산 결과를 짧은 설명문으로 바꾸는 후처리 단계.
//!
//! 계산기와는 `SavingsResult` 하나만 주고받는다.

pub mod openai;
pub mod template;

pub use openai::OpenAiNarrator;
pub use template::TemplateNarrator;

use crate::config::{NarratorConfig, NarratorMode};
use crate::savings::SavingsResult;

/// 해설 생성 중 발생 가능한 오류.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    /// API 키 환경 변수가 비어 있음
    #[error("environment variable {0} is not set")]
    MissingApiKey(String),
    /// HTTP 전송/상태 오류
    #[error("language model request failed: {0}")]
    Http(#[from] ureq::Error),
    /// 응답에 메시지가 없음
    #[error("language model returned no message")]
    EmptyResponse,
}

/// 절감 결과로 설명문을 만든다.
pub trait Narrator: Send + Sync {
    fn explain(&self, result: &SavingsResult) -> Result<String, NarrativeError>;
}

/// 설정에 맞는 해설기를 만든다. 꺼져 있으면 None.
pub fn narrator_from_config(
    cfg: &NarratorConfig,
    currency: &str,
) -> Result<Option<Box<dyn Narrator>>, NarrativeError> {
    let narrator: Box<dyn Narrator> = match cfg.mode {
        NarratorMode::Off => return Ok(None),
        NarratorMode::Template => Box::new(TemplateNarrator::new(currency)),
        NarratorMode::OpenAi => Box::new(OpenAiNarrator::from_config(cfg, currency)?),
    };
    tracing::debug!(mode = ?cfg.mode, "narrator selected");
    Ok(Some(narrator))
}

/// 설정된 해설기를 실행하고, 실패하면 템플릿 해설로 대체한다.
///
/// 해설이 꺼져 있으면 None을 돌려준다.
pub fn explain_or_fallback(
    cfg: &NarratorConfig,
    currency: &str,
    result: &SavingsResult,
) -> Option<String> {
    let fallback = TemplateNarrator::new(currency);
    let outcome = narrator_from_config(cfg, currency)
        .and_then(|narrator| narrator.map(|n| n.explain(result)).transpose());
    match outcome {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(%err, "narrator failed, using template explanation");
            Some(fallback.render(result))
        }
    }
}
