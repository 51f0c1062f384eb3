use std::time::Duration;

use serde::{Deserialize, Serialize};
use ureq::Agent;

use super::{NarrativeError, Narrator};
use crate::config::NarratorConfig;
use crate::savings::SavingsResult;

/// OpenAI 호환 chat-completions 엔드포인트로 해설을 요청한다.
pub struct OpenAiNarrator {
    client: Agent,
    url: String,
    model: String,
    api_key: String,
    currency: String,
}

impl OpenAiNarrator {
    /// 설정과 환경 변수(.env 포함)에서 API 키를 읽어 생성한다.
    pub fn from_config(cfg: &NarratorConfig, currency: &str) -> Result<Self, NarrativeError> {
        let _ = dotenvy::dotenv();
        let api_key = std::env::var(&cfg.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| NarrativeError::MissingApiKey(cfg.api_key_env.clone()))?;
        let client = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(cfg.timeout_secs)))
            .build()
            .into();
        Ok(Self {
            client,
            url: format!("{}/chat/completions", cfg.endpoint.trim_end_matches('/')),
            model: cfg.model.clone(),
            api_key,
            currency: currency.to_string(),
        })
    }
}

impl Narrator for OpenAiNarrator {
    #[tracing::instrument(skip_all, fields(model = %self.model))]
    fn explain(&self, result: &SavingsResult) -> Result<String, NarrativeError> {
        tracing::info!("requesting explanation");
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "system",
                content: build_prompt(result, &self.currency),
            }],
        };
        let response: ChatResponse = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send_json(&request)?
            .body_mut()
            .read_json()?;
        first_message(response)
    }
}

/// 계산 결과를 담은 시스템 프롬프트를 만든다.
pub fn build_prompt(result: &SavingsResult, currency: &str) -> String {
    let savings = serde_json::to_string(result).unwrap_or_default();
    format!(
        "You are a computing assistant that explains energy and cost savings using the \
         provided data {savings}, which shows the higher efficiency of biogas compared to \
         charcoal. In two to three sentences, explain to the user why choosing biogas is more \
         effective than charcoal. Prices are in {currency} and energy savings are in MJ. \
         Mention every computed value in your response."
    )
}

fn first_message(response: ChatResponse) -> Result<String, NarrativeError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(NarrativeError::EmptyResponse)
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::savings::{compute_savings, SavingsInput};

    #[test]
    fn prompt_carries_all_fields_and_currency() {
        let result = compute_savings(&SavingsInput::new(4.0)).expect("calc");
        let prompt = build_prompt(&result, "KES");
        for field in [
            "biogas_volume_needed",
            "daily_energy_savings",
            "daily_cost_savings",
            "monthly_energy_savings",
            "monthly_cost_savings",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert!(prompt.contains("KES"));
        assert!(prompt.contains("400.0"));
    }

    #[test]
    fn first_choice_content_is_trimmed() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"  Biogas wins.\n"}}]}"#,
        )
        .expect("json");
        assert_eq!(first_message(response).expect("message"), "Biogas wins.");
    }

    #[test]
    fn empty_choices_are_an_error() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).expect("json");
        assert!(matches!(
            first_message(response),
            Err(NarrativeError::EmptyResponse)
        ));
    }

    #[test]
    fn endpoint_trailing_slash_is_ignored() {
        std::env::set_var("BIOGAS_SAVINGS_TEST_KEY", "sk-test");
        let cfg = NarratorConfig {
            endpoint: "http://localhost:8080/v1/".into(),
            api_key_env: "BIOGAS_SAVINGS_TEST_KEY".into(),
            ..NarratorConfig::default()
        };
        let narrator = OpenAiNarrator::from_config(&cfg, "KES").expect("narrator");
        assert_eq!(narrator.url, "http://localhost:8080/v1/chat/completions");
    }
}
