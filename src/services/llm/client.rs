use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::kernel::form::{RoastIntensity, SubmissionRecord};

/// Roast writer backed by an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct LLMService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    presence_penalty: f32,
    frequency_penalty: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn intensity_prompt(intensity: RoastIntensity) -> &'static str {
    match intensity {
        RoastIntensity::Light => {
            "Create a gentle, playful roast that's funny but not mean. Think friendly teasing between friends. \
             Keep it lighthearted and wholesome. Focus on quirky observations rather than harsh criticism."
        }
        RoastIntensity::Medium => {
            "Create a standard roast with clever observations and witty burns. Be sarcastic and humorous \
             but maintain a playful tone. This should feel like a comedy roast - funny but not cruel."
        }
        RoastIntensity::Savage => {
            "Create a savage roast that pulls no punches. Be brutally honest and hilariously harsh. \
             Use sharp wit and clever wordplay. Make it devastating but still entertaining and creative. \
             Don't cross into genuinely hurtful territory - keep it playfully savage."
        }
    }
}

/// `Name: …, Age: …` followed by whichever optional details were given.
pub fn describe(record: &SubmissionRecord) -> String {
    let mut info = format!("Name: {}, Age: {}", record.name, record.age);
    let optional = [
        ("Occupation", &record.occupation),
        ("Appearance", &record.appearance),
        ("Hobbies", &record.hobbies),
        ("Personality", &record.personality),
        ("Embarrassing fact", &record.embarrassing_fact),
    ];
    for (label, value) in optional {
        if !value.trim().is_empty() {
            info.push_str(&format!(", {}: {}", label, value));
        }
    }
    info
}

/// What the service says when the model can't be reached.
pub fn fallback_roast(record: &SubmissionRecord) -> String {
    format!(
        "Oh {}, I tried to roast you but even my AI circuits couldn't handle the level of processing power \
         needed to comprehend your unique blend of... let's call it 'character'.\n\
         The fact that you're {} and still making the life choices that led you here tells me everything I need to know.\n\
         At least you're consistent in your commitment to questionable decisions!",
        record.name, record.age
    )
}

impl LLMService {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, model: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn generate_roast(&self, record: &SubmissionRecord) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("no API key configured"))?;

        let system_prompt = format!(
            "You are a witty AI comedian specializing in roasts. Your job is to create personalized, \
             hilarious roasts based on the information provided about a person.\n\n{}\n\n\
             Rules:\n\
             - Generate exactly 6-10 lines of roast content\n\
             - Each line should be a separate witty observation or burn\n\
             - Use the person's actual details to make it personalized\n\
             - Be creative and original - avoid clichés\n\
             - Keep it entertaining and fun, never genuinely mean or offensive\n\
             - Separate each line with a newline character\n\
             - Don't include greetings or conclusions, just pure roast content",
            intensity_prompt(record.roast_intensity)
        );

        let user_prompt = format!(
            "Roast this person based on their information:\n{}\n\nRoast intensity level: {}",
            describe(record),
            record.roast_intensity
        );

        let request_body = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: user_prompt },
            ],
            max_tokens: 500,
            temperature: 0.9,
            presence_penalty: 0.6,
            frequency_penalty: 0.6,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("LLM Server Error: {}", response.status()));
        }

        let resp_json: CompletionResponse = response.json().await?;
        let content = resp_json
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| anyhow!("LLM returned no content"))?;

        Ok(content)
    }

    /// Never fails: model errors degrade to the canned roast.
    pub async fn roast_or_fallback(&self, record: &SubmissionRecord) -> String {
        match self.generate_roast(record).await {
            Ok(roast) => roast,
            Err(e) => {
                warn!("LLM roast generation failed, using fallback: {}", e);
                fallback_roast(record)
            }
        }
    }
}
