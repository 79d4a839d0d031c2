//! Answer generation via the chat completion service.
//!
//! The Answerer builds exactly two messages — a fixed system instruction and
//! a user message carrying the retrieved context plus the question — and
//! returns the first candidate's text verbatim. Temperature is kept low to
//! favor faithfulness to the context over creativity.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const TEMPERATURE: f32 = 0.2;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions about the Constitution. \
     Use only the information from the provided context when possible. \
     If the answer is not in the context, say that you do not know based on the document.";

/// Generates text from an ordered list of role-tagged messages.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Call the completion service with a system and a user message and
    /// return the first generated candidate's text.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Answer a question from the given context block.
///
/// No post-processing: the generated text is returned untouched. Zero
/// retrieved context is not an error; the model is instructed to admit
/// ignorance.
pub async fn answer(chat: &dyn ChatModel, question: &str, context: &str) -> Result<String> {
    let user = format!("Context:\n{}\n\nQuestion: {}", context, question);
    chat.complete(SYSTEM_PROMPT, &user).await
}

/// Chat model backed by the OpenAI chat completions API.
pub struct OpenAiChat {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiChat {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            client,
            api_key: config.openai_api_key.clone(),
            model: config.chat_model.clone(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::GenerationService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::GenerationService(format!(
                "OpenAI chat API returned {}: {}",
                status, detail
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::GenerationService(format!("malformed response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::GenerationService("response contained no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Fake that records the messages it was called with.
    struct RecordingChat {
        seen: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ChatModel for RecordingChat {
        async fn complete(&self, system: &str, user: &str) -> Result<String> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            Ok("generated answer".to_string())
        }
    }

    #[tokio::test]
    async fn answer_builds_the_exact_user_template() {
        let chat = RecordingChat {
            seen: Mutex::new(Vec::new()),
        };
        let result = answer(&chat, "Who ratifies treaties?", "Article II text")
            .await
            .unwrap();
        assert_eq!(result, "generated answer");

        let seen = chat.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, SYSTEM_PROMPT);
        assert_eq!(
            seen[0].1,
            "Context:\nArticle II text\n\nQuestion: Who ratifies treaties?"
        );
    }

    #[tokio::test]
    async fn answer_with_empty_context_still_calls_the_model() {
        let chat = RecordingChat {
            seen: Mutex::new(Vec::new()),
        };
        let result = answer(&chat, "What is Article V?", "").await.unwrap();
        assert_eq!(result, "generated answer");
        let seen = chat.seen.lock().unwrap();
        assert_eq!(seen[0].1, "Context:\n\n\nQuestion: What is Article V?");
    }

    #[test]
    fn chat_request_serializes_two_messages_with_temperature() {
        let body = ChatRequest {
            model: "gpt-4.1-mini",
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "s",
                },
                ChatMessage {
                    role: "user",
                    content: "u",
                },
            ],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert!((json["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }
}
