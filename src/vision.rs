use crate::config::Config;
use crate::request_id::RequestId;
use reqwest::header::HeaderValue;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

/// Model and output bound are fixed; callers cannot override them.
pub const ANALYSIS_MODEL: &str = "gpt-4.1";
pub const MAX_COMPLETION_TOKENS: u32 = 1000;

/// Instruction sent with every image. The model is asked for bare JSON so the
/// frontend can parse the reply without stripping markdown fences.
const ANALYSIS_PROMPT: &str = "Analyze this waste image and suggest 3 creative DIY projects that can be made from these materials. For each project, provide: 1) Project name, 2) Brief description, 3) Materials needed, 4) Step-by-step instructions. Return ONLY a JSON array with these fields: name, description, materials, instructions. Do not include any markdown formatting or code blocks.";

/// One shared client for all upstream calls; each request is a single POST
/// with no retry and no timeout beyond reqwest's defaults.
#[derive(Debug)]
pub struct VisionClient {
    http_client: Arc<reqwest::Client>,
    api_base: String,
    api_key: String,
}

impl VisionClient {
    pub fn new(http_client: Arc<reqwest::Client>, config: &Config) -> Self {
        Self {
            http_client,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn completions_url(&self) -> String {
        // Handle the case where api_base might end with a '/'
        if self.api_base.ends_with('/') {
            format!("{}chat/completions", self.api_base)
        } else {
            format!("{}/chat/completions", self.api_base)
        }
    }

    /// Fixed-shape completion request: one user message carrying the
    /// instruction text plus the image inlined as a JPEG data URI. The
    /// payload is never decoded or inspected here.
    fn completion_body(image_base64: &str) -> Value {
        json!({
            "model": ANALYSIS_MODEL,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "text",
                            "text": ANALYSIS_PROMPT
                        },
                        {
                            "type": "image_url",
                            "image_url": {
                                "url": format!("data:image/jpeg;base64,{image_base64}")
                            }
                        }
                    ]
                }
            ],
            "max_tokens": MAX_COMPLETION_TOKENS
        })
    }

    /// Issues the single upstream attempt for one caller request.
    pub async fn analyze(
        &self,
        image_base64: &str,
        request_id: &RequestId,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let target_url = self.completions_url();
        debug!("Forwarding analysis request to: {}", target_url);

        let mut target_request = self
            .http_client
            .post(&target_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key));

        // Propagate request id upstream
        if let Ok(val) = HeaderValue::from_str(&request_id.0) {
            target_request = target_request.header("x-request-id", val);
        }

        target_request
            .json(&Self::completion_body(image_base64))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(api_base: &str) -> VisionClient {
        let config = Config {
            port: 3001,
            api_key: "test-key".to_string(),
            api_base: api_base.to_string(),
        };
        VisionClient::new(Arc::new(reqwest::Client::new()), &config)
    }

    #[test]
    fn test_completion_body_shape() {
        let body = VisionClient::completion_body("aGVsbG8=");

        assert_eq!(body["model"], "gpt-4.1");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");

        let content = &body["messages"][0]["content"];
        assert_eq!(content[0]["type"], "text");
        let prompt = content[0]["text"].as_str().unwrap();
        assert!(prompt.contains("3 creative DIY projects"));
        assert!(prompt.contains("Do not include any markdown formatting"));

        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(
            content[1]["image_url"]["url"],
            "data:image/jpeg;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_completions_url_handles_trailing_slash() {
        let plain = test_client("http://127.0.0.1:8080/v1");
        assert_eq!(plain.completions_url(), "http://127.0.0.1:8080/v1/chat/completions");

        let slashed = test_client("http://127.0.0.1:8080/v1/");
        assert_eq!(slashed.completions_url(), "http://127.0.0.1:8080/v1/chat/completions");
    }
}
