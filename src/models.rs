use serde::{Deserialize, Serialize};

/// Body of POST /analyze. The field is optional so a missing key and an
/// empty string are rejected the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "imageBase64")]
    pub image_base64: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub port: u16,
}

/// Every failure path produces exactly one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error envelope the upstream API uses; only the message is surfaced.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamError {
    pub error: Option<UpstreamErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamErrorDetail {
    pub message: Option<String>,
}
