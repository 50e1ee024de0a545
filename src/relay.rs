use crate::config::Config;
use crate::models::{AnalyzeRequest, ErrorBody, HealthStatus, UpstreamError};
use crate::request_id::RequestId;
use crate::vision::VisionClient;
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub vision: Arc<VisionClient>,
}

#[axum_macros::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "Server is running".to_string(),
        port: state.config.port,
    })
}

/// Validates the payload locally, makes exactly one upstream attempt and maps
/// the outcome: verbatim body on success, same-status error passthrough on
/// upstream rejection, 500 on anything else.
#[axum_macros::debug_handler]
pub async fn analyze(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    let image_base64 = match request.image_base64.as_deref() {
        Some(image) if !image.is_empty() => image,
        _ => {
            info!("Rejecting analysis request without an image payload");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: "imageBase64 is required".to_string(),
                }),
            )
                .into_response();
        }
    };

    info!("Analyzing image...");

    let response = match state.vision.analyze(image_base64, &request_id).await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Analyze endpoint error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: format!("Failed to analyze image: {e}"),
                }),
            )
                .into_response();
        }
    };

    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<UpstreamError>()
            .await
            .ok()
            .and_then(|body| body.error)
            .and_then(|detail| detail.message)
            .unwrap_or_else(|| "Unknown error".to_string());
        error!("OpenAI API error ({}): {}", status, message);

        let status = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        return (
            status,
            Json(ErrorBody {
                error: format!("OpenAI API error: {message}"),
            }),
        )
            .into_response();
    }

    match response.json::<Value>().await {
        Ok(data) => {
            info!("Analysis successful");
            Json(data).into_response()
        }
        Err(e) => {
            error!("Analyze endpoint error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: format!("Failed to analyze image: {e}"),
                }),
            )
                .into_response()
        }
    }
}
