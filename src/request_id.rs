use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::{Instrument, info_span};
use uuid::Uuid;

/// Correlation id for one relay request; also forwarded on the upstream call.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Honors an incoming x-request-id or mints one, stores it in the request
/// extensions, wraps the request in a tracing span and reflects the id back
/// to the caller.
pub async fn inject_request_id(mut req: Request, next: Next) -> Response {
    let id = match req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
    {
        Some(existing) => existing.to_string(),
        None => {
            let minted = Uuid::new_v4().to_string();
            if let Ok(val) = HeaderValue::from_str(&minted) {
                req.headers_mut().insert("x-request-id", val);
            }
            minted
        }
    };

    req.extensions_mut().insert(RequestId(id.clone()));

    let span = info_span!(
        "http_request",
        trace_id = %id,
        method = %req.method(),
        path = %req.uri().path()
    );
    let mut resp = next.run(req).instrument(span).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert("x-request-id", val);
    }

    resp
}
