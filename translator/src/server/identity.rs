use axum::http::HeaderMap;
use serde::Deserialize;
use tracing::debug;

/// Claims forwarded by the authentication layer in front of the service. They are already verified.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
    #[serde(rename = "cognito:username")]
    username: Option<String>,
}

/// Resolves the caller from the claims header.
///
/// `None` means unauthenticated: the header is missing, is not a JSON object,
/// or names no subject.
pub fn owner_from_headers(headers: &HeaderMap, identity_header: &str) -> Option<String> {
    let raw = headers.get(identity_header)?.to_str().ok()?;
    let claims = match serde_json::from_str::<Claims>(raw) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Identity header is not a claims object");
            return None;
        }
    };
    claims.sub.or(claims.username).filter(|owner| !owner.trim().is_empty())
}
