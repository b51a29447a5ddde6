use crate::prelude::*;
use tokio::process::Command;

const GCLOUD: &str = "gcloud";

/// Resolve the OAuth access token used to call Vertex AI.
///
/// An explicitly configured token wins; otherwise the active `gcloud`
/// credentials are asked for one.
pub async fn resolve_access_token(explicit: Option<&str>) -> Result<String, Error> {
    if let Some(token) = explicit.and_then(normalize_token) {
        log::debug!("Using access token from configuration");
        return Ok(token);
    }

    log::debug!("Requesting access token from `{GCLOUD} auth print-access-token`");
    let output = Command::new(GCLOUD)
        .args(["auth", "print-access-token"])
        .output()
        .await
        .map_err(|e| {
            Error::ClientInit(format!(
                "no access token configured and `{GCLOUD}` could not be run: {e}"
            ))
        })?;

    if !output.status.success() {
        return Err(Error::ClientInit(format!(
            "`{GCLOUD} auth print-access-token` failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    normalize_token(&String::from_utf8_lossy(&output.stdout)).ok_or_else(|| {
        Error::ClientInit(format!("`{GCLOUD} auth print-access-token` printed no token"))
    })
}

fn normalize_token(raw: &str) -> Option<String> {
    let token = raw.trim();
    (!token.is_empty()).then(|| token.to_string())
}
