use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppwriteError {
    /// Transport failure, including timeouts.
    #[error("request to Appwrite failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Appwrite returned {status} ({kind}): {message}")]
    Api {
        status: u16,
        code: u16,
        kind: String,
        message: String,
    },

    #[error("unexpected Appwrite response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: u16,
    #[serde(default, rename = "type")]
    kind: String,
}

impl AppwriteError {
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Self::Api {
                status,
                code: if parsed.code == 0 { status } else { parsed.code },
                kind: parsed.kind,
                message: parsed.message,
            },
            Err(_) => Self::Api {
                status,
                code: status,
                kind: "unknown".to_string(),
                message: body.to_string(),
            },
        }
    }

    /// HTTP status of an API rejection, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}
