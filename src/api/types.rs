use serde::{Deserialize, Serialize};

/// Envelope for error bodies and the system endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Body of `POST /api/flavors`.
///
/// `name` is optional here so a missing name is reported by validation
/// instead of surfacing as a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateFlavorRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

/// Body of `PUT /api/flavors/{id}`. Both fields are written as given.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFlavorRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime_seconds: u64,
    pub flavor_count: u64,
}
