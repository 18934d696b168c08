use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `GET /` service descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RootDescriptor {
    pub name: String,
    pub version: String,
    pub status: String,
    pub description: String,
    pub endpoints: EndpointIndex,
}

/// Route group prefixes advertised by the root descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EndpointIndex {
    pub metrics: String,
    pub health: String,
    pub paths: String,
    pub evolution: String,
}

/// Resident and virtual memory of the server process, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct ProcessMemory {
    pub rss: u64,
    #[serde(rename = "virtual")]
    pub virt: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProcessInfo {
    /// Seconds since the server started.
    pub uptime: f64,
    pub memory: ProcessMemory,
    /// CPU usage of the process in percent, as last sampled.
    pub cpu: f64,
    pub version: String,
    pub platform: String,
    pub arch: String,
}

/// `GET /health` liveness check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Liveness {
    pub status: String,
    pub timestamp: String,
    pub uptime: f64,
    pub memory: ProcessMemory,
}

/// JSON error envelope.
///
/// `error` is always present; the other fields depend on the failure:
/// `id` for unknown catalog entries, `path`/`method` for unmatched routes,
/// `message` for internal errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            id: None,
            path: None,
            method: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_route(mut self, method: impl Into<String>, path: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self.path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_omits_absent_fields() {
        let body = ErrorBody::new("Path not found").with_id("nope");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Path not found", "id": "nope"}));
    }

    #[test]
    fn process_memory_uses_virtual_key() {
        let json = serde_json::to_value(ProcessMemory { rss: 1, virt: 2 }).unwrap();
        assert_eq!(json["virtual"], 2);
    }
}
