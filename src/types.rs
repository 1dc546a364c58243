use serde::{Deserialize, Serialize};

/// Storage key holding the bearer credential.
pub const TOKEN_KEY: &str = "access_token";
/// Storage key holding the guest identifier.
pub const GUEST_KEY: &str = "guest_user_id";

/// Decoded payload of a bearer credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Identity the client is currently acting under.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated {
        token: String,
        claims: Claims,
    },
    Guest {
        guest_id: String,
    },
}

impl AuthState {
    /// Identifier of the active user, if any.
    pub fn active_id(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { claims, .. } => Some(&claims.sub),
            Self::Guest { guest_id } => Some(guest_id),
        }
    }
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Authenticated { claims, .. } => write!(f, "user {}", claims.sub),
            Self::Guest { guest_id } => write!(f, "guest {}", guest_id),
        }
    }
}

/// A locally generated guest identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuestId(String);

impl GuestId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Client configuration loaded from client.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(rename = "apiUrl")]
    pub api_url: String,
    #[serde(rename = "pollIntervalMs", default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    3000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl ClientConfig {
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}
