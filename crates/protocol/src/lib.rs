use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod document;

pub const CAPABILITIES_SCHEMA_VERSION: u32 = 1;
pub const COMMAND_API_VERSION: &str = "v1";

/// A follow-up Command API call the client can issue as-is.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NextAction {
    pub action: String,
    pub payload: serde_json::Value,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub hint: Option<String>,
    #[serde(default)]
    pub next_actions: Vec<NextAction>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CapabilitiesServer {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CapabilitiesVersions {
    pub command_api: String,
    pub catalog_schema: u32,
    pub gamification_schema: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Capabilities {
    pub schema_version: u32,
    pub server: CapabilitiesServer,
    pub versions: CapabilitiesVersions,
    pub actions: Vec<String>,
    pub start_route: NextAction,
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}
