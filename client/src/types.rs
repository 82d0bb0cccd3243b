use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type AppId = String;
pub type EnvTypeId = String;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    Active,
    Archived,
}

/// A project registered with EnvSync.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Application {
    pub id: AppId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: AppStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Named, colored partition of an application's variables (e.g. "Production").
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EnvType {
    pub id: EnvTypeId,
    pub app_id: AppId,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_protected: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EnvironmentVariable {
    pub id: String,
    pub key: String,
    pub value: String,
    pub sensitive: bool,
    pub env_type_id: EnvTypeId,
    pub app_id: AppId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Payload of a create call.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct NewVariable {
    pub key: String,
    pub value: String,
    pub sensitive: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AuditLog {
    pub id: String,
    pub event_type: String,
    pub message: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One page of audit logs. `total` is the count across all pages as reported by the server.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AuditLogPage {
    pub items: Vec<AuditLog>,
    pub total: usize,
}

/// Destination environment of a bulk import.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImportTarget {
    pub app_id: AppId,
    pub env_type_id: EnvTypeId,
}

impl ImportTarget {
    pub fn new<A, E>(app_id: A, env_type_id: E) -> Self
    where
        A: Into<AppId>,
        E: Into<EnvTypeId>,
    {
        ImportTarget {
            app_id: app_id.into(),
            env_type_id: env_type_id.into(),
        }
    }
}
