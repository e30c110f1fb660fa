//! Backend health payload as reported by the GraphQL health query.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Overall or per-subsystem health level reported by the backend.
///
/// The wire values are lowercase strings; anything the backend sends that is
/// not one of the known levels deserializes to [`HealthLevel::Unknown`] so a
/// newer backend cannot break the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    Ok,
    Degraded,
    Error,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthLevel::Ok => "ok",
            HealthLevel::Degraded => "degraded",
            HealthLevel::Error => "error",
            HealthLevel::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Health of the API subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiHealth {
    pub status: String,
}

/// Health of the database subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub status: String,
    /// Whether a live database connection was established. The wire field is
    /// named `connection` by the backend contract.
    pub connection: bool,
    #[serde(default)]
    pub details: Option<String>,
}

/// The backend-reported status object describing API and database health.
///
/// Produced by deserializing the GraphQL response; immutable once constructed
/// and replaced wholesale on each successful poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthPayload {
    pub status: HealthLevel,
    /// Server-reported timestamp, rendered verbatim.
    pub timestamp: String,
    pub api: ApiHealth,
    pub database: DatabaseHealth,
}
