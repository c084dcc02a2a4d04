use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod status;
pub mod timestamp;

pub use status::TaskStatus;

/// A persisted task, as returned by every endpoint of the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    pub status: TaskStatus,
    #[serde(rename = "concluida")]
    pub completed: bool,
    #[serde(rename = "criadaEm")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "concluidaEm")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Request body for create and update. Every field is optional; an absent
/// or zero `id` means "create".
///
/// `completed` is read from the wire for compatibility but never trusted:
/// completion is derived from `status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "status::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<TaskStatus>,
    #[serde(
        rename = "concluida",
        alias = "concluido",
        default,
        skip_serializing
    )]
    pub completed: Option<bool>,
    #[serde(
        rename = "criadaEm",
        default,
        with = "timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "concluidaEm",
        default,
        with = "timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskRequest {
    /// The id this request targets, with absent treated as zero.
    pub fn target_id(&self) -> i64 {
        self.id.unwrap_or(0)
    }

    pub fn title_text(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    pub fn description_text(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
