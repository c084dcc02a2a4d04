use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Lifecycle status of a task.
///
/// Only `Completed` drives derived state. Labels that are not recognized are
/// kept verbatim in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Other(String),
}

impl TaskStatus {
    pub const PENDING_LABEL: &'static str = "Pendente";
    pub const IN_PROGRESS_LABEL: &'static str = "Em Andamento";
    pub const COMPLETED_LABEL: &'static str = "Concluído";

    /// Parses a wire label. Blank labels yield `None`.
    ///
    /// Matching ignores surrounding whitespace and case, and also accepts
    /// "Concluido" without the accent.
    pub fn parse(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return None;
        }

        let status = match trimmed.to_lowercase().as_str() {
            "pendente" => TaskStatus::Pending,
            "em andamento" => TaskStatus::InProgress,
            "concluído" | "concluido" => TaskStatus::Completed,
            _ => TaskStatus::Other(trimmed.to_string()),
        };
        Some(status)
    }

    pub fn label(&self) -> &str {
        match self {
            TaskStatus::Pending => Self::PENDING_LABEL,
            TaskStatus::InProgress => Self::IN_PROGRESS_LABEL,
            TaskStatus::Completed => Self::COMPLETED_LABEL,
            TaskStatus::Other(label) => label,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(TaskStatus::parse(&label).unwrap_or_default())
    }
}

/// For optional request fields: null, absent and blank all mean "not supplied".
pub(crate) fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<TaskStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let label: Option<String> = Option::deserialize(deserializer)?;
    Ok(label.as_deref().and_then(TaskStatus::parse))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recognized_labels() {
        assert_eq!(TaskStatus::parse("Pendente"), Some(TaskStatus::Pending));
        assert_eq!(TaskStatus::parse("Em Andamento"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("Concluído"), Some(TaskStatus::Completed));
    }

    #[test]
    fn parsing_ignores_case_whitespace_and_missing_accent() {
        assert_eq!(TaskStatus::parse("  concluído "), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::parse("CONCLUIDO"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::parse("em andamento"), Some(TaskStatus::InProgress));
    }

    #[test]
    fn unknown_labels_are_kept() {
        let status = TaskStatus::parse(" Bloqueada ").unwrap();
        assert_eq!(status, TaskStatus::Other("Bloqueada".to_string()));
        assert_eq!(status.label(), "Bloqueada");
        assert!(!status.is_completed());
    }

    #[test]
    fn blank_label_is_not_a_status() {
        assert_eq!(TaskStatus::parse(""), None);
        assert_eq!(TaskStatus::parse("   "), None);
    }

    #[test]
    fn only_completed_is_completed() {
        assert!(TaskStatus::Completed.is_completed());
        assert!(!TaskStatus::Pending.is_completed());
        assert!(!TaskStatus::InProgress.is_completed());
    }

    #[test]
    fn display_uses_canonical_label() {
        assert_eq!(TaskStatus::parse("concluido").unwrap().to_string(), "Concluído");
        assert_eq!(TaskStatus::default().to_string(), "Pendente");
    }
}
