//! Form state for creating and editing tasks.

use chrono::{DateTime, Utc};
use shared::{timestamp, Task, TaskRequest, TaskStatus};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Status,
    CreatedAt,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("A title or a description is required")]
    MissingText,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Raw text of the task inputs. `created_at` is only sent when filled in,
/// so leaving it blank keeps the server's value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: String,
}

impl TaskForm {
    /// Prefill for editing an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.label().to_string(),
            created_at: String::new(),
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Title => self.title = value,
            Field::Description => self.description = value,
            Field::Status => self.status = value,
            Field::CreatedAt => self.created_at = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.title.trim().is_empty() && self.description.trim().is_empty() {
            return Err(FormError::MissingText);
        }
        self.parsed_created_at().map(|_| ())
    }

    pub fn to_create_request(&self) -> Result<TaskRequest, FormError> {
        self.validate()?;
        Ok(TaskRequest {
            id: Some(0),
            ..self.fields()?
        })
    }

    /// Update requests carry only what was filled in; the server keeps the
    /// rest.
    pub fn to_update_request(&self, id: i64) -> Result<TaskRequest, FormError> {
        Ok(TaskRequest {
            id: Some(id),
            ..self.fields()?
        })
    }

    fn fields(&self) -> Result<TaskRequest, FormError> {
        Ok(TaskRequest {
            title: non_blank(&self.title),
            description: non_blank(&self.description),
            status: TaskStatus::parse(&self.status),
            created_at: self.parsed_created_at()?,
            ..Default::default()
        })
    }

    fn parsed_created_at(&self) -> Result<Option<DateTime<Utc>>, FormError> {
        let text = self.created_at.trim();
        if text.is_empty() {
            return Ok(None);
        }
        timestamp::parse_utc(text)
            .map(Some)
            .map_err(|_| FormError::InvalidDate(text.to_string()))
    }
}

/// Request that only moves a task to `status`.
pub fn status_change(id: i64, status: TaskStatus) -> TaskRequest {
    TaskRequest {
        id: Some(id),
        status: Some(status),
        ..Default::default()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn filled(title: &str, description: &str) -> TaskForm {
        TaskForm {
            title: title.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn blank_form_is_invalid() {
        assert_eq!(filled("  ", "").validate(), Err(FormError::MissingText));
        assert_eq!(filled("", "").to_create_request(), Err(FormError::MissingText));
    }

    #[test]
    fn either_text_field_is_enough() {
        assert!(filled("Buy milk", "").validate().is_ok());
        assert!(filled("", "Buy milk").validate().is_ok());
    }

    #[test]
    fn create_request_has_zero_id_and_trimmed_text() {
        let mut form = filled("  Buy milk ", "");
        form.set(Field::Status, "Em Andamento".to_string());

        let request = form.to_create_request().unwrap();
        assert_eq!(request.target_id(), 0);
        assert_eq!(request.title.as_deref(), Some("Buy milk"));
        assert_eq!(request.description, None);
        assert_eq!(request.status, Some(TaskStatus::InProgress));
        assert_eq!(request.created_at, None);
    }

    #[test]
    fn datetime_local_input_becomes_utc() {
        let mut form = filled("Dentist", "");
        form.set(Field::CreatedAt, "2024-09-01T14:30".to_string());

        let request = form.to_create_request().unwrap();
        assert_eq!(
            request.created_at,
            Some(Utc.with_ymd_and_hms(2024, 9, 1, 14, 30, 0).unwrap())
        );
    }

    #[test]
    fn bad_date_is_reported() {
        let mut form = filled("Dentist", "");
        form.set(Field::CreatedAt, "next tuesday".to_string());

        assert_eq!(
            form.validate(),
            Err(FormError::InvalidDate("next tuesday".to_string()))
        );
        assert!(form.to_update_request(3).is_err());
    }

    #[test]
    fn update_request_sends_only_filled_fields() {
        let mut form = TaskForm::default();
        form.set(Field::Status, "Concluído".to_string());

        let request = form.to_update_request(9).unwrap();
        assert_eq!(request.target_id(), 9);
        assert_eq!(request.title, None);
        assert_eq!(request.description, None);
        assert_eq!(request.status, Some(TaskStatus::Completed));
    }

    #[test]
    fn edit_prefill_leaves_created_at_untouched() {
        let task = Task {
            id: 4,
            title: "Report".to_string(),
            description: "Quarterly".to_string(),
            status: TaskStatus::InProgress,
            completed: false,
            created_at: Utc.with_ymd_and_hms(2024, 2, 2, 2, 2, 2).unwrap(),
            completed_at: None,
        };

        let form = TaskForm::from_task(&task);
        assert_eq!(form.title, "Report");
        assert_eq!(form.status, "Em Andamento");
        assert_eq!(form.to_update_request(4).unwrap().created_at, None);
    }

    #[test]
    fn status_change_carries_only_status() {
        let request = status_change(2, TaskStatus::Completed);
        assert_eq!(request.target_id(), 2);
        assert_eq!(request.status, Some(TaskStatus::Completed));
        assert_eq!(request.title, None);
        assert_eq!(request.description, None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut form = filled("a", "b");
        form.clear();
        assert_eq!(form, TaskForm::default());
    }
}
