use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a task. Derived from the creation instant in Unix milliseconds.
pub type TaskId = i64;

/// A single to-do entry as it is persisted.
///
/// Field names serialize in camelCase (`createdAt`) so collections written by
/// the browser build and the terminal build share one format.
#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(with = "iso_millis")]
    created_at: DateTime<Utc>,
}

impl Task {
    /// Builds a pending task. Returns `None` when `text` is blank after trimming.
    pub fn new(id: TaskId, text: &str, created_at: DateTime<Utc>) -> Option<Self> {
        let text = normalize_text(text)?;
        Some(Self {
            id,
            text,
            completed: false,
            created_at: truncate_to_millis(created_at),
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// False for records whose text is blank, which only stored data can hold.
    pub(crate) fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Merges `patch` over this task. Fields the patch leaves unset are untouched.
    ///
    /// The patch must already be validated, see [`TaskPatch::validated`].
    pub(crate) fn apply(&mut self, patch: TaskPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// Partial update for a [`Task`]. `id` and `created_at` are not patchable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Trims the patched text. Returns `None` if the text would end up blank.
    pub(crate) fn validated(self) -> Option<Self> {
        let text = match self.text {
            Some(text) => Some(normalize_text(&text)?),
            None => None,
        };
        Some(Self { text, ..self })
    }
}

/// Stored instants carry millisecond precision, matching `Date.toISOString()`.
fn truncate_to_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .duration_trunc(TimeDelta::milliseconds(1))
        .unwrap_or(instant)
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        instant: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|instant| instant.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

fn normalize_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn new_task_is_trimmed_and_pending() {
        let task = Task::new(1, "  Buy milk \n", instant()).unwrap();

        assert_eq!(task.text(), "Buy milk");
        assert!(!task.is_completed());
        assert_eq!(task.created_at(), instant());
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(Task::new(1, "", instant()), None);
        assert_eq!(Task::new(1, " \t ", instant()), None);
    }

    #[test]
    fn serializes_with_camel_case_timestamp() {
        let task = Task::new(1709294400000, "Walk dog", instant()).unwrap();

        let json = serde_json::to_string(&task).unwrap();

        assert_eq!(
            json,
            r#"{"id":1709294400000,"text":"Walk dog","completed":false,"createdAt":"2024-03-01T12:00:00.000Z"}"#
        );
    }

    #[test]
    fn deserializes_browser_timestamps_with_millis() {
        let json = r#"{"id":7,"text":"Walk dog","completed":true,"createdAt":"2024-03-01T12:00:00.123Z"}"#;

        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.id(), 7);
        assert!(task.is_completed());
        assert_eq!(task.created_at().timestamp_subsec_millis(), 123);
    }

    #[test]
    fn stored_blank_text_has_no_text() {
        let json = r#"{"id":7,"text":"  ","completed":false,"createdAt":"2024-03-01T12:00:00.000Z"}"#;

        let task: Task = serde_json::from_str(json).unwrap();

        assert!(!task.has_text());
        assert!(Task::new(8, "Walk dog", instant()).unwrap().has_text());
    }

    #[test]
    fn creation_instant_is_truncated_to_millis() {
        let precise = instant() + chrono::Duration::nanoseconds(1_234_567);

        let task = Task::new(1, "Walk dog", precise).unwrap();

        assert_eq!(task.created_at(), instant() + chrono::Duration::milliseconds(1));
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut task = Task::new(1, "Buy milk", instant()).unwrap();

        task.apply(TaskPatch::completed(true));

        assert!(task.is_completed());
        assert_eq!(task.text(), "Buy milk");

        task.apply(TaskPatch::text("Buy oat milk").validated().unwrap());

        assert!(task.is_completed());
        assert_eq!(task.text(), "Buy oat milk");
        assert_eq!(task.id(), 1);
    }

    #[test]
    fn patch_with_blank_text_fails_validation() {
        assert_eq!(TaskPatch::text("   ").validated(), None);
        assert_eq!(
            TaskPatch::text(" x ").validated(),
            Some(TaskPatch::text("x"))
        );
    }
}
