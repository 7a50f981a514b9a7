//! Persisted data model.
//!
//! Field names serialize in camelCase; the persisted JSON shape is the
//! contract shared with existing stores and backup files.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ChronicleError, Result};

/// Largest accepted decoded avatar image, in bytes.
pub const MAX_AVATAR_BYTES: usize = 500_000;

/// When a reminder for an event becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReminderSetting {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "same-day")]
    SameDay,
    #[serde(rename = "1-day-before")]
    OneDayBefore,
    #[serde(rename = "3-days-before")]
    ThreeDaysBefore,
    #[serde(rename = "1-week-before")]
    OneWeekBefore,
}

impl ReminderSetting {
    /// Days before the start date at which the reminder fires.
    pub fn lead_days(&self) -> Option<u64> {
        match self {
            ReminderSetting::None => None,
            ReminderSetting::SameDay => Some(0),
            ReminderSetting::OneDayBefore => Some(1),
            ReminderSetting::ThreeDaysBefore => Some(3),
            ReminderSetting::OneWeekBefore => Some(7),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderSetting::None => "none",
            ReminderSetting::SameDay => "same-day",
            ReminderSetting::OneDayBefore => "1-day-before",
            ReminderSetting::ThreeDaysBefore => "3-days-before",
            ReminderSetting::OneWeekBefore => "1-week-before",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim() {
            "none" => Ok(ReminderSetting::None),
            "same-day" => Ok(ReminderSetting::SameDay),
            "1-day-before" => Ok(ReminderSetting::OneDayBefore),
            "3-days-before" => Ok(ReminderSetting::ThreeDaysBefore),
            "1-week-before" => Ok(ReminderSetting::OneWeekBefore),
            other => Err(ChronicleError::InvalidInput(format!(
                "Unknown reminder setting: {} (use none, same-day, 1-day-before, 3-days-before or 1-week-before)",
                other
            ))),
        }
    }
}

/// A planned event or journal entry spanning one or more days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEvent {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Name of a [`CategoryItem`]; not enforced.
    pub category: String,
    pub notes: String,
    pub is_journal: bool,
    pub reminder_setting: ReminderSetting,
    pub is_reminder_dismissed: bool,
}

impl PlanEvent {
    pub fn new(
        title: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            start_date,
            end_date,
            category: category.into(),
            notes: String::new(),
            is_journal: false,
            reminder_setting: ReminderSetting::None,
            is_reminder_dismissed: false,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_journal(mut self, is_journal: bool) -> Self {
        self.is_journal = is_journal;
        self
    }

    pub fn with_reminder(mut self, reminder: ReminderSetting) -> Self {
        self.reminder_setting = reminder;
        self
    }

    /// `end_date >= start_date`. Expected, never enforced on load.
    pub fn has_valid_range(&self) -> bool {
        self.end_date >= self.start_date
    }
}

/// A stored login. The password is kept in plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: String,
    pub service_name: String,
    pub email: String,
    pub password: String,
    pub category: String,
}

impl Credential {
    pub fn new(
        service_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            service_name: service_name.into(),
            email: email.into(),
            password: password.into(),
            category: category.into(),
        }
    }
}

/// The single user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub role: String,
    /// `data:` URI or empty.
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_api_key: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            role: "Your Role".to_string(),
            avatar_url: String::new(),
            ai_api_key: None,
        }
    }
}

impl UserProfile {
    /// Replace the avatar with a base64 `data:` URI.
    ///
    /// # Errors
    ///
    /// Returns `ChronicleError::Validation` if the URI is not base64 data or
    /// the decoded image exceeds [`MAX_AVATAR_BYTES`]. The profile is left
    /// unchanged on error.
    pub fn set_avatar(&mut self, data_uri: &str) -> Result<()> {
        validate_avatar(data_uri)?;
        self.avatar_url = data_uri.to_string();
        Ok(())
    }

    pub fn clear_avatar(&mut self) {
        self.avatar_url.clear();
    }
}

/// Build a `data:` URI for raw image bytes, enforcing the size limit.
pub fn avatar_data_uri(mime: &str, bytes: &[u8]) -> Result<String> {
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err(avatar_too_large());
    }
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

fn validate_avatar(data_uri: &str) -> Result<()> {
    let (header, payload) = data_uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(|| ChronicleError::Validation("Avatar must be a data: URI".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(ChronicleError::Validation(
            "Avatar data URI must be base64 encoded".to_string(),
        ));
    }
    let decoded = STANDARD
        .decode(payload)
        .map_err(|e| ChronicleError::Validation(format!("Invalid avatar data: {}", e)))?;
    if decoded.len() > MAX_AVATAR_BYTES {
        return Err(avatar_too_large());
    }
    Ok(())
}

fn avatar_too_large() -> ChronicleError {
    ChronicleError::Validation("Image too large. Please use an image under 500KB.".to_string())
}

/// A user-defined category, referenced by name from events and credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub id: String,
    pub name: String,
    /// Symbolic color token, e.g. `bg-sage`.
    pub color: String,
}

impl CategoryItem {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Built-in category list.
pub fn default_categories() -> Vec<CategoryItem> {
    [
        ("1", "Work", "bg-charcoal"),
        ("2", "Study", "bg-sage"),
        ("3", "Travel", "bg-peach"),
        ("4", "Personal", "bg-terra"),
        ("5", "Health", "bg-indigo-400"),
    ]
    .into_iter()
    .map(|(id, name, color)| CategoryItem {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
    })
    .collect()
}

/// Sample events shown on first run, dated relative to `today`.
pub fn default_events(today: NaiveDate) -> Vec<PlanEvent> {
    let offset = |days: u64| today.checked_add_days(Days::new(days)).unwrap_or(today);
    vec![
        PlanEvent {
            id: "1".to_string(),
            title: "Project Kickoff".to_string(),
            start_date: today,
            end_date: offset(2),
            category: "Work".to_string(),
            notes: "Initial meeting with stakeholders. Prepare slides.".to_string(),
            is_journal: false,
            reminder_setting: ReminderSetting::OneDayBefore,
            is_reminder_dismissed: false,
        },
        PlanEvent {
            id: "2".to_string(),
            title: "Kyoto Trip".to_string(),
            start_date: offset(5),
            end_date: offset(9),
            category: "Travel".to_string(),
            notes: "Remember to pack camera and walking shoes.".to_string(),
            is_journal: true,
            reminder_setting: ReminderSetting::OneWeekBefore,
            is_reminder_dismissed: false,
        },
    ]
}

/// Sample vault entries shown on first run.
pub fn default_credentials() -> Vec<Credential> {
    vec![
        Credential {
            id: "1".to_string(),
            service_name: "Google Workspace".to_string(),
            email: "alex.doe@work.com".to_string(),
            password: "secure-password-123".to_string(),
            category: "Work".to_string(),
        },
        Credential {
            id: "2".to_string(),
            service_name: "Spotify".to_string(),
            email: "alex.personal@gmail.com".to_string(),
            password: "music-is-life!".to_string(),
            category: "Personal".to_string(),
        },
    ]
}

/// The four in-memory collections mirrored to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChronicleState {
    pub events: Vec<PlanEvent>,
    pub credentials: Vec<Credential>,
    pub profile: UserProfile,
    pub categories: Vec<CategoryItem>,
}

impl ChronicleState {
    /// Built-in defaults, with sample events dated relative to `today`.
    pub fn defaults(today: NaiveDate) -> Self {
        Self {
            events: default_events(today),
            credentials: default_credentials(),
            profile: UserProfile::default(),
            categories: default_categories(),
        }
    }
}
