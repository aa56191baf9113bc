//! Activity log entries shown on the dashboard feed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of event an activity entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Message,
    Call,
    Meeting,
    Opportunity,
    Contact,
    Workflow,
    Review,
}

/// Outcome of the recorded event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Success,
    Pending,
    Failed,
}

/// One row in the activity log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub contact_name: Option<String>,
    pub contact_initials: Option<String>,
    pub status: Option<ActivityStatus>,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// New entry stamped with the current time
    pub fn now(kind: ActivityKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            description: description.into(),
            timestamp: now,
            contact_name: None,
            contact_initials: None,
            status: None,
            created_at: now,
        }
    }

    pub fn with_status(mut self, status: ActivityStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_contact(
        mut self,
        name: Option<String>,
        initials: Option<String>,
    ) -> Self {
        self.contact_name = name;
        self.contact_initials = initials;
        self
    }
}
