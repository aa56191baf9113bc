//! CRM contact records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact in the CRM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    /// Initials rendered in avatar fallbacks ("Sarah Johnson" -> "SJ")
    pub initials: String,
    pub email: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// New contact; initials are derived from the name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let initials = initials_of(&name);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            initials,
            email: None,
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Uppercase first letter of the first two words
fn initials_of(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_from_full_name() {
        assert_eq!(Contact::new("Sarah Johnson").initials, "SJ");
        assert_eq!(Contact::new("Mike Chen").initials, "MC");
    }

    #[test]
    fn test_initials_single_and_many_words() {
        assert_eq!(Contact::new("Cher").initials, "C");
        assert_eq!(Contact::new("Emily Rose Rodriguez").initials, "ER");
        assert_eq!(Contact::new("").initials, "");
    }
}
