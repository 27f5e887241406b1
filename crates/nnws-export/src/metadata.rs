use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name and timestamps stored alongside a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl DesignMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created: now,
            modified: now,
        }
    }

    /// Bump `modified`, keeping `created`.
    pub fn touch(&mut self) {
        self.modified = Utc::now().max(self.created);
    }
}
