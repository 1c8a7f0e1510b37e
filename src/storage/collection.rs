//! The closed set of named collections held by the store

use serde::Serialize;
use std::fmt;

/// A named, ordered collection of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Accounts able to log in
    Users,
    /// Portfolio projects
    Projects,
    /// Skills with a proficiency level
    Skills,
    /// Work history entries
    Experience,
    /// Offered services
    Services,
}

impl Collection {
    /// Every collection, in a fixed order
    pub const ALL: [Collection; 5] = [
        Collection::Users,
        Collection::Projects,
        Collection::Skills,
        Collection::Experience,
        Collection::Services,
    ];

    /// Name used in routes, logs and metric labels
    pub fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Projects => "projects",
            Collection::Skills => "skills",
            Collection::Experience => "experience",
            Collection::Services => "services",
        }
    }

    /// Singular label used in response messages, e.g. "Project not found"
    pub fn resource_label(self) -> &'static str {
        match self {
            Collection::Users => "User",
            Collection::Projects => "Project",
            Collection::Skills => "Skill",
            Collection::Experience => "Experience",
            Collection::Services => "Service",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
