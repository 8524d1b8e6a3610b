use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowercase, trim and collapse inner whitespace runs to a single space.
pub fn normalize_name(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Normalized (mapper, project, activity, skill) key used to cache
/// identifier resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NameTuple {
    pub mapper: String,
    pub project: String,
    pub activity: String,
    pub skill: String,
}

impl NameTuple {
    pub fn new(mapper: &str, project: &str, activity: &str, skill: &str) -> Self {
        Self {
            mapper: normalize_name(mapper),
            project: normalize_name(project),
            activity: normalize_name(activity),
            skill: normalize_name(skill),
        }
    }
}

impl fmt::Display for NameTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mapper = if self.mapper.is_empty() {
            "*"
        } else {
            self.mapper.as_str()
        };
        write!(
            f,
            "[{}] {} / {} / {}",
            mapper, self.project, self.activity, self.skill
        )
    }
}

/// Remote numeric identifiers a NameTuple resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedIds {
    pub project_id: i64,
    pub activity_id: i64,
    pub skill_id: i64,
}
