use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FlightError;

/// How the level index changes when the craft crashes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Send the player back to the first level.
    #[default]
    Restart,
    /// Send the player back one level, never below the first.
    StepBack,
}

/// Position within the host's ordered list of levels.
///
/// `index < count` and `count >= 1` hold for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCursor {
    index: usize,
    count: usize,
}

impl LevelCursor {
    pub fn new(index: usize, count: usize) -> Result<Self, FlightError> {
        if count == 0 {
            return Err(FlightError::NoLevels);
        }
        if index >= count {
            return Err(FlightError::LevelOutOfRange { index, count });
        }
        Ok(Self { index, count })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Level reached by completing this one; wraps to the first level.
    pub fn next(self) -> Self {
        Self {
            index: (self.index + 1) % self.count,
            ..self
        }
    }

    /// Level reached by crashing on this one.
    pub fn after_failure(self, policy: FailurePolicy) -> Self {
        let index = match policy {
            FailurePolicy::Restart => 0,
            FailurePolicy::StepBack => self.index.saturating_sub(1),
        };
        Self { index, ..self }
    }
}

/// Classification of the surface the craft touched.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(from = "String", into = "String")]
pub enum ContactTag {
    /// Harmless surface such as the launch pad.
    Friendly,
    /// Landing pad that completes the level.
    Finish,
    /// Anything else; touching it destroys the craft.
    #[default]
    Hazard,
}

impl ContactTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactTag::Friendly => "Friendly",
            ContactTag::Finish => "Finish",
            ContactTag::Hazard => "Hazard",
        }
    }
}

impl From<&str> for ContactTag {
    fn from(label: &str) -> Self {
        match label {
            "Friendly" => ContactTag::Friendly,
            "Finish" => ContactTag::Finish,
            _ => ContactTag::Hazard,
        }
    }
}

impl From<String> for ContactTag {
    fn from(label: String) -> Self {
        ContactTag::from(label.as_str())
    }
}

impl From<ContactTag> for String {
    fn from(tag: ContactTag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for ContactTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_at_last_level() {
        let cursor = LevelCursor::new(2, 3).unwrap();
        assert_eq!(cursor.next().index(), 0);
        assert_eq!(LevelCursor::new(0, 3).unwrap().next().index(), 1);
    }

    #[test]
    fn failure_policies() {
        let cursor = LevelCursor::new(2, 4).unwrap();
        assert_eq!(cursor.after_failure(FailurePolicy::Restart).index(), 0);
        assert_eq!(cursor.after_failure(FailurePolicy::StepBack).index(), 1);
        let first = LevelCursor::new(0, 4).unwrap();
        assert_eq!(first.after_failure(FailurePolicy::StepBack).index(), 0);
    }

    #[test]
    fn rejects_empty_and_out_of_range() {
        assert!(matches!(LevelCursor::new(0, 0), Err(FlightError::NoLevels)));
        assert!(matches!(
            LevelCursor::new(3, 3),
            Err(FlightError::LevelOutOfRange { index: 3, count: 3 })
        ));
    }

    #[test]
    fn unknown_labels_are_hazards() {
        assert_eq!(ContactTag::from("Friendly"), ContactTag::Friendly);
        assert_eq!(ContactTag::from("Finish"), ContactTag::Finish);
        assert_eq!(ContactTag::from("Obstacle"), ContactTag::Hazard);
        assert_eq!(ContactTag::from("finish"), ContactTag::Hazard);
    }
}
