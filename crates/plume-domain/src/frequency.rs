//! Recurring newsletter frequency.

use serde::{Deserialize, Serialize};

/// How often a newsletter section recurs.
///
/// Wire format: kebab-case (`daily`, `weekly`, `bi-weekly`, `monthly`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
}

impl Frequency {
    /// Strict parse from the kebab-case wire form. Returns `None` for
    /// unknown values.
    pub fn from_kebab(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "bi-weekly" => Some(Self::BiWeekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// Lenient parse: unknown values fall back to `Weekly`.
    ///
    /// Legacy section records carry free-form frequency strings; the
    /// weekly fallback is a compatibility default and must not change.
    pub fn parse_lenient(s: &str) -> Self {
        Self::from_kebab(s).unwrap_or(Self::Weekly)
    }

    pub fn as_kebab(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_kebab())
    }
}
