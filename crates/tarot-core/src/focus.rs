//! Focus areas: the caller-chosen context that frames a reading.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// What a reading is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    /// Work, vocation, professional decisions.
    Career,
    /// Partnerships, friendships, social dynamics.
    Relationships,
    /// Self-development and inner work.
    PersonalGrowth,
    /// Practice, purpose, metaphysical questions.
    Spiritual,
    /// No particular area.
    #[default]
    General,
}

impl FocusArea {
    /// All focus areas.
    pub fn all() -> &'static [Self] {
        &[
            Self::Career,
            Self::Relationships,
            Self::PersonalGrowth,
            Self::Spiritual,
            Self::General,
        ]
    }

    /// Parse a focus area. Spaces and hyphens are treated as underscores.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "career" => Ok(Self::Career),
            "relationships" | "relationship" => Ok(Self::Relationships),
            "personal_growth" | "growth" => Ok(Self::PersonalGrowth),
            "spiritual" => Ok(Self::Spiritual),
            "general" => Ok(Self::General),
            _ => Err(CoreError::UnknownFocusArea(s.to_string())),
        }
    }

    /// Snake-case identifier.
    pub fn key(self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Relationships => "relationships",
            Self::PersonalGrowth => "personal_growth",
            Self::Spiritual => "spiritual",
            Self::General => "general",
        }
    }

    /// Framing paragraph handed to the interpreter.
    pub fn framing(self) -> &'static str {
        match self {
            Self::Career => {
                "This reading relates to professional development, career decisions, \
                 work situations, and vocational path. Provide practical guidance \
                 for professional growth and decision-making."
            }
            Self::Relationships => {
                "This reading relates to interpersonal connections, romantic partnerships, \
                 friendships, and social dynamics. Offer insight into relationship patterns \
                 and emotional connections."
            }
            Self::PersonalGrowth => {
                "This reading relates to self-development, inner work, personal \
                 transformation, and spiritual evolution. Focus on insights for personal \
                 development and self-understanding."
            }
            Self::Spiritual => {
                "This reading relates to spiritual practices, consciousness exploration, \
                 higher purpose, and metaphysical understanding. Provide guidance for \
                 spiritual development."
            }
            Self::General => {
                "This reading provides general life guidance across multiple areas. \
                 Offer a holistic perspective on the querent's current situation."
            }
        }
    }
}

impl std::fmt::Display for FocusArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Career => write!(f, "Career"),
            Self::Relationships => write!(f, "Relationships"),
            Self::PersonalGrowth => write!(f, "Personal Growth"),
            Self::Spiritual => write!(f, "Spiritual"),
            Self::General => write!(f, "General"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_variants() {
        assert_eq!(FocusArea::parse("career").unwrap(), FocusArea::Career);
        assert_eq!(
            FocusArea::parse("Personal Growth").unwrap(),
            FocusArea::PersonalGrowth
        );
        assert_eq!(
            FocusArea::parse("personal-growth").unwrap(),
            FocusArea::PersonalGrowth
        );
        assert!(FocusArea::parse("finance").is_err());
    }

    #[test]
    fn key_round_trips_through_parse() {
        for area in FocusArea::all() {
            assert_eq!(FocusArea::parse(area.key()).unwrap(), *area);
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&FocusArea::PersonalGrowth).unwrap();
        assert_eq!(json, "\"personal_growth\"");
    }

    #[test]
    fn every_area_has_framing() {
        for area in FocusArea::all() {
            assert!(area.framing().starts_with("This reading"));
        }
    }
}
