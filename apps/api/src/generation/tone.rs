//! Tone selection: the closed set of registers a cover letter can be written in.
//!
//! The label is passed verbatim into the generation prompt.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Confident,
    Humble,
    Creative,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Professional,
        Tone::Friendly,
        Tone::Confident,
        Tone::Humble,
        Tone::Creative,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Confident => "Confident",
            Tone::Humble => "Humble",
            Tone::Creative => "Creative",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = AppError;

    /// Case-insensitive match on the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Tone::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown tone '{s}'. Expected one of: {}",
                    Tone::ALL.map(Tone::label).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_professional() {
        assert_eq!(Tone::default(), Tone::Professional);
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trimmed() {
        assert_eq!(" humble ".parse::<Tone>().unwrap(), Tone::Humble);
        assert_eq!("CREATIVE".parse::<Tone>().unwrap(), Tone::Creative);
    }

    #[test]
    fn test_unknown_tone_rejected() {
        let err = "Sarcastic".parse::<Tone>().unwrap_err();
        assert!(err.to_string().contains("Sarcastic"));
        assert!(err.to_string().contains("Professional"));
    }

    #[test]
    fn test_display_matches_label() {
        for tone in Tone::ALL {
            assert_eq!(tone.to_string(), tone.label());
        }
    }

    #[test]
    fn test_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Tone::Confident).unwrap(), r#""Confident""#);
    }
}
