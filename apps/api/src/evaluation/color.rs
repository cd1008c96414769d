use serde::{Deserialize, Serialize};

/// Visual severity band derived from an overall score.
///
/// Variants are declared worst-first, so `Ord` follows red < orange < yellow < green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCode {
    Red,
    Orange,
    Yellow,
    Green,
}

impl ColorCode {
    /// Band thresholds are exclusive lower bounds: > 80 green, > 60 yellow, > 40 orange.
    /// Anything else, including NaN and negative scores, is red.
    pub fn from_score(score: f64) -> Self {
        if score > 80.0 {
            ColorCode::Green
        } else if score > 60.0 {
            ColorCode::Yellow
        } else if score > 40.0 {
            ColorCode::Orange
        } else {
            ColorCode::Red
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorCode::Red => "red",
            ColorCode::Orange => "orange",
            ColorCode::Yellow => "yellow",
            ColorCode::Green => "green",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "red" => Some(ColorCode::Red),
            "orange" => Some(ColorCode::Orange),
            "yellow" => Some(ColorCode::Yellow),
            "green" => Some(ColorCode::Green),
            _ => None,
        }
    }
}
