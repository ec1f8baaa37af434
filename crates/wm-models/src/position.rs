//! Watermark anchor position.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Corner of the frame the watermark is anchored to.
///
/// Any unrecognised wire value decodes as [`Position::BottomRight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl Position {
    pub const ALL: &'static [Position] = &[
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomRight => "bottom-right",
        }
    }

    /// Parse a wire value, falling back to bottom-right.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "top-left" => Position::TopLeft,
            "top-right" => Position::TopRight,
            "bottom-left" => Position::BottomLeft,
            _ => Position::BottomRight,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Position {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_round_trip() {
        for position in Position::ALL {
            let json = serde_json::to_string(position).unwrap();
            let back: Position = serde_json::from_str(&json).unwrap();
            assert_eq!(*position, back);
        }
    }

    #[test]
    fn test_unknown_falls_back_to_bottom_right() {
        let position: Position = serde_json::from_str(r#""center""#).unwrap();
        assert_eq!(position, Position::BottomRight);
        assert_eq!(Position::parse_lenient(""), Position::BottomRight);
        assert_eq!(Position::parse_lenient("TOP-LEFT"), Position::BottomRight);
    }
}
