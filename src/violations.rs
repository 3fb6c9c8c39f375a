use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The first rule a submitted brief broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING-KEBAB-CASE")]
pub enum Violation {
    Missing {
        field: String,
    },
    WrongType {
        field: String,
        expected: String,
    },
    TooShort {
        field: String,
        min_length: usize,
    },
    NoPlatforms,
    UnknownPlatform {
        value: String,
    },
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
    },
    UnknownAssetFormat {
        value: String,
    },
}

impl Violation {
    pub fn field(&self) -> &str {
        match self {
            Violation::Missing { field }
            | Violation::WrongType { field, .. }
            | Violation::TooShort { field, .. }
            | Violation::OutOfRange { field, .. } => field,
            Violation::NoPlatforms | Violation::UnknownPlatform { .. } => "platforms",
            Violation::UnknownAssetFormat { .. } => "primaryAsset",
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Violation::Missing { field } => write!(f, "{} is required", field),
            Violation::WrongType { field, expected } => {
                write!(f, "{} must be {}", field, expected)
            }
            Violation::TooShort { field, min_length } => {
                write!(f, "{} must be at least {} characters", field, min_length)
            }
            Violation::NoPlatforms => write!(f, "platforms must contain at least one platform"),
            Violation::UnknownPlatform { value } => write!(
                f,
                "platforms contains unsupported platform '{}' (expected one of instagram, youtube, facebook, threads, pinterest)",
                value
            ),
            Violation::OutOfRange { field, min, max } => {
                write!(f, "{} must be an integer between {} and {}", field, min, max)
            }
            Violation::UnknownAssetFormat { value } => write!(
                f,
                "primaryAsset '{}' is not supported (expected one of video, image, carousel)",
                value
            ),
        }
    }
}
