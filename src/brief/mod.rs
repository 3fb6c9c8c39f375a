use std::fmt::Display;
use std::str::FromStr;

use serde::{de::Error, Deserialize, Serialize};

pub mod validate;
pub use validate::validate_brief;

/// A campaign brief that has passed validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBrief {
    pub campaign_name: String,
    pub niche: Option<String>,
    pub persona: String,
    pub brand_voice: String,
    pub offer: String,
    pub keywords: String,
    pub platforms: Vec<Platform>,
    pub primary_asset: AssetFormat,
    pub variations: u8,
    pub schedule_date: Option<String>,
    pub auto_publish: bool,
    pub reference_links: Option<String>,
}

impl CampaignBrief {
    /// Splits the keyword string on commas and makes sure every entry
    /// starts with a `#`.
    pub fn hashtags(&self) -> Vec<String> {
        normalize_hashtags(&self.keywords)
    }
}

pub fn normalize_hashtags(keywords: &str) -> Vec<String> {
    keywords
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(|keyword| {
            if keyword.starts_with('#') {
                keyword.to_string()
            } else {
                format!("#{}", keyword)
            }
        })
        .collect()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Instagram,
    Youtube,
    Facebook,
    Threads,
    Pinterest,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Instagram,
        Platform::Youtube,
        Platform::Facebook,
        Platform::Threads,
        Platform::Pinterest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Youtube => "youtube",
            Platform::Facebook => "facebook",
            Platform::Threads => "threads",
            Platform::Pinterest => "pinterest",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownPlatform;

impl FromStr for Platform {
    type Err = UnknownPlatform;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Platform::ALL
            .iter()
            .copied()
            .find(|platform| platform.as_str().eq_ignore_ascii_case(s))
            .ok_or(UnknownPlatform)
    }
}

impl Serialize for Platform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Platform::from_str(&s).map_err(|_| D::Error::custom(format!("unknown platform '{}'", s)))
    }
}

/// The kind of creative the brief is built around.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFormat {
    Video,
    Image,
    Carousel,
}

impl Default for AssetFormat {
    fn default() -> AssetFormat {
        AssetFormat::Video
    }
}

impl AssetFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetFormat::Video => "video",
            AssetFormat::Image => "image",
            AssetFormat::Carousel => "carousel",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, AssetFormat::Image | AssetFormat::Carousel)
    }
}

impl FromStr for AssetFormat {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(AssetFormat::Video),
            "image" => Ok(AssetFormat::Image),
            "carousel" => Ok(AssetFormat::Carousel),
            _ => Err(()),
        }
    }
}
