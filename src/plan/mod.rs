use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::brief::Platform;
use crate::schedule::ScheduleSlot;

pub mod draft;
pub use draft::PlanDraft;

/// The creative output for one brief.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPlan {
    pub campaign: CampaignOverview,
    pub production: Production,
    pub assets: Vec<Asset>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignOverview {
    pub title: String,
    pub summary: String,
    pub hooks: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Production {
    pub master_script: String,
    pub storyboard: Vec<StoryboardStep>,
    pub audio_prompts: Vec<String>,
    pub editing_notes: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoryboardStep {
    pub title: String,
    pub description: String,
}

/// One post, ready to hand to a platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub platform: Platform,
    pub asset_type: String,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub schedule_time: DateTime<Utc>,
    pub call_to_action: String,
    pub optimization_notes: String,
}

impl ContentPlan {
    pub fn asset_for(&self, platform: Platform) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.platform == platform)
    }

    /// Pins every asset to the resolver's slots, reusing them in order when
    /// there are more assets than slots.
    pub fn apply_schedule(&mut self, slots: &[ScheduleSlot]) {
        if slots.is_empty() {
            return;
        }

        for (index, asset) in self.assets.iter_mut().enumerate() {
            asset.schedule_time = slots[index % slots.len()].publish_at;
        }
    }
}

pub fn default_asset_type(platform: Platform) -> &'static str {
    match platform {
        Platform::Pinterest => "idea pin",
        Platform::Instagram => "reel",
        _ => "vertical video",
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn asset(platform: Platform) -> Asset {
        Asset {
            id: format!("{}-1", platform),
            platform,
            asset_type: default_asset_type(platform).into(),
            caption: "caption".into(),
            hashtags: vec![],
            schedule_time: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
            call_to_action: String::new(),
            optimization_notes: String::new(),
        }
    }

    #[test]
    fn asset_types_follow_platform() {
        assert_eq!(default_asset_type(Platform::Pinterest), "idea pin");
        assert_eq!(default_asset_type(Platform::Instagram), "reel");
        assert_eq!(default_asset_type(Platform::Youtube), "vertical video");
        assert_eq!(default_asset_type(Platform::Threads), "vertical video");
    }

    #[test]
    fn apply_schedule_cycles_through_slots() {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let slots = vec![
            ScheduleSlot {
                platform: Platform::Instagram,
                publish_at: base,
            },
            ScheduleSlot {
                platform: Platform::Youtube,
                publish_at: base + Duration::minutes(45),
            },
        ];
        let mut plan = ContentPlan {
            campaign: CampaignOverview::default(),
            production: Production::default(),
            assets: vec![
                asset(Platform::Instagram),
                asset(Platform::Youtube),
                asset(Platform::Instagram),
            ],
        };

        plan.apply_schedule(&slots);

        assert_eq!(plan.assets[0].schedule_time, base);
        assert_eq!(plan.assets[1].schedule_time, base + Duration::minutes(45));
        assert_eq!(plan.assets[2].schedule_time, base);
    }
}
