use serde::Deserialize;

use crate::brief::{normalize_hashtags, Platform};
use crate::error::Error;
use crate::schedule::ScheduleSlot;

use super::{default_asset_type, Asset, CampaignOverview, ContentPlan, Production};

/// A content plan as a text-generation service writes it. Whatever schedule
/// the service proposes is dropped; times come from the resolved slots.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    pub campaign: CampaignOverview,
    pub production: Production,
    pub assets: Vec<AssetDraft>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub platform: Platform,
    #[serde(default)]
    pub asset_type: Option<String>,
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub call_to_action: String,
    #[serde(default)]
    pub optimization_notes: String,
}

impl PlanDraft {
    pub fn parse(text: &str) -> Result<PlanDraft, Error> {
        let draft = serde_json::from_str(text.trim())?;
        Ok(draft)
    }

    pub fn into_plan(self, slots: &[ScheduleSlot]) -> Result<ContentPlan, Error> {
        if slots.is_empty() {
            return Err(Error::ExistentialState(
                "a content plan needs at least one schedule slot".into(),
            ));
        }

        let assets = self
            .assets
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                let hashtags = normalize_hashtags(&draft.hashtags.join(","));
                Asset {
                    id: draft
                        .id
                        .filter(|id| !id.trim().is_empty())
                        .unwrap_or_else(|| format!("{}-{}", draft.platform, index + 1)),
                    platform: draft.platform,
                    asset_type: draft
                        .asset_type
                        .filter(|asset_type| !asset_type.trim().is_empty())
                        .unwrap_or_else(|| default_asset_type(draft.platform).to_string()),
                    caption: draft.caption,
                    hashtags,
                    schedule_time: slots[index % slots.len()].publish_at,
                    call_to_action: draft.call_to_action,
                    optimization_notes: draft.optimization_notes,
                }
            })
            .collect();

        Ok(ContentPlan {
            campaign: self.campaign,
            production: self.production,
            assets,
        })
    }
}
