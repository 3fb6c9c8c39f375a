use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::brief::{CampaignBrief, Platform};
use crate::plan::ContentPlan;
use crate::schedule::ScheduleSlot;

pub mod platforms;

pub const FALLBACK_CAPTION_LENGTH: usize = 220;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AutomationStatus {
    Queued,
    Ready,
}

/// A publishing request an operator can run later. Credentials are always
/// `{{PLACEHOLDER}}` strings.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationDescriptor {
    pub platform: Platform,
    pub endpoint: String,
    pub method: &'static str,
    pub status: AutomationStatus,
    pub scheduled_at: DateTime<Utc>,
    pub payload: Value,
}

/// Everything a platform builder may draw from.
#[derive(Debug)]
pub struct PayloadContext<'a> {
    pub platform: Platform,
    pub brief: &'a CampaignBrief,
    pub plan: &'a ContentPlan,
    pub scheduled_at: DateTime<Utc>,
    pub caption: String,
    pub hashtags: Vec<String>,
}

impl PayloadContext<'_> {
    pub fn scheduled_at_iso(&self) -> String {
        self.scheduled_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn status_for_auto_publish(&self) -> AutomationStatus {
        if self.brief.auto_publish {
            AutomationStatus::Queued
        } else {
            AutomationStatus::Ready
        }
    }

    pub fn descriptor(
        &self,
        endpoint: &str,
        status: AutomationStatus,
        payload: Value,
    ) -> AutomationDescriptor {
        AutomationDescriptor {
            platform: self.platform,
            endpoint: endpoint.to_string(),
            method: "POST",
            status,
            scheduled_at: self.scheduled_at,
            payload,
        }
    }
}

pub type PayloadBuilder = fn(&PayloadContext) -> AutomationDescriptor;

/// Builds one descriptor per slot, in slot order.
#[tracing::instrument(skip(plan, brief, slots))]
pub fn build_automation(
    plan: &ContentPlan,
    brief: &CampaignBrief,
    slots: &[ScheduleSlot],
) -> Vec<AutomationDescriptor> {
    build_with_table(platforms::BUILDERS, plan, brief, slots)
}

fn build_with_table(
    table: &[(Platform, PayloadBuilder)],
    plan: &ContentPlan,
    brief: &CampaignBrief,
    slots: &[ScheduleSlot],
) -> Vec<AutomationDescriptor> {
    slots
        .iter()
        .map(|slot| {
            let context = context_for(plan, brief, slot);
            match table.iter().find(|(platform, _)| *platform == slot.platform) {
                Some((_, builder)) => builder(&context),
                None => noop_descriptor(&context),
            }
        })
        .collect()
}

fn context_for<'a>(
    plan: &'a ContentPlan,
    brief: &'a CampaignBrief,
    slot: &ScheduleSlot,
) -> PayloadContext<'a> {
    let (caption, hashtags) = match plan.asset_for(slot.platform) {
        Some(asset) => (asset.caption.clone(), asset.hashtags.clone()),
        None => (
            plan.production
                .master_script
                .chars()
                .take(FALLBACK_CAPTION_LENGTH)
                .collect(),
            vec![],
        ),
    };

    PayloadContext {
        platform: slot.platform,
        brief,
        plan,
        scheduled_at: slot.publish_at,
        caption,
        hashtags,
    }
}

fn noop_descriptor(context: &PayloadContext) -> AutomationDescriptor {
    AutomationDescriptor {
        platform: context.platform,
        endpoint: "N/A".to_string(),
        method: "NONE",
        status: AutomationStatus::Ready,
        scheduled_at: context.scheduled_at,
        payload: empty_payload(),
    }
}

fn empty_payload() -> Value {
    json!({})
}
