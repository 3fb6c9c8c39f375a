use async_trait::async_trait;

use crate::brief::{CampaignBrief, Platform};
use crate::error::Error;
use crate::plan::{
    default_asset_type, Asset, CampaignOverview, ContentPlan, Production, StoryboardStep,
};
use crate::schedule::ScheduleSlot;

use super::{GenerationMode, Generator};

/// Builds a plan from the brief alone. The same brief and slots always give
/// the same plan.
#[derive(Copy, Clone, Debug, Default)]
pub struct FallbackGenerator;

#[async_trait]
impl Generator for FallbackGenerator {
    fn mode(&self) -> GenerationMode {
        GenerationMode::Fallback
    }

    #[tracing::instrument(skip(self, brief, slots), fields(campaign = %brief.campaign_name))]
    async fn generate(
        &self,
        brief: &CampaignBrief,
        slots: &[ScheduleSlot],
    ) -> Result<ContentPlan, Error> {
        Ok(fallback_plan(brief, slots))
    }
}

pub fn fallback_plan(brief: &CampaignBrief, slots: &[ScheduleSlot]) -> ContentPlan {
    let hashtags = brief.hashtags();

    let assets = slots
        .iter()
        .enumerate()
        .map(|(index, slot)| Asset {
            id: format!("{}-{}", slot.platform, index + 1),
            platform: slot.platform,
            asset_type: default_asset_type(slot.platform).to_string(),
            caption: format!(
                "{} is here. {} was made for {}.",
                brief.offer, brief.campaign_name, brief.persona
            ),
            hashtags: hashtags.clone(),
            schedule_time: slot.publish_at,
            call_to_action: call_to_action(slot.platform).to_string(),
            optimization_notes: optimization_notes(slot.platform).to_string(),
        })
        .collect();

    ContentPlan {
        campaign: CampaignOverview {
            title: format!("{} launch plan", brief.campaign_name),
            summary: summary(brief),
            hooks: vec![
                "Stop scrolling: this changes how you start your week.".to_string(),
                "Three seconds. One idea. Watch what happens next.".to_string(),
                "Nobody talks about this, so we will.".to_string(),
            ],
        },
        production: Production {
            master_script: format!(
                "Open with the strongest hook straight to camera. Introduce {offer} in a {voice} tone, \
                 show the problem it solves in one quick scene, then the result. \
                 Close on a clear call to action and keep the {voice} tone throughout.",
                offer = brief.offer,
                voice = brief.brand_voice,
            ),
            storyboard: vec![
                StoryboardStep {
                    title: "Hook".to_string(),
                    description: "Tight close-up, bold on-screen text, first line spoken within one second."
                        .to_string(),
                },
                StoryboardStep {
                    title: "Problem".to_string(),
                    description: "Relatable moment that shows the pain point without naming the product."
                        .to_string(),
                },
                StoryboardStep {
                    title: "Reveal".to_string(),
                    description: format!("Introduce {} with a clean product shot or demo.", brief.offer),
                },
                StoryboardStep {
                    title: "Call to action".to_string(),
                    description: "End card with the offer, the link and the brand mark.".to_string(),
                },
            ],
            audio_prompts: vec![
                format!("Upbeat background track that matches a {} brand voice.", brief.brand_voice),
                "Short riser into the reveal, soft hit on the call to action.".to_string(),
            ],
            editing_notes: editing_notes(brief),
        },
        assets,
    }
}

fn summary(brief: &CampaignBrief) -> String {
    let mut summary = format!(
        "{} promotes {} to {} with a {} voice.",
        brief.campaign_name, brief.offer, brief.persona, brief.brand_voice
    );
    if let Some(niche) = &brief.niche {
        summary.push_str(&format!(" Niche: {}.", niche));
    }
    summary
}

fn editing_notes(brief: &CampaignBrief) -> Vec<String> {
    let mut notes = vec![
        format!(
            "Cut {} variation(s) of the opening hook and test them against each other.",
            brief.variations
        ),
        "Burn in captions; most viewers watch without sound.".to_string(),
        format!("Keep the primary {} format for every cut.", brief.primary_asset.as_str()),
    ];
    if let Some(links) = &brief.reference_links {
        notes.push(format!("Match pacing and style to the references: {}", links));
    }
    notes
}

fn call_to_action(platform: Platform) -> &'static str {
    match platform {
        Platform::Instagram => "Tap the link in bio to get started.",
        Platform::Youtube => "Subscribe and check the description for the link.",
        Platform::Facebook => "Learn more with the link below.",
        Platform::Threads => "Reply with a question and we'll answer it.",
        Platform::Pinterest => "Save this pin and visit the site.",
    }
}

fn optimization_notes(platform: Platform) -> &'static str {
    match platform {
        Platform::Instagram => "Keep it under 30 seconds and put the hook on the cover frame.",
        Platform::Youtube => "Front-load keywords in the title and add chapters to the description.",
        Platform::Facebook => "Add captions and test a square crop for the feed.",
        Platform::Threads => "Lead with a conversational line and ask a question.",
        Platform::Pinterest => "Use a 2:3 vertical crop with keyword-rich text overlay.",
    }
}
