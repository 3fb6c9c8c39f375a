use chrono::SecondsFormat;

use crate::brief::CampaignBrief;
use crate::schedule::ScheduleSlot;

pub const SYSTEM_INSTRUCTION: &str = "You are the creative director of a social media content studio. \
Respond with a single JSON object and nothing else: no prose, no markdown fences. \
Never invent API keys, access tokens or account ids. When a credential or id is needed, \
write a double-brace placeholder such as {{IG_ACCESS_TOKEN}} instead.";

const RESPONSE_SHAPE: &str = r#"{
  "campaign": { "title": string, "summary": string, "hooks": [string] },
  "production": {
    "masterScript": string,
    "storyboard": [{ "title": string, "description": string }],
    "audioPrompts": [string],
    "editingNotes": [string]
  },
  "assets": [{
    "id": string,
    "platform": "instagram" | "youtube" | "facebook" | "threads" | "pinterest",
    "assetType": string,
    "caption": string,
    "hashtags": [string],
    "scheduleTime": string,
    "callToAction": string,
    "optimizationNotes": string
  }]
}"#;

/// The user turn sent to the text-generation service.
pub fn build_prompt(brief: &CampaignBrief, slots: &[ScheduleSlot]) -> String {
    let mut prompt = String::from("Create a short-form video campaign plan for this brief.\n\n");

    prompt.push_str(&format!("Campaign name: {}\n", brief.campaign_name));
    if let Some(niche) = &brief.niche {
        prompt.push_str(&format!("Niche: {}\n", niche));
    }
    prompt.push_str(&format!("Target persona: {}\n", brief.persona));
    prompt.push_str(&format!("Brand voice: {}\n", brief.brand_voice));
    prompt.push_str(&format!("Offer: {}\n", brief.offer));
    prompt.push_str(&format!("Keywords: {}\n", brief.keywords));
    prompt.push_str(&format!("Primary asset: {}\n", brief.primary_asset.as_str()));
    prompt.push_str(&format!("Hook variations wanted: {}\n", brief.variations));
    prompt.push_str(&format!(
        "Auto-publish: {}\n",
        if brief.auto_publish { "yes" } else { "no, drafts only" }
    ));
    if let Some(links) = &brief.reference_links {
        prompt.push_str(&format!("Reference links: {}\n", links));
    }

    prompt.push_str("\nPublishing schedule (one asset per line, in this order):\n");
    for slot in slots {
        prompt.push_str(&format!(
            "- {}: {}\n",
            slot.platform,
            slot.publish_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }

    prompt.push_str("\nReturn JSON with exactly this shape:\n");
    prompt.push_str(RESPONSE_SHAPE);

    prompt
}
