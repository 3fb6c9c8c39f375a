//! Per-platform publishing payloads. Adding a platform means one builder
//! function plus one row in [`BUILDERS`].

use serde_json::json;

use crate::brief::Platform;

use super::{AutomationDescriptor, AutomationStatus, PayloadBuilder, PayloadContext};

pub const BUILDERS: &[(Platform, PayloadBuilder)] = &[
    (Platform::Instagram, instagram),
    (Platform::Youtube, youtube),
    (Platform::Facebook, facebook),
    (Platform::Threads, threads),
    (Platform::Pinterest, pinterest),
];

const INSTAGRAM_ENDPOINT: &str = "https://graph.facebook.com/v19.0/{{IG_USER_ID}}/media";
const YOUTUBE_ENDPOINT: &str =
    "https://www.googleapis.com/upload/youtube/v3/videos?uploadType=resumable&part=snippet,status";
const FACEBOOK_ENDPOINT: &str = "https://graph.facebook.com/v19.0/{{FB_PAGE_ID}}/video_reels";
const THREADS_ENDPOINT: &str = "https://graph.threads.net/v1.0/{{THREADS_USER_ID}}/threads";
const PINTEREST_ENDPOINT: &str = "https://api.pinterest.com/v5/pins";

// "People & Blogs"
const YOUTUBE_CATEGORY_ID: &str = "22";

fn instagram(context: &PayloadContext) -> AutomationDescriptor {
    let (media_type, media_field) = if context.brief.primary_asset.is_image() {
        ("IMAGE", "image_url")
    } else {
        ("REELS", "video_url")
    };

    let mut payload = json!({
        "media_type": media_type,
        "caption": context.caption,
        "access_token": "{{IG_ACCESS_TOKEN}}",
        "publish": context.brief.auto_publish,
        "scheduled_publish_time": context.scheduled_at_iso(),
    });
    payload[media_field] = json!("{{MEDIA_URL}}");

    context.descriptor(INSTAGRAM_ENDPOINT, context.status_for_auto_publish(), payload)
}

fn youtube(context: &PayloadContext) -> AutomationDescriptor {
    let payload = json!({
        "snippet": {
            "title": context.plan.campaign.title,
            "description": context.caption,
            "tags": context.hashtags,
            "categoryId": YOUTUBE_CATEGORY_ID,
        },
        "status": {
            "privacyStatus": "private",
            "publishAt": context.scheduled_at_iso(),
            "selfDeclaredMadeForKids": false,
        },
        "access_token": "{{YOUTUBE_ACCESS_TOKEN}}",
    });

    context.descriptor(YOUTUBE_ENDPOINT, AutomationStatus::Queued, payload)
}

fn facebook(context: &PayloadContext) -> AutomationDescriptor {
    let video_state = if context.brief.auto_publish {
        "SCHEDULED"
    } else {
        "DRAFT"
    };

    let payload = json!({
        "video_url": "{{VIDEO_URL}}",
        "description": context.caption,
        "access_token": "{{FB_PAGE_ACCESS_TOKEN}}",
        "scheduled_publish_time": context.scheduled_at_iso(),
        "upload_phase": "finish",
        "video_state": video_state,
    });

    context.descriptor(FACEBOOK_ENDPOINT, context.status_for_auto_publish(), payload)
}

fn threads(context: &PayloadContext) -> AutomationDescriptor {
    let payload = json!({
        "text": context.caption,
        "media_urls": ["{{MEDIA_URL}}"],
        "access_token": "{{THREADS_ACCESS_TOKEN}}",
        "scheduled_time": context.scheduled_at_iso(),
    });

    context.descriptor(THREADS_ENDPOINT, AutomationStatus::Queued, payload)
}

fn pinterest(context: &PayloadContext) -> AutomationDescriptor {
    let media_source = if context.brief.primary_asset.is_image() {
        json!({ "source_type": "image_url", "url": "{{MEDIA_URL}}" })
    } else {
        json!({ "source_type": "video_id", "media_id": "{{PINTEREST_MEDIA_ID}}" })
    };

    let payload = json!({
        "board_id": "{{PINTEREST_BOARD_ID}}",
        "title": context.plan.campaign.title,
        "description": context.caption,
        "media_source": media_source,
        "link": "{{LANDING_PAGE_URL}}",
        "publish_at": context.scheduled_at_iso(),
        "access_token": "{{PINTEREST_ACCESS_TOKEN}}",
    });

    context.descriptor(PINTEREST_ENDPOINT, AutomationStatus::Queued, payload)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::automation::build_automation;
    use crate::brief::{AssetFormat, CampaignBrief};
    use crate::generator::fallback::fallback_plan;
    use crate::schedule::resolve_schedule;

    fn brief(primary_asset: AssetFormat) -> CampaignBrief {
        CampaignBrief {
            campaign_name: "Launch".into(),
            niche: None,
            persona: "10+ char persona text".into(),
            brand_voice: "Bold voice".into(),
            offer: "New course".into(),
            keywords: "fit,health".into(),
            platforms: Platform::ALL.to_vec(),
            primary_asset,
            variations: 2,
            schedule_date: Some("2024-10-01T10:00:00Z".into()),
            auto_publish: true,
            reference_links: None,
        }
    }

    fn descriptors(primary_asset: AssetFormat) -> Vec<AutomationDescriptor> {
        let brief = brief(primary_asset);
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let slots = resolve_schedule(brief.schedule_date.as_deref(), &brief.platforms, now);
        let plan = fallback_plan(&brief, &slots);
        build_automation(&plan, &brief, &slots)
    }

    #[test]
    fn every_platform_has_a_builder() {
        for platform in Platform::ALL {
            assert!(BUILDERS.iter().any(|(entry, _)| *entry == platform));
        }
    }

    #[test]
    fn payloads_never_contain_real_credentials() {
        for descriptor in descriptors(AssetFormat::Video) {
            let token = descriptor.payload["access_token"].as_str().unwrap();
            assert!(token.starts_with("{{") && token.ends_with("}}"));
            assert_eq!(descriptor.method, "POST");
        }
    }

    #[test]
    fn youtube_payload_shape() {
        let descriptors = descriptors(AssetFormat::Video);
        let youtube = &descriptors[1].payload;

        assert_eq!(youtube["snippet"]["title"], "Launch launch plan");
        assert_eq!(youtube["snippet"]["tags"], json!(["#fit", "#health"]));
        assert_eq!(youtube["snippet"]["categoryId"], "22");
        assert_eq!(youtube["status"]["privacyStatus"], "private");
        assert_eq!(youtube["status"]["publishAt"], "2024-10-01T10:45:00Z");
        assert_eq!(youtube["status"]["selfDeclaredMadeForKids"], false);
    }

    #[test]
    fn media_fields_follow_primary_asset() {
        let video = descriptors(AssetFormat::Video);
        let image = descriptors(AssetFormat::Image);

        assert_eq!(video[0].payload["video_url"], "{{MEDIA_URL}}");
        assert!(video[0].payload.get("image_url").is_none());
        assert_eq!(image[0].payload["image_url"], "{{MEDIA_URL}}");
        assert_eq!(image[4].payload["media_source"]["source_type"], "image_url");
        assert_eq!(video[4].payload["media_source"]["source_type"], "video_id");
    }

    #[test]
    fn instagram_caption_is_the_asset_caption() {
        let descriptors = descriptors(AssetFormat::Video);
        let instagram = &descriptors[0].payload;

        assert_eq!(
            instagram["caption"],
            "New course is here. Launch was made for 10+ char persona text."
        );
        assert_eq!(instagram["media_type"], "REELS");
        assert_eq!(instagram["publish"], true);
    }

    #[test]
    fn facebook_and_threads_payloads() {
        let descriptors = descriptors(AssetFormat::Video);

        assert_eq!(descriptors[2].payload["upload_phase"], "finish");
        assert_eq!(descriptors[2].payload["video_url"], "{{VIDEO_URL}}");
        assert_eq!(descriptors[3].payload["media_urls"], json!(["{{MEDIA_URL}}"]));
        assert!(descriptors[3].payload["text"]
            .as_str()
            .unwrap()
            .starts_with("New course is here."));
        assert!(descriptors[3].endpoint.contains("{{THREADS_USER_ID}}"));
    }
}
