use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

use crate::automation::build_automation;
use crate::brief::validate_brief;
use crate::error::Error;
use crate::generator::Generator;
use crate::schedule::resolve_schedule;

use super::{Workflow, WorkflowId};

/// Runs a submission through validation, scheduling, generation and payload
/// building. Nothing is kept once the result is returned.
#[tracing::instrument(skip(generator, raw))]
pub async fn generate_workflow(
    generator: &dyn Generator,
    raw: &Value,
    now: DateTime<Utc>,
) -> Result<Workflow, Error> {
    let brief = validate_brief(raw).map_err(|violation| {
        info!("rejected brief: {}", violation);
        violation
    })?;

    let schedule = resolve_schedule(brief.schedule_date.as_deref(), &brief.platforms, now);

    let mut plan = generator
        .generate(&brief, &schedule)
        .await
        .map_err(|err| {
            warn!("content generation failed: {}", err);
            err
        })?;

    // generated times are never trusted
    plan.apply_schedule(&schedule);

    let automation = build_automation(&plan, &brief, &schedule);

    info!(
        "generated workflow for {} with {} assets",
        brief.campaign_name,
        plan.assets.len()
    );

    Ok(Workflow {
        id: WorkflowId::new(),
        generated_at: now,
        mode: generator.mode(),
        schedule,
        plan,
        automation,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{Duration, TimeZone};
    use serde_json::json;

    use super::*;
    use crate::automation::AutomationStatus;
    use crate::brief::{CampaignBrief, Platform};
    use crate::generator::fallback::fallback_plan;
    use crate::generator::test::MockGenerator;
    use crate::generator::{FallbackGenerator, GenerationMode};
    use crate::schedule::ScheduleSlot;
    use crate::violations::Violation;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 11, 11, 0, 0).unwrap()
    }

    fn raw_brief() -> Value {
        json!({
            "campaignName": "Launch",
            "persona": "10+ char persona text",
            "brandVoice": "Bold voice",
            "offer": "New course",
            "keywords": "fit,health",
            "platforms": ["instagram", "pinterest"],
            "variations": 2,
            "autoPublish": true,
        })
    }

    #[tokio::test]
    async fn fallback_scenario_produces_two_assets_and_descriptors() {
        let workflow = generate_workflow(&FallbackGenerator, &raw_brief(), now())
            .await
            .unwrap();

        assert_eq!(workflow.mode, GenerationMode::Fallback);
        assert_eq!(workflow.plan.assets.len(), 2);
        assert_eq!(workflow.plan.assets[0].platform, Platform::Instagram);
        assert_eq!(workflow.plan.assets[0].asset_type, "reel");
        assert_eq!(workflow.plan.assets[1].platform, Platform::Pinterest);
        assert_eq!(workflow.plan.assets[1].asset_type, "idea pin");
        assert_eq!(workflow.automation.len(), 2);
        assert_eq!(workflow.automation[0].status, AutomationStatus::Queued);
        assert_eq!(workflow.automation[1].status, AutomationStatus::Queued);
    }

    #[tokio::test]
    async fn fallback_is_deterministic_for_a_fixed_clock() {
        let first = generate_workflow(&FallbackGenerator, &raw_brief(), now())
            .await
            .unwrap();
        let second = generate_workflow(&FallbackGenerator, &raw_brief(), now())
            .await
            .unwrap();

        assert_eq!(first.plan, second.plan);
        assert_eq!(first.automation, second.automation);
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn invalid_brief_never_reaches_the_generator() {
        let mut raw = raw_brief();
        raw["variations"] = json!(11);

        let error = generate_workflow(&MockGenerator::new(), &raw, now())
            .await
            .unwrap_err();

        assert_eq!(
            error,
            Error::InvalidBrief {
                violation: Violation::OutOfRange {
                    field: "variations".into(),
                    min: 1,
                    max: 10,
                }
            }
        );
    }

    #[tokio::test]
    async fn generated_times_are_replaced_by_slots() {
        let mut generator = MockGenerator::new();
        let called_generate = Arc::new(Mutex::new(false));
        let called_generate_clone = Arc::clone(&called_generate);
        generator.on_generate = Box::new(move |brief: &CampaignBrief, slots: &[ScheduleSlot]| {
            *called_generate_clone.lock().unwrap() = true;
            assert_eq!(slots.len(), 2);
            let mut plan = fallback_plan(brief, slots);
            for asset in &mut plan.assets {
                asset.schedule_time = asset.schedule_time + Duration::days(30);
            }
            Ok(plan)
        });

        let workflow = generate_workflow(&generator, &raw_brief(), now())
            .await
            .unwrap();

        assert!(
            *called_generate.lock().unwrap(),
            "generator.generate was not called"
        );
        assert_eq!(workflow.mode, GenerationMode::Live);
        assert_eq!(workflow.plan.assets[0].schedule_time, now());
        assert_eq!(
            workflow.plan.assets[1].schedule_time,
            now() + Duration::minutes(45)
        );
    }

    #[tokio::test]
    async fn generation_failure_fails_the_whole_request() {
        let mut generator = MockGenerator::new();
        generator.on_generate = Box::new(|_: &CampaignBrief, _: &[ScheduleSlot]| {
            Err(Error::GenerationEmptyResponse)
        });

        let error = generate_workflow(&generator, &raw_brief(), now())
            .await
            .unwrap_err();

        assert_eq!(error, Error::GenerationEmptyResponse);
    }

    #[tokio::test]
    async fn schedule_date_sets_the_first_slot() {
        let mut raw = raw_brief();
        raw["scheduleDate"] = json!("2025-01-20T08:15:00Z");

        let workflow = generate_workflow(&FallbackGenerator, &raw, now())
            .await
            .unwrap();

        let first = Utc.with_ymd_and_hms(2025, 1, 20, 8, 15, 0).unwrap();
        assert_eq!(workflow.schedule[0].publish_at, first);
        assert_eq!(workflow.schedule[1].publish_at, first + Duration::minutes(45));
        assert_eq!(workflow.automation[1].scheduled_at, first + Duration::minutes(45));
    }
}
