use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::brief::Platform;

pub const SLOT_SPACING_MINUTES: i64 = 45;

/// When one platform's post goes out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub platform: Platform,
    pub publish_at: DateTime<Utc>,
}

/// Lays out one slot per platform, in submission order, starting at the
/// requested date (or `now` when it is missing or unreadable) and spaced
/// [`SLOT_SPACING_MINUTES`] apart.
#[tracing::instrument(skip(platforms))]
pub fn resolve_schedule(
    schedule_date: Option<&str>,
    platforms: &[Platform],
    now: DateTime<Utc>,
) -> Vec<ScheduleSlot> {
    let base = schedule_date.and_then(parse_schedule_date).unwrap_or(now);

    platforms
        .iter()
        .enumerate()
        .map(|(index, platform)| ScheduleSlot {
            platform: *platform,
            publish_at: base + Duration::minutes(SLOT_SPACING_MINUTES * index as i64),
        })
        .collect()
}

/// Reads RFC 3339 timestamps, naive date-times (taken as UTC) and plain
/// dates (midnight UTC).
pub fn parse_schedule_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn one_slot_per_platform_spaced_evenly() {
        let platforms = [Platform::Youtube, Platform::Instagram, Platform::Threads];

        let slots = resolve_schedule(Some("2024-07-04T09:00:00Z"), &platforms, now());

        assert_eq!(slots.len(), platforms.len());
        assert_eq!(
            slots[0].publish_at,
            Utc.with_ymd_and_hms(2024, 7, 4, 9, 0, 0).unwrap()
        );
        for (slot, platform) in slots.iter().zip(platforms.iter()) {
            assert_eq!(slot.platform, *platform);
        }
        for pair in slots.windows(2) {
            assert_eq!(pair[1].publish_at - pair[0].publish_at, Duration::minutes(45));
        }
    }

    #[test]
    fn missing_or_garbage_date_uses_now() {
        let platforms = [Platform::Facebook];

        assert_eq!(resolve_schedule(None, &platforms, now())[0].publish_at, now());
        assert_eq!(
            resolve_schedule(Some("next tuesday"), &platforms, now())[0].publish_at,
            now()
        );
        assert_eq!(
            resolve_schedule(Some("2024-02-30"), &platforms, now())[0].publish_at,
            now()
        );
    }

    #[test]
    fn parses_offsets_and_form_dates() {
        assert_eq!(
            parse_schedule_date("2024-07-04T09:00:00+02:00"),
            Some(Utc.with_ymd_and_hms(2024, 7, 4, 7, 0, 0).unwrap())
        );
        assert_eq!(
            parse_schedule_date("2024-07-04T09:30"),
            Some(Utc.with_ymd_and_hms(2024, 7, 4, 9, 30, 0).unwrap())
        );
        assert_eq!(
            parse_schedule_date("2024-07-04"),
            Some(Utc.with_ymd_and_hms(2024, 7, 4, 0, 0, 0).unwrap())
        );
    }
}
