use serde_json::{Map, Number, Value};

use crate::violations::Violation;

use super::{AssetFormat, CampaignBrief, Platform};

pub const MIN_VARIATIONS: i64 = 1;
pub const MAX_VARIATIONS: i64 = 10;

/// Turns an untyped submission into a [`CampaignBrief`], or reports the first
/// rule it breaks. Fields are checked in the order they appear on the form.
#[tracing::instrument(skip(raw))]
pub fn validate_brief(raw: &Value) -> Result<CampaignBrief, Violation> {
    let fields = raw.as_object().ok_or_else(|| Violation::WrongType {
        field: "brief".into(),
        expected: "an object".into(),
    })?;

    let campaign_name = required_string(fields, "campaignName", 2)?;
    let niche = optional_string(fields, "niche")?;
    let persona = required_string(fields, "persona", 10)?;
    let brand_voice = required_string(fields, "brandVoice", 5)?;
    let offer = required_string(fields, "offer", 5)?;
    let keywords = required_string(fields, "keywords", 3)?;
    let platforms = platforms(fields)?;
    let primary_asset = primary_asset(fields)?;
    let variations = variations(fields)?;
    let schedule_date = optional_string(fields, "scheduleDate")?;
    let auto_publish = optional_bool(fields, "autoPublish")?.unwrap_or(true);
    let reference_links = optional_string(fields, "referenceLinks")?;

    Ok(CampaignBrief {
        campaign_name,
        niche,
        persona,
        brand_voice,
        offer,
        keywords,
        platforms,
        primary_asset,
        variations,
        schedule_date,
        auto_publish,
        reference_links,
    })
}

fn present<'a>(fields: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    fields.get(field).filter(|value| !value.is_null())
}

fn required_string(
    fields: &Map<String, Value>,
    field: &str,
    min_length: usize,
) -> Result<String, Violation> {
    let value = present(fields, field).ok_or_else(|| Violation::Missing {
        field: field.into(),
    })?;

    let value = value.as_str().ok_or_else(|| Violation::WrongType {
        field: field.into(),
        expected: "a string".into(),
    })?;

    let value = value.trim();
    if value.chars().count() < min_length {
        return Err(Violation::TooShort {
            field: field.into(),
            min_length,
        });
    }

    Ok(value.to_string())
}

fn optional_string(fields: &Map<String, Value>, field: &str) -> Result<Option<String>, Violation> {
    let value = match present(fields, field) {
        Some(value) => value,
        None => return Ok(None),
    };

    let value = value.as_str().ok_or_else(|| Violation::WrongType {
        field: field.into(),
        expected: "a string".into(),
    })?;

    let value = value.trim();
    if value.is_empty() {
        Ok(None)
    } else {
        Ok(Some(value.to_string()))
    }
}

fn optional_bool(fields: &Map<String, Value>, field: &str) -> Result<Option<bool>, Violation> {
    match present(fields, field) {
        Some(value) => value.as_bool().map(Some).ok_or_else(|| Violation::WrongType {
            field: field.into(),
            expected: "a boolean".into(),
        }),
        None => Ok(None),
    }
}

fn platforms(fields: &Map<String, Value>) -> Result<Vec<Platform>, Violation> {
    let values = present(fields, "platforms")
        .ok_or(Violation::NoPlatforms)?
        .as_array()
        .ok_or_else(|| Violation::WrongType {
            field: "platforms".into(),
            expected: "a list of platform names".into(),
        })?;

    if values.is_empty() {
        return Err(Violation::NoPlatforms);
    }

    let mut platforms = Vec::with_capacity(values.len());
    for value in values {
        let name = value.as_str().ok_or_else(|| Violation::WrongType {
            field: "platforms".into(),
            expected: "a list of platform names".into(),
        })?;

        let platform: Platform = name.parse().map_err(|_| Violation::UnknownPlatform {
            value: name.to_string(),
        })?;

        platforms.push(platform);
    }

    Ok(platforms)
}

fn primary_asset(fields: &Map<String, Value>) -> Result<AssetFormat, Violation> {
    match optional_string(fields, "primaryAsset")? {
        Some(value) => value
            .parse()
            .map_err(|_| Violation::UnknownAssetFormat { value }),
        None => Ok(AssetFormat::default()),
    }
}

// forms post numbers as strings, so both are accepted
fn variations(fields: &Map<String, Value>) -> Result<u8, Violation> {
    let out_of_range = || Violation::OutOfRange {
        field: "variations".into(),
        min: MIN_VARIATIONS,
        max: MAX_VARIATIONS,
    };

    let value = present(fields, "variations").ok_or_else(|| Violation::Missing {
        field: "variations".into(),
    })?;

    let count = match value {
        Value::Number(number) => whole_number(number).ok_or_else(out_of_range)?,
        Value::String(text) => text.trim().parse::<i64>().map_err(|_| out_of_range())?,
        _ => {
            return Err(Violation::WrongType {
                field: "variations".into(),
                expected: "an integer".into(),
            })
        }
    };

    if !(MIN_VARIATIONS..=MAX_VARIATIONS).contains(&count) {
        return Err(out_of_range());
    }

    Ok(count as u8)
}

// `2.0` is the same count as `2` to most JSON encoders
fn whole_number(number: &Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|value| value.fract() == 0.0 && value.abs() <= i64::MAX as f64)
            .map(|value| value as i64)
    })
}
