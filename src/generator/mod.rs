use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::brief::CampaignBrief;
use crate::config::GenerationConfig;
use crate::error::Error;
use crate::plan::ContentPlan;
use crate::schedule::ScheduleSlot;

pub mod fallback;
pub mod gemini;
pub mod prompt;

pub use fallback::FallbackGenerator;
pub use gemini::GeminiGenerator;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Live,
    Fallback,
}

/// Something that can turn a brief into a content plan.
#[async_trait]
pub trait Generator: Send + Sync {
    fn mode(&self) -> GenerationMode;

    async fn generate(
        &self,
        brief: &CampaignBrief,
        slots: &[ScheduleSlot],
    ) -> Result<ContentPlan, Error>;
}

/// Picks the live generator when an API key is configured, otherwise the
/// deterministic fallback.
pub fn from_config(config: &GenerationConfig) -> Result<Box<dyn Generator>, Error> {
    match &config.api_key {
        Some(api_key) => {
            info!("using live generation with model {}", config.model);
            let generator = GeminiGenerator::new(api_key.clone(), config)?;
            Ok(Box::new(generator))
        }
        None => {
            info!("no generation api key configured, using fallback generation");
            Ok(Box::new(FallbackGenerator))
        }
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use url::Url;

    use super::*;

    fn config(api_key: Option<&str>) -> GenerationConfig {
        GenerationConfig {
            api_key: api_key.map(String::from),
            model: "gemini-2.0-flash".into(),
            api_url: Url::parse("http://localhost:1/").unwrap(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn api_key_selects_live_generation() {
        assert_eq!(
            from_config(&config(Some("key"))).unwrap().mode(),
            GenerationMode::Live
        );
        assert_eq!(
            from_config(&config(None)).unwrap().mode(),
            GenerationMode::Fallback
        );
    }
}
