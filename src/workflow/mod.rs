use chrono::{DateTime, Utc};

use crate::automation::AutomationDescriptor;
use crate::generator::GenerationMode;
use crate::plan::ContentPlan;
use crate::schedule::ScheduleSlot;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type WorkflowId = TypedId<Workflow>;

/// Everything produced for one brief submission.
#[derive(Clone, Debug)]
pub struct Workflow {
    pub id: WorkflowId,
    pub generated_at: DateTime<Utc>,
    pub mode: GenerationMode,
    pub schedule: Vec<ScheduleSlot>,
    pub plan: ContentPlan,
    pub automation: Vec<AutomationDescriptor>,
}

impl TypedIdMarker for Workflow {
    fn tag() -> &'static str {
        "WFL"
    }
}
