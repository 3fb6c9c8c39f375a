use actix_web::web::{Data, Json};
use actix_web::{get, post};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::automation::AutomationDescriptor;
use crate::error::Error;
use crate::generator::{GenerationMode, Generator};
use crate::plan::ContentPlan;
use crate::schedule::ScheduleSlot;

use super::{manager, Workflow, WorkflowId};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowBody {
    pub id: WorkflowId,
    pub generated_at: DateTime<Utc>,
    pub mode: GenerationMode,
    pub schedule: Vec<ScheduleSlot>,
    pub workflow: ContentPlan,
    pub automation: Vec<AutomationDescriptor>,
}

impl WorkflowBody {
    pub fn render(workflow: Workflow) -> WorkflowBody {
        WorkflowBody {
            id: workflow.id,
            generated_at: workflow.generated_at,
            mode: workflow.mode,
            schedule: workflow.schedule,
            workflow: workflow.plan,
            automation: workflow.automation,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub mode: GenerationMode,
}

#[post("/api/workflow")]
#[tracing::instrument(skip(generator, body))]
pub async fn create_workflow(
    generator: Data<Box<dyn Generator>>,
    body: Json<Value>,
) -> Result<Json<WorkflowBody>, Error> {
    let workflow =
        manager::generate_workflow(generator.get_ref().as_ref(), &body, Utc::now()).await?;

    Ok(Json(WorkflowBody::render(workflow)))
}

#[get("/api/health")]
#[tracing::instrument(skip(generator))]
pub async fn get_health(generator: Data<Box<dyn Generator>>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        mode: generator.mode(),
    })
}
