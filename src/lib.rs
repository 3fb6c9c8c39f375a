use actix_web::web::{self, Data, JsonConfig, ServiceConfig};
use actix_web::{App, HttpResponse, HttpServer, ResponseError};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod automation;
pub mod brief;
pub mod config;
pub mod error;
pub mod generator;
pub mod plan;
pub mod schedule;
pub mod typedid;
pub mod violations;
pub mod workflow;

use config::Config;
use error::Error;

/// Registers the api routes and the json error format.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
        // format json errors with custom format
        Error::InvalidJson(err).into()
    }))
    .service(workflow::endpoints::create_workflow)
    .service(workflow::endpoints::get_health);
}

pub async fn path_not_found() -> HttpResponse {
    Error::PathNotFound.error_response()
}

pub async fn run(config: Config) -> Result<(), Error> {
    let generator = Data::new(generator::from_config(&config.generation)?);

    info!("listening on {}", config.addr);
    HttpServer::new(move || {
        App::new()
            .app_data(generator.clone())
            .wrap(TracingLogger::default())
            .configure(configure)
            .default_service(web::to(path_not_found))
    })
    .bind(config.addr.as_str())?
    .run()
    .await?;

    Ok(())
}
