use super::database::{run_query, QueryError};
use crate::config::ServerConfig;
use actix_web::{web, HttpResponse, Responder};
use common::requests::{SubmitInputRequest, SubmitInputResponse};
use log::{error, info};
use std::time::Instant;

pub(crate) async fn process(
    config: web::Data<ServerConfig>,
    req: web::Json<SubmitInputRequest>,
) -> impl Responder {
    let sql = req.into_inner().input.trim().to_string();
    let database = config.database_path.clone();
    let start = Instant::now();

    let handle = tokio::task::spawn_blocking(move || run_query(&database, &sql));
    match handle.await {
        Ok(Ok(rows)) => {
            info!("query returned {} rows in {:.2?}", rows.len(), start.elapsed());
            HttpResponse::Ok().json(SubmitInputResponse {
                message: "Received!".to_string(),
                rows,
            })
        }
        Ok(Err(e @ QueryError::Invalid(_))) => {
            error!("{}", e);
            HttpResponse::BadRequest().body(e.to_string())
        }
        Ok(Err(e @ QueryError::Unavailable(_))) => {
            error!("{}", e);
            HttpResponse::ServiceUnavailable().body(e.to_string())
        }
        Err(join_err) => {
            error!("query task failed: {}", join_err);
            HttpResponse::InternalServerError().body(format!("Task join error: {}", join_err))
        }
    }
}
