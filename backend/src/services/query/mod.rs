//! Query endpoints used by the explorer's "Load from server" and
//! "Run query" actions.
//!
//! - `GET /api/default-query`: returns `{ "query": ... }`, read from the
//!   configured query file, or a table listing when that file is missing.
//! - `POST /api/submit-input`: takes `{ "input": sql }`, runs it against the
//!   read-only database on a blocking thread and returns
//!   `{ "message": "Received!", "rows": [...] }`. Statement errors answer
//!   `400 Bad Request`, an unopenable database `503 Service Unavailable`.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod database;
mod default_query;
mod submit_input;

const API_PATH: &str = "/api";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/default-query", get().to(default_query::process))
        .route("/submit-input", post().to(submit_input::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::row::CellValue;
    use common::requests::{DefaultQueryResponse, SubmitInputResponse};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config_for(database: std::path::PathBuf) -> ServerConfig {
        ServerConfig {
            database_path: database,
            query_file: "does/not/exist.sql".into(),
            open_browser: false,
            ..ServerConfig::default()
        }
    }

    #[actix_web::test]
    async fn default_query_falls_back_without_a_file() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for("unused.sqlite".into())))
                .service(configure_routes()),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/default-query").to_request();
        let body: DefaultQueryResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.query, default_query::FALLBACK_QUERY);
    }

    #[actix_web::test]
    async fn submit_input_returns_rows() {
        let (_dir, path) = database::tests::fixture();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for(path)))
                .service(configure_routes()),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/submit-input")
            .set_json(json!({ "input": "SELECT driver, year FROM results ORDER BY year" }))
            .to_request();
        let body: SubmitInputResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.message, "Received!");
        assert_eq!(body.rows.len(), 2);
        assert_eq!(body.rows[1]["driver"], CellValue::from("Prost"));
    }

    #[actix_web::test]
    async fn submit_input_status_codes() {
        let (dir, path) = database::tests::fixture();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for(path)))
                .service(configure_routes()),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/submit-input")
            .set_json(json!({ "input": "SELECT * FROM missing_table" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for(dir.path().join("absent.sqlite"))))
                .service(configure_routes()),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/submit-input")
            .set_json(json!({ "input": "SELECT 1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
