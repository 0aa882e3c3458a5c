//! Requests to the backend and the static data directory.

use common::config::{DEFAULT_QUERY_PATH, SAMPLE_DATA_PATH, SUBMIT_INPUT_PATH};
use common::ingest::parse_csv;
use common::model::row::Dataset;
use common::requests::{DefaultQueryResponse, SubmitInputRequest, SubmitInputResponse};
use common::{ExplorerError, Result};
use gloo_net::http::Request;

pub async fn fetch_default_query() -> Result<String> {
    let response = Request::get(DEFAULT_QUERY_PATH)
        .send()
        .await
        .map_err(|e| ExplorerError::load_failure("Failed to connect to backend", e))?;
    if !response.ok() {
        let detail = response.text().await.unwrap_or_default();
        return Err(ExplorerError::rejected(
            "Could not load default query from backend",
            response.status(),
            &detail,
        ));
    }
    let body: DefaultQueryResponse = response
        .json()
        .await
        .map_err(|e| ExplorerError::load_failure("Could not load default query from backend", e))?;
    if body.query.trim().is_empty() {
        return Err(ExplorerError::LoadFailure(
            "Could not load default query from backend".to_string(),
        ));
    }
    Ok(body.query)
}

/// Runs `query` on the backend. An empty result is an error.
pub async fn submit_query(query: String) -> Result<Dataset> {
    let response = Request::post(SUBMIT_INPUT_PATH)
        .json(&SubmitInputRequest { input: query })
        .map_err(|e| ExplorerError::load_failure("Error executing backend query", e))?
        .send()
        .await
        .map_err(|e| ExplorerError::load_failure("Error executing backend query", e))?;
    if !response.ok() {
        let detail = response.text().await.unwrap_or_default();
        return Err(ExplorerError::rejected(
            "Error executing backend query",
            response.status(),
            &detail,
        ));
    }
    let body: SubmitInputResponse = response
        .json()
        .await
        .map_err(|e| ExplorerError::load_failure("Error executing backend query", e))?;
    if body.rows.is_empty() {
        return Err(ExplorerError::EmptyResult);
    }
    Ok(body.rows)
}

pub async fn fetch_sample_csv() -> Result<Dataset> {
    let response = Request::get(SAMPLE_DATA_PATH)
        .send()
        .await
        .map_err(|e| ExplorerError::load_failure("Sample file unavailable", e))?;
    if !response.ok() {
        return Err(ExplorerError::rejected(
            "Sample file unavailable",
            response.status(),
            "",
        ));
    }
    let text = response
        .text()
        .await
        .map_err(|e| ExplorerError::load_failure("Sample file unavailable", e))?;
    parse_csv(&text)
}
