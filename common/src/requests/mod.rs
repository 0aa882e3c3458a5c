use crate::model::row::Row;
use serde::{Deserialize, Serialize};

/// Response body of `GET /api/default-query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultQueryResponse {
    pub query: String,
}

/// Request payload for `POST /api/submit-input`.
/// Carries the raw query text typed by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitInputRequest {
    pub input: String,
}

/// Response body of `POST /api/submit-input`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitInputResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub rows: Vec<Row>,
}
