use crate::config::ServerConfig;
use actix_web::{web, HttpResponse, Responder};
use common::requests::DefaultQueryResponse;
use log::warn;
use std::fs;
use std::path::Path;

/// Served when the query file is missing: lists the database's tables, which
/// is useful against any database.
pub(crate) const FALLBACK_QUERY: &str =
    "SELECT name, type FROM sqlite_master WHERE type IN ('table', 'view') ORDER BY name;";

pub(crate) async fn process(config: web::Data<ServerConfig>) -> impl Responder {
    let query = load_default_query(&config.query_file);
    HttpResponse::Ok().json(DefaultQueryResponse { query })
}

pub(crate) fn load_default_query(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!(
                "default query file {} not readable ({}), using fallback",
                path.display(),
                e
            );
            FALLBACK_QUERY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn query_file_is_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\n  SELECT * FROM results;  \n").unwrap();
        assert_eq!(load_default_query(file.path()), "SELECT * FROM results;");
    }

    #[test]
    fn missing_file_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            load_default_query(&dir.path().join("nope.sql")),
            FALLBACK_QUERY
        );
    }
}
