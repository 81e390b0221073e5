//! Stateless HTTP request builder and response parser for the entity API.
//!
//! # Design
//! `DartClient` holds only a base URL and an entity name and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The round-trip in between belongs to a transport.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Record, RecordId, DART_REPORT};

/// Synchronous, stateless client for the entity API.
#[derive(Debug, Clone)]
pub struct DartClient {
    base_url: String,
    entity: String,
}

impl DartClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            entity: DART_REPORT.to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url).with_entity(&config.entity)
    }

    /// Target another entity type served by the same backend.
    pub fn with_entity(mut self, entity: &str) -> Self {
        self.entity = entity.to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// `GET <base>/entities/<entity>:<id>`. The id is not checked.
    pub fn build_get_record(&self, id: RecordId) -> HttpRequest {
        get(format!("{}/entities/{}:{id}", self.base_url, self.entity))
    }

    /// `GET <base>/entities/<entity>`.
    pub fn build_list_records(&self) -> HttpRequest {
        get(format!("{}/entities/{}", self.base_url, self.entity))
    }

    pub fn parse_get_record(&self, response: HttpResponse) -> Result<Record, ApiError> {
        self.parse_record_as(response)
    }

    pub fn parse_list_records(&self, response: HttpResponse) -> Result<Vec<Record>, ApiError> {
        self.parse_records_as(response)
    }

    /// Decode a single record into a caller-owned type.
    pub fn parse_record_as<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Decode a record collection into caller-owned types. The body must be
    /// a JSON array.
    pub fn parse_records_as<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<T>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }
}

fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
