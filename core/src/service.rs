//! The record service: `DartClient` paired with a `Transport`.

use serde::de::DeserializeOwned;

use crate::client::DartClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::fetch::Fetch;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Record, RecordId};

/// Fetches records of one entity. The transport is injected at construction.
#[derive(Debug, Clone)]
pub struct DartService<T = ReqwestTransport> {
    client: DartClient,
    transport: T,
}

impl DartService<ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(
            DartClient::from_config(config),
            ReqwestTransport::from_config(config)?,
        ))
    }
}

impl<T: Transport + Sync> DartService<T> {
    pub fn new(client: DartClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &DartClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// One record by id, as an opaque JSON value.
    pub fn get_record(&self, id: RecordId) -> Fetch<'_, T, Record> {
        self.get_record_as(id)
    }

    /// Every record of the entity, in the order the backend returns them.
    pub fn get_records(&self) -> Fetch<'_, T, Vec<Record>> {
        self.get_records_as()
    }

    pub fn get_record_as<R: DeserializeOwned>(&self, id: RecordId) -> Fetch<'_, T, R> {
        Fetch::new(
            &self.client,
            &self.transport,
            self.client.build_get_record(id),
            DartClient::parse_record_as::<R>,
        )
    }

    pub fn get_records_as<R: DeserializeOwned>(&self) -> Fetch<'_, T, Vec<R>> {
        Fetch::new(
            &self.client,
            &self.transport,
            self.client.build_list_records(),
            DartClient::parse_records_as::<R>,
        )
    }
}
