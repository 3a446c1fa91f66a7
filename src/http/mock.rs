//! In-memory [`SubmissionAdapter`] for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::endpoint::{ApiProject, Endpoint, EndpointPayload};
use crate::error::AdapterError;
use crate::testing::TestPayload;

use super::adapter::SubmissionAdapter;
use super::response::Ack;

#[derive(Debug, Default)]
pub struct MockAdapter {
    /// When set, every call fails with this message.
    pub fail_with: Option<String>,
    /// What `fetch_endpoints` returns.
    pub endpoints: Vec<Endpoint>,
    pub api: Option<ApiProject>,
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<EndpointPayload>>,
    tests: Mutex<Vec<TestPayload>>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_endpoints(endpoints: Vec<Endpoint>) -> Self {
        Self {
            endpoints,
            ..Self::default()
        }
    }

    pub fn with_api(api: ApiProject, endpoints: Vec<Endpoint>) -> Self {
        Self {
            api: Some(api),
            endpoints,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<EndpointPayload> {
        self.created.lock().unwrap().clone()
    }

    pub fn tests(&self) -> Vec<TestPayload> {
        self.tests.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), AdapterError> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(message) => Err(AdapterError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SubmissionAdapter for MockAdapter {
    async fn create_endpoint(
        &self,
        api_id: &str,
        payload: &EndpointPayload,
    ) -> Result<Ack<Endpoint>, AdapterError> {
        self.record(format!("POST /endpoints/new/{api_id}"))?;
        self.created.lock().unwrap().push(payload.clone());
        Ok(Ack::message("Endpoint created"))
    }

    async fn fetch_api(&self, api_id: &str) -> Result<ApiProject, AdapterError> {
        self.record(format!("GET /api/findOne/{api_id}"))?;
        self.api
            .clone()
            .ok_or_else(|| AdapterError::MissingData("api".into()))
    }

    async fn fetch_endpoints(&self, api_id: &str) -> Result<Vec<Endpoint>, AdapterError> {
        self.record(format!("GET /endpoints/{api_id}"))?;
        Ok(self.endpoints.clone())
    }

    async fn submit_test(&self, payload: &TestPayload) -> Result<Ack<()>, AdapterError> {
        self.record("submit test".to_string())?;
        self.tests.lock().unwrap().push(payload.clone());
        Ok(Ack::message("Test created"))
    }

    async fn revoke_subscription(
        &self,
        api_id: &str,
        profile_id: &str,
    ) -> Result<Ack<()>, AdapterError> {
        self.record(format!("POST /subscription/revoke/{api_id}?profileId={profile_id}"))?;
        Ok(Ack::message("Subscription revoked"))
    }

    async fn unsubscribe(&self, api_id: &str, profile_id: &str) -> Result<Ack<()>, AdapterError> {
        self.record(format!("POST /subscription/unsubscribe/{api_id}?profileId={profile_id}"))?;
        Ok(Ack::message("Unsubscribed"))
    }
}
