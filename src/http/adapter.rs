use async_trait::async_trait;

use crate::endpoint::{ApiProject, Endpoint, EndpointPayload};
use crate::error::AdapterError;
use crate::testing::TestPayload;

use super::response::Ack;

/// Boundary to the core service. Drafts and subscription actions only talk
/// to the backend through this trait.
#[async_trait]
pub trait SubmissionAdapter: Send + Sync {
    /// `POST /endpoints/new/:apiId`
    async fn create_endpoint(
        &self,
        api_id: &str,
        payload: &EndpointPayload,
    ) -> Result<Ack<Endpoint>, AdapterError>;

    /// `GET /api/findOne/:apiId`
    async fn fetch_api(&self, api_id: &str) -> Result<ApiProject, AdapterError>;

    /// `GET /endpoints/:apiId`
    async fn fetch_endpoints(&self, api_id: &str) -> Result<Vec<Endpoint>, AdapterError>;

    /// Hand over an assembled test. The core does not expose a route for
    /// this yet.
    async fn submit_test(&self, payload: &TestPayload) -> Result<Ack<()>, AdapterError>;

    /// `POST /subscription/revoke/:apiId?profileId=`
    async fn revoke_subscription(
        &self,
        api_id: &str,
        profile_id: &str,
    ) -> Result<Ack<()>, AdapterError>;

    /// `POST /subscription/unsubscribe/:apiId?profileId=`
    async fn unsubscribe(&self, api_id: &str, profile_id: &str) -> Result<Ack<()>, AdapterError>;
}
