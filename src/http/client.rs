use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::endpoint::{ApiProject, Endpoint, EndpointPayload};
use crate::error::AdapterError;
use crate::session::Session;
use crate::testing::TestPayload;

use super::adapter::SubmissionAdapter;
use super::request::CoreRequest;
use super::response::Ack;

const AUTH_HEADER: &str = "X-Zapi-Auth-Token";

/// reqwest-backed [`SubmissionAdapter`] talking to the core service.
#[derive(Debug, Clone)]
pub struct CoreClient {
    client: reqwest::Client,
    base_url: String,
    session: Session,
}

impl CoreClient {
    pub fn new(config: &DashboardConfig, session: Session) -> Result<Self, AdapterError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.core_url.clone(),
            session,
        })
    }

    /// Attach the session token, if any.
    fn authorize(&self, request: CoreRequest) -> CoreRequest {
        if self.session.access_token.is_empty() {
            return request;
        }
        request.header(AUTH_HEADER, format!("Bearer {}", self.session.access_token))
    }

    /// Send one request and unwrap the `{message, data}` envelope.
    pub async fn send(&self, request: CoreRequest) -> Result<Ack<Value>, AdapterError> {
        let url = build_url(&self.base_url, &request.path, &request.query)?;
        info!("{} {}", request.method, request.path);

        let request = self.authorize(request);
        let mut req_builder = self
            .client
            .request(request.method.into(), url)
            .header("Content-Type", "application/json");
        req_builder = apply_headers(req_builder, &request.headers)?;
        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let result = decode_ack(status.as_u16(), &bytes);
        if let Err(err) = &result {
            warn!("{} {} failed: {err}", request.method, request.path);
        }
        result
    }

    async fn send_for<T: DeserializeOwned>(
        &self,
        request: CoreRequest,
        what: &str,
    ) -> Result<T, AdapterError> {
        let ack = self.send(request).await?;
        let data = ack
            .data
            .ok_or_else(|| AdapterError::MissingData(what.to_string()))?;
        serde_json::from_value(data).map_err(|e| AdapterError::Decode(format!("{what}: {e}")))
    }
}

#[async_trait]
impl SubmissionAdapter for CoreClient {
    async fn create_endpoint(
        &self,
        api_id: &str,
        payload: &EndpointPayload,
    ) -> Result<Ack<Endpoint>, AdapterError> {
        let request = CoreRequest::post(format!("/endpoints/new/{api_id}"))
            .json(payload)
            .map_err(|e| AdapterError::Decode(e.to_string()))?;
        let ack = self.send(request).await?;
        Ok(decode_created(ack))
    }

    async fn fetch_api(&self, api_id: &str) -> Result<ApiProject, AdapterError> {
        self.send_for(CoreRequest::get(format!("/api/findOne/{api_id}")), "api")
            .await
    }

    async fn fetch_endpoints(&self, api_id: &str) -> Result<Vec<Endpoint>, AdapterError> {
        self.send_for(CoreRequest::get(format!("/endpoints/{api_id}")), "endpoints")
            .await
    }

    async fn submit_test(&self, payload: &TestPayload) -> Result<Ack<()>, AdapterError> {
        let raw = serde_json::to_string(payload).map_err(|e| AdapterError::Decode(e.to_string()))?;
        debug!("Test payload: {raw}");
        info!("Test `{}` assembled for route {}", payload.test_name, payload.route);
        Ok(Ack::message(format!("Test {} created", payload.test_name)))
    }

    async fn revoke_subscription(
        &self,
        api_id: &str,
        profile_id: &str,
    ) -> Result<Ack<()>, AdapterError> {
        let request =
            CoreRequest::post(format!("/subscription/revoke/{api_id}")).query("profileId", profile_id);
        Ok(self.send(request).await?.map(|_| ()))
    }

    async fn unsubscribe(&self, api_id: &str, profile_id: &str) -> Result<Ack<()>, AdapterError> {
        let request = CoreRequest::post(format!("/subscription/unsubscribe/{api_id}"))
            .query("profileId", profile_id);
        Ok(self.send(request).await?.map(|_| ()))
    }
}

fn build_url(
    base_url: &str,
    path: &str,
    query: &[(String, String)],
) -> Result<reqwest::Url, AdapterError> {
    let raw = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = reqwest::Url::parse(&raw).map_err(|e| AdapterError::InvalidUrl(format!("{raw}: {e}")))?;

    if !query.is_empty() {
        let mut query_pairs = url.query_pairs_mut();
        for (key, value) in query {
            query_pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

fn apply_headers(
    mut req_builder: reqwest::RequestBuilder,
    headers: &[(String, String)],
) -> Result<reqwest::RequestBuilder, AdapterError> {
    for (key, value) in headers {
        let header_name = HeaderName::from_bytes(key.trim().as_bytes())
            .map_err(|e| AdapterError::InvalidHeader(format!("`{key}`: {e}")))?;
        let header_value = HeaderValue::from_str(value.trim())
            .map_err(|e| AdapterError::InvalidHeader(format!("value of `{key}`: {e}")))?;
        req_builder = req_builder.header(header_name, header_value);
    }

    Ok(req_builder)
}

/// The created endpoint is optional in the acknowledgement; a copy we cannot
/// read is dropped, the next refresh brings the server's version anyway.
fn decode_created(ack: Ack<Value>) -> Ack<Endpoint> {
    let data = ack
        .data
        .and_then(|data| match serde_json::from_value::<Endpoint>(data) {
            Ok(endpoint) => Some(endpoint),
            Err(err) => {
                warn!("Ignoring unreadable endpoint in create response: {err}");
                None
            }
        });
    Ack {
        message: ack.message,
        data,
    }
}

fn decode_ack(status: u16, bytes: &[u8]) -> Result<Ack<Value>, AdapterError> {
    let parsed = if bytes.is_empty() {
        Ok(Ack::message(""))
    } else {
        serde_json::from_slice::<Ack<Value>>(bytes)
    };

    if !(200..300).contains(&status) {
        let message = match parsed {
            Ok(ack) if !ack.message.is_empty() => ack.message,
            _ => String::from_utf8_lossy(bytes).trim().to_string(),
        };
        return Err(AdapterError::Api { status, message });
    }

    parsed.map_err(|e| AdapterError::Decode(e.to_string()))
}
