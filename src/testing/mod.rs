//! # Test definitions
//!
//! The create-test form session. A test targets one endpoint of the open API
//! project and supplies a value for each of its declared headers, body
//! fields and query parameters.
//!
//! Only open a [`TestDraft`] once both the API project and its endpoints have
//! been fetched; endpoint selection resolves against that catalog.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::endpoint::{Endpoint, EndpointCatalog, OptionKind};
use crate::error::DraftError;
use crate::http::adapter::SubmissionAdapter;
use crate::http::response::Ack;
use crate::notify::Notifier;
use crate::options::{NamedOption, OptionError, OptionSet};
use crate::session::Session;

/// Values supplied for one test run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestValues {
    pub headers: OptionSet,
    pub body: OptionSet,
    pub params: OptionSet,
}

/// What a test submission carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPayload {
    pub api_id: String,
    pub profile_id: String,
    pub test_name: String,
    pub route: String,
    pub payload: TestValues,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestDraft {
    api_id: String,
    pub test_name: String,
    endpoint: Option<Endpoint>,
    values: TestValues,
    pub header_value: String,
    pub body_value: String,
    pub param_value: String,
    submitting: bool,
}

impl TestDraft {
    pub fn new(api_id: impl Into<String>) -> Self {
        Self {
            api_id: api_id.into(),
            ..Self::default()
        }
    }

    pub fn api_id(&self) -> &str {
        &self.api_id
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    pub fn endpoint_name(&self) -> Option<&str> {
        self.endpoint.as_ref().map(|endpoint| endpoint.name.as_str())
    }

    /// Derived from the selected endpoint; empty until one is selected.
    pub fn route(&self) -> &str {
        self.endpoint
            .as_ref()
            .map(|endpoint| endpoint.route.as_str())
            .unwrap_or_default()
    }

    pub fn values(&self) -> &TestValues {
        &self.values
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Pick the first endpoint called `name`. Switching endpoints drops the
    /// values supplied for the previous one.
    pub fn select_endpoint(&mut self, name: &str, catalog: &EndpointCatalog) -> Result<(), DraftError> {
        let endpoint = catalog
            .find_by_name(name)
            .ok_or_else(|| DraftError::validation(format!("Unknown endpoint `{name}`")))?;

        if self.endpoint_name() != Some(name) {
            self.values = TestValues::default();
        }
        self.endpoint = Some(endpoint.clone());
        Ok(())
    }

    /// Supply `value` for the option `name`. The declared type and
    /// requiredness are carried over from the endpoint when it declares it.
    pub fn add_value(&mut self, kind: OptionKind, name: &str, value: &str) -> Result<(), OptionError> {
        let mut option = self
            .declared(kind)
            .and_then(|declared| declared.get(name))
            .cloned()
            .unwrap_or_else(|| NamedOption::with_value(name, ""));
        option.value = Some(value.to_string());

        self.values_mut(kind).add_value(option)
    }

    pub fn remove_value(&mut self, kind: OptionKind, name: &str) {
        self.values_mut(kind).remove(name);
    }

    pub fn add_header_value(&mut self, name: &str, value: &str) -> Result<(), OptionError> {
        self.add_value(OptionKind::Header, name, value)
    }

    pub fn add_body_value(&mut self, name: &str, value: &str) -> Result<(), OptionError> {
        self.add_value(OptionKind::Body, name, value)
    }

    pub fn add_param_value(&mut self, name: &str, value: &str) -> Result<(), OptionError> {
        self.add_value(OptionKind::Query, name, value)
    }

    pub fn payload(&self, session: &Session) -> Result<TestPayload, DraftError> {
        if self.test_name.trim().is_empty() {
            return Err(DraftError::validation("Test name cannot be empty"));
        }
        if self.endpoint.is_none() {
            return Err(DraftError::validation("Select an endpoint to test"));
        }

        Ok(TestPayload {
            api_id: self.api_id.clone(),
            profile_id: session.profile_id.clone(),
            test_name: self.test_name.trim().to_string(),
            route: self.route().to_string(),
            payload: self.values.clone(),
        })
    }

    pub fn begin_submit(&mut self, session: &Session) -> Result<TestPayload, DraftError> {
        if self.submitting {
            return Err(DraftError::InFlight);
        }
        let payload = self.payload(session)?;
        self.submitting = true;
        Ok(payload)
    }

    pub fn on_failed(&mut self, error: &str, notifier: &mut impl Notifier) {
        warn!("Test submission failed: {error}");
        notifier.notify_error(error);
        self.submitting = false;
    }

    /// Hand the assembled test to `adapter`. On success the caller drops the
    /// draft; on failure it stays editable.
    pub async fn submit<A, N>(
        &mut self,
        adapter: &A,
        session: &Session,
        notifier: &mut N,
    ) -> Result<Ack<()>, DraftError>
    where
        A: SubmissionAdapter + ?Sized,
        N: Notifier,
    {
        let payload = match self.begin_submit(session) {
            Ok(payload) => payload,
            Err(err) => {
                notifier.notify_error(&err.to_string());
                return Err(err);
            }
        };

        match adapter.submit_test(&payload).await {
            Ok(ack) => {
                info!("Test `{}` submitted", payload.test_name);
                notifier.notify_success(&ack.message);
                self.submitting = false;
                Ok(ack)
            }
            Err(err) => {
                self.on_failed(&err.to_string(), notifier);
                Err(err.into())
            }
        }
    }

    fn declared(&self, kind: OptionKind) -> Option<&OptionSet> {
        self.endpoint.as_ref().map(|endpoint| match kind {
            OptionKind::Header => &endpoint.headers,
            OptionKind::Body => &endpoint.body,
            OptionKind::Query => &endpoint.query,
        })
    }

    fn values_mut(&mut self, kind: OptionKind) -> &mut OptionSet {
        match kind {
            OptionKind::Header => &mut self.values.headers,
            OptionKind::Body => &mut self.values.body,
            OptionKind::Query => &mut self.values.params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::method::HttpMethod;
    use crate::http::mock::MockAdapter;
    use crate::notify::{ToastKind, Toasts};
    use crate::options::ParamType;

    fn endpoint(name: &str, route: &str) -> Endpoint {
        let mut headers = OptionSet::new();
        headers
            .add(NamedOption::new("Authorization", ParamType::String, true))
            .unwrap();
        let mut query = OptionSet::new();
        query.add(NamedOption::new("limit", ParamType::Number, false)).unwrap();

        Endpoint {
            id: Some(format!("id-{name}")),
            name: name.into(),
            route: route.into(),
            method: HttpMethod::Get,
            description: String::new(),
            headers,
            body: OptionSet::new(),
            query,
        }
    }

    fn catalog() -> EndpointCatalog {
        let mut catalog = EndpointCatalog::new();
        catalog.refresh(vec![
            endpoint("users", "/users"),
            endpoint("orders", "/orders"),
            endpoint("users", "/users/v2"),
        ]);
        catalog
    }

    #[test]
    fn selecting_derives_route_from_first_match() {
        let mut draft = TestDraft::new("api-1");
        draft.select_endpoint("users", &catalog()).unwrap();
        assert_eq!(draft.route(), "/users");

        assert!(matches!(
            draft.select_endpoint("missing", &catalog()),
            Err(DraftError::Validation(_))
        ));
        assert_eq!(draft.endpoint_name(), Some("users"));
    }

    #[test]
    fn switching_endpoint_drops_values() {
        let catalog = catalog();
        let mut draft = TestDraft::new("api-1");
        draft.select_endpoint("users", &catalog).unwrap();
        draft.add_header_value("Authorization", "Bearer x").unwrap();

        draft.select_endpoint("users", &catalog).unwrap();
        assert_eq!(draft.values().headers.len(), 1);

        draft.select_endpoint("orders", &catalog).unwrap();
        assert!(draft.values().headers.is_empty());
        assert_eq!(draft.route(), "/orders");
    }

    #[test]
    fn values_require_content_and_unique_names() {
        let mut draft = TestDraft::new("api-1");
        draft.select_endpoint("users", &catalog()).unwrap();

        assert_eq!(draft.add_param_value("limit", "").unwrap_err(), OptionError::EmptyValue);
        draft.add_param_value("limit", "25").unwrap();
        assert_eq!(
            draft.add_param_value("LIMIT", "50").unwrap_err(),
            OptionError::DuplicateName("LIMIT".into())
        );

        let limit = draft.values().params.get("limit").unwrap();
        assert_eq!(limit.param_type, ParamType::Number);
        assert_eq!(limit.value.as_deref(), Some("25"));

        draft.remove_value(OptionKind::Query, "limit");
        assert!(draft.values().params.is_empty());
    }

    #[test]
    fn payload_requires_name_and_endpoint() {
        let session = Session::new("p-1", "t");
        let mut draft = TestDraft::new("api-1");
        assert!(matches!(draft.payload(&session), Err(DraftError::Validation(_))));

        draft.test_name = "smoke".into();
        assert!(matches!(draft.payload(&session), Err(DraftError::Validation(_))));

        draft.select_endpoint("orders", &catalog()).unwrap();
        draft.add_header_value("Authorization", "Bearer x").unwrap();
        let json = serde_json::to_value(draft.payload(&session).unwrap()).unwrap();
        assert_eq!(json["apiId"], "api-1");
        assert_eq!(json["profileId"], "p-1");
        assert_eq!(json["testName"], "smoke");
        assert_eq!(json["route"], "/orders");
        assert_eq!(json["payload"]["headers"][0]["value"], "Bearer x");
        assert_eq!(json["payload"]["params"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn submit_hands_payload_to_adapter() {
        let adapter = MockAdapter::new();
        let mut toasts = Toasts::new();
        let mut draft = TestDraft::new("api-1");
        draft.test_name = "smoke".into();
        draft.select_endpoint("users", &catalog()).unwrap();

        let ack = draft
            .submit(&adapter, &Session::new("p-1", "t"), &mut toasts)
            .await
            .unwrap();

        assert_eq!(ack.message, "Test created");
        assert_eq!(adapter.tests()[0].route, "/users");
        assert!(!draft.is_submitting());
        assert_eq!(toasts.entries()[0].kind, ToastKind::Success);
    }

    #[tokio::test]
    async fn invalid_test_is_not_sent() {
        let adapter = MockAdapter::new();
        let mut toasts = Toasts::new();
        let mut draft = TestDraft::new("api-1");

        let err = draft
            .submit(&adapter, &Session::default(), &mut toasts)
            .await
            .unwrap_err();

        assert!(matches!(err, DraftError::Validation(_)));
        assert!(adapter.calls().is_empty());
        assert_eq!(toasts.entries()[0].message, "Test name cannot be empty");
    }

    #[tokio::test]
    async fn failed_submit_stays_editable() {
        let adapter = MockAdapter::failing("core unavailable");
        let mut toasts = Toasts::new();
        let mut draft = TestDraft::new("api-1");
        draft.test_name = "smoke".into();
        draft.select_endpoint("users", &catalog()).unwrap();

        assert!(draft.submit(&adapter, &Session::default(), &mut toasts).await.is_err());
        assert!(!draft.is_submitting());
        assert_eq!(draft.test_name, "smoke");
        assert_eq!(toasts.entries()[0].kind, ToastKind::Error);
    }
}
