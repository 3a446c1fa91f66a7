//! # Endpoint definitions
//!
//! The add-endpoint form session ([`EndpointDraft`]) and the endpoints of the
//! open API project ([`EndpointCatalog`]).
//!
//! A draft moves Idle -> Composing -> Submitting and back to Idle once the
//! core acknowledges it. A failed submission returns it to Composing with
//! every field intact.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::DraftError;
use crate::http::adapter::SubmissionAdapter;
use crate::http::method::HttpMethod;
use crate::http::response::Ack;
use crate::notify::Notifier;
use crate::options::{NamedOption, OptionError, OptionSet};

/// Content type of a request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyFormat {
    #[default]
    #[serde(rename = "application/json")]
    Json,
    #[serde(rename = "application/xml")]
    Xml,
    #[serde(rename = "application/octet-stream")]
    OctetStream,
    #[serde(rename = "text/plain")]
    PlainText,
    #[serde(rename = "form-data")]
    FormData,
}

impl BodyFormat {
    pub const ALL: [BodyFormat; 5] = [
        BodyFormat::Json,
        BodyFormat::Xml,
        BodyFormat::OctetStream,
        BodyFormat::PlainText,
        BodyFormat::FormData,
    ];
}

impl Display for BodyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BodyFormat::Json => "application/json",
            BodyFormat::Xml => "application/xml",
            BodyFormat::OctetStream => "application/octet-stream",
            BodyFormat::PlainText => "text/plain",
            BodyFormat::FormData => "form-data",
        };
        write!(f, "{label}")
    }
}

/// What gets posted to `/endpoints/new/:apiId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointPayload {
    pub name: String,
    pub route: String,
    pub method: HttpMethod,
    pub description: String,
    pub headers: OptionSet,
    pub body: OptionSet,
    pub query: OptionSet,
}

/// An endpoint as the core stores it. `id` is assigned server-side, so
/// optimistic entries have none until the next refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub route: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub headers: OptionSet,
    #[serde(default)]
    pub body: OptionSet,
    #[serde(default)]
    pub query: OptionSet,
}

impl From<EndpointPayload> for Endpoint {
    fn from(payload: EndpointPayload) -> Self {
        Self {
            id: None,
            name: payload.name,
            route: payload.route,
            method: payload.method,
            description: payload.description,
            headers: payload.headers,
            body: payload.body,
            query: payload.query,
        }
    }
}

/// An API project as returned by `/api/findOne/:apiId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiProject {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub endpoints: Option<Vec<Endpoint>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Composing,
    Submitting,
}

/// Which of the three option lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Header,
    Body,
    Query,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDraft {
    state: FormState,
    pub name: String,
    pub route: String,
    method: Option<HttpMethod>,
    pub description: String,
    pub body_format: BodyFormat,
    options_toggled: bool,
    headers: OptionSet,
    body: OptionSet,
    query: OptionSet,
}

impl Default for EndpointDraft {
    fn default() -> Self {
        Self {
            state: FormState::Idle,
            name: String::new(),
            route: String::new(),
            method: Some(HttpMethod::Get),
            description: String::new(),
            body_format: BodyFormat::default(),
            options_toggled: false,
            headers: OptionSet::new(),
            body: OptionSet::new(),
            query: OptionSet::new(),
        }
    }
}

impl EndpointDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != FormState::Idle
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn method(&self) -> Option<HttpMethod> {
        self.method
    }

    pub fn headers(&self) -> &OptionSet {
        &self.headers
    }

    pub fn body(&self) -> &OptionSet {
        &self.body
    }

    pub fn query(&self) -> &OptionSet {
        &self.query
    }

    /// The "Add Endpoint" / "Cancel" button. Option lists are emptied in
    /// both directions; closing also blanks every scalar field.
    pub fn toggle_adding(&mut self) {
        match self.state {
            FormState::Idle => {
                self.clear_options();
                self.state = FormState::Composing;
            }
            FormState::Composing => self.reset(),
            FormState::Submitting => {}
        }
    }

    /// Leave the form without submitting.
    pub fn cancel(&mut self) {
        if self.state == FormState::Composing {
            self.reset();
        }
    }

    /// `None` is the empty selection, which also collapses the options panel.
    /// Body fields are dropped once the method no longer carries a body.
    pub fn select_method(&mut self, method: Option<HttpMethod>) {
        self.method = method;
        if method.is_none() {
            self.options_toggled = false;
        }
        if !self.body_enabled() {
            self.body.clear();
        }
    }

    /// Returns false when the panel is pinned open by a POST.
    pub fn toggle_options(&mut self) -> bool {
        if self.options_locked() {
            return false;
        }
        self.options_toggled = !self.options_toggled;
        true
    }

    pub fn options_locked(&self) -> bool {
        self.method.is_some_and(HttpMethod::carries_body)
    }

    pub fn options_open(&self) -> bool {
        self.options_toggled || self.options_locked()
    }

    /// Body fields are only offered for methods that carry a body.
    pub fn body_enabled(&self) -> bool {
        self.options_locked()
    }

    pub fn add_option(&mut self, kind: OptionKind, option: NamedOption) -> Result<(), OptionError> {
        self.options_mut(kind).add(option)
    }

    pub fn remove_option(&mut self, kind: OptionKind, name: &str) {
        self.options_mut(kind).remove(name);
    }

    pub fn add_header(&mut self, option: NamedOption) -> Result<(), OptionError> {
        self.add_option(OptionKind::Header, option)
    }

    pub fn add_body_field(&mut self, option: NamedOption) -> Result<(), OptionError> {
        self.add_option(OptionKind::Body, option)
    }

    pub fn add_query_param(&mut self, option: NamedOption) -> Result<(), OptionError> {
        self.add_option(OptionKind::Query, option)
    }

    pub fn remove_header(&mut self, name: &str) {
        self.remove_option(OptionKind::Header, name);
    }

    pub fn remove_body_field(&mut self, name: &str) {
        self.remove_option(OptionKind::Body, name);
    }

    pub fn remove_query_param(&mut self, name: &str) {
        self.remove_option(OptionKind::Query, name);
    }

    /// Assemble the payload, or explain what is missing.
    pub fn validate(&self) -> Result<EndpointPayload, DraftError> {
        if self.name.trim().is_empty() || self.route.trim().is_empty() {
            return Err(DraftError::validation("Please add a name and route"));
        }
        let method = self
            .method
            .ok_or_else(|| DraftError::validation("Please select a method"))?;

        Ok(EndpointPayload {
            name: self.name.trim().to_string(),
            route: self.route.trim().to_string(),
            method,
            description: self.description.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            query: self.query.clone(),
        })
    }

    /// Validate and enter Submitting. Nothing should be sent on error.
    pub fn begin_submit(&mut self) -> Result<EndpointPayload, DraftError> {
        match self.state {
            FormState::Submitting => return Err(DraftError::InFlight),
            FormState::Idle => return Err(DraftError::validation("No endpoint is being added")),
            FormState::Composing => {}
        }
        let payload = self.validate()?;
        self.state = FormState::Submitting;
        Ok(payload)
    }

    /// The core accepted `payload`: record it, tell the user, close the form.
    pub fn on_created(
        &mut self,
        payload: &EndpointPayload,
        message: &str,
        catalog: &mut EndpointCatalog,
        notifier: &mut impl Notifier,
    ) {
        info!("Endpoint `{}` created", payload.name);
        catalog.merge_optimistic(payload);
        notifier.notify_success(message);
        self.reset();
    }

    /// The core rejected the submission; keep everything for a retry.
    pub fn on_failed(&mut self, error: &str, notifier: &mut impl Notifier) {
        warn!("Endpoint submission failed: {error}");
        notifier.notify_error(error);
        if self.state == FormState::Submitting {
            self.state = FormState::Composing;
        }
    }

    /// Run the whole submit contract against `adapter`, then reconcile the
    /// catalog with the server's copy.
    pub async fn submit<A, N>(
        &mut self,
        adapter: &A,
        api_id: &str,
        catalog: &mut EndpointCatalog,
        notifier: &mut N,
    ) -> Result<Ack<Endpoint>, DraftError>
    where
        A: SubmissionAdapter + ?Sized,
        N: Notifier,
    {
        let payload = match self.begin_submit() {
            Ok(payload) => payload,
            Err(err) => {
                notifier.notify_error(&err.to_string());
                return Err(err);
            }
        };
        debug!("Submitting endpoint payload: {payload:?}");

        let ack = match adapter.create_endpoint(api_id, &payload).await {
            Ok(ack) => ack,
            Err(err) => {
                self.on_failed(&err.to_string(), notifier);
                return Err(err.into());
            }
        };
        self.on_created(&payload, &ack.message, catalog, notifier);

        match adapter.fetch_endpoints(api_id).await {
            Ok(endpoints) => catalog.refresh(endpoints),
            Err(err) => warn!("Failed to refresh endpoints for {api_id}: {err}"),
        }

        Ok(ack)
    }

    fn options_mut(&mut self, kind: OptionKind) -> &mut OptionSet {
        match kind {
            OptionKind::Header => &mut self.headers,
            OptionKind::Body => &mut self.body,
            OptionKind::Query => &mut self.query,
        }
    }

    fn clear_options(&mut self) {
        self.headers.clear();
        self.body.clear();
        self.query.clear();
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Endpoints of the open API project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointCatalog {
    endpoints: Vec<Endpoint>,
}

impl EndpointCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_optimistic(&mut self, payload: &EndpointPayload) {
        self.endpoints.push(Endpoint::from(payload.clone()));
    }

    /// Replace everything with the server's list.
    pub fn refresh(&mut self, endpoints: Vec<Endpoint>) {
        self.endpoints = endpoints;
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|endpoint| endpoint.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.endpoints.iter().map(|endpoint| endpoint.name.clone()).collect()
    }

    pub fn edit(&mut self, index: usize, name: &str, method: HttpMethod, route: &str) -> bool {
        match self.endpoints.get_mut(index) {
            Some(endpoint) => {
                endpoint.name = name.to_string();
                endpoint.method = method;
                endpoint.route = route.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<Endpoint> {
        (index < self.endpoints.len()).then(|| self.endpoints.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Endpoint> {
        self.endpoints.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Endpoint> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockAdapter;
    use crate::notify::{ToastKind, Toasts};
    use crate::options::ParamType;

    fn composing(name: &str, route: &str) -> EndpointDraft {
        let mut draft = EndpointDraft::new();
        draft.toggle_adding();
        draft.name = name.into();
        draft.route = route.into();
        draft
    }

    fn header(name: &str) -> NamedOption {
        NamedOption::new(name, ParamType::String, true)
    }

    #[test]
    fn toggle_adding_opens_and_resets() {
        let mut draft = composing("List users", "/users");
        draft.add_header(header("Authorization")).unwrap();
        assert_eq!(draft.state(), FormState::Composing);

        draft.toggle_adding();
        assert_eq!(draft, EndpointDraft::new());
    }

    #[test]
    fn post_pins_options_open() {
        let mut draft = composing("Create user", "/users");
        assert!(!draft.options_open());

        draft.select_method(Some(HttpMethod::Post));
        assert!(draft.options_open());
        assert!(draft.body_enabled());
        assert!(!draft.toggle_options());
        assert!(draft.options_open());

        draft.select_method(Some(HttpMethod::Get));
        assert!(!draft.options_open());
        assert!(draft.toggle_options());
        assert!(draft.options_open());
    }

    #[test]
    fn leaving_post_drops_body_fields() {
        let mut draft = composing("Create user", "/users");
        draft.select_method(Some(HttpMethod::Post));
        draft.add_body_field(NamedOption::new("email", ParamType::String, true)).unwrap();
        draft.add_header(header("Authorization")).unwrap();

        draft.select_method(Some(HttpMethod::Patch));
        assert!(!draft.body_enabled());
        assert!(draft.body().is_empty());
        assert_eq!(draft.headers().len(), 1);

        let json = serde_json::to_value(draft.validate().unwrap()).unwrap();
        assert_eq!(json["body"], serde_json::json!([]));
    }

    #[test]
    fn empty_method_closes_options() {
        let mut draft = composing("Delete user", "/users/:id");
        draft.toggle_options();
        assert!(draft.options_open());

        draft.select_method(None);
        assert!(!draft.options_open());
    }

    #[test]
    fn option_lists_are_independent() {
        let mut draft = composing("Search", "/search");
        draft.add_header(header("q")).unwrap();
        draft.add_query_param(header("q")).unwrap();
        draft.add_body_field(header("q")).unwrap();

        let err = draft.add_query_param(header("Q")).unwrap_err();
        assert_eq!(err, OptionError::DuplicateName("Q".into()));

        draft.remove_header("q");
        assert!(draft.headers().is_empty());
        assert_eq!(draft.query().len(), 1);
        assert_eq!(draft.body().len(), 1);
    }

    #[test]
    fn validate_requires_name_route_and_method() {
        let draft = composing("List users", "  ");
        assert!(matches!(draft.validate(), Err(DraftError::Validation(_))));

        let draft = composing("", "/users");
        assert!(matches!(draft.validate(), Err(DraftError::Validation(_))));

        let mut draft = composing("List users", "/users");
        draft.select_method(None);
        assert!(matches!(draft.validate(), Err(DraftError::Validation(_))));

        draft.select_method(Some(HttpMethod::Delete));
        let payload = draft.validate().unwrap();
        assert_eq!(payload.method, HttpMethod::Delete);
    }

    #[test]
    fn payload_serializes_option_lists() {
        let mut draft = composing("Create user", "/users");
        draft.select_method(Some(HttpMethod::Post));
        draft.add_body_field(NamedOption::new("email", ParamType::String, true)).unwrap();

        let json = serde_json::to_value(draft.validate().unwrap()).unwrap();
        assert_eq!(json["method"], "post");
        assert_eq!(json["body"][0]["name"], "email");
        assert_eq!(json["headers"], serde_json::json!([]));
        assert!(json.get("bodyFormat").is_none());
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut draft = composing("List users", "/users");
        draft.begin_submit().unwrap();
        assert!(draft.is_submitting());
        assert!(matches!(draft.begin_submit(), Err(DraftError::InFlight)));
    }

    #[tokio::test]
    async fn empty_route_never_reaches_the_adapter() {
        let adapter = MockAdapter::new();
        let mut catalog = EndpointCatalog::new();
        let mut toasts = Toasts::new();
        let mut draft = composing("List users", "");

        let err = draft
            .submit(&adapter, "api-1", &mut catalog, &mut toasts)
            .await
            .unwrap_err();

        assert!(matches!(err, DraftError::Validation(_)));
        assert!(adapter.calls().is_empty());
        assert_eq!(draft.state(), FormState::Composing);
        assert_eq!(toasts.entries()[0].message, "Please add a name and route");
    }

    #[tokio::test]
    async fn accepted_submission_resets_and_refreshes() {
        let server_copy = Endpoint {
            id: Some("e-1".into()),
            name: "List users".into(),
            route: "/users".into(),
            method: HttpMethod::Get,
            description: String::new(),
            headers: OptionSet::new(),
            body: OptionSet::new(),
            query: OptionSet::new(),
        };
        let adapter = MockAdapter::with_endpoints(vec![server_copy.clone()]);
        let mut catalog = EndpointCatalog::new();
        let mut toasts = Toasts::new();
        let mut draft = composing("List users", "/users");
        draft.add_header(header("Authorization")).unwrap();

        let ack = draft
            .submit(&adapter, "api-1", &mut catalog, &mut toasts)
            .await
            .unwrap();

        assert_eq!(ack.message, "Endpoint created");
        assert_eq!(draft, EndpointDraft::new());
        assert!(draft.headers().is_empty());
        assert_eq!(
            adapter.calls(),
            vec!["POST /endpoints/new/api-1", "GET /endpoints/api-1"]
        );
        assert_eq!(adapter.created()[0].headers.len(), 1);
        assert_eq!(catalog.iter().cloned().collect::<Vec<_>>(), vec![server_copy]);
        assert_eq!(toasts.entries()[0].kind, ToastKind::Success);
    }

    #[tokio::test]
    async fn rejected_submission_keeps_the_draft() {
        let adapter = MockAdapter::failing("Route already exists");
        let mut catalog = EndpointCatalog::new();
        let mut toasts = Toasts::new();
        let mut draft = composing("List users", "/users");
        draft.add_query_param(header("page")).unwrap();

        let err = draft
            .submit(&adapter, "api-1", &mut catalog, &mut toasts)
            .await
            .unwrap_err();

        assert!(matches!(err, DraftError::Adapter(_)));
        assert_eq!(draft.state(), FormState::Composing);
        assert_eq!(draft.query().len(), 1);
        assert_eq!(draft.name, "List users");
        assert!(catalog.is_empty());
        assert_eq!(toasts.entries()[0].kind, ToastKind::Error);
    }

    #[test]
    fn refresh_wins_over_optimistic_entries() {
        let mut catalog = EndpointCatalog::new();
        let draft = composing("List users", "/users");
        catalog.merge_optimistic(&draft.validate().unwrap());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(0).unwrap().id.is_none());

        catalog.refresh(Vec::new());
        assert!(catalog.is_empty());
    }

    #[test]
    fn catalog_edit_and_remove() {
        let mut catalog = EndpointCatalog::new();
        catalog.merge_optimistic(&composing("a", "/a").validate().unwrap());
        catalog.merge_optimistic(&composing("b", "/b").validate().unwrap());

        assert!(catalog.edit(1, "b2", HttpMethod::Patch, "/b2"));
        assert!(!catalog.edit(5, "x", HttpMethod::Get, "/x"));
        assert_eq!(catalog.find_by_name("b2").unwrap().method, HttpMethod::Patch);

        assert_eq!(catalog.remove(0).unwrap().name, "a");
        assert!(catalog.remove(3).is_none());
        assert_eq!(catalog.names(), vec!["b2"]);
    }

    #[test]
    fn endpoint_accepts_server_shape() {
        let endpoint: Endpoint = serde_json::from_value(serde_json::json!({
            "_id": "e-9",
            "name": "Health",
            "route": "/health",
            "method": "GET"
        }))
        .unwrap();
        assert_eq!(endpoint.id.as_deref(), Some("e-9"));
        assert!(endpoint.query.is_empty());
    }
}
