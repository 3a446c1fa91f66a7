mod config;
mod endpoint;
mod error;
mod http;
mod notify;
mod options;
mod session;
mod storage;
mod subscriptions;
mod testing;
mod ui;

use std::fmt::{self, Display};

use iced::widget::{column, container, row, scrollable};
use iced::{Element, Length, Task};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::style;

use config::DashboardConfig;
use endpoint::{ApiProject, BodyFormat, Endpoint, EndpointCatalog, EndpointDraft, OptionKind};
use http::adapter::SubmissionAdapter;
use http::client::CoreClient;
use http::method::HttpMethod;
use notify::{Notifier, Toasts};
use options::{OptionInput, ParamType};
use session::Session;
use subscriptions::SubscriptionAction;
use testing::TestDraft;

const FALLBACK_CORE_URL: &str = "http://localhost:4000";

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zapi_hub=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut toasts = Toasts::new();
    let config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            toasts.notify_error(&format!("{err}, using {FALLBACK_CORE_URL}"));
            DashboardConfig::new(FALLBACK_CORE_URL, None, None)
        }
    };
    let session = load_session(&config, &mut toasts);

    let client = match CoreClient::new(&config, session.clone()) {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to build HTTP client: {err}");
            std::process::exit(1);
        }
    };
    info!("Core service at {}", config.core_url);
    let initial_api_id = config.api_id.clone().unwrap_or_default();

    iced::application("ZapiAPI Hub", update, view)
        .theme(|_| style::app_theme())
        .window_size((1220.0, 840.0))
        .run_with(move || App::new(client, session, initial_api_id, toasts))
}

/// Resolve the session and remember it for the next launch.
fn load_session(config: &DashboardConfig, toasts: &mut Toasts) -> Session {
    let stored = match storage::load_session() {
        Ok(stored) => stored,
        Err(err) => {
            toasts.notify_error(&err.to_string());
            None
        }
    };

    let session = Session::resolve(config, stored.clone());
    if session.is_signed_in() && stored.as_ref() != Some(&session) {
        if let Err(err) = storage::save_session(&session) {
            toasts.notify_error(&err.to_string());
        }
    }
    session
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Endpoints,
    Tests,
    Subscriptions,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 3] = [
        DashboardTab::Endpoints,
        DashboardTab::Tests,
        DashboardTab::Subscriptions,
    ];
}

impl Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DashboardTab::Endpoints => "Endpoints",
            DashboardTab::Tests => "Tests",
            DashboardTab::Subscriptions => "Subscriptions",
        };
        write!(f, "{label}")
    }
}

/// What comes back from an endpoint submission: the draft and catalog as
/// the submit contract left them, plus what to tell the user. Only applied
/// while `api_id` is still the open project.
#[derive(Debug, Clone)]
pub struct EndpointSubmission {
    api_id: String,
    draft: EndpointDraft,
    catalog: EndpointCatalog,
    toasts: Toasts,
}

#[derive(Debug, Clone)]
pub struct TestSubmission {
    api_id: String,
    draft: TestDraft,
    toasts: Toasts,
    accepted: bool,
}

/// Row of the endpoint table being edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointEdit {
    pub index: usize,
    pub name: String,
    pub method: HttpMethod,
    pub route: String,
}

struct App {
    client: CoreClient,
    session: Session,
    tab: DashboardTab,
    api_id_input: String,
    api: Option<ApiProject>,
    catalog: EndpointCatalog,
    loading: bool,
    endpoint_draft: EndpointDraft,
    endpoint_submitting: bool,
    header_input: OptionInput,
    body_input: OptionInput,
    query_input: OptionInput,
    editing: Option<EndpointEdit>,
    test_draft: Option<TestDraft>,
    test_submitting: bool,
    subscription_api_id: String,
    subscription_busy: bool,
    toasts: Toasts,
}

impl App {
    fn new(
        client: CoreClient,
        session: Session,
        api_id: String,
        toasts: Toasts,
    ) -> (Self, Task<Message>) {
        let mut app = Self {
            client,
            session,
            tab: DashboardTab::Endpoints,
            api_id_input: api_id,
            api: None,
            catalog: EndpointCatalog::new(),
            loading: false,
            endpoint_draft: EndpointDraft::new(),
            endpoint_submitting: false,
            header_input: OptionInput::default(),
            body_input: OptionInput::default(),
            query_input: OptionInput::default(),
            editing: None,
            test_draft: None,
            test_submitting: false,
            subscription_api_id: String::new(),
            subscription_busy: false,
            toasts,
        };

        let task = if app.api_id_input.is_empty() {
            Task::none()
        } else {
            load_project(&mut app)
        };
        (app, task)
    }

    fn api_id(&self) -> Option<&str> {
        self.api.as_ref().map(|api| api.id.as_str())
    }

    fn is_open_project(&self, api_id: &str) -> bool {
        self.api_id() == Some(api_id)
    }

    fn submitting(&self) -> bool {
        self.endpoint_submitting || self.test_submitting
    }

    fn option_input_mut(&mut self, kind: OptionKind) -> &mut OptionInput {
        match kind {
            OptionKind::Header => &mut self.header_input,
            OptionKind::Body => &mut self.body_input,
            OptionKind::Query => &mut self.query_input,
        }
    }

    fn reset_option_inputs(&mut self) {
        self.header_input = OptionInput::default();
        self.body_input = OptionInput::default();
        self.query_input = OptionInput::default();
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(DashboardTab),
    ApiIdChanged(String),
    LoadPressed,
    ProjectLoaded(Result<(ApiProject, Vec<Endpoint>), String>),

    AddEndpointToggled,
    EndpointCancelled,
    EndpointNameChanged(String),
    EndpointRouteChanged(String),
    EndpointDescriptionChanged(String),
    EndpointMethodSelected(HttpMethod),
    EndpointMethodCleared,
    OptionsToggled,
    BodyFormatSelected(BodyFormat),
    OptionNameChanged(OptionKind, String),
    OptionTypeSelected(OptionKind, ParamType),
    OptionRequiredToggled(OptionKind, bool),
    OptionAdded(OptionKind),
    OptionRemoved(OptionKind, String),
    EndpointSubmitted,
    EndpointSubmissionFinished(EndpointSubmission),

    EditEndpointPressed(usize),
    EditNameChanged(String),
    EditMethodSelected(HttpMethod),
    EditRouteChanged(String),
    EditSaved,
    EditCancelled,
    RemoveEndpointPressed(usize),

    CreateTestPressed,
    TestCancelled,
    TestNameChanged(String),
    TestEndpointSelected(String),
    TestValueChanged(OptionKind, String),
    TestValueAdded(OptionKind, String),
    TestValueRemoved(OptionKind, String),
    TestSubmitted,
    TestSubmissionFinished(TestSubmission),

    SubscriptionApiIdChanged(String),
    SubscriptionActionPressed(SubscriptionAction),
    SubscriptionFinished(Toasts),

    ToastDismissed(u64),
    ToastsCleared,
}

fn update(app: &mut App, message: Message) -> Task<Message> {
    // The in-flight submission owns its draft until the result comes back.
    if (app.endpoint_submitting && edits_endpoint_draft(&message))
        || (app.test_submitting && edits_test_draft(&message))
    {
        return Task::none();
    }

    match message {
        Message::TabSelected(tab) => {
            app.tab = tab;
            Task::none()
        }
        Message::ApiIdChanged(api_id) => {
            app.api_id_input = api_id;
            Task::none()
        }
        Message::LoadPressed => {
            if app.loading || app.submitting() {
                return Task::none();
            }
            if app.api_id_input.trim().is_empty() {
                app.toasts.notify_error("API id cannot be empty");
                return Task::none();
            }
            load_project(app)
        }
        Message::ProjectLoaded(result) => {
            app.loading = false;
            match result {
                Ok((api, endpoints)) => {
                    info!("Loaded API `{}` with {} endpoints", api.name, endpoints.len());
                    app.api = Some(api);
                    app.catalog.refresh(endpoints);
                    app.endpoint_draft = EndpointDraft::new();
                    app.test_draft = None;
                    app.editing = None;
                }
                Err(err) => app.toasts.notify_error(&err),
            }
            Task::none()
        }

        Message::AddEndpointToggled => {
            app.endpoint_draft.toggle_adding();
            app.reset_option_inputs();
            Task::none()
        }
        Message::EndpointCancelled => {
            app.endpoint_draft.cancel();
            app.reset_option_inputs();
            Task::none()
        }
        Message::EndpointNameChanged(name) => {
            app.endpoint_draft.name = name;
            Task::none()
        }
        Message::EndpointRouteChanged(route) => {
            app.endpoint_draft.route = route;
            Task::none()
        }
        Message::EndpointDescriptionChanged(description) => {
            app.endpoint_draft.description = description;
            Task::none()
        }
        Message::EndpointMethodSelected(method) => {
            app.endpoint_draft.select_method(Some(method));
            Task::none()
        }
        Message::EndpointMethodCleared => {
            app.endpoint_draft.select_method(None);
            Task::none()
        }
        Message::OptionsToggled => {
            app.endpoint_draft.toggle_options();
            Task::none()
        }
        Message::BodyFormatSelected(format) => {
            app.endpoint_draft.body_format = format;
            Task::none()
        }
        Message::OptionNameChanged(kind, name) => {
            app.option_input_mut(kind).name = name;
            Task::none()
        }
        Message::OptionTypeSelected(kind, param_type) => {
            app.option_input_mut(kind).param_type = param_type;
            Task::none()
        }
        Message::OptionRequiredToggled(kind, required) => {
            app.option_input_mut(kind).required = required;
            Task::none()
        }
        Message::OptionAdded(kind) => {
            let option = app.option_input_mut(kind).to_option();
            match app.endpoint_draft.add_option(kind, option) {
                Ok(()) => app.option_input_mut(kind).name.clear(),
                Err(err) => app.toasts.notify_error(&err.to_string()),
            }
            Task::none()
        }
        Message::OptionRemoved(kind, name) => {
            app.endpoint_draft.remove_option(kind, &name);
            Task::none()
        }
        Message::EndpointSubmitted => {
            if app.endpoint_submitting {
                return Task::none();
            }
            let Some(api_id) = app.api_id().map(str::to_string) else {
                app.toasts.notify_error("Load an API project first");
                return Task::none();
            };
            app.endpoint_submitting = true;
            app.editing = None;

            let client = app.client.clone();
            let mut draft = app.endpoint_draft.clone();
            let mut catalog = app.catalog.clone();
            Task::perform(
                async move {
                    let mut toasts = Toasts::new();
                    let _ = draft.submit(&client, &api_id, &mut catalog, &mut toasts).await;
                    EndpointSubmission {
                        api_id,
                        draft,
                        catalog,
                        toasts,
                    }
                },
                Message::EndpointSubmissionFinished,
            )
        }
        Message::EndpointSubmissionFinished(outcome) => {
            app.endpoint_submitting = false;
            if app.is_open_project(&outcome.api_id) {
                if !outcome.draft.is_open() {
                    app.reset_option_inputs();
                }
                app.endpoint_draft = outcome.draft;
                app.catalog = outcome.catalog;
            } else {
                warn!("Project changed, dropping endpoint result for {}", outcome.api_id);
            }
            app.toasts.absorb(outcome.toasts);
            Task::none()
        }

        Message::EditEndpointPressed(index) => {
            app.editing = app.catalog.get(index).map(|endpoint| EndpointEdit {
                index,
                name: endpoint.name.clone(),
                method: endpoint.method,
                route: endpoint.route.clone(),
            });
            Task::none()
        }
        Message::EditNameChanged(name) => {
            if let Some(edit) = app.editing.as_mut() {
                edit.name = name;
            }
            Task::none()
        }
        Message::EditMethodSelected(method) => {
            if let Some(edit) = app.editing.as_mut() {
                edit.method = method;
            }
            Task::none()
        }
        Message::EditRouteChanged(route) => {
            if let Some(edit) = app.editing.as_mut() {
                edit.route = route;
            }
            Task::none()
        }
        Message::EditSaved => {
            if let Some(edit) = app.editing.take() {
                if edit.name.trim().is_empty() || edit.route.trim().is_empty() {
                    app.toasts.notify_error("Please add a name and route");
                    app.editing = Some(edit);
                } else {
                    app.catalog
                        .edit(edit.index, edit.name.trim(), edit.method, edit.route.trim());
                }
            }
            Task::none()
        }
        Message::EditCancelled => {
            app.editing = None;
            Task::none()
        }
        Message::RemoveEndpointPressed(index) => {
            if let Some(removed) = app.catalog.remove(index) {
                info!("Removed endpoint `{}` from the table", removed.name);
            }
            app.editing = None;
            Task::none()
        }

        Message::CreateTestPressed => {
            match app.api_id().map(str::to_string) {
                Some(api_id) => app.test_draft = Some(TestDraft::new(api_id)),
                None => app.toasts.notify_error("Load an API project first"),
            }
            Task::none()
        }
        Message::TestCancelled => {
            app.test_draft = None;
            Task::none()
        }
        Message::TestNameChanged(name) => {
            if let Some(draft) = app.test_draft.as_mut() {
                draft.test_name = name;
            }
            Task::none()
        }
        Message::TestEndpointSelected(name) => {
            if let Some(draft) = app.test_draft.as_mut() {
                if let Err(err) = draft.select_endpoint(&name, &app.catalog) {
                    app.toasts.notify_error(&err.to_string());
                }
            }
            Task::none()
        }
        Message::TestValueChanged(kind, value) => {
            if let Some(draft) = app.test_draft.as_mut() {
                match kind {
                    OptionKind::Header => draft.header_value = value,
                    OptionKind::Body => draft.body_value = value,
                    OptionKind::Query => draft.param_value = value,
                }
            }
            Task::none()
        }
        Message::TestValueAdded(kind, name) => {
            if let Some(draft) = app.test_draft.as_mut() {
                let value = match kind {
                    OptionKind::Header => draft.header_value.clone(),
                    OptionKind::Body => draft.body_value.clone(),
                    OptionKind::Query => draft.param_value.clone(),
                };
                match draft.add_value(kind, &name, &value) {
                    Ok(()) => match kind {
                        OptionKind::Header => draft.header_value.clear(),
                        OptionKind::Body => draft.body_value.clear(),
                        OptionKind::Query => draft.param_value.clear(),
                    },
                    Err(err) => app.toasts.notify_error(&err.to_string()),
                }
            }
            Task::none()
        }
        Message::TestValueRemoved(kind, name) => {
            if let Some(draft) = app.test_draft.as_mut() {
                draft.remove_value(kind, &name);
            }
            Task::none()
        }
        Message::TestSubmitted => {
            if app.test_submitting {
                return Task::none();
            }
            let Some(mut draft) = app.test_draft.clone() else {
                return Task::none();
            };
            app.test_submitting = true;

            let client = app.client.clone();
            let session = app.session.clone();
            Task::perform(
                async move {
                    let mut toasts = Toasts::new();
                    let accepted = draft.submit(&client, &session, &mut toasts).await.is_ok();
                    TestSubmission {
                        api_id: draft.api_id().to_string(),
                        draft,
                        toasts,
                        accepted,
                    }
                },
                Message::TestSubmissionFinished,
            )
        }
        Message::TestSubmissionFinished(outcome) => {
            app.test_submitting = false;
            if app.is_open_project(&outcome.api_id) {
                app.test_draft = if outcome.accepted {
                    None
                } else {
                    Some(outcome.draft)
                };
            } else {
                warn!("Project changed, dropping test result for {}", outcome.api_id);
            }
            app.toasts.absorb(outcome.toasts);
            Task::none()
        }

        Message::SubscriptionApiIdChanged(api_id) => {
            app.subscription_api_id = api_id;
            Task::none()
        }
        Message::SubscriptionActionPressed(action) => {
            if app.subscription_busy {
                return Task::none();
            }
            app.subscription_busy = true;

            let client = app.client.clone();
            let session = app.session.clone();
            let api_id = app.subscription_api_id.clone();
            Task::perform(
                async move {
                    let mut toasts = Toasts::new();
                    let _ = subscriptions::run(&client, action, &api_id, &session, &mut toasts).await;
                    toasts
                },
                Message::SubscriptionFinished,
            )
        }
        Message::SubscriptionFinished(toasts) => {
            app.subscription_busy = false;
            app.toasts.absorb(toasts);
            Task::none()
        }

        Message::ToastDismissed(id) => {
            app.toasts.dismiss(id);
            Task::none()
        }
        Message::ToastsCleared => {
            app.toasts.clear();
            Task::none()
        }
    }
}

fn edits_endpoint_draft(message: &Message) -> bool {
    matches!(
        message,
        Message::AddEndpointToggled
            | Message::EndpointCancelled
            | Message::EndpointNameChanged(_)
            | Message::EndpointRouteChanged(_)
            | Message::EndpointDescriptionChanged(_)
            | Message::EndpointMethodSelected(_)
            | Message::EndpointMethodCleared
            | Message::OptionsToggled
            | Message::BodyFormatSelected(_)
            | Message::OptionAdded(_)
            | Message::OptionRemoved(..)
            | Message::EditEndpointPressed(_)
            | Message::EditSaved
            | Message::RemoveEndpointPressed(_)
    )
}

fn edits_test_draft(message: &Message) -> bool {
    matches!(
        message,
        Message::CreateTestPressed
            | Message::TestCancelled
            | Message::TestNameChanged(_)
            | Message::TestEndpointSelected(_)
            | Message::TestValueChanged(..)
            | Message::TestValueAdded(..)
            | Message::TestValueRemoved(..)
    )
}

fn load_project(app: &mut App) -> Task<Message> {
    app.loading = true;
    let client = app.client.clone();
    let api_id = app.api_id_input.trim().to_string();

    Task::perform(
        async move {
            let api = client.fetch_api(&api_id).await.map_err(|err| err.to_string())?;
            let endpoints = client
                .fetch_endpoints(&api_id)
                .await
                .map_err(|err| err.to_string())?;
            Ok::<_, String>((api, endpoints))
        },
        Message::ProjectLoaded,
    )
}

fn view(app: &App) -> Element<'_, Message> {
    let header = ui::header::view(
        app.tab,
        &app.api_id_input,
        app.api.as_ref(),
        app.loading,
        app.submitting(),
        &app.session,
    );

    let content: Element<'_, Message> = match app.tab {
        DashboardTab::Endpoints => column![
            ui::endpoint_form::view(ui::endpoint_form::EndpointFormState {
                draft: &app.endpoint_draft,
                header_input: &app.header_input,
                body_input: &app.body_input,
                query_input: &app.query_input,
                project_loaded: app.api.is_some(),
                submitting: app.endpoint_submitting,
            }),
            ui::endpoint_table::view(&app.catalog, app.editing.as_ref(), app.endpoint_submitting),
        ]
        .spacing(16)
        .into(),
        DashboardTab::Tests => {
            ui::test_form::view(
                app.test_draft.as_ref(),
                &app.catalog,
                app.api.is_some(),
                app.test_submitting,
            )
        }
        DashboardTab::Subscriptions => {
            ui::subscriptions::view(&app.subscription_api_id, app.subscription_busy)
        }
    };

    let main_content = container(scrollable(container(content).padding(16)).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_| style::surface_style(style::SURFACE_0, 0.0));

    let toasts = container(ui::toasts::view(&app.toasts))
        .width(300)
        .height(Length::Fill);

    let layout = column![header, row![main_content, toasts].height(Length::Fill)]
        .spacing(1)
        .height(Length::Fill)
        .width(Length::Fill);

    container(layout)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_| style::flat_surface_style(style::BG))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionSet;

    fn app() -> App {
        let config = DashboardConfig::new("http://127.0.0.1:9", None, None);
        let client = CoreClient::new(&config, Session::new("p-1", "t")).unwrap();
        let (app, _) = App::new(client, Session::new("p-1", "t"), String::new(), Toasts::new());
        app
    }

    fn project(id: &str) -> ApiProject {
        ApiProject {
            id: id.into(),
            name: id.into(),
            description: None,
            endpoints: None,
        }
    }

    fn endpoint(name: &str) -> Endpoint {
        Endpoint {
            id: Some(format!("id-{name}")),
            name: name.into(),
            route: format!("/{name}"),
            method: HttpMethod::Get,
            description: String::new(),
            headers: OptionSet::new(),
            body: OptionSet::new(),
            query: OptionSet::new(),
        }
    }

    fn loaded(app: &mut App, id: &str, endpoints: &[&str]) {
        let endpoints = endpoints.iter().map(|name| endpoint(name)).collect();
        let _ = update(app, Message::ProjectLoaded(Ok((project(id), endpoints))));
    }

    #[test]
    fn load_is_ignored_while_submitting() {
        let mut app = app();
        loaded(&mut app, "api-a", &["a-ep"]);
        app.api_id_input = "api-b".into();
        app.endpoint_submitting = true;

        let _ = update(&mut app, Message::LoadPressed);
        assert!(!app.loading);
        assert_eq!(app.api_id(), Some("api-a"));
    }

    #[test]
    fn stale_endpoint_result_does_not_replace_new_project() {
        let mut app = app();
        loaded(&mut app, "api-a", &["a-ep"]);

        let mut stale_catalog = app.catalog.clone();
        let mut created = EndpointDraft::new();
        created.toggle_adding();
        created.name = "new".into();
        created.route = "/new".into();
        stale_catalog.merge_optimistic(&created.validate().unwrap());
        app.endpoint_submitting = true;

        loaded(&mut app, "api-b", &["b-ep"]);
        let mut toasts = Toasts::new();
        toasts.notify_success("Endpoint created");
        let _ = update(
            &mut app,
            Message::EndpointSubmissionFinished(EndpointSubmission {
                api_id: "api-a".into(),
                draft: EndpointDraft::new(),
                catalog: stale_catalog,
                toasts,
            }),
        );

        assert!(!app.endpoint_submitting);
        assert_eq!(app.api_id(), Some("api-b"));
        assert_eq!(app.catalog.names(), vec!["b-ep"]);
        assert_eq!(app.toasts.entries()[0].message, "Endpoint created");
    }

    #[test]
    fn endpoint_result_applies_to_open_project() {
        let mut app = app();
        loaded(&mut app, "api-a", &["a-ep"]);
        let _ = update(&mut app, Message::AddEndpointToggled);
        app.endpoint_submitting = true;

        let mut catalog = app.catalog.clone();
        catalog.refresh(vec![endpoint("a-ep"), endpoint("new")]);
        let _ = update(
            &mut app,
            Message::EndpointSubmissionFinished(EndpointSubmission {
                api_id: "api-a".into(),
                draft: EndpointDraft::new(),
                catalog,
                toasts: Toasts::new(),
            }),
        );

        assert_eq!(app.catalog.names(), vec!["a-ep", "new"]);
        assert!(!app.endpoint_draft.is_open());
    }

    #[test]
    fn stale_failed_test_is_not_restored() {
        let mut app = app();
        loaded(&mut app, "api-a", &["a-ep"]);
        let _ = update(&mut app, Message::CreateTestPressed);
        let stale = app.test_draft.clone().unwrap();
        app.test_submitting = true;

        loaded(&mut app, "api-b", &["b-ep"]);
        let _ = update(
            &mut app,
            Message::TestSubmissionFinished(TestSubmission {
                api_id: "api-a".into(),
                draft: stale,
                toasts: Toasts::new(),
                accepted: false,
            }),
        );

        assert!(!app.test_submitting);
        assert!(app.test_draft.is_none());
    }

    #[test]
    fn draft_edits_wait_for_the_submission() {
        let mut app = app();
        loaded(&mut app, "api-a", &["a-ep"]);
        let _ = update(&mut app, Message::AddEndpointToggled);
        app.endpoint_submitting = true;

        let _ = update(&mut app, Message::EndpointMethodSelected(HttpMethod::Delete));
        let _ = update(&mut app, Message::BodyFormatSelected(BodyFormat::Xml));
        assert_eq!(app.endpoint_draft.method(), Some(HttpMethod::Get));
        assert_eq!(app.endpoint_draft.body_format, BodyFormat::Json);

        let _ = update(&mut app, Message::CreateTestPressed);
        let _ = update(&mut app, Message::TestNameChanged("smoke".into()));
        app.test_submitting = true;
        let _ = update(&mut app, Message::TestNameChanged("other".into()));
        assert_eq!(app.test_draft.as_ref().unwrap().test_name, "smoke");
    }
}
