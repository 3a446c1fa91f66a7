use std::fmt::{self, Display};

use tracing::info;

use crate::error::DraftError;
use crate::http::adapter::SubmissionAdapter;
use crate::http::response::Ack;
use crate::notify::Notifier;
use crate::session::Session;

/// What a developer can do with one of their subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionAction {
    /// Revoke the subscription token.
    Revoke,
    Unsubscribe,
}

impl Display for SubscriptionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubscriptionAction::Revoke => "Revoke",
            SubscriptionAction::Unsubscribe => "Unsubscribe",
        };
        write!(f, "{label}")
    }
}

pub fn validate(api_id: &str, session: &Session) -> Result<(), DraftError> {
    if api_id.trim().is_empty() {
        return Err(DraftError::validation("Enter the API id of the subscription"));
    }
    if session.profile_id.is_empty() {
        return Err(DraftError::validation("No profile id in the current session"));
    }
    Ok(())
}

pub async fn run<A, N>(
    adapter: &A,
    action: SubscriptionAction,
    api_id: &str,
    session: &Session,
    notifier: &mut N,
) -> Result<Ack<()>, DraftError>
where
    A: SubmissionAdapter + ?Sized,
    N: Notifier,
{
    if let Err(err) = validate(api_id, session) {
        notifier.notify_error(&err.to_string());
        return Err(err);
    }

    let api_id = api_id.trim();
    info!("{action} subscription to {api_id}");
    let result = match action {
        SubscriptionAction::Revoke => adapter.revoke_subscription(api_id, &session.profile_id).await,
        SubscriptionAction::Unsubscribe => adapter.unsubscribe(api_id, &session.profile_id).await,
    };

    match result {
        Ok(ack) => {
            notifier.notify_success(&ack.message);
            Ok(ack)
        }
        Err(err) => {
            notifier.notify_error(&err.to_string());
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockAdapter;
    use crate::notify::{ToastKind, Toasts};

    #[tokio::test]
    async fn revoke_passes_profile_id() {
        let adapter = MockAdapter::new();
        let mut toasts = Toasts::new();

        run(
            &adapter,
            SubscriptionAction::Revoke,
            " api-3 ",
            &Session::new("p-1", "t"),
            &mut toasts,
        )
        .await
        .unwrap();

        assert_eq!(adapter.calls(), vec!["POST /subscription/revoke/api-3?profileId=p-1"]);
        assert_eq!(toasts.entries()[0].message, "Subscription revoked");
    }

    #[tokio::test]
    async fn missing_profile_is_rejected_locally() {
        let adapter = MockAdapter::new();
        let mut toasts = Toasts::new();

        let err = run(
            &adapter,
            SubscriptionAction::Unsubscribe,
            "api-3",
            &Session::default(),
            &mut toasts,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DraftError::Validation(_)));
        assert!(adapter.calls().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_is_reported() {
        let adapter = MockAdapter::failing("Not subscribed");
        let mut toasts = Toasts::new();

        let result = run(
            &adapter,
            SubscriptionAction::Unsubscribe,
            "api-3",
            &Session::new("p-1", "t"),
            &mut toasts,
        )
        .await;

        assert!(matches!(result, Err(DraftError::Adapter(_))));
        assert_eq!(toasts.entries()[0].kind, ToastKind::Error);
        assert_eq!(toasts.entries()[0].message, "Not subscribed (500)");
    }
}
