//! # Session
//!
//! Identity used to stamp payloads (`profileId`) and authenticate calls to
//! the core (`accessToken`). The dashboard never validates or refreshes it.

use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub profile_id: String,
    pub access_token: String,
}

impl Session {
    pub fn new(profile_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
            access_token: access_token.into(),
        }
    }

    /// Values from the environment win over the persisted session, field by
    /// field.
    pub fn resolve(config: &DashboardConfig, stored: Option<Session>) -> Self {
        let stored = stored.unwrap_or_default();
        Self {
            profile_id: config.profile_id.clone().unwrap_or(stored.profile_id),
            access_token: config.access_token.clone().unwrap_or(stored.access_token),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        !self.profile_id.is_empty() && !self.access_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_overrides_stored_fields() {
        let mut config = DashboardConfig::new("http://localhost", None, None);
        config.access_token = Some("fresh".into());

        let session = Session::resolve(&config, Some(Session::new("p-1", "stale")));
        assert_eq!(session, Session::new("p-1", "fresh"));
        assert!(session.is_signed_in());
    }

    #[test]
    fn nothing_known_yields_anonymous_session() {
        let config = DashboardConfig::new("http://localhost", None, None);
        let session = Session::resolve(&config, None);
        assert!(!session.is_signed_in());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Session::new("p", "t")).unwrap();
        assert_eq!(json, serde_json::json!({ "profileId": "p", "accessToken": "t" }));
    }
}
