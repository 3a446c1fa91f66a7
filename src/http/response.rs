use serde::{Deserialize, Serialize};

/// Envelope every core response is wrapped in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack<T> {
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Ack<T> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Ack<U> {
        Ack {
            message: self.message,
            data: self.data.map(f),
        }
    }
}
