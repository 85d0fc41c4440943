//! Wire protocol types shared between the engine and its front ends.
//!
//! The engine speaks newline-delimited JSON in both directions: one
//! [`Command`] object per request line in, one [`Response`] object per reply
//! line out. Field names are fixed and lower-case; optional outbound fields
//! are omitted entirely rather than serialized as `null`, and unrecognised
//! inbound fields are ignored so front ends can evolve independently.

use serde::{Deserialize, Serialize};

/// Outcome classification carried by every [`Response`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The command completed successfully.
    Ok,
    /// The command failed; `log` explains why.
    Error,
    /// Intermediate progress update for long-running commands.
    Progress,
}

/// One inbound request line, sent by the front end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Command {
    /// Correlation identifier echoed back in the matching [`Response`].
    /// Empty when the front end does not correlate replies.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Selects the handler to execute. Matched case-sensitively.
    #[serde(default)]
    pub cmd: String,
    /// Target for extraction. Reserved for handlers not yet implemented.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Preferred media quality. Reserved for handlers not yet implemented.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

/// One outbound reply line, sent by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Correlation identifier echoed from the [`Command`]; omitted when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Outcome of the command.
    pub status: Status,
    /// Result payload; any JSON value, omitted when there is none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Human-readable diagnostic for the front end's terminal view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
    /// Completion fraction for progress updates; omitted when unused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

impl Response {
    /// Builds a success reply echoing the given correlation id.
    #[must_use]
    pub fn ok(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: Status::Ok,
            data: None,
            log: None,
            progress: None,
        }
    }

    /// Builds an error reply with a diagnostic message.
    #[must_use]
    pub fn error(id: impl Into<String>, log: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: Status::Error,
            data: None,
            log: Some(log.into()),
            progress: None,
        }
    }

    /// Attaches a result payload.
    #[must_use]
    pub fn with_data(mut self, data: impl Into<serde_json::Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Attaches a diagnostic message.
    #[must_use]
    pub fn with_log(mut self, log: impl Into<String>) -> Self {
        self.log = Some(log.into());
        self
    }
}
