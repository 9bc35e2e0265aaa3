//! API request and response types

use crate::catalog::Deity;
use crate::guidance::SessionSnapshot;
use crate::mala::{Effect, MalaView};
use crate::nav::ScreenOptions;
use serde::{Deserialize, Serialize};

/// Response for a newly created or fetched guidance session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

/// Request to submit a query to a session
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub text: String,
}

/// Response for submit; `queued` is false when the query was dropped
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub queued: bool,
}

/// Text of one transcript entry, for the clipboard
#[derive(Debug, Serialize)]
pub struct CopyMessageResponse {
    pub text: String,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: &'static [&'static str],
}

/// Response with a counter's current view
#[derive(Debug, Serialize)]
pub struct MalaResponse {
    pub mala_id: String,
    #[serde(flatten)]
    pub view: MalaView,
}

/// Response for a dispatched intent
#[derive(Debug, Serialize)]
pub struct MalaIntentResponse {
    pub mala_id: String,
    #[serde(flatten)]
    pub view: MalaView,
    pub round_just_completed: bool,
    pub notifications: Vec<Effect>,
}

#[derive(Debug, Serialize)]
pub struct NavResponse {
    pub visible: bool,
}

#[derive(Debug, Deserialize)]
pub struct NavFocusRequest {
    pub screen: String,
    #[serde(flatten)]
    pub options: ScreenOptions,
}

#[derive(Debug, Deserialize)]
pub struct NavBlurRequest {
    pub screen: String,
}

#[derive(Debug, Deserialize)]
pub struct DeityQuery {
    #[serde(default)]
    pub q: String,
}

/// Filtered deities plus the featured card
#[derive(Debug, Serialize)]
pub struct DeitiesResponse {
    pub featured: Option<Deity>,
    pub deities: Vec<Deity>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
