//! Message submission flow
//!
//! A send is split in three so the front end can keep handling input while
//! a reply is in flight:
//!
//! 1. [`begin_send`] validates the text, appends the user message and marks
//!    the session as loading. It refuses while another send is pending.
//! 2. [`resolve_reply`] asks the gateway for a reply. It owns everything it
//!    needs and never fails; a panic inside the gateway becomes [`APOLOGY`].
//! 3. [`complete_send`] appends the reply and clears the loading flag. A reply
//!    that belongs to a session that has since been reset is dropped.

use futures::FutureExt;
use providers::{ReplySource, ResponseGateway, ResponseRequest};
use services::text::{collapse_whitespace, sanitize_input, validate_message, MessageError};
use shared::message::Sender;
use shared::mode::Mode;
use std::panic::AssertUnwindSafe;

use crate::state::Action;
use crate::store::SessionStore;

/// Shown instead of a reply when the send pipeline breaks unexpectedly.
pub const APOLOGY: &str = "I apologize, but I'm having trouble responding right now. Let me offer some general support: Remember that whatever you're going through, it's okay to take things one step at a time. You're stronger than you know. 💙";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("Still waiting for the previous reply")]
    Busy,
    #[error(transparent)]
    Invalid(#[from] MessageError),
}

/// A send that has been accepted but not yet answered
#[derive(Debug, Clone)]
pub struct PendingSend {
    pub message: String,
    pub mode: Mode,
    pub use_ai: bool,
    pub user_api_key: String,
    epoch: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReply {
    pub text: String,
    /// `None` when the pipeline failed and the apology was used
    pub source: Option<ReplySource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Delivered(ResolvedReply),
    /// The session was reset while the reply was in flight
    Discarded,
}

pub fn begin_send(store: &mut SessionStore, raw: &str) -> Result<PendingSend, SendError> {
    if store.state().is_loading {
        return Err(SendError::Busy);
    }
    let collapsed = collapse_whitespace(raw);
    validate_message(&collapsed)?;
    let message = sanitize_input(&collapsed);

    store.dispatch(Action::AddMessage {
        text: message.clone(),
        sender: Sender::User,
    });
    store.dispatch(Action::SetInput(String::new()));
    store.dispatch(Action::SetLoading(true));

    let state = store.state();
    Ok(PendingSend {
        message,
        mode: state.selected_mode,
        use_ai: state.use_ai,
        user_api_key: state.user_api_key.clone(),
        epoch: state.epoch,
    })
}

pub async fn resolve_reply(gateway: &ResponseGateway, pending: &PendingSend) -> ResolvedReply {
    let request = ResponseRequest {
        message: &pending.message,
        mode: pending.mode,
        use_ai: pending.use_ai,
        user_api_key: Some(pending.user_api_key.as_str()),
    };

    match AssertUnwindSafe(gateway.respond(request)).catch_unwind().await {
        Ok(reply) => ResolvedReply {
            text: reply.text,
            source: Some(reply.source),
        },
        Err(_) => {
            tracing::error!("Error getting response, sending apology");
            ResolvedReply {
                text: APOLOGY.to_string(),
                source: None,
            }
        }
    }
}

pub fn complete_send(
    store: &mut SessionStore,
    pending: &PendingSend,
    reply: ResolvedReply,
) -> SendOutcome {
    store.dispatch(Action::SetLoading(false));

    if store.state().epoch != pending.epoch {
        tracing::info!("Dropping reply that arrived after the session was cleared");
        return SendOutcome::Discarded;
    }

    store.dispatch(Action::AddMessage {
        text: reply.text.clone(),
        sender: Sender::Bot,
    });
    SendOutcome::Delivered(reply)
}

/// Reset the session and forget the model's rolling context
pub fn clear_session(store: &mut SessionStore, gateway: &ResponseGateway) {
    store.dispatch(Action::Reset);
    gateway.clear_history();
}
