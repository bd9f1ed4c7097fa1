//! Tutor collaborator: question in, explanation and annotations out.
//!
//! DESIGN
//! ======
//! The surface only knows the [`Tutor`] trait. [`ScriptedTutor`] is a fixed
//! keyword-to-reply table with a simulated think delay. Every request is
//! registered in [`Inquiries`] under its own id so the host can abort all of
//! them at teardown without waiting for replies it can no longer show.
//! Failures never reach the page as errors: [`consult`] turns them into one
//! fallback reply and logs the cause.

#[cfg(test)]
#[path = "tutor_test.rs"]
mod tutor_test;

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::{AbortHandle, AbortRegistration, Abortable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::annotation::Annotation;
use crate::consts::TUTOR_LATENCY_MS;
use crate::snapshot::{BodyId, Snapshot};
use crate::vector::Vector2;

/// Reply shown when the tutor fails for any reason.
pub const FALLBACK_MESSAGE: &str = "Sorry, I had trouble thinking about that. Try again?";

const PARABOLA_EXPLANATION: &str = "Gravity acts downwards constantly, while horizontal velocity remains constant \
     (ignoring drag). This combination creates a parabolic curve.";

const GENERIC_EXPLANATION: &str =
    "I can help explain the physics! Try asking about the shape of the path or the forces involved.";

/// Anchor used when the snapshot has no projectile to point at.
const FALLBACK_ANCHOR: Vector2 = Vector2::new(10.0, 10.0);

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TutorError {
    #[error("tutor unavailable: {0}")]
    Unavailable(String),
    #[error("request cancelled")]
    Cancelled,
}

impl TutorError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "E_TUTOR_UNAVAILABLE",
            Self::Cancelled => "E_TUTOR_CANCELLED",
        }
    }
}

/// What the tutor says back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorReply {
    pub explanation: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl TutorReply {
    #[must_use]
    pub fn fallback() -> Self {
        Self { explanation: FALLBACK_MESSAGE.to_owned(), annotations: Vec::new() }
    }
}

#[async_trait(?Send)]
pub trait Tutor {
    /// Answer `question` about the state captured in `snapshot`.
    async fn ask(&self, question: &str, snapshot: &Snapshot) -> Result<TutorReply, TutorError>;
}

// =============================================================================
// SCRIPTED TUTOR
// =============================================================================

/// Canned replies keyed on words in the question.
#[derive(Debug, Clone, Copy)]
pub struct ScriptedTutor {
    latency_ms: u32,
}

impl Default for ScriptedTutor {
    fn default() -> Self {
        Self::new(TUTOR_LATENCY_MS)
    }
}

impl ScriptedTutor {
    #[must_use]
    pub fn new(latency_ms: u32) -> Self {
        Self { latency_ms }
    }

    /// The reply for `question`, without the think delay.
    #[must_use]
    pub fn script(question: &str, snapshot: &Snapshot) -> TutorReply {
        let q = question.to_lowercase();
        if q.contains("parabola") || q.contains("curve") {
            let anchor = snapshot
                .object(BodyId::Projectile)
                .map_or(FALLBACK_ANCHOR, |obj| obj.position());
            TutorReply {
                explanation: PARABOLA_EXPLANATION.to_owned(),
                annotations: vec![
                    Annotation::arrow(anchor, Vector2::new(0.0, -5.0), "Gravity (-g)", "#ef4444"),
                    Annotation::arrow(anchor, Vector2::new(5.0, 0.0), "Velocity (vx)", "#22c55e"),
                ],
            }
        } else {
            TutorReply { explanation: GENERIC_EXPLANATION.to_owned(), annotations: Vec::new() }
        }
    }
}

#[async_trait(?Send)]
impl Tutor for ScriptedTutor {
    async fn ask(&self, question: &str, snapshot: &Snapshot) -> Result<TutorReply, TutorError> {
        if self.latency_ms > 0 {
            gloo_timers::future::TimeoutFuture::new(self.latency_ms).await;
        }
        Ok(Self::script(question, snapshot))
    }
}

// =============================================================================
// CANCELLATION
// =============================================================================

/// Outstanding tutor requests, each abortable by id.
#[derive(Debug, Default)]
pub struct Inquiries {
    pending: HashMap<Uuid, AbortHandle>,
}

impl Inquiries {
    /// Register a new request. Pass the registration to [`consult`].
    pub fn open(&mut self) -> (Uuid, AbortRegistration) {
        let (handle, registration) = AbortHandle::new_pair();
        let id = Uuid::new_v4();
        self.pending.insert(id, handle);
        (id, registration)
    }

    /// Retire a finished request. Returns whether it was still registered.
    pub fn close(&mut self, id: Uuid) -> bool {
        self.pending.remove(&id).is_some()
    }

    /// Abort one request.
    pub fn cancel(&mut self, id: Uuid) -> bool {
        match self.pending.remove(&id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Abort every outstanding request. Returns how many were aborted.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
        count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// How a tutor request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Consultation {
    Answered(TutorReply),
    /// The tutor failed; carries the fallback reply.
    Fallback(TutorReply),
    /// Aborted before an answer arrived; nothing should be shown.
    Cancelled,
}

/// Ask `tutor`, abortable through `registration`. Errors become the fallback.
pub async fn consult(
    tutor: &dyn Tutor,
    question: &str,
    snapshot: &Snapshot,
    registration: AbortRegistration,
) -> Consultation {
    match Abortable::new(tutor.ask(question, snapshot), registration).await {
        Ok(Ok(reply)) => Consultation::Answered(reply),
        Ok(Err(TutorError::Cancelled)) | Err(_) => {
            log::debug!("tutor request cancelled");
            Consultation::Cancelled
        }
        Ok(Err(err)) => {
            log::warn!("tutor failed ({}): {err}", err.error_code());
            Consultation::Fallback(TutorReply::fallback())
        }
    }
}
