//! Session controller for one topic's tutoring conversation.
//!
//! Orchestrates the full turn lifecycle: optimistic append of the learner's
//! message, envelope assembly through the budgeter and prompt profiles, the
//! gateway round trip, and commit or rollback of the tentative state.
//! Enforces single-flight: a submit during an in-flight request is rejected,
//! never queued.

use std::sync::{Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use tutoria_types::chat::ChatMessage;
use tutoria_types::error::SessionError;
use tutoria_types::gateway::RequestEnvelope;
use tutoria_types::intent::Intent;
use tutoria_types::topic::TopicContext;

use crate::context::article::prepare_article_context;
use crate::context::budget::{HistoryBudget, limit_history};
use crate::gateway::ChatGateway;
use crate::prompt::{IntentProfile, system_prompt};
use crate::transcript::store::TranscriptStore;

/// Observable state of a session.
///
/// `Error` is per-turn: the next submit moves the session back through
/// `AwaitingResponse` as if it were idle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    AwaitingResponse,
    Error(String),
}

/// Result of a completed submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend replied; the assistant message is now the transcript tail.
    Answered(ChatMessage),
    /// The session was cleared while the request was in flight; the reply
    /// was discarded without touching transcript or storage.
    Discarded,
}

/// Transcript length snapshot for the optimistic update cycle.
///
/// Tentative appends are committed by letting the snapshot lapse, or
/// reverted by truncating the transcript back to the captured length.
struct TranscriptSnapshot {
    len: usize,
}

impl TranscriptSnapshot {
    fn take(transcript: &[ChatMessage]) -> Self {
        Self {
            len: transcript.len(),
        }
    }

    fn revert(&self, transcript: &mut Vec<ChatMessage>) {
        transcript.truncate(self.len);
    }
}

struct SessionState {
    transcript: Vec<ChatMessage>,
    phase: SessionPhase,
    /// Bumped by `clear()`; a turn whose generation no longer matches was
    /// abandoned and must not mutate anything on completion.
    generation: u64,
    /// Cancellation token of the in-flight turn, if any.
    cancel: CancellationToken,
    /// Set when the stored transcript no longer matches memory (rollback or
    /// failed write); reconciled via `replace_all` on the next success.
    store_diverged: bool,
}

/// Orchestrating state machine for one topic's conversation.
///
/// Generic over [`TranscriptStore`] and [`ChatGateway`] so it can be tested
/// against in-memory fakes and retargeted to other backends. All methods
/// take `&self`; internal state sits behind a mutex that is never held
/// across an await point -- the gateway call is the only suspension point
/// of a turn.
pub struct SessionController<S: TranscriptStore, G: ChatGateway> {
    store: S,
    gateway: G,
    topic: TopicContext,
    budget: HistoryBudget,
    state: Mutex<SessionState>,
}

impl<S: TranscriptStore, G: ChatGateway> SessionController<S, G> {
    /// Open a session for a topic, loading any persisted transcript.
    ///
    /// A load failure is recovered locally: the session starts empty and
    /// the failure is logged, never surfaced.
    pub async fn open(store: S, gateway: G, topic: TopicContext, budget: HistoryBudget) -> Self {
        let transcript = match store.load(&topic.id).await {
            Ok(messages) => messages,
            Err(err) => {
                warn!(topic_id = %topic.id, "failed to load transcript, starting empty: {err}");
                Vec::new()
            }
        };

        Self {
            store,
            gateway,
            topic,
            budget,
            state: Mutex::new(SessionState {
                transcript,
                phase: SessionPhase::Idle,
                generation: 0,
                cancel: CancellationToken::new(),
                store_diverged: false,
            }),
        }
    }

    /// Submit one turn.
    ///
    /// Non-empty `text` is appended to the transcript and store
    /// optimistically before the gateway call; intents with a synthetic
    /// message (`quiz`, `exercise`) accept empty text and add no learner
    /// entry. On gateway failure the tentative append is reverted, the
    /// error message becomes the session phase, and the error is returned;
    /// the session is immediately interactive again.
    pub async fn submit(&self, intent: Intent, text: &str) -> Result<SubmitOutcome, SessionError> {
        let text = text.trim();
        let profile = IntentProfile::of(intent);
        let (user_message, visible) = if !text.is_empty() {
            (text.to_string(), true)
        } else if let Some(synthetic) = profile.synthetic_message {
            (synthetic.to_string(), false)
        } else {
            return Err(SessionError::EmptyMessage);
        };

        let (envelope, snapshot, generation, cancel) = {
            let mut state = self.lock_state();
            if state.phase == SessionPhase::AwaitingResponse {
                return Err(SessionError::RequestInFlight);
            }

            // History is bounded from the pre-submit transcript; the message
            // being submitted travels in `user_message`, not `chat_history`.
            let history = limit_history(&state.transcript, &self.budget);
            let snapshot = TranscriptSnapshot::take(&state.transcript);
            if visible {
                state.transcript.push(ChatMessage::user(user_message.clone()));
            }
            state.phase = SessionPhase::AwaitingResponse;
            let cancel = CancellationToken::new();
            state.cancel = cancel.clone();

            let envelope = RequestEnvelope {
                system_prompt: system_prompt(intent, &self.topic),
                article_context: prepare_article_context(&self.topic),
                chat_history: history,
                user_message,
            };
            (envelope, snapshot, state.generation, cancel)
        };

        debug!(topic_id = %self.topic.id, intent = %intent, "submitting chat turn");

        // Write-through for the optimistic learner message.
        if visible {
            let message = ChatMessage::user(envelope.user_message.clone());
            if let Err(err) = self.store.append(&self.topic.id, &message).await {
                warn!(topic_id = %self.topic.id, "failed to persist user message: {err}");
                self.lock_state().store_diverged = true;
            }
            // A clear() during the append can leave this message as a stale
            // row in an otherwise wiped record; wipe again and stand down.
            if self.lock_state().generation != generation {
                if let Err(err) = self.store.clear(&self.topic.id).await {
                    warn!(topic_id = %self.topic.id, "failed to clear stored transcript: {err}");
                }
                return Ok(SubmitOutcome::Discarded);
            }
        }

        let result = self.gateway.send(&envelope, &cancel).await;

        let committed = {
            let mut state = self.lock_state();
            if state.generation != generation {
                // The session was cleared while the request was in flight;
                // this outcome belongs to an abandoned turn.
                return Ok(SubmitOutcome::Discarded);
            }
            match result {
                Ok(answer) => {
                    let reply = ChatMessage::assistant(answer);
                    state.transcript.push(reply.clone());
                    state.phase = SessionPhase::Idle;
                    Ok((reply, state.store_diverged, state.transcript.clone()))
                }
                Err(err) => {
                    snapshot.revert(&mut state.transcript);
                    if visible {
                        state.store_diverged = true;
                    }
                    state.phase = SessionPhase::Error(err.to_string());
                    Err(err)
                }
            }
        };

        match committed {
            Ok((reply, diverged, messages)) => {
                if diverged {
                    match self.store.replace_all(&self.topic.id, &messages).await {
                        Ok(()) => self.lock_state().store_diverged = false,
                        Err(err) => {
                            warn!(topic_id = %self.topic.id, "failed to reconcile stored transcript: {err}");
                        }
                    }
                } else if let Err(err) = self.store.append(&self.topic.id, &reply).await {
                    warn!(topic_id = %self.topic.id, "failed to persist assistant message: {err}");
                    self.lock_state().store_diverged = true;
                }
                Ok(SubmitOutcome::Answered(reply))
            }
            Err(err) => Err(SessionError::Gateway(err)),
        }
    }

    /// Empty the transcript and its persisted record.
    ///
    /// Valid at any time. An in-flight request is actively cancelled and
    /// its generation retired, so a completion that arrives anyway is
    /// discarded instead of rehydrating the cleared session. Idempotent.
    pub async fn clear(&self) {
        {
            let mut state = self.lock_state();
            state.generation += 1;
            state.cancel.cancel();
            state.cancel = CancellationToken::new();
            state.transcript.clear();
            state.phase = SessionPhase::Idle;
            state.store_diverged = false;
        }

        if let Err(err) = self.store.clear(&self.topic.id).await {
            warn!(topic_id = %self.topic.id, "failed to clear stored transcript: {err}");
            self.lock_state().store_diverged = true;
        }
    }

    /// The visible transcript, in order.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.lock_state().transcript.clone()
    }

    /// The current session phase.
    pub fn phase(&self) -> SessionPhase {
        self.lock_state().phase.clone()
    }

    /// The topic this session is bound to.
    pub fn topic(&self) -> &TopicContext {
        &self.topic
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().expect("session state lock poisoned")
    }
}
