use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{AskError, AskResponse, QaBackend};

/// What became of one submitted question.
#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    Answered(AskResponse),
    /// The backend replied with a non-success status.
    Rejected { error: Option<String> },
    /// No usable response arrived.
    Unreachable,
}

impl From<Result<AskResponse, AskError>> for AskOutcome {
    fn from(result: Result<AskResponse, AskError>) -> Self {
        match result {
            Ok(response) => AskOutcome::Answered(response),
            Err(AskError::Rejected { error, .. }) => AskOutcome::Rejected { error },
            Err(_) => AskOutcome::Unreachable,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceEvent {
    Answer { request_id: u64, outcome: AskOutcome },
    SuggestionsLoaded(Vec<String>),
    SuggestionsFailed(String),
}

/// Runs backend calls on the runtime and reports back over a channel, so the
/// UI loop only ever applies results on its own task.
///
/// Requests are never cancelled: every spawned call reports an outcome, in
/// whatever order the backend answers.
#[derive(Clone)]
pub struct AskService {
    backend: Arc<dyn QaBackend>,
    tx: mpsc::UnboundedSender<ServiceEvent>,
}

impl AskService {
    pub fn new(backend: Arc<dyn QaBackend>) -> (Self, mpsc::UnboundedReceiver<ServiceEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { backend, tx }, rx)
    }

    pub fn spawn_ask(&self, request_id: u64, question: String) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.ask(&question).await;
            if let Err(err) = &result {
                warn!(request_id, error = %err, "Question failed");
            } else {
                debug!(request_id, "Answer received");
            }
            let _ = tx.send(ServiceEvent::Answer {
                request_id,
                outcome: AskOutcome::from(result),
            });
        });
    }

    pub fn spawn_suggestions(&self) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match backend.fetch_suggestions().await {
                Ok(suggestions) => ServiceEvent::SuggestionsLoaded(suggestions),
                Err(err) => ServiceEvent::SuggestionsFailed(err.to_string()),
            };
            let _ = tx.send(event);
        });
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::api::{AskError, AskResponse, QaBackend};

    /// Backend double that replays canned answers and records questions.
    #[derive(Default)]
    pub struct ScriptedBackend {
        pub answers: Mutex<VecDeque<Result<AskResponse, AskError>>>,
        pub suggestions: Mutex<Option<Result<Vec<String>, AskError>>>,
        pub questions: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        pub fn with_answers(answers: Vec<Result<AskResponse, AskError>>) -> Self {
            Self {
                answers: Mutex::new(answers.into()),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl QaBackend for ScriptedBackend {
        async fn ask(&self, question: &str) -> Result<AskResponse, AskError> {
            self.questions
                .lock()
                .expect("questions lock")
                .push(question.to_string());
            self.answers
                .lock()
                .expect("answers lock")
                .pop_front()
                .unwrap_or_else(|| Err(AskError::Decode("no scripted answer".to_string())))
        }

        async fn fetch_suggestions(&self) -> Result<Vec<String>, AskError> {
            self.suggestions
                .lock()
                .expect("suggestions lock")
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }
}
