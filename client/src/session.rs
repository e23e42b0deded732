//! The document chat session.
//!
//! One [`DocumentSession`] owns everything the interface shows: the picked
//! file, whether the backend has ingested it, the transcript, pending
//! notifications and the single in-flight flag. Renderers either borrow the
//! session or watch [`SessionView`] snapshots from [`DocumentSession::subscribe`].
//!
//! ```text
//! NoFile -> FileSelected -> Uploading -> Ready <-> Asking
//!                 ^              |
//!                 +--- failure --+
//! ```

use crate::api_service::DocumentApi;
use crate::document::{FileCandidate, SelectedFile};
use crate::error::{ClientError, Result};
use crate::models::{AskRequest, HealthResponse, JobStatusResponse};
use crate::notification::{Notification, Notifications, Severity};
use crate::transcript::{Message, Transcript};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use uuid::Uuid;

pub const UPLOAD_FAILED: &str = "Failed to upload PDF";
pub const ASK_FAILED: &str = "Failed to get answer";
pub const HEALTH_FAILED: &str = "Failed to reach the backend";
pub const STATUS_FAILED: &str = "Failed to fetch processing status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoFile,
    FileSelected,
    Uploading,
    Ready,
    Asking,
}

/// Snapshot published on every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub phase: Phase,
    pub is_loading: bool,
    pub is_loaded: bool,
    pub file_name: Option<String>,
    pub transcript_len: usize,
    pub notification_count: usize,
}

#[derive(Debug)]
enum DocumentState {
    Empty,
    Selected(SelectedFile),
    // bytes are dropped once the backend has the document
    Loaded { name: String, job_id: Option<String> },
}

pub fn welcome_message(file_name: &str) -> String {
    format!(
        "I've successfully processed \"{}\". Ask me anything about it!",
        file_name
    )
}

pub struct DocumentSession {
    api: Arc<dyn DocumentApi>,
    document: DocumentState,
    is_loading: bool,
    transcript: Transcript,
    notifications: Notifications,
    question: String,
    view_tx: watch::Sender<SessionView>,
}

impl DocumentSession {
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        let (view_tx, _) = watch::channel(SessionView {
            phase: Phase::NoFile,
            is_loading: false,
            is_loaded: false,
            file_name: None,
            transcript_len: 0,
            notification_count: 0,
        });

        Self {
            api,
            document: DocumentState::Empty,
            is_loading: false,
            transcript: Transcript::new(),
            notifications: Notifications::default(),
            question: String::new(),
            view_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view_tx.subscribe()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase(),
            is_loading: self.is_loading,
            is_loaded: self.is_loaded(),
            file_name: self.file_name().map(str::to_string),
            transcript_len: self.transcript.len(),
            notification_count: self.notifications.len(),
        }
    }

    pub fn phase(&self) -> Phase {
        match (&self.document, self.is_loading) {
            (DocumentState::Empty, _) => Phase::NoFile,
            (DocumentState::Selected(_), false) => Phase::FileSelected,
            (DocumentState::Selected(_), true) => Phase::Uploading,
            (DocumentState::Loaded { .. }, false) => Phase::Ready,
            (DocumentState::Loaded { .. }, true) => Phase::Asking,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.document, DocumentState::Loaded { .. })
    }

    /// Name of the selected or loaded file.
    pub fn file_name(&self) -> Option<&str> {
        match &self.document {
            DocumentState::Empty => None,
            DocumentState::Selected(file) => Some(file.name()),
            DocumentState::Loaded { name, .. } => Some(name),
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match &self.document {
            DocumentState::Selected(file) => Some(file),
            _ => None,
        }
    }

    pub fn job_id(&self) -> Option<&str> {
        match &self.document {
            DocumentState::Loaded { job_id, .. } => job_id.as_deref(),
            _ => None,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn set_question(&mut self, text: impl Into<String>) {
        self.question = text.into();
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let removed = self.notifications.dismiss(id);
        if removed {
            self.publish();
        }
        removed
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        let drained = self.notifications.drain();
        if !drained.is_empty() {
            self.publish();
        }
        drained
    }

    /// Validates and stores a picked file. Does not contact the backend.
    pub fn select_file(&mut self, candidate: FileCandidate) -> Result<()> {
        if self.is_loading {
            return Err(ClientError::Busy);
        }
        if self.is_loaded() {
            return Err(ClientError::AlreadyLoaded);
        }

        match candidate.validate() {
            Ok(file) => {
                log::info!("Selected {} ({} bytes)", file.name(), file.bytes().len());
                self.document = DocumentState::Selected(file);
                self.publish();
                Ok(())
            }
            Err(err) => {
                self.notify(Severity::Warning, "Invalid file type", "Please upload a PDF file");
                self.publish();
                Err(err)
            }
        }
    }

    pub async fn submit_upload(&mut self) -> Result<()> {
        if self.is_loading {
            return Err(ClientError::Busy);
        }
        let file = match &self.document {
            DocumentState::Empty => return Err(ClientError::NoFileSelected),
            DocumentState::Loaded { .. } => return Err(ClientError::AlreadyLoaded),
            DocumentState::Selected(file) => file.clone(),
        };

        self.set_loading(true);
        let started = Instant::now();
        log::info!("Uploading {}", file.name());

        let outcome = self.api.upload(&file).await;
        let result = match outcome {
            Ok(receipt) => {
                log::info!(
                    "Uploaded {} in {} ms (job {})",
                    file.name(),
                    started.elapsed().as_millis(),
                    receipt.job_id.as_deref().unwrap_or("-")
                );
                if let Some(message) = &receipt.message {
                    log::info!("Backend says: {}", message);
                }
                self.document = DocumentState::Loaded {
                    name: file.name().to_string(),
                    job_id: receipt.job_id,
                };
                self.transcript.push(Message::assistant(welcome_message(file.name())));
                self.notify(Severity::Success, "Success", "PDF uploaded successfully");
                Ok(())
            }
            Err(err) => {
                self.report_failure(&err, UPLOAD_FAILED);
                Err(err)
            }
        };

        self.set_loading(false);
        result
    }

    /// Appends the question right away, then the answer once it arrives.
    /// A failed request leaves the question unanswered in the transcript.
    pub async fn submit_question(&mut self, text: &str) -> Result<()> {
        let question = text.trim();
        if question.is_empty() {
            return Err(ClientError::EmptyQuestion);
        }
        if self.is_loading {
            return Err(ClientError::Busy);
        }
        let job_id = match &self.document {
            DocumentState::Loaded { job_id, .. } => job_id.clone(),
            _ => return Err(ClientError::NotLoaded),
        };

        self.transcript.push(Message::user(question));
        self.set_loading(true);
        let started = Instant::now();

        let request = AskRequest {
            question: question.to_string(),
            job_id,
        };
        let result = match self.api.ask(&request).await {
            Ok(answer) => {
                log::info!("Answered in {} ms", started.elapsed().as_millis());
                self.transcript.push(Message::assistant(answer));
                Ok(())
            }
            Err(err) => {
                self.report_failure(&err, ASK_FAILED);
                Err(err)
            }
        };

        self.question.clear();
        self.set_loading(false);
        result
    }

    pub async fn submit_draft(&mut self) -> Result<()> {
        let draft = self.question.clone();
        self.submit_question(&draft).await
    }

    pub async fn check_health(&mut self) -> Result<HealthResponse> {
        let result = match self.api.health().await {
            Ok(health) => {
                self.notify(Severity::Info, "Backend", format!("Status: {}", health.status));
                Ok(health)
            }
            Err(err) => {
                self.report_failure(&err, HEALTH_FAILED);
                Err(err)
            }
        };
        self.publish();
        result
    }

    pub async fn refresh_job_status(&mut self) -> Result<JobStatusResponse> {
        let job_id = self.job_id().map(str::to_string).ok_or(ClientError::NoJob)?;

        let result = match self.api.job_status(&job_id).await {
            Ok(status) => {
                self.notify(Severity::Info, "Processing", format!("Job {}: {}", job_id, status.status));
                Ok(status)
            }
            Err(err) => {
                self.report_failure(&err, STATUS_FAILED);
                Err(err)
            }
        };
        self.publish();
        result
    }

    fn report_failure(&mut self, err: &ClientError, fallback: &str) {
        if let ClientError::Transport(detail) = err {
            log::warn!("{}: {}", fallback, detail);
        }
        self.notify(Severity::Error, "Error", err.user_message(fallback));
    }

    /// Queues a notification. Callers publish once their transition is complete.
    fn notify(&mut self, severity: Severity, title: &str, description: impl Into<String>) {
        self.notifications.push(Notification::new(severity, title, description));
    }

    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
        self.publish();
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view());
    }
}
