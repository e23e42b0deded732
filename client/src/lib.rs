pub mod api_service;
pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod notification;
pub mod session;
pub mod transcript;

pub use api_service::{DocumentApi, HttpDocumentApi, UploadReceipt};
pub use config::ClientConfig;
pub use document::{FileCandidate, SelectedFile};
pub use error::{ClientError, Result};
pub use models::*;
pub use notification::{Notification, Notifications, Severity};
pub use session::{DocumentSession, Phase, SessionView};
pub use transcript::{Message, Role, Transcript};
