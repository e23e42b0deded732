use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reply to `POST /upload`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}

/// Reply to `POST /ask`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatusResponse {
    pub status: String,
}

/// Common shape of the backend's `{ success, error }` envelope.
pub trait Acknowledged {
    fn succeeded(&self) -> bool;

    /// `error` if present, else a string `detail` (FastAPI's HTTPException body).
    fn server_message(&self) -> Option<String>;
}

fn pick_message(error: &Option<String>, detail: &Option<Value>) -> Option<String> {
    error
        .as_ref()
        .filter(|e| !e.trim().is_empty())
        .cloned()
        .or_else(|| detail.as_ref().and_then(|d| d.as_str()).map(str::to_string))
}

impl Acknowledged for UploadResponse {
    fn succeeded(&self) -> bool {
        self.success
    }

    fn server_message(&self) -> Option<String> {
        pick_message(&self.error, &self.detail)
    }
}

impl Acknowledged for AskResponse {
    fn succeeded(&self) -> bool {
        self.success
    }

    fn server_message(&self) -> Option<String> {
        pick_message(&self.error, &self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_success_means_failure() {
        let reply: UploadResponse = serde_json::from_value(json!({})).unwrap();
        assert!(!reply.succeeded());
        assert_eq!(reply.server_message(), None);
    }

    #[test]
    fn upload_reply_with_job_id() {
        let reply: UploadResponse = serde_json::from_value(json!({
            "success": true,
            "message": "PDF upload successful, processing started",
            "job_id": "4f1c"
        }))
        .unwrap();
        assert!(reply.succeeded());
        assert_eq!(reply.job_id.as_deref(), Some("4f1c"));
    }

    #[test]
    fn detail_is_used_when_error_is_absent() {
        let reply: AskResponse =
            serde_json::from_value(json!({ "detail": "Question and job_id are required" })).unwrap();
        assert_eq!(reply.server_message().as_deref(), Some("Question and job_id are required"));

        let both: AskResponse =
            serde_json::from_value(json!({ "success": false, "error": "X", "detail": "Y" })).unwrap();
        assert_eq!(both.server_message().as_deref(), Some("X"));
    }

    #[test]
    fn structured_detail_is_not_a_message() {
        let reply: AskResponse = serde_json::from_value(json!({
            "detail": [{ "loc": ["body"], "msg": "field required" }]
        }))
        .unwrap();
        assert_eq!(reply.server_message(), None);
    }

    #[test]
    fn ask_request_omits_unknown_job() {
        let body = serde_json::to_value(AskRequest { question: "why?".into(), job_id: None }).unwrap();
        assert_eq!(body, json!({ "question": "why?" }));

        let body = serde_json::to_value(AskRequest { question: "why?".into(), job_id: Some("j1".into()) }).unwrap();
        assert_eq!(body, json!({ "question": "why?", "job_id": "j1" }));
    }
}
