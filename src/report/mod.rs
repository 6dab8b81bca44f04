//! Result delivery to the teacher's collection endpoint
//!
//! On full clearance a JSON summary is POSTed once, fire-and-forget; the
//! session never waits on it and never retries. The body is JSON carried
//! under a plain-text content type so the receiving endpoint (typically
//! an Apps Script web app) sees no preflight. Only the response status
//! is interpreted.

use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::store::{StudentProfile, TeacherSettings};

pub const RESULT_TYPE: &str = "bopomofo_checkpoint_result";

/// The clearance summary wire format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: String,
    pub device_id: String,
    pub student: StudentProfile,
    pub settings: SettingsEcho,
    pub summary: Summary,
}

/// The settings the run was graded under, echoed for the teacher.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsEcho {
    pub required_questions: u32,
    pub required_accuracy: u32,
    pub enabled_symbols: Vec<String>,
    pub mode: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_levels: usize,
    pub cleared_levels: usize,
}

impl ResultPayload {
    /// Summary for a fully cleared checkpoint over `levels`.
    pub fn for_clearance(
        device_id: String,
        student: StudentProfile,
        settings: &TeacherSettings,
        levels: &[String],
    ) -> Self {
        ResultPayload {
            kind: RESULT_TYPE.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            device_id,
            student,
            settings: SettingsEcho {
                required_questions: settings.required_questions,
                required_accuracy: settings.required_accuracy,
                enabled_symbols: levels.to_vec(),
                mode: "checkpoint".to_string(),
            },
            summary: Summary {
                total_levels: levels.len(),
                cleared_levels: levels.len(),
            },
        }
    }
}

/// Observable state of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sending,
    Delivered,
    Failed(String),
    /// No endpoint configured; results stay local.
    Skipped,
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryStatus::Sending => write!(f, "sending…"),
            DeliveryStatus::Delivered => write!(f, "✅ delivered to teacher"),
            DeliveryStatus::Failed(e) => write!(f, "⚠️  delivery failed ({})", e),
            DeliveryStatus::Skipped => {
                write!(f, "no endpoint configured: results kept local only")
            }
        }
    }
}

/// One delivery attempt. Never errors: every failure mode collapses into
/// a status the UI can show.
pub async fn deliver(endpoint: Option<String>, payload: &ResultPayload) -> DeliveryStatus {
    let url = match endpoint {
        Some(u) if !u.trim().is_empty() => u,
        _ => return DeliveryStatus::Skipped,
    };
    let body = match serde_json::to_string(payload) {
        Ok(b) => b,
        Err(e) => return DeliveryStatus::Failed(e.to_string()),
    };

    let client = reqwest::Client::new();
    let sent = client
        .post(&url)
        .header(CONTENT_TYPE, "text/plain;charset=utf-8")
        .body(body)
        .send()
        .await;

    match sent {
        Ok(resp) if resp.status().is_success() => {
            info!(%url, "clearance result delivered");
            DeliveryStatus::Delivered
        }
        Ok(resp) => {
            warn!(%url, status = %resp.status(), "endpoint rejected result");
            DeliveryStatus::Failed(format!("endpoint returned {}", resp.status()))
        }
        Err(e) => {
            warn!(%url, error = %e, "result delivery failed");
            DeliveryStatus::Failed(e.to_string())
        }
    }
}

/// Dispatch a delivery to a background task. The returned watch channel
/// starts at `Sending` and settles on the final status; dropping it does
/// not cancel the attempt.
pub fn spawn_delivery(
    endpoint: Option<String>,
    payload: ResultPayload,
) -> watch::Receiver<DeliveryStatus> {
    let (tx, rx) = watch::channel(DeliveryStatus::Sending);
    tokio::spawn(async move {
        let status = deliver(endpoint, &payload).await;
        let _ = tx.send(status);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> ResultPayload {
        let settings = TeacherSettings {
            required_questions: 5,
            required_accuracy: 70,
            ..TeacherSettings::default()
        };
        let student = StudentProfile {
            student_id: "A03".into(),
            student_name: "小明".into(),
        };
        let levels = vec!["ㄅ".to_string(), "ㄆ".to_string()];
        ResultPayload::for_clearance("dev-1".into(), student, &settings, &levels)
    }

    #[test]
    fn test_payload_wire_shape() {
        let json = serde_json::to_value(sample_payload()).unwrap();
        assert_eq!(json["type"], RESULT_TYPE);
        assert_eq!(json["deviceId"], "dev-1");
        assert_eq!(json["student"]["studentId"], "A03");
        assert_eq!(json["settings"]["requiredQuestions"], 5);
        assert_eq!(json["settings"]["requiredAccuracy"], 70);
        assert_eq!(json["settings"]["mode"], "checkpoint");
        assert_eq!(json["settings"]["enabledSymbols"][0], "ㄅ");
        assert_eq!(json["summary"]["totalLevels"], 2);
        assert_eq!(json["summary"]["clearedLevels"], 2);
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn test_missing_endpoint_is_skipped() {
        assert_eq!(deliver(None, &sample_payload()).await, DeliveryStatus::Skipped);
        assert_eq!(
            deliver(Some("  ".into()), &sample_payload()).await,
            DeliveryStatus::Skipped
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_reports_failure() {
        // Nothing listens on port 1
        let status = deliver(Some("http://127.0.0.1:1/collect".into()), &sample_payload()).await;
        assert!(matches!(status, DeliveryStatus::Failed(_)));
    }

    #[tokio::test]
    async fn test_spawned_delivery_settles_without_blocking() {
        let mut rx = spawn_delivery(None, sample_payload());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), DeliveryStatus::Skipped);
    }
}
