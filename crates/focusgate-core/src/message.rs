//! Request/response protocol between the control surface and the controller.
//!
//! Wire names are camelCase, matching the original extension's message
//! schema, so serialized requests look like
//! `{"action":"startTimer","workMin":25,...}`.

use serde::{Deserialize, Serialize};

use crate::stats::StatsSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    StartTimer {
        work_min: u64,
        break_min: u64,
        /// Replacement blocklist; an empty list keeps the current one.
        #[serde(default)]
        sites: Vec<String>,
    },
    StopTimer,
    GetStatus,
    GetStats,
    #[serde(rename_all = "camelCase")]
    CheckTab { tab_id: u64, url: String },
    RecheckAllTabs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub is_running: bool,
    pub is_work_time: bool,
    /// Remaining seconds in the current phase.
    pub time_left: u64,
    pub blocked_sites: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Status(StatusResponse),
    Stats(StatsSummary),
    #[serde(rename_all = "camelCase")]
    TabChecked { status: String, blocked: bool },
    #[serde(rename_all = "camelCase")]
    Rechecked { status: String, blocked_count: usize },
    Ack { status: String },
    Error { error: String },
}

impl Response {
    pub fn ack(status: impl Into<String>) -> Self {
        Response::Ack {
            status: status.into(),
        }
    }

    pub fn error(message: impl std::fmt::Display) -> Self {
        Response::Error {
            error: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_use_the_original_wire_names() {
        let req = Request::StartTimer {
            work_min: 25,
            break_min: 5,
            sites: vec!["example.com".into()],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["action"], "startTimer");
        assert_eq!(json["workMin"], 25);
        assert_eq!(json["breakMin"], 5);
        assert_eq!(json["sites"][0], "example.com");
    }

    #[test]
    fn check_tab_round_trips() {
        let raw = r#"{"action":"checkTab","tabId":7,"url":"https://example.com"}"#;
        let req: Request = serde_json::from_str(raw).unwrap();
        assert_eq!(
            req,
            Request::CheckTab {
                tab_id: 7,
                url: "https://example.com".into()
            }
        );
    }

    #[test]
    fn status_response_matches_extension_schema() {
        let resp = Response::Status(StatusResponse {
            is_running: true,
            is_work_time: true,
            time_left: 1500,
            blocked_sites: vec!["example.com".into()],
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["isRunning"], true);
        assert_eq!(json["isWorkTime"], true);
        assert_eq!(json["timeLeft"], 1500);
        assert_eq!(json["blockedSites"][0], "example.com");
    }

    #[test]
    fn start_timer_sites_default_to_empty() {
        let raw = r#"{"action":"startTimer","workMin":25,"breakMin":5}"#;
        let req: Request = serde_json::from_str(raw).unwrap();
        assert_eq!(
            req,
            Request::StartTimer {
                work_min: 25,
                break_min: 5,
                sites: vec![]
            }
        );
    }
}
