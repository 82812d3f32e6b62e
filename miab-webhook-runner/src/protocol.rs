//! Line protocol: one challenge JSON per input line, one response JSON per output line.

use miab_webhook_core::types::ChallengeAction;
use miab_webhook_core::{ChallengeRequest, ChallengeSolver, SolverError};
use serde::Serialize;

/// Result of one request line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub uid: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SolverError>,
}

impl ChallengeResponse {
    fn ok(uid: String) -> Self {
        Self {
            uid,
            success: true,
            message: None,
            error: None,
        }
    }

    fn failed(uid: String, error: SolverError) -> Self {
        Self {
            uid,
            success: false,
            message: Some(error.to_string()),
            error: Some(error),
        }
    }

    fn malformed(detail: String) -> Self {
        Self {
            uid: String::new(),
            success: false,
            message: Some(format!("invalid challenge request: {detail}")),
            error: None,
        }
    }
}

/// Route a request to `present` or `clean_up` by its `action` field.
///
/// Unlike the solver itself, the dispatcher needs an explicit action.
fn route(request: &ChallengeRequest) -> Option<ChallengeAction> {
    if request.action.is_empty() {
        return None;
    }
    [ChallengeAction::Present, ChallengeAction::CleanUp]
        .into_iter()
        .find(|a| a.accepts(&request.action))
}

/// Parse and handle one input line.
pub async fn handle_line(solver: &dyn ChallengeSolver, line: &str) -> ChallengeResponse {
    let request: ChallengeRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejecting malformed request line: {e}");
            return ChallengeResponse::malformed(e.to_string());
        }
    };

    let result = match route(&request) {
        Some(ChallengeAction::Present) => solver.present(&request).await,
        Some(ChallengeAction::CleanUp) => solver.clean_up(&request).await,
        None => Err(SolverError::InvalidAction {
            operation: "dispatch",
            action: request.action.clone(),
        }),
    };

    match result {
        Ok(()) => ChallengeResponse::ok(request.uid),
        Err(e) => ChallengeResponse::failed(request.uid, e),
    }
}
