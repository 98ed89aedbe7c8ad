// Wire types for the `/coach` route.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::stats::StatRecord;

/// Advice returned when the request carries no stat records.
pub const NO_PLAYER_DATA: &str = "No player data provided.";

/// Advice returned when the upstream completion call fails for any reason.
pub const UPSTREAM_FAILURE: &str = "Error fetching advice from AI.";

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Body of a `POST /coach` request.
///
/// Only the shape is checked. `data` and `video` default to empty when the
/// client leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachRequest {
    pub status: String,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub video: Vec<Value>,
    pub avg: f64,
    pub point: i64,
}

impl CoachRequest {
    /// The stat record the advice is built from: the first entry of `data`.
    ///
    /// Returns `None` when `data` is empty. Any further entries are ignored.
    pub fn active_record(&self) -> Option<StatRecord> {
        self.data.first().map(StatRecord::from_value)
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachResponse {
    pub advice: String,
}

impl CoachResponse {
    pub fn new(advice: impl Into<String>) -> Self {
        Self {
            advice: advice.into(),
        }
    }

    pub fn no_player_data() -> Self {
        Self::new(NO_PLAYER_DATA)
    }

    pub fn upstream_failure() -> Self {
        Self::new(UPSTREAM_FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_and_video_default_to_empty() {
        let req: CoachRequest =
            serde_json::from_str(r#"{"status":"ok","avg":7.5,"point":3}"#).unwrap();
        assert!(req.data.is_empty());
        assert!(req.video.is_empty());
        assert!(req.active_record().is_none());
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let result: Result<CoachRequest, _> =
            serde_json::from_str(r#"{"status":"ok","data":[],"point":3}"#);
        assert!(result.is_err(), "avg is required");
    }

    #[test]
    fn wrong_type_for_data_is_rejected() {
        let result: Result<CoachRequest, _> =
            serde_json::from_str(r#"{"status":"ok","data":{"goals":1},"avg":1.0,"point":3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn active_record_is_first_entry_only() {
        let req: CoachRequest = serde_json::from_str(
            r#"{
                "status": "ok",
                "data": [{"goals": 2}, {"goals": 9}],
                "avg": 6.1,
                "point": 10
            }"#,
        )
        .unwrap();

        let record = req.active_record().expect("record present");
        assert_eq!(record.lookup("goals"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn response_serializes_as_single_advice_field() {
        let json = serde_json::to_string(&CoachResponse::no_player_data()).unwrap();
        assert_eq!(json, r#"{"advice":"No player data provided."}"#);
    }
}
