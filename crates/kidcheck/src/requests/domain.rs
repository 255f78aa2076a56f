use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for check-in requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

/// Direction of the request. Unrecognized values are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestKind {
    Checkin,
    Checkout,
    Other(String),
}

impl RequestKind {
    pub fn as_str(&self) -> &str {
        match self {
            RequestKind::Checkin => "checkin",
            RequestKind::Checkout => "checkout",
            RequestKind::Other(value) => value,
        }
    }
}

impl From<String> for RequestKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "checkin" => RequestKind::Checkin,
            "checkout" => RequestKind::Checkout,
            _ => RequestKind::Other(value),
        }
    }
}

impl From<&str> for RequestKind {
    fn from(value: &str) -> Self {
        RequestKind::from(value.to_string())
    }
}

impl From<RequestKind> for String {
    fn from(value: RequestKind) -> Self {
        match value {
            RequestKind::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// Review state of a request. Staff may set any value; `"pending"` always parses to
/// [`RequestStatus::Pending`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Other(String),
}

impl RequestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Other(value) => value,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

impl From<String> for RequestStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => RequestStatus::Pending,
            "approved" => RequestStatus::Approved,
            "rejected" => RequestStatus::Rejected,
            _ => RequestStatus::Other(value),
        }
    }
}

impl From<&str> for RequestStatus {
    fn from(value: &str) -> Self {
        RequestStatus::from(value.to_string())
    }
}

impl From<RequestStatus> for String {
    fn from(value: RequestStatus) -> Self {
        match value {
            RequestStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// Fields supplied when a parent raises a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckinRequest {
    pub kind: RequestKind,
    pub child_name: String,
    pub child_grade: String,
    pub parent_email: String,
    pub parent_name: String,
    pub message: String,
}

/// Staff decision applied by [`super::RequestLedger::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: RequestStatus,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
    pub id: RequestId,
    #[serde(rename = "type")]
    pub kind: RequestKind,
    pub child_name: String,
    pub child_grade: String,
    pub parent_email: String,
    pub parent_name: String,
    #[serde(rename = "requestMessage")]
    pub message: String,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// Local server time of the last staff response, `YYYY-MM-DD HH:MM:SS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<String>,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Aggregate counts for the staff dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestStats {
    pub pending: usize,
    pub processed: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_and_unknown_values_round_trip_as_plain_strings() {
        assert_eq!(RequestKind::from("checkout"), RequestKind::Checkout);
        assert_eq!(
            RequestKind::from("early-dismissal"),
            RequestKind::Other("early-dismissal".to_string())
        );
        assert_eq!(RequestStatus::from("pending"), RequestStatus::Pending);
        assert_eq!(
            serde_json::to_value(RequestStatus::Other("on-hold".to_string())).expect("serializes"),
            json!("on-hold")
        );
        let status: RequestStatus = serde_json::from_value(json!("approved")).expect("parses");
        assert_eq!(status, RequestStatus::Approved);
    }

    #[test]
    fn only_pending_counts_as_pending() {
        assert!(RequestStatus::Pending.is_pending());
        assert!(!RequestStatus::Approved.is_pending());
        assert!(!RequestStatus::from("Pending").is_pending());
    }
}
