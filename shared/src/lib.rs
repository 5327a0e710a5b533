use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task list.
///
/// Serialized with the literal labels used by the household UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListStatus {
    /// Freshly created, nobody is working on it yet
    #[serde(rename = "Em aberto")]
    Open,
    /// Waiting to be started
    #[serde(rename = "Em espera")]
    Waiting,
    /// The list currently being scored for the member
    #[serde(rename = "Em andamento")]
    InProgress,
    /// Terminal state; the list is a frozen historical record
    #[serde(rename = "Encerrada")]
    Closed,
}

impl ListStatus {
    pub const ALL: [ListStatus; 4] = [
        ListStatus::Open,
        ListStatus::Waiting,
        ListStatus::InProgress,
        ListStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListStatus::Open => "Em aberto",
            ListStatus::Waiting => "Em espera",
            ListStatus::InProgress => "Em andamento",
            ListStatus::Closed => "Encerrada",
        }
    }

    /// Parse one of the four literal labels. Anything else is rejected.
    pub fn from_string(s: &str) -> Result<Self, String> {
        ListStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid list status: '{}'", s))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ListStatus::Closed)
    }
}

impl fmt::Display for ListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry for a reusable task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    /// Unique, at least 5 characters
    pub description: String,
    /// RFC 3339
    pub created_at: String,
    /// RFC 3339
    pub updated_at: String,
}

/// A scored occurrence of an activity inside a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInstance {
    pub activity_id: String,
    /// Snapshot of the catalog description at attach time
    pub description: String,
    /// Negative values are penalties that discount the allowance
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub id: String,
    pub family_member_name: String,
    pub status: ListStatus,
    pub activities: Vec<ActivityInstance>,
    pub created_at: String,
    pub updated_at: String,
}

/// A list together with its derived aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListDetails {
    #[serde(flatten)]
    pub list: TaskList,
    /// Sum of the negative activity values (zero or less)
    pub discount: f64,
    pub failed_activities: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    /// DD/MM/YYYY
    pub birth_date: String,
    pub allowance_value: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Public view of a user account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateActivityRequest {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateActivityRequest {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    pub family_member_name: String,
    /// One of the four status labels; validated server side
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateListStatusRequest {
    pub id: String,
    pub status: String,
}

/// Attach an activity to a list with a score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachActivityRequest {
    /// Target list ID
    pub id: String,
    #[serde(rename = "idActivity")]
    pub activity_id: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetachActivityRequest {
    #[serde(rename = "idActivity")]
    pub activity_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub name: String,
    /// DD/MM/YYYY
    pub birth_date: String,
    pub allowance_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub id: String,
    pub name: String,
    pub birth_date: String,
    pub allowance_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Pagination query parameters (`?page=&size=`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Envelope wrapped around every API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: bool,
    /// RFC 3339 timestamp of the response
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: true,
            date: chrono::Utc::now().to_rfc3339(),
            data: Some(data),
            error: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            status: true,
            date: chrono::Utc::now().to_rfc3339(),
            data: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            date: chrono::Utc::now().to_rfc3339(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowsResponse<T> {
    pub rows: Vec<T>,
    /// Total number of records, not just this page
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    /// RFC 3339
    pub expires_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeFailure {
    pub list_id: String,
    pub reason: String,
}

/// Outcome of removing or refreshing an activity across lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeResponse {
    pub activity_id: String,
    pub updated_lists: Vec<String>,
    pub failed_lists: Vec<CascadeFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteActivityResponse {
    pub id: String,
    pub cascade: CascadeResponse,
}

/// Closed lists of a member with the number of failed activities per list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedHistoryResponse {
    pub lists: Vec<TaskList>,
    /// Positionally aligned with `lists`
    pub total_failed_activities: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InProgressHistoryResponse {
    pub lists: Vec<TaskList>,
    pub total_discount: f64,
    /// Absent when the member is unknown
    pub allowance_value: Option<f64>,
    pub remaining_allowance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_status_labels() {
        for status in ListStatus::ALL {
            assert_eq!(ListStatus::from_string(status.as_str()), Ok(status));
        }
        assert!(ListStatus::from_string("Aberta").is_err());
        assert!(ListStatus::from_string("").is_err());
    }

    #[test]
    fn test_list_status_serializes_as_label() {
        let json = serde_json::to_string(&ListStatus::InProgress).unwrap();
        assert_eq!(json, "\"Em andamento\"");

        let parsed: ListStatus = serde_json::from_str("\"Encerrada\"").unwrap();
        assert_eq!(parsed, ListStatus::Closed);
    }

    #[test]
    fn test_attach_request_uses_id_activity_field() {
        let request: AttachActivityRequest =
            serde_json::from_str(r#"{"id":"l1","idActivity":"a1","value":-2.5}"#).unwrap();
        assert_eq!(request.activity_id, "a1");
        assert_eq!(request.value, -2.5);
    }

    #[test]
    fn test_envelope_omits_missing_fields() {
        let ok = serde_json::to_value(ApiResponse::success(3)).unwrap();
        assert_eq!(ok["status"], true);
        assert_eq!(ok["data"], 3);
        assert!(ok.get("error").is_none());

        let failed = serde_json::to_value(ApiResponse::<()>::failure("nope")).unwrap();
        assert_eq!(failed["status"], false);
        assert_eq!(failed["error"], "nope");
        assert!(failed.get("data").is_none());
    }

    #[test]
    fn test_list_details_flattens_list() {
        let details = TaskListDetails {
            list: TaskList {
                id: "l1".to_string(),
                family_member_name: "Ana".to_string(),
                status: ListStatus::Open,
                activities: vec![],
                created_at: "2025-01-01T00:00:00Z".to_string(),
                updated_at: "2025-01-01T00:00:00Z".to_string(),
            },
            discount: 0.0,
            failed_activities: 0,
        };
        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["familyMemberName"], "Ana");
        assert_eq!(value["status"], "Em aberto");
        assert_eq!(value["failedActivities"], 0);
    }
}
