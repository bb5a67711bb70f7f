use crate::contest::Contest;
use serde::Serialize;
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// コンテスト一覧APIのレスポンス
///
/// 成功時は`count`と`data`を、失敗時は`message`のみを返す。
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct ContestListResponse {
    pub status: ResponseStatus,
    pub count: Option<usize>,
    pub data: Option<Vec<Contest>>,
    pub message: Option<String>,
}

impl ContestListResponse {
    pub fn success(data: Vec<Contest>) -> Self {
        Self {
            status: ResponseStatus::Success,
            count: Some(data.len()),
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl ToString) -> Self {
        Self {
            status: ResponseStatus::Error,
            count: None,
            data: None,
            message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub endpoints: BTreeMap<String, String>,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::contest::Platform;
    use serde_json::json;

    #[test]
    fn empty_success_envelope() {
        let response = ContestListResponse::success(Vec::new());

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"status": "success", "count": 0, "data": []})
        );
    }

    #[test]
    fn count_follows_data() {
        let contest = Contest::new(Platform::CodeChef, "Starters", 50, "0 hours 0 minutes", "u")
            .unwrap();
        let response = ContestListResponse::success(vec![contest.clone(), contest]);

        assert_eq!(response.count, Some(2));
    }

    #[test]
    fn error_envelope_has_only_status_and_message() {
        let response = ContestListResponse::error("contest source task failed");

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"status": "error", "message": "contest source task failed"})
        );
    }
}
