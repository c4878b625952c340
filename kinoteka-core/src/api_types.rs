use serde::{Deserialize, Serialize};

/// Envelope for every successful JSON body the server returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            error: Some(error),
            message: None,
        }
    }

    pub fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }
}

impl ApiResponse<()> {
    /// Success without a payload, e.g. after a delete.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }
}

/// Body returned after creating a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created<I> {
    pub id: I,
}

/// Query string of the search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default, alias = "query")]
    pub q: String,
}

/// Query string naming one media path to remove.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaPathQuery {
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_omits_empty_fields() {
        let json = serde_json::to_value(ApiResponse::success(5)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "success", "data": 5}));
    }

    #[test]
    fn message_only_response() {
        let json =
            serde_json::to_value(ApiResponse::message("Movie deleted")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "success", "message": "Movie deleted"})
        );
    }
}
