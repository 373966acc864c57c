//! Success envelope shared by every JSON endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::ResultCode;

/// `{ "result": "SUCCESS", "data": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub result: ResultCode,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            result: ResultCode::Success,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let value = serde_json::to_value(ApiResponse::success(json!({"id": 1}))).expect("serialise");
        assert_eq!(value, json!({"result": "SUCCESS", "data": {"id": 1}}));
    }
}
