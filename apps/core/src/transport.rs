use serde::{Deserialize, Serialize};

use crate::contract::{CoreRequest, CoreResponse};
use crate::core_service::{CoreService, ServiceError};
use crate::search::SearchError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    InvalidRequest,
    ProfileRootUnavailable,
    Cancelled,
    Config,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: CoreResponse },
    Err { error: ErrorResponse },
}

pub fn handle_request(service: &mut CoreService, request: CoreRequest) -> TransportResponse {
    match service.handle_command(request) {
        Ok(response) => TransportResponse::Ok { response },
        Err(error) => TransportResponse::Err {
            error: map_service_error(error),
        },
    }
}

pub fn handle_json(service: &mut CoreService, payload: &str) -> String {
    let response = match serde_json::from_str::<CoreRequest>(payload) {
        Ok(request) => handle_request(service, request),
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    };

    encode(&response)
}

pub fn encode(response: &TransportResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|error| encoding_failure(&error.to_string()))
}

fn encoding_failure(reason: &str) -> String {
    serde_json::json!({
        "status": "err",
        "error": {
            "code": ErrorCode::InvalidRequest,
            "message": format!("response encoding failed: {reason}"),
        },
    })
    .to_string()
}

fn map_service_error(error: ServiceError) -> ErrorResponse {
    let message = error.to_string();
    let code = match error {
        ServiceError::InvalidRequest(_) => ErrorCode::InvalidRequest,
        ServiceError::Config(_) | ServiceError::Settings(_) => ErrorCode::Config,
        ServiceError::Search(SearchError::ProfileRootUnavailable(_)) => {
            ErrorCode::ProfileRootUnavailable
        }
        ServiceError::Search(SearchError::Cancelled) => ErrorCode::Cancelled,
    };
    ErrorResponse { code, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_failure_escapes_the_reason() {
        let raw = encoding_failure("bad \\ path \"x\"\n\tend");
        let parsed: TransportResponse = serde_json::from_str(&raw).unwrap();

        match parsed {
            TransportResponse::Err { error } => {
                assert_eq!(error.code, ErrorCode::InvalidRequest);
                assert!(error.message.ends_with("bad \\ path \"x\"\n\tend"));
            }
            other => panic!("expected error envelope, got {other:?}"),
        }
    }
}
