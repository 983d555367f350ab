use crate::command::{CommandResponse, CommandStatus, ResponseMeta};
use axum::{
    body::Body,
    http::{Response as HttpResponse, StatusCode},
    response::Response,
};
use crave_protocol::{serialize_json, ErrorEnvelope};

pub(crate) fn error_response(code: &str, message: String) -> CommandResponse {
    let hint = match code {
        "invalid_request" => Some(
            "Send a JSON body like {\"action\":\"search\",\"payload\":{\"query\":\"beef\"}}."
                .to_string(),
        ),
        _ => Some("Check the request against the Command API schema.".to_string()),
    };

    CommandResponse {
        status: CommandStatus::Error,
        message: Some(message.clone()),
        error: Some(ErrorEnvelope {
            code: code.to_string(),
            message,
            details: None,
            hint,
            next_actions: Vec::new(),
        }),
        hints: Vec::new(),
        next_actions: Vec::new(),
        data: serde_json::Value::Null,
        meta: ResponseMeta::default(),
    }
}

pub(crate) fn build_response(
    status: StatusCode,
    response: &CommandResponse,
) -> Result<Response, StatusCode> {
    let bytes = serialize_json(response)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .into_bytes();
    json_response(status, bytes)
}

pub(crate) fn json_response(status: StatusCode, bytes: Vec<u8>) -> Result<Response, StatusCode> {
    HttpResponse::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(bytes))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// HTTP status for a Command API response, derived from its error code.
pub(crate) fn status_for(response: &CommandResponse) -> StatusCode {
    match response.error.as_ref().map(|error| error.code.as_str()) {
        Some("invalid_request") => StatusCode::BAD_REQUEST,
        Some("not_found") => StatusCode::NOT_FOUND,
        Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
        None => StatusCode::OK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_map_to_statuses() {
        let bad = error_response("invalid_request", "Invalid JSON request".to_string());
        assert!(bad.is_error());
        assert_eq!(status_for(&bad), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&error_response("not_found", String::new())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&error_response("internal", String::new())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
