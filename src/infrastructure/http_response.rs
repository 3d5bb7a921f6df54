// HTTP response utilities for plain text and JSON bodies
use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
    response::IntoResponse,
};
use serde::Serialize;

fn build_response(status: StatusCode, content_type: &'static str, body: Vec<u8>) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, HeaderValue::from(body.len()))
        .body(Body::from(body))
        .unwrap_or_else(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}

/// Plain text body, as expected by sensor.community firmware
pub fn text_response(status: StatusCode, body: impl Into<String>) -> Response<Body> {
    build_response(status, "text/plain; charset=utf-8", body.into().into_bytes())
}

pub fn json_response<T: Serialize>(status: StatusCode, data: &T) -> Response<Body> {
    match serde_json::to_vec(data) {
        Ok(body) => build_response(status, "application/json", body),
        Err(e) => {
            tracing::error!("JSON serialization error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
