//! Error Boundary
//!
//! Last-resort responses for requests no handler produced an answer for:
//! unmatched routes and panics. Both render the usual `{message}` body.

use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use std::any::Any;

/// Router fallback
pub async fn not_found() -> AppError {
    AppError::not_found("Not Found")
}

/// `CatchPanicLayer` handler: 500 with the panic message
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal Server Error".to_string()
    };

    tracing::error!(panic = %message, "Request handler panicked");
    AppError::internal(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = not_found().await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Not Found");
    }

    #[tokio::test]
    async fn test_panic_message_is_reported() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "boom");

        let response = handle_panic(Box::new(format!("bad {}", 42)));
        assert_eq!(body_json(response).await["message"], "bad 42");

        let response = handle_panic(Box::new(7_u8));
        assert_eq!(body_json(response).await["message"], "Internal Server Error");
    }
}
