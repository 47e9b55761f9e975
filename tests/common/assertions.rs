//! Custom assertion macros
//!
//! Error bodies all have the shape `{"error": ..., "status": ...}`; these
//! keep the checks on them short.

/// Assert a `(StatusCode, Value)` response is an error with this status and message
#[macro_export]
macro_rules! assert_error {
    ($response:expr, $status:expr, $message:expr) => {{
        let (status, body) = $response;
        assert_eq!(status, $status, "unexpected status, body: {}", body);
        assert_eq!(body["error"], $message, "unexpected error body: {}", body);
        assert_eq!(body["status"], $status.as_u16());
    }};
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}
