//! Wire formats for the recognition-service invocation

use serde::{Deserialize, Serialize};

/// Invocation payload sent by the frame stage.
///
/// Field names are the cross-stage contract; `bucket_name` is the staging
/// bucket holding the frame, `image_file_name` its flat object key.
#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionRequest {
    pub bucket_name: String,
    pub image_file_name: String,
}

/// Outcome of a successful recognition invocation.
#[derive(Debug, Serialize)]
pub struct RecognitionOutput {
    pub message: String,
    pub result: String,
    pub output_file: String,
}

/// Structured response returned to the invoking runtime.
#[derive(Debug, Serialize)]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn ok(body: String) -> Self {
        Self {
            status_code: 200,
            body,
        }
    }

    pub fn error(body: String) -> Self {
        Self {
            status_code: 500,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_cross_stage_payload() {
        let raw = r#"{"bucket_name": "u123-stage-1", "image_file_name": "clip.jpg"}"#;
        let request: RecognitionRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.bucket_name, "u123-stage-1");
        assert_eq!(request.image_file_name, "clip.jpg");
    }
}
