//! Wire formats for the frame-service invocation

use serde::{Deserialize, Serialize};

/// Storage-event notification for a newly uploaded video.
///
/// External contract with the object-storage substrate; only the bucket
/// name and object key are consumed.
#[derive(Debug, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records")]
    pub records: Vec<StorageRecord>,
}

#[derive(Debug, Deserialize)]
pub struct StorageRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

/// Payload of the asynchronous hand-off to the recognition stage.
///
/// Field names are the cross-stage contract and must match what the
/// recognition worker deserializes.
#[derive(Debug, Clone, Serialize)]
pub struct RecognitionPayload {
    pub bucket_name: String,
    pub image_file_name: String,
}

/// Outcome of a successful frame-extraction invocation.
#[derive(Debug, Serialize)]
pub struct FrameOutput {
    pub staging_bucket: String,
    pub frame_key: String,
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
