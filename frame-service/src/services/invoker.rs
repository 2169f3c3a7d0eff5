//! One-way hand-off to the recognition stage
//!
//! The trigger is fire-and-forget: dispatch is attempted at most once and
//! the outcome of the recognition stage is never observed from here. There
//! is no acknowledgment, retry queue, or dead-letter path.

use async_trait::async_trait;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use thiserror::Error;
use tracing::debug;

use crate::models::RecognitionPayload;

#[derive(Debug, Error)]
#[error("invoke failed: {0}")]
pub struct InvokeError(pub String);

/// Asynchronous invocation of another pipeline stage.
#[async_trait]
pub trait StageInvoker: Send + Sync {
    async fn invoke_async(
        &self,
        function: &str,
        payload: &RecognitionPayload,
    ) -> Result<(), InvokeError>;
}

/// Lambda-backed invoker using event-style (non-blocking) invocation.
pub struct LambdaStageInvoker {
    client: aws_sdk_lambda::Client,
}

impl LambdaStageInvoker {
    pub fn new(client: aws_sdk_lambda::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StageInvoker for LambdaStageInvoker {
    async fn invoke_async(
        &self,
        function: &str,
        payload: &RecognitionPayload,
    ) -> Result<(), InvokeError> {
        let body = serde_json::to_vec(payload).map_err(|e| InvokeError(e.to_string()))?;
        self.client
            .invoke()
            .function_name(function)
            .invocation_type(InvocationType::Event)
            .payload(Blob::new(body))
            .send()
            .await
            .map_err(|e| InvokeError(e.to_string()))?;
        debug!(function = %function, "recognition stage invoked");
        Ok(())
    }
}
