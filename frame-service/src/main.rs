//! Frame Worker - stage 1 invocation entry point
//!
//! Adapter between the external event-driven runtime and the frame
//! pipeline: reads one storage-event JSON payload from stdin, performs one
//! invocation, and writes one `{status_code, body}` JSON response to
//! stdout. Dispatch and retries belong to the runtime, not to this process.
//!
//! Environment variables:
//! - `SCRATCH_DIR`: root for per-invocation working directories
//! - `FFMPEG_PATH`: decoder binary (default: "ffmpeg")
//! - `RECOGNITION_FUNCTION`: function receiving the staged frame

use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tracing::{error, info};

use frame_service::models::{InvocationResponse, StorageEvent};
use frame_service::services::{FfmpegFrameDecoder, LambdaStageInvoker};
use frame_service::{Config, FramePipeline};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("frame_service=info".parse().expect("valid directive"))
                .add_directive("frame_worker=info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env();
    info!(
        ffmpeg = %config.ffmpeg_path,
        recognition_function = %config.recognition_function,
        "configuration loaded"
    );

    // Process-scoped client handles, built once and injected.
    let aws_config = aws_config::load_from_env().await;
    let blob_store = Arc::new(blob_store::S3BlobStore::new(aws_sdk_s3::Client::new(
        &aws_config,
    )));
    let invoker = Arc::new(LambdaStageInvoker::new(aws_sdk_lambda::Client::new(
        &aws_config,
    )));
    let decoder = Arc::new(FfmpegFrameDecoder::new(config.ffmpeg_path.clone()));
    let pipeline = FramePipeline::new(blob_store, decoder, invoker, config);

    let mut raw = String::new();
    tokio::io::stdin().read_to_string(&mut raw).await?;

    let response = match serde_json::from_str::<StorageEvent>(&raw) {
        Ok(event) => match pipeline.handle(&event).await {
            Ok(output) => InvocationResponse::ok(format!(
                "Successfully processed video and staged {} in {}",
                output.frame_key, output.staging_bucket
            )),
            Err(e) => InvocationResponse::error(e.to_string()),
        },
        Err(e) => {
            error!(error = %e, "failed to parse storage event");
            InvocationResponse::error(format!("invalid event payload: {e}"))
        }
    };

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
