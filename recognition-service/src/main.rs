//! Recognition Worker - stage 2 invocation entry point
//!
//! Adapter between the external event-driven runtime and the identity
//! resolver: reads one invocation payload from stdin, performs one
//! invocation, and writes one `{status_code, body}` JSON response to
//! stdout. Dispatch and retries belong to the runtime, not to this process.
//!
//! Environment variables:
//! - `SCRATCH_DIR`: root for per-invocation working directories
//! - `GALLERY_KEY`: gallery object key in the tenant data bucket
//! - `EMBEDDER_ENDPOINT`: model-serving endpoint for face embeddings

use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tracing::{error, info};

use recognition_service::models::{InvocationResponse, RecognitionRequest};
use recognition_service::services::HttpFaceEmbedder;
use recognition_service::{Config, IdentityResolver};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recognition_service=info".parse().expect("valid directive"))
                .add_directive("recognition_worker=info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env();
    info!(
        gallery_key = %config.gallery_key,
        embedder = %config.embedder_endpoint,
        "configuration loaded"
    );

    // Process-scoped client handles, built once and injected.
    let aws_config = aws_config::load_from_env().await;
    let blob_store = Arc::new(blob_store::S3BlobStore::new(aws_sdk_s3::Client::new(
        &aws_config,
    )));
    let embedder = Arc::new(HttpFaceEmbedder::new(config.embedder_endpoint.clone()));
    let resolver = IdentityResolver::new(blob_store, embedder, config);

    let mut raw = String::new();
    tokio::io::stdin().read_to_string(&mut raw).await?;

    let response = match serde_json::from_str::<RecognitionRequest>(&raw) {
        Ok(request) => match resolver.handle(&request).await {
            Ok(output) => InvocationResponse::ok(serde_json::to_string(&output)?),
            Err(e) => InvocationResponse::error(e.to_string()),
        },
        Err(e) => {
            error!(error = %e, "failed to parse invocation payload");
            InvocationResponse::error(format!("invalid invocation payload: {e}"))
        }
    };

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
