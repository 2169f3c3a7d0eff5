//! Frame Service
//!
//! Stage 1 of the identification pipeline. Triggered by a storage event for
//! a newly uploaded video, it extracts a single representative frame,
//! stages the frame in the tenant's `-stage-1` bucket, and hands off to the
//! recognition stage with a one-way asynchronous invoke.

pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod services;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
pub use handler::FramePipeline;
