//! Service layer for frame extraction
//!
//! - Frame extractor: one-frame-per-video policy over an opaque decoder
//! - Invoker: one-way hand-off to the recognition stage

pub mod frame_extractor;
pub mod invoker;

pub use frame_extractor::{FfmpegFrameDecoder, FrameDecoder, FrameExtractor};
pub use invoker::{InvokeError, LambdaStageInvoker, StageInvoker};
