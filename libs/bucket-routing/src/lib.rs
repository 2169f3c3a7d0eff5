//! Tenant bucket-name derivation
//!
//! Every tenant owns a family of buckets related by a fixed naming
//! convention:
//!
//! - `{tenant}-input`    raw video uploads (stage 1 trigger)
//! - `{tenant}-stage-1`  extracted frames awaiting recognition
//! - `{tenant}-data`     the identity gallery
//! - `{tenant}-output`   plain-text recognition results
//!
//! Derivation is pure string transformation: no lookups, no I/O, and the
//! same input always yields the same names. A bucket name that does not end
//! with the expected suffix is rejected.

use thiserror::Error;

pub const INPUT_SUFFIX: &str = "-input";
pub const STAGE_SUFFIX: &str = "-stage-1";
pub const DATA_SUFFIX: &str = "-data";
pub const OUTPUT_SUFFIX: &str = "-output";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("bucket name `{0}` does not end with `{INPUT_SUFFIX}`")]
    MissingInputSuffix(String),

    #[error("bucket name `{0}` does not end with `{STAGE_SUFFIX}`")]
    MissingStageSuffix(String),

    #[error("bucket name `{0}` carries a suffix but no tenant id")]
    EmptyTenant(String),
}

/// Derive the frame-staging bucket for a video upload bucket.
///
/// `u123-input` becomes `u123-stage-1`. Only a terminal `-input` suffix
/// counts.
pub fn frame_stage_bucket(input_bucket: &str) -> Result<String, RoutingError> {
    let tenant = input_bucket
        .strip_suffix(INPUT_SUFFIX)
        .ok_or_else(|| RoutingError::MissingInputSuffix(input_bucket.to_string()))?;
    if tenant.is_empty() {
        return Err(RoutingError::EmptyTenant(input_bucket.to_string()));
    }
    Ok(format!("{tenant}{STAGE_SUFFIX}"))
}

/// Buckets addressed by one recognition invocation, derived from the
/// staging bucket that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingContext {
    pub stage_bucket: String,
    pub data_bucket: String,
    pub output_bucket: String,
}

impl RoutingContext {
    /// Recover the tenant id from a staging bucket name and derive the
    /// sibling data and output buckets.
    pub fn from_stage_bucket(stage_bucket: &str) -> Result<Self, RoutingError> {
        let tenant = stage_bucket
            .strip_suffix(STAGE_SUFFIX)
            .ok_or_else(|| RoutingError::MissingStageSuffix(stage_bucket.to_string()))?;
        if tenant.is_empty() {
            return Err(RoutingError::EmptyTenant(stage_bucket.to_string()));
        }
        Ok(Self {
            stage_bucket: stage_bucket.to_string(),
            data_bucket: format!("{tenant}{DATA_SUFFIX}"),
            output_bucket: format!("{tenant}{OUTPUT_SUFFIX}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_bucket_from_input_bucket() {
        assert_eq!(frame_stage_bucket("u123-input").unwrap(), "u123-stage-1");
    }

    #[test]
    fn input_suffix_must_be_terminal() {
        let err = frame_stage_bucket("u123-input-archive").unwrap_err();
        assert_eq!(
            err,
            RoutingError::MissingInputSuffix("u123-input-archive".to_string())
        );
    }

    #[test]
    fn input_bucket_without_suffix_is_rejected() {
        assert!(matches!(
            frame_stage_bucket("u123-data"),
            Err(RoutingError::MissingInputSuffix(_))
        ));
    }

    #[test]
    fn bare_suffix_has_no_tenant() {
        assert_eq!(
            frame_stage_bucket("-input").unwrap_err(),
            RoutingError::EmptyTenant("-input".to_string())
        );
        assert_eq!(
            RoutingContext::from_stage_bucket("-stage-1").unwrap_err(),
            RoutingError::EmptyTenant("-stage-1".to_string())
        );
    }

    #[test]
    fn context_from_stage_bucket() {
        let ctx = RoutingContext::from_stage_bucket("u123-stage-1").unwrap();
        assert_eq!(ctx.stage_bucket, "u123-stage-1");
        assert_eq!(ctx.data_bucket, "u123-data");
        assert_eq!(ctx.output_bucket, "u123-output");
    }

    #[test]
    fn context_rejects_non_stage_bucket() {
        assert!(matches!(
            RoutingContext::from_stage_bucket("u123-output"),
            Err(RoutingError::MissingStageSuffix(_))
        ));
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = RoutingContext::from_stage_bucket("tenant-42-stage-1").unwrap();
        let b = RoutingContext::from_stage_bucket("tenant-42-stage-1").unwrap();
        assert_eq!(a, b);
    }
}
