//! Conversions between domain types and protobuf types.

use std::collections::HashMap;

use ubdb_types::{AuthorityError, BucketState, S3ErrorType, TransitionTarget};

use crate::proto;

impl From<BucketState> for proto::BucketState {
    fn from(state: BucketState) -> Self {
        match state {
            BucketState::Creating => Self::Creating,
            BucketState::Created => Self::Created,
            BucketState::Deleting => Self::Deleting,
        }
    }
}

/// Decodes the raw `state` field of an update request.
///
/// `CREATING`, `CREATED`, and `DELETING` map to their domain states and are
/// judged by the transition table. `UNSPECIFIED`, `DELETED`, and numbers
/// outside the enum are never valid targets.
///
/// # Errors
///
/// Returns [`AuthorityError::InvalidTransition`] with
/// [`TransitionTarget::Unrecognized`] for values with no domain state.
pub fn target_state_from_proto(bucket: &str, raw: i32) -> Result<BucketState, AuthorityError> {
    let unrecognized = |value: String| AuthorityError::InvalidTransition {
        bucket: bucket.to_owned(),
        current: None,
        target: TransitionTarget::Unrecognized(value),
    };

    match proto::BucketState::try_from(raw) {
        Ok(proto::BucketState::Creating) => Ok(BucketState::Creating),
        Ok(proto::BucketState::Created) => Ok(BucketState::Created),
        Ok(proto::BucketState::Deleting) => Ok(BucketState::Deleting),
        Ok(other @ (proto::BucketState::Unspecified | proto::BucketState::Deleted)) => {
            Err(unrecognized(other.as_str_name().to_owned()))
        },
        Err(_) => Err(unrecognized(raw.to_string())),
    }
}

impl From<S3ErrorType> for proto::s3_error_details::Type {
    fn from(kind: S3ErrorType) -> Self {
        match kind {
            S3ErrorType::BucketAlreadyExists => Self::BucketAlreadyExists,
            S3ErrorType::NoSuchBucket => Self::NoSuchBucket,
            S3ErrorType::AccessDenied => Self::AccessDenied,
            S3ErrorType::InvalidBucketState => Self::InvalidBucketState,
            S3ErrorType::InvalidArgument => Self::InvalidArgument,
        }
    }
}

/// Maps a wire error type back to the domain, `None` for `TYPE_UNSPECIFIED`.
#[must_use]
pub fn s3_error_type_from_proto(kind: proto::s3_error_details::Type) -> Option<S3ErrorType> {
    use proto::s3_error_details::Type;

    match kind {
        Type::Unspecified => None,
        Type::BucketAlreadyExists => Some(S3ErrorType::BucketAlreadyExists),
        Type::NoSuchBucket => Some(S3ErrorType::NoSuchBucket),
        Type::AccessDenied => Some(S3ErrorType::AccessDenied),
        Type::InvalidBucketState => Some(S3ErrorType::InvalidBucketState),
        Type::InvalidArgument => Some(S3ErrorType::InvalidArgument),
    }
}

impl From<S3ErrorType> for proto::S3ErrorDetails {
    fn from(kind: S3ErrorType) -> Self {
        Self {
            r#type: proto::s3_error_details::Type::from(kind) as i32,
            http_status_code: i32::from(kind.http_status_code()),
        }
    }
}

impl From<&AuthorityError> for proto::S3ErrorDetails {
    fn from(err: &AuthorityError) -> Self {
        err.s3_error_type().into()
    }
}

impl From<&AuthorityError> for proto::ErrorDetails {
    fn from(err: &AuthorityError) -> Self {
        let mut context = HashMap::new();
        if let Some(bucket) = err.bucket() {
            context.insert("bucket".to_owned(), bucket.to_owned());
        }
        match err {
            AuthorityError::ClusterMismatch { cluster, existing, .. } => {
                context.insert("cluster".to_owned(), cluster.clone());
                context.insert("existing_cluster".to_owned(), existing.clone());
            },
            AuthorityError::InvalidTransition { current, target, .. } => {
                if let Some(current) = current {
                    context.insert("current_state".to_owned(), current.to_string());
                }
                context.insert("target".to_owned(), target.to_string());
            },
            AuthorityError::InvalidArgument { field, .. } => {
                context.insert("field".to_owned(), field.clone());
            },
            AuthorityError::AlreadyExists { .. } | AuthorityError::NotFound { .. } => {},
        }

        let code = err.code();
        Self {
            error_code: code.as_u16().to_string(),
            is_retryable: err.is_retryable(),
            context,
            suggested_action: Some(code.suggested_action().to_owned()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use ubdb_types::ErrorCode;

    use super::*;

    #[test]
    fn test_domain_state_to_proto() {
        assert_eq!(proto::BucketState::from(BucketState::Creating), proto::BucketState::Creating);
        assert_eq!(proto::BucketState::from(BucketState::Created), proto::BucketState::Created);
        assert_eq!(proto::BucketState::from(BucketState::Deleting), proto::BucketState::Deleting);
    }

    #[test]
    fn test_target_state_known_values() {
        for state in BucketState::ALL {
            let raw = proto::BucketState::from(state) as i32;
            assert_eq!(target_state_from_proto("b1", raw).unwrap(), state);
        }
    }

    #[test]
    fn test_target_state_rejects_unspecified_and_deleted() {
        for (raw, name) in [(0, "BUCKET_STATE_UNSPECIFIED"), (4, "BUCKET_STATE_DELETED")] {
            let err = target_state_from_proto("b1", raw).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidTransition);
            assert_eq!(err.to_string(), format!("unknown target state '{name}' for bucket 'b1'"));
        }
    }

    #[test]
    fn test_target_state_rejects_out_of_range() {
        let err = target_state_from_proto("b1", 42).unwrap_err();
        assert_eq!(
            err,
            AuthorityError::InvalidTransition {
                bucket: "b1".to_owned(),
                current: None,
                target: TransitionTarget::Unrecognized("42".to_owned()),
            }
        );
    }

    #[test]
    fn test_s3_error_type_mapping_is_reversible() {
        for kind in [
            S3ErrorType::BucketAlreadyExists,
            S3ErrorType::NoSuchBucket,
            S3ErrorType::AccessDenied,
            S3ErrorType::InvalidBucketState,
            S3ErrorType::InvalidArgument,
        ] {
            let wire = proto::s3_error_details::Type::from(kind);
            assert_eq!(s3_error_type_from_proto(wire), Some(kind));
        }
        assert_eq!(s3_error_type_from_proto(proto::s3_error_details::Type::Unspecified), None);
    }

    #[test]
    fn test_s3_error_details_from_authority_error() {
        let err = AuthorityError::ClusterMismatch {
            bucket: "b1".to_owned(),
            cluster: "c2".to_owned(),
            existing: "c1".to_owned(),
        };
        let details = proto::S3ErrorDetails::from(&err);
        assert_eq!(details.r#type(), proto::s3_error_details::Type::AccessDenied);
        assert_eq!(details.http_status_code, 403);
    }

    #[test]
    fn test_error_details_context() {
        let err = AuthorityError::ClusterMismatch {
            bucket: "b1".to_owned(),
            cluster: "c2".to_owned(),
            existing: "c1".to_owned(),
        };
        let details = proto::ErrorDetails::from(&err);
        assert_eq!(details.error_code, "1002");
        assert!(!details.is_retryable);
        assert_eq!(details.context["bucket"], "b1");
        assert_eq!(details.context["cluster"], "c2");
        assert_eq!(details.context["existing_cluster"], "c1");
        assert!(details.suggested_action.is_some());
    }

    #[test]
    fn test_error_details_transition_context() {
        let err = AuthorityError::InvalidTransition {
            bucket: "b1".to_owned(),
            current: Some(BucketState::Creating),
            target: TransitionTarget::Advance(BucketState::Deleting),
        };
        let details = proto::ErrorDetails::from(&err);
        assert_eq!(details.error_code, "1003");
        assert_eq!(details.context["current_state"], "CREATING");
        assert_eq!(details.context["target"], "DELETING");
    }
}
