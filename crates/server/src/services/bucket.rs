//! Bucket entry service implementation.
//!
//! Validates request fields, calls the [`NameAuthority`], and answers
//! failures with a packed [`RpcStatus`](ubdb_proto::status::RpcStatus).

use std::{sync::Arc, time::Instant};

use tonic::{Request, Response, Status};
use tracing::{Span, debug, info_span, warn};
use ubdb_proto::{
    convert::target_state_from_proto,
    proto::{
        AddBucketEntryRequest, AddBucketEntryResponse, DeleteBucketEntryRequest,
        DeleteBucketEntryResponse, UpdateBucketEntryRequest, UpdateBucketEntryResponse,
        ubdb_service_server::UbdbService,
    },
};
use ubdb_state::NameAuthority;
use ubdb_types::{
    AuthorityError, BucketState,
    config::ValidationConfig,
    validation::{validate_mutation, validate_reservation},
};
use uuid::Uuid;

use super::{
    error_details::status_from_authority_error,
    metadata::{response_with_request_id, status_with_request_id},
};
use crate::metrics;

/// gRPC front end of the name authority.
#[derive(Debug, bon::Builder)]
pub struct UbdbServiceImpl {
    /// The shared authority.
    #[builder(default = Arc::new(NameAuthority::new()))]
    authority: Arc<NameAuthority>,
    /// Request field limits.
    #[builder(default)]
    validation: ValidationConfig,
}

impl UbdbServiceImpl {
    /// Returns the authority this service fronts.
    #[must_use]
    pub fn authority(&self) -> &Arc<NameAuthority> {
        &self.authority
    }

    fn reserve(&self, req: &AddBucketEntryRequest) -> Result<(), AuthorityError> {
        validate_reservation(&req.bucket, &req.owner, &req.cluster, &self.validation)
            .map_err(AuthorityError::from)
            .inspect_err(|e| warn!(error = %e, "Rejected add request"))?;
        self.authority.reserve(&req.bucket, &req.owner, &req.cluster)?;
        metrics::record_reserved();
        Ok(())
    }

    fn release(&self, req: &DeleteBucketEntryRequest) -> Result<(), AuthorityError> {
        validate_mutation(&req.bucket, &req.cluster, &self.validation)
            .map_err(AuthorityError::from)
            .inspect_err(|e| warn!(error = %e, "Rejected delete request"))?;
        self.authority.release(&req.bucket, &req.cluster)?;
        metrics::record_released();
        Ok(())
    }

    fn advance(&self, req: &UpdateBucketEntryRequest) -> Result<(), AuthorityError> {
        validate_mutation(&req.bucket, &req.cluster, &self.validation)
            .map_err(AuthorityError::from)
            .and_then(|()| target_state_from_proto(&req.bucket, req.state))
            .inspect_err(|e| warn!(error = %e, "Rejected update request"))
            .and_then(|target: BucketState| {
                self.authority.advance(&req.bucket, &req.cluster, target)?;
                metrics::record_advanced(target);
                Ok(())
            })
    }
}

/// Records the outcome and builds the response or status.
fn finish<T>(
    method: &'static str,
    request_id: &Uuid,
    started: Instant,
    span: &Span,
    result: Result<(), AuthorityError>,
    body: T,
) -> Result<Response<T>, Status> {
    let outcome = metrics::outcome_label(result.as_ref().copied());
    let latency = started.elapsed().as_secs_f64();
    metrics::record_request(method, outcome, latency);
    span.in_scope(|| debug!(outcome, latency_secs = latency, "Request complete"));

    match result {
        Ok(()) => Ok(response_with_request_id(body, request_id)),
        Err(err) => Err(status_with_request_id(status_from_authority_error(&err), request_id)),
    }
}

#[tonic::async_trait]
impl UbdbService for UbdbServiceImpl {
    async fn add_bucket_entry(
        &self,
        request: Request<AddBucketEntryRequest>,
    ) -> Result<Response<AddBucketEntryResponse>, Status> {
        let started = Instant::now();
        let request_id = Uuid::new_v4();
        let req = request.into_inner();
        let span = info_span!(
            "add_bucket_entry",
            %request_id,
            bucket = %req.bucket,
            owner = %req.owner,
            cluster = %req.cluster,
        );

        let result = span.in_scope(|| self.reserve(&req));
        finish("add_bucket_entry", &request_id, started, &span, result, AddBucketEntryResponse {})
    }

    async fn delete_bucket_entry(
        &self,
        request: Request<DeleteBucketEntryRequest>,
    ) -> Result<Response<DeleteBucketEntryResponse>, Status> {
        let started = Instant::now();
        let request_id = Uuid::new_v4();
        let req = request.into_inner();
        let span = info_span!(
            "delete_bucket_entry",
            %request_id,
            bucket = %req.bucket,
            cluster = %req.cluster,
        );

        let result = span.in_scope(|| self.release(&req));
        finish(
            "delete_bucket_entry",
            &request_id,
            started,
            &span,
            result,
            DeleteBucketEntryResponse {},
        )
    }

    async fn update_bucket_entry(
        &self,
        request: Request<UpdateBucketEntryRequest>,
    ) -> Result<Response<UpdateBucketEntryResponse>, Status> {
        let started = Instant::now();
        let request_id = Uuid::new_v4();
        let req = request.into_inner();
        let span = info_span!(
            "update_bucket_entry",
            %request_id,
            bucket = %req.bucket,
            cluster = %req.cluster,
            state = req.state,
        );

        let result = span.in_scope(|| self.advance(&req));
        finish(
            "update_bucket_entry",
            &request_id,
            started,
            &span,
            result,
            UpdateBucketEntryResponse {},
        )
    }
}
