//! Fuzz target for request decoding and wire conversions.
//!
//! Arbitrary bytes fed to the request decoders, the target-state conversion,
//! and the `google.rpc.Status` details decoder must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use prost::Message;
use ubdb_proto::{convert, proto, status::RpcStatus};
use ubdb_types::ErrorCode;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let selector = data[0] % 5;
    let payload = &data[1..];

    match selector {
        0 => {
            let _ = proto::AddBucketEntryRequest::decode(payload);
        },
        1 => {
            let _ = proto::DeleteBucketEntryRequest::decode(payload);
        },
        2 => fuzz_update(payload),
        3 => fuzz_status_details(payload),
        _ => fuzz_error_code(payload),
    }
});

fn fuzz_update(data: &[u8]) {
    let Ok(request) = proto::UpdateBucketEntryRequest::decode(data) else {
        return;
    };
    match convert::target_state_from_proto(&request.bucket, request.state) {
        Ok(state) => assert_eq!(proto::BucketState::from(state) as i32, request.state),
        Err(err) => assert_eq!(err.code(), ErrorCode::InvalidTransition),
    }
}

fn fuzz_status_details(data: &[u8]) {
    let status = tonic::Status::with_details(
        tonic::Code::InvalidArgument,
        "fuzz",
        data.to_vec().into(),
    );
    if let Some(envelope) = RpcStatus::from_status(&status) {
        let _ = envelope.s3_error_details();
        let _ = envelope.error_details();
    }
}

fn fuzz_error_code(data: &[u8]) {
    let Some(bytes) = data.get(..2) else {
        return;
    };
    let raw = u16::from_le_bytes([bytes[0], bytes[1]]);
    if let Some(code) = ErrorCode::from_u16(raw) {
        assert_eq!(code.as_u16(), raw);
        let _ = code.s3_error_type().http_status_code();
    }
}
