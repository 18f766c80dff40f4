//! Build script for ubdb-proto.
//!
//! Compiles `proto/ubdb/v1/ubdb.proto` with tonic-prost-build when the proto
//! file and a `protoc` binary are both available. Otherwise the crate uses the
//! pre-generated code in `src/generated/`.

use std::{path::Path, process::Command};

const PROTO_FILE: &str = "../../proto/ubdb/v1/ubdb.proto";

fn protoc_available() -> bool {
    let protoc = std::env::var_os("PROTOC").unwrap_or_else(|| "protoc".into());
    Command::new(protoc).arg("--version").output().is_ok_and(|out| out.status.success())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo::rustc-check-cfg=cfg(use_pregenerated_proto)");
    println!("cargo::rerun-if-env-changed=PROTOC");

    if Path::new(PROTO_FILE).exists() && protoc_available() {
        println!("cargo::rerun-if-changed={PROTO_FILE}");

        tonic_prost_build::configure()
            .build_server(true)
            .build_client(true)
            .emit_rerun_if_changed(true)
            .compile_protos(&[PROTO_FILE], &["../../proto"])?;
    } else {
        println!("cargo::rustc-cfg=use_pregenerated_proto");
    }

    Ok(())
}
