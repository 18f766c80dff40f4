//! Fuzz target for name authority operation sequences.
//!
//! Decodes a sequence of reserve/advance/release calls from the input,
//! replays them against a [`NameAuthority`], and checks every outcome and
//! the final contents against a plain `HashMap` model.

#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use ubdb_state::NameAuthority;
use ubdb_types::{BucketState, ErrorCode};

const NAMES: [&str; 4] = ["a", "b", "c", ""];
const CLUSTERS: [&str; 3] = ["c1", "c2", "c3"];

/// Stored (cluster, state) per name.
type Model = HashMap<&'static str, (&'static str, BucketState)>;

fuzz_target!(|data: &[u8]| {
    let authority = NameAuthority::new();
    let mut model = Model::new();

    for chunk in data.chunks_exact(2) {
        let (op, arg) = (chunk[0], chunk[1]);
        let name = NAMES[usize::from(arg % 4)];
        let cluster = CLUSTERS[usize::from((arg >> 2) % 3)];

        let (actual, expected) = match op % 3 {
            0 => (authority.reserve(name, "owner", cluster), model_reserve(&mut model, name, cluster)),
            1 => {
                let target = BucketState::ALL[usize::from(arg >> 4) % BucketState::ALL.len()];
                (
                    authority.advance(name, cluster, target),
                    model_advance(&mut model, name, cluster, target),
                )
            },
            _ => (authority.release(name, cluster), model_release(&mut model, name, cluster)),
        };
        assert_eq!(actual.map_err(|e| e.code()), expected, "op={op} name={name:?} cluster={cluster}");
    }

    assert_eq!(authority.len(), model.len());
    for (name, (cluster, state)) in &model {
        let record = authority.get(name).expect("model record present");
        assert_eq!(record.cluster(), *cluster);
        assert_eq!(record.state(), *state);
    }
});

fn model_reserve(model: &mut Model, name: &'static str, cluster: &'static str) -> Result<(), ErrorCode> {
    if name.is_empty() {
        return Err(ErrorCode::InvalidArgument);
    }
    if model.contains_key(name) {
        return Err(ErrorCode::BucketAlreadyExists);
    }
    model.insert(name, (cluster, BucketState::Creating));
    Ok(())
}

fn model_advance(
    model: &mut Model,
    name: &'static str,
    cluster: &'static str,
    target: BucketState,
) -> Result<(), ErrorCode> {
    let (held_by, state) = model.get_mut(name).ok_or(ErrorCode::BucketNotFound)?;
    if *held_by != cluster {
        return Err(ErrorCode::ClusterMismatch);
    }
    if target.predecessor() != Some(*state) {
        return Err(ErrorCode::InvalidTransition);
    }
    *state = target;
    Ok(())
}

fn model_release(model: &mut Model, name: &'static str, cluster: &'static str) -> Result<(), ErrorCode> {
    let (held_by, state) = model.get(name).ok_or(ErrorCode::BucketNotFound)?;
    if *held_by != cluster {
        return Err(ErrorCode::ClusterMismatch);
    }
    if *state != BucketState::Deleting {
        return Err(ErrorCode::InvalidTransition);
    }
    model.remove(name);
    Ok(())
}
