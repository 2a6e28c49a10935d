//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use nodedump_rs::{Bucket, NodeDescriptor};
use std::path::Path;

pub const MATH_LIBRARY: &str = "/Script/Engine.KismetMathLibrary";
pub const SYSTEM_LIBRARY: &str = "/Script/Engine.KismetSystemLibrary";
pub const VECTOR: &str = "/Script/CoreUObject.Vector";
pub const ACTOR: &str = "/Script/Engine.Actor";
pub const PLAYER: &str = "/Game/BP_Player.BP_Player_C";
pub const PLAYER_SKELETON: &str = "/Game/BP_Player.SKEL_BP_Player_C";

/// Read a bucket document written with the default file prefix
pub fn read_bucket(dir: &Path, bucket: Bucket) -> Vec<NodeDescriptor> {
    let path = dir.join(format!("UEBlueprintLibrary_{}.json", bucket.name()));
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Missing document {}: {}", path.display(), e));
    serde_json::from_str(&content).expect("Document should be a descriptor array")
}

/// Find descriptors by display name
pub fn named<'a>(descriptors: &'a [NodeDescriptor], name: &str) -> Vec<&'a NodeDescriptor> {
    descriptors.iter().filter(|d| d.name == name).collect()
}

/// Find exactly one descriptor by display name and owner path substring
pub fn find_one<'a>(
    descriptors: &'a [NodeDescriptor],
    name: &str,
    owner_contains: &str,
) -> &'a NodeDescriptor {
    let matches: Vec<_> = descriptors
        .iter()
        .filter(|d| d.name == name && d.owner_path.contains(owner_contains))
        .collect();
    assert_eq!(
        matches.len(),
        1,
        "Expected exactly one {} on {}, found {}",
        name,
        owner_contains,
        matches.len()
    );
    matches[0]
}
