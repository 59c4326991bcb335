//! SHA256 fingerprints over inputs, config, and dependencies.
//!
//! `serde_json`'s default `Map` is `BTreeMap`-backed (the `preserve_order`
//! feature is off in this workspace), so `serde_json::to_string` already
//! emits keys in sorted order — that's the "canonical-JSON" this module
//! relies on for the config fingerprint.

use sha2::{Digest, Sha256};

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// `SHA256(sorted(["repo-relative-path:SHA256(content)" for each input file]).join("|"))`.
pub fn input_fingerprint<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut entries: Vec<String> = files
        .into_iter()
        .map(|(path, content)| format!("{}:{}", path, sha256_hex(content)))
        .collect();
    entries.sort();
    sha256_hex(&entries.join("|"))
}

/// `SHA256(canonical-JSON(enabled layers, thresholds, tier enum, flag set))`.
pub fn config_fingerprint(config: &serde_json::Value) -> String {
    let canonical =
        serde_json::to_string(config).expect("serde_json::Value serialization is infallible");
    sha256_hex(&canonical)
}

/// `SHA256(sorted(["tool:version"]).join("|"))`.
pub fn dependency_fingerprint<'a>(deps: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut entries: Vec<String> = deps
        .into_iter()
        .map(|(tool, version)| format!("{}:{}", tool, version))
        .collect();
    entries.sort();
    sha256_hex(&entries.join("|"))
}
