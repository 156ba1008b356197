//! Deterministic cache keys for list queries.

use base64::Engine;
use sha2::{Digest, Sha256};

use crate::query::QueryParams;
use crate::types::Resource;

/// Fingerprint a (resource, params) pair for request deduplication.
///
/// `QueryParams` iterates in sorted key order, so two maps built in any
/// insertion order hash identically. The digest is truncated to 16 bytes and
/// base64-encoded; collisions at that length are not a practical concern for
/// a per-session query cache.
pub fn fingerprint(resource: Resource, params: &QueryParams) -> String {
    let mut hasher = Sha256::new();
    hasher.update(resource.path().as_bytes());
    hasher.update(b"\n");
    for (k, v) in params.iter() {
        hasher.update(k.as_bytes());
        hasher.update(b"=");
        hasher.update(v.as_bytes());
        hasher.update(b"&");
    }
    let hash = hasher.finalize();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&hash[..16])
}
