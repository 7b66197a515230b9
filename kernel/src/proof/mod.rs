//! Proof module: canonical JSON bytes and domain-separated content hashing.
//!
//! Engines render their step logs as `serde_json::Value`; this module turns
//! those values into stable bytes and digests so that two runs can be compared
//! byte-for-byte.

pub mod canon;
pub mod hash;
pub mod hash_domain;
