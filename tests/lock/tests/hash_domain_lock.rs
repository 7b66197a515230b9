//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. Canonical domain set has expected count (catches forgotten additions to ALL)
//! 2. All domain byte strings are unique
//! 3. All domains are null-terminated
//! 4. All domains follow `WAYPOINT::*::V1\0` naming
//! 5. No raw `WAYPOINT::` domain literals in production source outside `hash_domain.rs`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use waypoint_kernel::proof::hash_domain::HashDomain;

/// ACCEPTANCE: HASH-DOMAIN-LOCK
#[test]
fn hash_domain_canonical_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        5,
        "expected 5 domain variants; if you added a new domain, update this count"
    );
}

/// ACCEPTANCE: HASH-DOMAIN-LOCK
#[test]
fn hash_domain_all_unique_bytes() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(
            seen.insert(domain.as_bytes()),
            "duplicate domain bytes: {domain}"
        );
    }
}

/// ACCEPTANCE: HASH-DOMAIN-LOCK
#[test]
fn hash_domain_all_null_terminated() {
    for domain in HashDomain::ALL {
        assert!(
            domain.as_bytes().ends_with(&[0]),
            "{domain} is not null-terminated"
        );
    }
}

/// ACCEPTANCE: HASH-DOMAIN-LOCK
#[test]
fn hash_domain_all_follow_naming_convention() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(
            bytes.starts_with(b"WAYPOINT::"),
            "{domain} does not start with WAYPOINT::"
        );
        assert!(
            bytes.ends_with(b"::V1\0"),
            "{domain} does not end with ::V1\\0"
        );
    }
}

/// Every crate's `src/` except the authority file must reach domains through
/// [`HashDomain`].
///
/// ACCEPTANCE: HASH-DOMAIN-LOCK
#[test]
fn no_raw_domain_literals_outside_authority() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let pattern = "b\"WAYPOINT::";
    let mut violations = Vec::new();
    for krate in ["kernel", "search", "planner", "backtrack", "harness"] {
        for path in rust_files(&root.join(krate).join("src")) {
            if path.file_name().and_then(|n| n.to_str()) == Some("hash_domain.rs") {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            for (i, line) in content.lines().enumerate() {
                let trimmed = line.trim();
                if !trimmed.starts_with("//") && trimmed.contains(pattern) {
                    violations.push(format!("  {}:{}: {trimmed}", path.display(), i + 1));
                }
            }
        }
    }
    assert!(
        violations.is_empty(),
        "raw WAYPOINT:: domain literals found outside hash_domain.rs:\n{}",
        violations.join("\n")
    );
}

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                out.extend(rust_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                out.push(path);
            }
        }
    }
    out
}
