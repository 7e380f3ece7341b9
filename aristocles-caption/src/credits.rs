//! Credit extraction from `extraartists`
//!
//! Roles are matched by keyword substring on the lowercased role text. This
//! is deliberately coarse: "Mastered By" lands in the engineer bucket through
//! "master", and a role naming several jobs can land in both buckets.

use crate::models::CreditEntry;
use std::collections::HashSet;

pub const PRODUCER_KEYWORDS: &[&str] = &["producer"];

pub const ENGINEER_KEYWORDS: &[&str] = &["engineer", "mix", "record", "master", "sound"];

/// Names whose role contains any of `keywords`
///
/// Keywords must be lowercase. Output keeps encounter order with duplicates
/// removed (first occurrence wins). Missing roles never match; missing names
/// are kept as empty strings.
pub fn extract_roles(entries: &[CreditEntry], keywords: &[&str]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for entry in entries {
        let role = entry.role.as_deref().unwrap_or_default().to_lowercase();
        if !keywords.iter().any(|keyword| role.contains(keyword)) {
            continue;
        }

        let name = entry.name.as_deref().unwrap_or_default();
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }

    names
}

pub fn producers(entries: &[CreditEntry]) -> Vec<String> {
    extract_roles(entries, PRODUCER_KEYWORDS)
}

pub fn engineers(entries: &[CreditEntry]) -> Vec<String> {
    extract_roles(entries, ENGINEER_KEYWORDS)
}
