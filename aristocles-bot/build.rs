//! Build script for aristocles-bot
//!
//! Embeds the values printed in the startup identification line:
//! `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE`.
//!
//! Hosted builds often check out sources without `.git`; there the commit is
//! taken from `GIT_COMMIT` when the build environment provides it.

use std::process::Command;

const HASH_LEN: usize = 8;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

/// Short commit hash, suffixed `-dirty` when the work tree has local changes
fn commit_id() -> String {
    if let Some(hash) = git(&["rev-parse", &format!("--short={}", HASH_LEN), "HEAD"]) {
        let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
            .is_some_and(|status| !status.is_empty());
        return if dirty { format!("{}-dirty", hash) } else { hash };
    }

    std::env::var("GIT_COMMIT")
        .ok()
        .map(|hash| hash.trim().chars().take(HASH_LEN).collect::<String>())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    // RFC 3339 with local offset, e.g. 2026-10-18T14:30:45+02:00
    let build_timestamp = chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", commit_id());
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);

    // No rerun-if-changed directives: the script runs on every build
}
