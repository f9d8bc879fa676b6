use std::path::Path;
use std::process::Command;

/// Embeds the short commit hash so `sketchrefine --version` can report it.
fn main() {
    let hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=SKETCHREFINE_GIT_HASH={hash}");

    for tracked in [".git/HEAD", ".git/refs", ".git/packed-refs"] {
        if Path::new(tracked).exists() {
            println!("cargo:rerun-if-changed={tracked}");
        }
    }
}
