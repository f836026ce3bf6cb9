//! Embeds the commit hash and build date for `tilequest --version`.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn git_commit() -> String {
    Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    // CI passes both values in; local builds ask git and the clock
    let commit = env::var("BUILD_COMMIT").unwrap_or_else(|_| git_commit());
    let date = env::var("BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let Ok(out_dir) = env::var("OUT_DIR") else {
        panic!("OUT_DIR is not set; build.rs must run under cargo");
    };
    let dest_path = Path::new(&out_dir).join("build_info.rs");
    let contents = format!(
        "pub const BUILD_COMMIT: &str = {commit:?};\npub const BUILD_DATE: &str = {date:?};\n"
    );
    if let Err(err) = fs::write(&dest_path, contents) {
        panic!("failed to write {}: {err}", dest_path.display());
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=BUILD_DATE");
}
