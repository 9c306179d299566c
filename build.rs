use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Embeds the short commit hash as `SCRIBBLE_GIT_HASH` for `--version`.
fn main() {
    let hash = git_short_hash().unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env=SCRIBBLE_GIT_HASH={hash}");

    if let Some(git_dir) = git_dir() {
        for entry in ["HEAD", "refs", "packed-refs"] {
            rerun_if_exists(&git_dir.join(entry));
        }
    }
}

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

/// `.git` directory, following `GIT_DIR` and worktree `gitdir:` files.
fn git_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os("GIT_DIR") {
        return Some(PathBuf::from(dir));
    }

    let dot_git = PathBuf::from(".git");
    if dot_git.is_dir() {
        return Some(dot_git);
    }

    let contents = fs::read_to_string(&dot_git).ok()?;
    let target = PathBuf::from(contents.strip_prefix("gitdir:")?.trim());
    Some(if target.is_relative() {
        Path::new(".").join(target)
    } else {
        target
    })
}

fn rerun_if_exists(path: &Path) {
    if let (true, Some(display)) = (path.exists(), path.to_str()) {
        println!("cargo:rerun-if-changed={display}");
    }
}
