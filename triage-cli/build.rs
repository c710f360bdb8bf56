use std::path::Path;
use std::process::Command;

/// `git describe` for the workspace, e.g. "v0.1.0-4-g1a2b3c4-dirty".
fn describe(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

fn main() {
    let manifest = std::env::var_os("CARGO_MANIFEST_DIR").unwrap_or_else(|| ".".into());
    let workspace = Path::new(&manifest).join("..");

    let version = describe(&workspace).unwrap_or_else(|| "unknown".to_owned());
    println!("cargo:rustc-env=TRIAGE_GIT_DESCRIBE={version}");

    let head = workspace.join(".git").join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }
}
