use std::process::Command;

/// Expose the source revision as `GIT_HASH` for the startup log line.
/// Builds outside a git checkout report "unknown".
fn main() {
    let describe = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output();

    let revision = match describe {
        Ok(out) if out.status.success() => {
            String::from_utf8_lossy(&out.stdout).trim().to_string()
        }
        _ => "unknown".to_string(),
    };

    println!("cargo:rustc-env=GIT_HASH={}", revision);
}
