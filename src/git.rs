use std::path::Path;
use std::process::{Command, Output};

use log::debug;

use crate::error::{Error, Result};

const INSTALL_GIT_HINT: &str = "Make sure git is installed and available on PATH";

/// Clone `url` into `target_dir` with the system git command.
///
/// Authentication is whatever git is configured with: SSH keys, credential
/// helpers, tokens in ~/.gitconfig.
pub fn clone(name: &str, url: &str, target_dir: &Path) -> Result<()> {
    debug!("git clone {} {}", url, target_dir.display());

    let output = Command::new("git")
        .arg("clone")
        .arg(url)
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitClone {
            name: name.to_string(),
            url: url.to_string(),
            message: e.to_string(),
            hint: Some(INSTALL_GIT_HINT.to_string()),
        })?;

    if !output.status.success() {
        let stderr = stderr_of(&output);
        return Err(Error::GitClone {
            name: name.to_string(),
            url: url.to_string(),
            hint: auth_hint(&stderr),
            message: stderr,
        });
    }

    Ok(())
}

/// Check out `ref_name` inside an existing clone.
pub fn checkout(name: &str, repo_dir: &Path, ref_name: &str) -> Result<()> {
    debug!("git -C {} checkout {}", repo_dir.display(), ref_name);

    let output = Command::new("git")
        .arg("-C")
        .arg(repo_dir)
        .args(["checkout", ref_name])
        .output()
        .map_err(|e| Error::GitCheckout {
            name: name.to_string(),
            r#ref: ref_name.to_string(),
            message: e.to_string(),
            hint: Some(INSTALL_GIT_HINT.to_string()),
        })?;

    if !output.status.success() {
        return Err(Error::GitCheckout {
            name: name.to_string(),
            r#ref: ref_name.to_string(),
            message: stderr_of(&output),
            hint: None,
        });
    }

    Ok(())
}

fn stderr_of(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("git exited with {}", output.status)
    } else {
        stderr
    }
}

/// Helpful message for common auth failures
fn auth_hint(stderr: &str) -> Option<String> {
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        Some(
            "Make sure you have access to the repository. For private repos, ensure \
             your SSH key is added to ssh-agent or git credentials are configured"
                .to_string(),
        )
    } else {
        None
    }
}
