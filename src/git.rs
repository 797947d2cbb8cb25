//! Thin wrappers around the system `git` command.
//!
//! Every function here shells out to `git`, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! Reads go through a local `--mirror` clone so that file content can be
//! fetched at any tag without further network round-trips.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use crate::error::Error;

/// Stderr fragments git and the major hosts print when a repository does
/// not exist. Matched case-insensitively.
const MISSING_REPOSITORY_MARKERS: &[&str] = &[
    // GitHub over HTTPS and SSH
    "remote: repository not found",
    "error: repository not found",
    // GitLab
    "the project you were looking for could not be found",
    // Local paths and file:// URLs
    "does not appear to be a git repository",
];

/// True for arguments `git` would parse as an option.
pub fn is_option_like(arg: &str) -> bool {
    arg.trim_start().starts_with('-')
}

fn git_command() -> Command {
    let mut command = Command::new("git");
    // Never block on an interactive credential prompt
    command.env("GIT_TERMINAL_PROMPT", "0");
    command
}

/// Runs `git --git-dir <mirror> <args>` and returns the raw output.
fn run_in_mirror(mirror: &Path, args: &[&str]) -> Result<Output, Error> {
    git_command()
        .arg("--git-dir")
        .arg(mirror)
        .args(args)
        .output()
        .map_err(|e| Error::GitCommand {
            command: args.join(" "),
            url: mirror.display().to_string(),
            stderr: e.to_string(),
        })
}

fn command_failed(mirror: &Path, args: &[&str], output: &Output) -> Error {
    Error::GitCommand {
        command: args.join(" "),
        url: mirror.display().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

/// True when `stderr` says the remote repository does not exist.
pub fn is_missing_repository(stderr: &str) -> bool {
    let stderr = stderr.to_lowercase();
    if MISSING_REPOSITORY_MARKERS
        .iter()
        .any(|marker| stderr.contains(marker))
    {
        return true;
    }
    // `fatal: repository '<url>' not found`, as printed for HTTP 404s
    stderr.lines().map(str::trim).any(|line| {
        line.starts_with("fatal: repository '") && line.ends_with("' not found")
    })
}

/// Check whether a remote repository exists
///
/// Returns `Ok(false)` when git reports the repository as missing, and an
/// error for any other failure (network, authentication, ...).
pub fn remote_exists(url: &str) -> Result<bool, Error> {
    let output = git_command()
        .args(["ls-remote", "--heads", "--", url])
        .output()
        .map_err(|e| Error::GitCommand {
            command: "ls-remote --heads".to_string(),
            url: url.to_string(),
            stderr: e.to_string(),
        })?;

    if output.status.success() {
        return Ok(true);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if is_missing_repository(&stderr) {
        Ok(false)
    } else {
        Err(Error::GitCommand {
            command: "ls-remote --heads".to_string(),
            url: url.to_string(),
            stderr: stderr.trim().to_string(),
        })
    }
}

/// Create a mirror clone of `url` at `target_dir`
pub fn clone_mirror(url: &str, target_dir: &Path) -> Result<(), Error> {
    // Remove target directory if it exists (git won't clone into existing non-empty dir)
    if target_dir.exists() {
        fs::remove_dir_all(target_dir)?;
    }

    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }

    let output = git_command()
        .args(["clone", "--mirror", "--quiet", "--", url])
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            message: e.to_string(),
            hint: None,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Provide helpful error message for common auth failures
        let hint = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            Some(
                "Make sure you have access to the repository: add your SSH key to \
                 ssh-agent or configure a credential helper"
                    .to_string(),
            )
        } else {
            None
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            message: stderr.trim().to_string(),
            hint,
        });
    }

    Ok(())
}

/// Fetch new refs and tags into an existing mirror
pub fn update_mirror(mirror: &Path, url: &str) -> Result<(), Error> {
    let args = ["remote", "update", "--prune"];
    let output = run_in_mirror(mirror, &args)?;
    if !output.status.success() {
        return Err(Error::GitCommand {
            command: args.join(" "),
            url: url.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

/// Whether `path` exists at revision `rev`
pub fn object_exists(mirror: &Path, rev: &str, path: &str) -> Result<bool, Error> {
    if is_option_like(rev) {
        return Ok(false);
    }
    let object = format!("{}:{}", rev, path.trim_start_matches('/'));
    let output = run_in_mirror(mirror, &["cat-file", "-e", &object])?;
    Ok(output.status.success())
}

/// List every file path at revision `rev`, in git's tree order
///
/// A repository without any commit yet yields an empty list.
pub fn list_files(mirror: &Path, rev: &str) -> Result<Vec<String>, Error> {
    if is_option_like(rev) {
        return Ok(Vec::new());
    }
    let args = ["ls-tree", "-r", "--name-only", "-z", rev];
    let output = run_in_mirror(mirror, &args)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("Not a valid object name") {
            return Ok(Vec::new());
        }
        return Err(command_failed(mirror, &args, &output));
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .split('\0')
        .filter(|path| !path.is_empty())
        .map(|path| path.to_string())
        .collect())
}

/// Read `path` at revision `rev`; `None` when it does not exist there
pub fn read_file(mirror: &Path, rev: &str, path: &str) -> Result<Option<Vec<u8>>, Error> {
    if !object_exists(mirror, rev, path)? {
        return Ok(None);
    }

    let object = format!("{}:{}", rev, path.trim_start_matches('/'));
    let args = ["show", object.as_str()];
    let output = run_in_mirror(mirror, &args)?;
    if !output.status.success() {
        return Err(command_failed(mirror, &args, &output));
    }

    Ok(Some(output.stdout))
}

/// List all tags of a mirror, oldest first
pub fn list_tags(mirror: &Path) -> Result<Vec<String>, Error> {
    let args = [
        "for-each-ref",
        "--sort=creatordate",
        "--format=%(refname:strip=2)",
        "refs/tags",
    ];
    let output = run_in_mirror(mirror, &args)?;
    if !output.status.success() {
        return Err(command_failed(mirror, &args, &output));
    }

    Ok(parse_ref_lines(&String::from_utf8_lossy(&output.stdout)))
}

/// Split `for-each-ref` output into ref names
pub fn parse_ref_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}
