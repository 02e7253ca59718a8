// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source-hosting URL helpers.
//!
//! Repository URLs look like `https://host/owner/name` and script URLs like
//! `https://host/owner/name/blob/<ref>/<path>`. These helpers extract the
//! `(owner, name)` pair, derive the script's path inside a checkout, rewrite
//! blob URLs to their raw commit-pinned form, and name workspace
//! directories.

use sha1::{Digest, Sha1};
use std::path::PathBuf;

/// The `(owner, name)` pair of a source-hosting URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    /// Extract the slug from an http(s) source-hosting URL.
    ///
    /// Returns `None` for non-http URLs and URLs whose path has fewer than
    /// two segments. A trailing `.git` on the name is dropped.
    pub fn parse(url: &str) -> Option<Self> {
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))?;
        let (_host, path) = rest.split_once('/')?;
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let name = segments.next()?;
        let name = name.strip_suffix(".git").unwrap_or(name);
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self { owner: owner.to_string(), name: name.to_string() })
    }

    /// Case-insensitive slug comparison, matching how source hosts treat
    /// owner and repository names.
    pub fn same_repo(&self, other: &RepoSlug) -> bool {
        self.owner.eq_ignore_ascii_case(&other.owner)
            && self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Path of a build script inside a checkout of its own repository.
///
/// Strips the owner/name prefix plus the `blob/<ref>` segments from the
/// URL path and joins the remainder with native path separators:
/// `https://host/o/n/blob/master/dir/build.cmd` → `dir/build.cmd`.
pub fn script_rel_path(script_url: &str) -> Option<PathBuf> {
    let rest = script_url
        .strip_prefix("https://")
        .or_else(|| script_url.strip_prefix("http://"))?;
    let (_host, path) = rest.split_once('/')?;
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let _owner = segments.next()?;
    let _name = segments.next()?;
    // Skip the `blob` marker and the ref that follows it.
    match segments.next()? {
        "blob" => {
            let _ref = segments.next()?;
        }
        first => {
            // No blob segment; treat the remainder (including this
            // segment) as the path.
            let mut rel: PathBuf = PathBuf::from(first);
            rel.extend(segments);
            return Some(rel);
        }
    }
    let mut rel = PathBuf::new();
    rel.extend(segments);
    if rel.as_os_str().is_empty() {
        None
    } else {
        Some(rel)
    }
}

/// Rewrite a blob URL to its raw form pinned to `commit`.
///
/// `…/blob/<ref>/<path>` → `…/raw/<commit>/<path>`, by replacing the first
/// `/blob/` segment with `/raw/` and the first `/master/` segment with the
/// commit.
pub fn raw_script_url(script_url: &str, commit: &str) -> String {
    script_url
        .replacen("/blob/", "/raw/", 1)
        .replacen("/master/", &format!("/{}/", commit), 1)
}

/// Final path segment of a script URL, used as the downloaded file name.
pub fn script_file_name(script_url: &str) -> String {
    script_url
        .rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or(script_url)
        .to_string()
}

/// Workspace directory name for a repository: `Build_<hex sha1 of URL>`.
///
/// Derived only from the repo URL, so successive builds of the same
/// repository reuse one checkout.
pub fn workspace_dir_name(repo_url: &str) -> String {
    format!("Build_{:x}", Sha1::digest(repo_url.as_bytes()))
}

#[cfg(test)]
#[path = "url_tests.rs"]
mod tests;
