//! Path reconciliation: turn whatever a tool reported into a canonical,
//! project-relative, slash-separated path.
//!
//! Tools disagree on how they report files. golangci-lint echoes paths
//! relative to its working directory, the Dart analyzer reports absolute
//! paths, and some tools prefix the project root twice when it is passed
//! both as the working directory and as an argument. Every path leaving a
//! decoder or the compiler extractor goes through [`reconcile`].
//!
//! Normalization is lexical: nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// Reconcile `raw` against `root`.
///
/// - Empty input is returned unchanged.
/// - Separators are normalized to `/` and `.`/`..` segments collapsed.
/// - An absolute path containing the root more than once keeps only the
///   suffix starting at the last occurrence.
/// - A relative path is joined once onto `root`.
/// - The result is expressed relative to `root`; when that is impossible
///   the absolute path is kept.
pub fn reconcile(root: &str, raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let root = clean(root);
    let mut path = clean(raw);

    if is_absolute(&path) {
        if let Some(idx) = last_duplicate_root(&path, &root) {
            path = clean(&path[idx..]);
        }
    } else {
        path = clean(&format!("{}/{}", root, path));
    }

    match pathdiff::diff_paths(Path::new(&path), Path::new(&root)) {
        Some(rel) => {
            let rel = to_slash(&rel);
            if rel.is_empty() {
                ".".to_string()
            } else {
                rel
            }
        }
        None => {
            tracing::debug!(path = %path, root = %root, "path not relative to project root; keeping absolute");
            path
        }
    }
}

/// Lexically clean a path in the manner of `filepath.Clean`: unify
/// separators, drop empty and `.` segments, resolve `..` where possible.
pub fn clean(raw: &str) -> String {
    let unified = raw.replace('\\', "/");
    let (prefix, rest) = split_prefix(&unified);
    let rooted = rest.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for seg in rest.split('/') {
        match seg {
            "" | "." => {}
            // `..` above a rooted path is dropped
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            _ => parts.push(seg),
        }
    }

    let body = parts.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("{}/{}", prefix, body),
        (false, true) if prefix.is_empty() => ".".to_string(),
        (false, _) => format!("{}{}", prefix, body),
    }
}

/// Join `key` onto `root` as the source lookup path for a canonical key.
/// Absolute keys (degraded reconciliations) are returned as-is.
pub fn source_path(root: &Path, key: &str) -> PathBuf {
    root.join(key)
}

/// Parent directory key of a canonical path; `""` for root-level files.
pub fn dir_key(file: &str) -> String {
    match file.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => file[..idx].to_string(),
        None => String::new(),
    }
}

/// Render a `Path` with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for comp in path.components() {
        match comp {
            Component::Prefix(p) => out.push_str(&p.as_os_str().to_string_lossy()),
            Component::RootDir => out.push('/'),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

fn is_absolute(path: &str) -> bool {
    split_prefix(path).1.starts_with('/')
}

/// Split a Windows drive prefix (`C:`) off the front of a cleaned path.
fn split_prefix(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        path.split_at(2)
    } else {
        ("", path)
    }
}

/// Byte offset of the last occurrence of `root` in `path`, but only when
/// the root appears at least twice and each counted occurrence ends on a
/// segment boundary.
fn last_duplicate_root(path: &str, root: &str) -> Option<usize> {
    if root == "/" || root == "." {
        return None;
    }
    let hits: Vec<usize> = path
        .match_indices(root)
        .map(|(idx, _)| idx)
        .filter(|&idx| {
            let end = idx + root.len();
            end == path.len() || path.as_bytes()[end] == b'/'
        })
        .collect();
    if hits.len() >= 2 {
        hits.last().copied()
    } else {
        None
    }
}
