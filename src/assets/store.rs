use crate::foundation::error::{MockwearError, MockwearResult};

/// Normalize and validate template-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`). A single leading `/` is accepted and stripped, since catalog paths
/// are written as site-rooted URLs.
pub(crate) fn normalize_rel_path(source: &str) -> MockwearResult<String> {
    let s = source.trim().replace('\\', "/");
    let s = s.strip_prefix('/').unwrap_or(&s);
    if s.starts_with('/') {
        return Err(MockwearError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(MockwearError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(MockwearError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(MockwearError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
