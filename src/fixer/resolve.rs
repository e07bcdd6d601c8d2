// src/fixer/resolve.rs
// =============================================================================
// This module resolves a link target to a candidate filesystem path.
//
// Resolution is pure path arithmetic - the resolver never touches the
// filesystem. Whether the candidate exists is the classifier's business.
//
// Rules:
// - "./page"  -> strip the marker, join to the source document's directory
// - "../page" -> join as written (the parent marker stays in the path)
// - "page"    -> join directly (a plain same-directory reference)
//
// An unusable target (empty string, or a source path with no parent
// directory) resolves to None.
// =============================================================================

use std::path::{Path, PathBuf};

// Resolves a link target against the directory of the document it appears in
//
// Parameters:
//   source: path of the document containing the link
//   target: the link target exactly as written
//
// Returns: Some(candidate path) or None if the target is unusable
pub fn resolve_link_path(source: &Path, target: &str) -> Option<PathBuf> {
    if target.is_empty() {
        return None;
    }

    let parent = source.parent()?;

    // "./" is redundant once we join to the parent directory, so drop it.
    // "../" must stay in the path for the join to climb correctly.
    let relative = target.strip_prefix("./").unwrap_or(target);

    Some(parent.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_directory_marker_is_stripped() {
        let resolved = resolve_link_path(Path::new("/docs/guide.md"), "./other.md");
        assert_eq!(resolved, Some(PathBuf::from("/docs/other.md")));
    }

    #[test]
    fn test_parent_marker_is_kept() {
        let resolved = resolve_link_path(Path::new("/docs/sub/guide.md"), "../other.md");
        assert_eq!(resolved, Some(PathBuf::from("/docs/sub/../other.md")));
    }

    #[test]
    fn test_plain_target_joins_to_source_directory() {
        let resolved = resolve_link_path(Path::new("/docs/guide.md"), "reference/api.md");
        assert_eq!(resolved, Some(PathBuf::from("/docs/reference/api.md")));
    }

    #[test]
    fn test_empty_target_is_unresolvable() {
        assert_eq!(resolve_link_path(Path::new("/docs/guide.md"), ""), None);
    }
}
