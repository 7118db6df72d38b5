//! Lexical path helpers.
//!
//! Import specifiers reference files that may not exist on disk yet (the
//! target tree is still being written), so resolution here is purely
//! lexical: no canonicalization, no filesystem access.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` segments without touching the filesystem. Leading
/// `..` components that escape the path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                _ => out.push(comp),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

/// Express `target` relative to `base`, both normalized first. Returns the
/// target unchanged when the two share no common prefix handling.
pub fn relative_to(base: &Path, target: &Path) -> PathBuf {
    let base = normalize(base);
    let target = normalize(target);

    let base_comps: Vec<Component> = base.components().collect();
    let target_comps: Vec<Component> = target.components().collect();

    let mut common = 0;
    while common < base_comps.len()
        && common < target_comps.len()
        && base_comps[common] == target_comps[common]
    {
        common += 1;
    }

    let mut out = PathBuf::new();
    for _ in common..base_comps.len() {
        out.push("..");
    }
    for comp in &target_comps[common..] {
        out.push(comp);
    }
    out
}

/// Relative path as a forward-slash string, regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_dots() {
        assert_eq!(
            normalize(Path::new("a/b/../c/./d")),
            PathBuf::from("a/c/d")
        );
        assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(
            relative_to(Path::new("/proj/src"), Path::new("/proj/src/components/Foo.jsx")),
            PathBuf::from("components/Foo.jsx")
        );
        assert_eq!(
            relative_to(Path::new("/proj/src"), Path::new("/proj/lib/util.js")),
            PathBuf::from("../lib/util.js")
        );
    }

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("a/b/c.js")), "a/b/c.js");
    }
}
