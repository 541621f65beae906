//! Absolute sub-tag paths for one instance

use crate::domain::TagPath;

/// `base.relative` for each relative name, in input order
///
/// Relative names are not validated; they may carry their own members and
/// index suffixes (`Sts.Run`, `Inp[2].Val`).
pub fn build_paths<S: AsRef<str>>(base: &TagPath, relative_names: &[S]) -> Vec<TagPath> {
    relative_names
        .iter()
        .map(|name| base.member(name.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_paths_preserves_order() {
        let base = TagPath::new("Base[0]").unwrap();
        let paths = build_paths(&base, &["Sts.Run", "Cfg[1]", "Val"]);
        let paths: Vec<&str> = paths.iter().map(TagPath::as_str).collect();
        assert_eq!(paths, vec!["Base[0].Sts.Run", "Base[0].Cfg[1]", "Base[0].Val"]);
    }

    #[test]
    fn test_build_paths_empty() {
        let base = TagPath::new("Inst1").unwrap();
        assert!(build_paths::<String>(&base, &[]).is_empty());
    }
}
