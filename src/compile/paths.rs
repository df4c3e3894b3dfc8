//! Path rewriting for include and flag arguments.
//!
//! At the beginning of a path, in order: leading blanks are dropped, a
//! doubled separator collapses to one (pkg-config emits `//usr/...`), the
//! relative top is replaced with the absolute top, a lone `.` segment is
//! replaced with the makefile's own directory, and otherwise the build
//! root is chopped off. The caller's prefix is glued on front of the
//! result.

use crate::model::Project;

/// Placeholder the renderer defines for the makefile's own directory.
pub(crate) const LOCAL_PATH: &str = "$(LOCAL_PATH)";

/// Strip the configured build root (and one following separator) from
/// `path`.
pub(crate) fn strip_root<'a>(root: Option<&str>, path: &'a str) -> &'a str {
    let Some(prefix) = root else { return path };
    let Some(rest) = path.strip_prefix(prefix) else {
        return path;
    };
    rest.strip_prefix('/').unwrap_or(rest)
}

/// Rewrite `path` for the generated makefile and glue `prefix` on front.
pub(crate) fn rewrite(project: &Project, prefix: &str, path: &str) -> String {
    let trimmed = path.trim_start_matches([' ', '\t']);
    let collapsed = trimmed
        .strip_prefix('/')
        .filter(|rest| rest.starts_with('/'))
        .unwrap_or(trimmed);

    if let (Some(abs_top), Some(rel_top)) = (project.abs_top.as_deref(), project.rel_top.as_deref())
    {
        if let Some(rest) = collapsed.strip_prefix(rel_top) {
            return format!("{prefix}{abs_top}{rest}");
        }
    }
    if let Some(rest) = local_remainder(collapsed) {
        return format!("{prefix}{LOCAL_PATH}{rest}");
    }
    let stripped = strip_root(project.root_path.as_deref(), collapsed);
    format!("{prefix}{stripped}")
}

/// Remainder after a lone `.` or a leading `./`, when the path is local.
fn local_remainder(path: &str) -> Option<&str> {
    let rest = path.strip_prefix('.')?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildKind, Project};
    use rstest::rstest;

    fn project(root: Option<&str>, tops: Option<(&str, &str)>) -> Project {
        let mut out = Project::new("p".into(), BuildKind::Ndk, root.map(str::to_owned));
        if let Some((abs_top, rel_top)) = tops {
            out.abs_top = Some(abs_top.to_owned());
            out.rel_top = Some(rel_top.to_owned());
        }
        out
    }

    #[rstest]
    fn relative_top_is_replaced_with_absolute_top() {
        let p = project(None, Some(("/build/src", "src")));
        assert_eq!(rewrite(&p, "", "src/foo.c"), "/build/src/foo.c");
    }

    #[rstest]
    #[case("./foo.c", "$(LOCAL_PATH)/foo.c")]
    #[case(".", "$(LOCAL_PATH)")]
    #[case(".hidden", ".hidden")]
    fn current_directory_marker_becomes_local_path(
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        let p = project(None, None);
        assert_eq!(rewrite(&p, "", input), expected);
    }

    #[rstest]
    fn root_prefix_is_stripped() {
        let p = project(Some("/android/tree"), None);
        assert_eq!(rewrite(&p, "", "/android/tree/external/z"), "external/z");
    }

    #[rstest]
    fn unrelated_paths_pass_through() {
        let p = project(Some("/android/tree"), None);
        assert_eq!(rewrite(&p, "", "/usr/include"), "/usr/include");
    }

    #[rstest]
    fn leading_blanks_and_doubled_separator_collapse() {
        let p = project(None, None);
        assert_eq!(rewrite(&p, "", "  //usr/include"), "/usr/include");
    }

    #[rstest]
    fn prefix_is_glued_on_front() {
        let p = project(None, None);
        assert_eq!(rewrite(&p, "-include ", "./config.h"), "-include $(LOCAL_PATH)/config.h");
    }

    #[rstest]
    fn substitution_requires_both_tops() {
        let mut p = project(None, None);
        p.rel_top = Some("src".into());
        assert_eq!(rewrite(&p, "", "src/foo.c"), "src/foo.c");
    }
}
