//! Version string
//!
//! Commit, tree state and commit date are stamped in at build time through
//! `RIG_BUILD_COMMIT`, `RIG_BUILD_TREE_STATE` and `RIG_BUILD_DATE`.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo<'a> {
    pub version: &'a str,
    pub commit: Option<&'a str>,
    pub tree_state: Option<&'a str>,
    pub commit_date: Option<&'a str>,
}

impl BuildInfo<'static> {
    /// Metadata of the running binary
    #[must_use]
    pub const fn current() -> Self {
        Self {
            version: VERSION,
            commit: option_env!("RIG_BUILD_COMMIT"),
            tree_state: option_env!("RIG_BUILD_TREE_STATE"),
            commit_date: option_env!("RIG_BUILD_DATE"),
        }
    }
}

impl BuildInfo<'_> {
    /// `rig v1.0.0`, or `rig v1.0.0-abc123 dirty (2024-01-01)` with commit metadata
    #[must_use]
    pub fn version_string(&self) -> String {
        let mut out = format!("rig v{}", self.version);
        let Some(commit) = self.commit.filter(|c| !c.is_empty()) else {
            return out;
        };
        out.push('-');
        out.push_str(commit);

        if let Some(state) = self.tree_state.filter(|s| !s.is_empty()) {
            out.push(' ');
            out.push_str(state);
        }
        if let Some(date) = self.commit_date.filter(|d| !d.is_empty()) {
            out.push_str(&format!(" ({date})"));
        }
        out
    }
}

/// Version string of the running binary
#[must_use]
pub fn version_string() -> String {
    BuildInfo::current().version_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info<'a>(
        commit: Option<&'a str>,
        tree_state: Option<&'a str>,
        commit_date: Option<&'a str>,
    ) -> BuildInfo<'a> {
        BuildInfo {
            version: "1.2.3",
            commit,
            tree_state,
            commit_date,
        }
    }

    #[test]
    fn test_plain_version() {
        assert_eq!(
            info(None, Some("dirty"), None).version_string(),
            "rig v1.2.3"
        );
    }

    #[test]
    fn test_full_version() {
        let version = info(Some("abc123"), Some("dirty"), Some("2024-05-01")).version_string();
        assert_eq!(version, "rig v1.2.3-abc123 dirty (2024-05-01)");
    }

    #[test]
    fn test_commit_only() {
        assert_eq!(
            info(Some("abc123"), None, None).version_string(),
            "rig v1.2.3-abc123"
        );
    }

    #[test]
    fn test_current_uses_package_version() {
        assert!(version_string().starts_with(&format!("rig v{VERSION}")));
    }
}
