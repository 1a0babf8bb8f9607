//! The shell dialects rig knows how to talk to
//!
//! Everything that differs between bash, zsh and fish lives here: quoting,
//! how an alias is written and removed, and where the startup file is.

use std::fmt;
use std::path::{Path, PathBuf};

use super::templates;

/// A supported interactive shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellDialect {
    Bash,
    Zsh,
    Fish,
}

impl ShellDialect {
    pub const ALL: [Self; 3] = [Self::Bash, Self::Zsh, Self::Fish];

    /// Pick the dialect from a shell executable path such as `/usr/bin/zsh`
    ///
    /// Only the base name is compared. A leading `-` (login shell `argv[0]`)
    /// is ignored.
    #[must_use]
    pub fn from_shell_path(shell: &str) -> Option<Self> {
        let base = Path::new(shell.trim())
            .file_name()
            .and_then(|name| name.to_str())?
            .trim_start_matches('-');

        Self::ALL.into_iter().find(|dialect| dialect.name() == base)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
        }
    }

    /// Wrap `text` in single quotes so the shell reads it back verbatim
    #[must_use]
    pub fn single_quote(self, text: &str) -> String {
        let escaped = match self {
            Self::Bash | Self::Zsh => text.replace('\'', r"'\''"),
            Self::Fish => text.replace('\\', r"\\").replace('\'', r"\'"),
        };
        format!("'{escaped}'")
    }

    /// Escape `text` for use between double quotes
    #[must_use]
    pub fn escape_double_quoted(self, text: &str) -> String {
        let special: &[char] = match self {
            Self::Bash | Self::Zsh => &['\\', '"', '$', '`'],
            Self::Fish => &['\\', '"', '$'],
        };

        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if special.contains(&c) {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }

    /// One `alias` line binding `name` to `command`
    #[must_use]
    pub fn alias_definition(self, name: &str, command: &str) -> String {
        format!("alias {name}={}\n", self.single_quote(command))
    }

    /// The line that defines `__rig-clear` for a freshly sourced alias file
    ///
    /// The routine removes aliases `1..=latest` once. A guard variable makes
    /// later calls in the same session no-ops until the next alias file is
    /// sourced and resets it.
    #[must_use]
    pub fn cleanup_registration(self, prefix: &str, latest: u32) -> String {
        let prefix = self.escape_double_quoted(prefix);
        match (self, latest) {
            (Self::Bash | Self::Zsh, 0) => {
                "__rig_cleared=0; __rig-clear() { __rig_cleared=1; }\n".to_string()
            }
            (Self::Bash | Self::Zsh, n) => format!(
                "__rig_cleared=0; __rig-clear() {{ if [ \"${{__rig_cleared}}\" -gt 0 ]; then return 0; fi; \
                 local i; for i in {{1..{n}}}; do unalias \"{prefix}${{i}}\" 2>/dev/null; done; __rig_cleared=1; }}\n"
            ),
            (Self::Fish, 0) => {
                "set -g __rig_cleared 0; function __rig-clear; set -g __rig_cleared 1; end\n"
                    .to_string()
            }
            (Self::Fish, n) => format!(
                "set -g __rig_cleared 0; function __rig-clear; if test \"$__rig_cleared\" -gt 0; return 0; end; \
                 for i in (seq 1 {n}); functions -e \"{prefix}$i\"; end; set -g __rig_cleared 1; end\n"
            ),
        }
    }

    /// The startup file this dialect reads for interactive sessions
    ///
    /// bash on macOS opens login shells, which read `.bash_profile` instead of `.bashrc`.
    #[must_use]
    pub fn startup_file(self, home: &Path) -> PathBuf {
        match self {
            Self::Bash if cfg!(target_os = "macos") => home.join(".bash_profile"),
            Self::Bash => home.join(".bashrc"),
            Self::Zsh => home.join(".zshrc"),
            Self::Fish => home.join(".config").join("fish").join("config.fish"),
        }
    }

    pub(crate) const fn bootstrap_template(self) -> &'static str {
        match self {
            Self::Bash | Self::Zsh => templates::POSIX_BOOTSTRAPPER,
            Self::Fish => templates::FISH_BOOTSTRAPPER,
        }
    }
}

impl fmt::Display for ShellDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_shell_path() {
        assert_eq!(
            ShellDialect::from_shell_path("/bin/bash"),
            Some(ShellDialect::Bash)
        );
        assert_eq!(
            ShellDialect::from_shell_path("/usr/local/bin/zsh"),
            Some(ShellDialect::Zsh)
        );
        assert_eq!(
            ShellDialect::from_shell_path("fish"),
            Some(ShellDialect::Fish)
        );
        assert_eq!(
            ShellDialect::from_shell_path("-zsh"),
            Some(ShellDialect::Zsh)
        );
    }

    #[test]
    fn test_from_shell_path_unsupported() {
        assert_eq!(ShellDialect::from_shell_path("/bin/tcsh"), None);
        assert_eq!(ShellDialect::from_shell_path(""), None);
        assert_eq!(ShellDialect::from_shell_path("/usr/bin/bash5"), None);
    }

    #[test]
    fn test_single_quote_posix() {
        let quoted = ShellDialect::Bash.single_quote("it's");
        assert_eq!(quoted, r"'it'\''s'");
    }

    #[test]
    fn test_single_quote_fish() {
        let quoted = ShellDialect::Fish.single_quote(r"it's a\b");
        assert_eq!(quoted, r"'it\'s a\\b'");
    }

    #[test]
    fn test_escape_double_quoted() {
        assert_eq!(
            ShellDialect::Zsh.escape_double_quoted(r#"a"$b`c\d"#),
            r#"a\"\$b\`c\\d"#
        );
        assert_eq!(ShellDialect::Fish.escape_double_quoted("a`$b"), r"a`\$b");
    }

    #[test]
    fn test_alias_definition() {
        let line = ShellDialect::Bash.alias_definition("e1", r#"vim "/tmp/a.txt""#);
        assert_eq!(line, "alias e1='vim \"/tmp/a.txt\"'\n");
    }

    #[test]
    fn test_cleanup_registration_posix() {
        let line = ShellDialect::Bash.cleanup_registration("e", 3);
        assert!(line.starts_with("__rig_cleared=0; __rig-clear() {"));
        assert!(line.contains("local i; for i in {1..3}; do unalias \"e${i}\""));
        assert!(line.ends_with("__rig_cleared=1; }\n"));
    }

    #[test]
    fn test_cleanup_registration_posix_without_handles() {
        let line = ShellDialect::Zsh.cleanup_registration("e", 0);
        assert!(!line.contains("unalias"));
        assert!(!line.contains("{1..0}"));
    }

    #[test]
    fn test_cleanup_registration_fish() {
        let line = ShellDialect::Fish.cleanup_registration("e", 2);
        assert!(line.contains("for i in (seq 1 2); functions -e \"e$i\"; end"));
        assert!(line.ends_with("set -g __rig_cleared 1; end\n"));
    }

    #[test]
    fn test_startup_files() {
        let home = Path::new("/home/user");
        assert_eq!(
            ShellDialect::Zsh.startup_file(home),
            PathBuf::from("/home/user/.zshrc")
        );
        assert_eq!(
            ShellDialect::Fish.startup_file(home),
            PathBuf::from("/home/user/.config/fish/config.fish")
        );
        let bash = ShellDialect::Bash.startup_file(home);
        if cfg!(target_os = "macos") {
            assert_eq!(bash, PathBuf::from("/home/user/.bash_profile"));
        } else {
            assert_eq!(bash, PathBuf::from("/home/user/.bashrc"));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ShellDialect::Fish.to_string(), "fish");
    }
}
