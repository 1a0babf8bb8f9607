//! Editor command templates
//!
//! A template is a command line with `{filename}`, `{lineNumber}` and
//! `{columnNumber}` placeholders. Known editors come from [`EDITORS`]; any
//! other editor has to be configured with a full template in `RIG_EDIT_COMMAND`.
//!
//! `{filename}` is escaped for a double-quoted context, so templates must
//! write it as `"{filename}"`. An unquoted `{filename}` is reported.

use crate::config::{self, RigConfig};
use crate::shell::ShellDialect;
use crate::template;
use std::fmt;
use std::path::Path;

pub const FILENAME: &str = "filename";
pub const LINE_NUMBER: &str = "lineNumber";
pub const COLUMN_NUMBER: &str = "columnNumber";

/// Known editors by executable name
pub const EDITORS: &[(&str, &str)] = &[
    ("code", r#"code --goto "{filename}:{lineNumber}:{columnNumber}""#),
    ("emacs", r#"emacs +{lineNumber}:{columnNumber} --file="{filename}""#),
    ("hx", r#"hx "{filename}:{lineNumber}:{columnNumber}""#),
    ("mcedit", r#"mcedit "{filename}:{lineNumber}""#),
    ("micro", r#"micro +{lineNumber}:{columnNumber} "{filename}""#),
    ("nano", r#"nano +{lineNumber},{columnNumber} "{filename}""#),
    ("ne", r#"ne +{lineNumber},{columnNumber} "{filename}""#),
    ("nvim", r#"nvim -c "call cursor({lineNumber}, {columnNumber})" "{filename}""#),
    ("vim", r#"vim -c "call cursor({lineNumber}, {columnNumber})" "{filename}""#),
];

/// Look up an editor by name or path; only the base name is compared
#[must_use]
pub fn lookup(editor: &str) -> Option<&'static str> {
    let base = Path::new(editor.trim()).file_name()?.to_str()?;
    EDITORS
        .iter()
        .find(|(name, _)| *name == base)
        .map(|(_, template)| *template)
}

/// Where the chosen template came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorSource {
    /// `RIG_EDIT_COMMAND`
    Override,
    /// `RIG_EDITOR`, by table lookup
    Configured(String),
    /// `EDITOR`, by table lookup
    Environment(String),
    /// Nothing usable was configured
    Default,
}

/// A configuration problem that does not stop the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorWarning {
    /// An editor name that is not in the table
    UnknownEditor { var: &'static str, value: String },
    /// A placeholder in `RIG_EDIT_COMMAND` that will never be filled
    UnknownPlaceholder(String),
    /// `{filename}` outside double quotes in `RIG_EDIT_COMMAND`
    UnquotedFilename,
}

impl fmt::Display for EditorWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEditor { var, value } => write!(
                f,
                "Unknown value '{value}' for {var}. To use {value}, please configure it using {} instead.",
                config::EDIT_COMMAND_ENV
            ),
            Self::UnknownPlaceholder(name) => write!(
                f,
                "Unknown placeholder {{{name}}} in {}. Available: {{{FILENAME}}}, {{{LINE_NUMBER}}}, {{{COLUMN_NUMBER}}}",
                config::EDIT_COMMAND_ENV
            ),
            Self::UnquotedFilename => write!(
                f,
                "{{{FILENAME}}} is not double-quoted in {}; paths with spaces will break. Use \"{{{FILENAME}}}\" instead.",
                config::EDIT_COMMAND_ENV
            ),
        }
    }
}

/// Whether `{filename}` occurs outside double quotes in `template`
fn has_unquoted_filename(template: &str) -> bool {
    let placeholder = format!("{{{FILENAME}}}");
    let mut in_quotes = false;
    let mut escaped = false;

    for (idx, c) in template.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            '{' if !in_quotes && template[idx..].starts_with(&placeholder) => return true,
            _ => {}
        }
    }
    false
}

/// The resolved editor invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    template: String,
    source: EditorSource,
}

impl EditorCommand {
    #[must_use]
    pub fn new(template: impl Into<String>, source: EditorSource) -> Self {
        Self {
            template: template.into(),
            source,
        }
    }

    /// Pick the editor template from the configuration
    ///
    /// Order: `RIG_EDIT_COMMAND`, then `RIG_EDITOR` and `EDITOR` through the
    /// table, then vim. Names missing from the table are reported and skipped.
    #[must_use]
    pub fn resolve(config: &RigConfig) -> (Self, Vec<EditorWarning>) {
        let mut warnings = Vec::new();

        if let Some(command) = &config.edit_command {
            warnings.extend(
                template::unknown_placeholders(command, &[FILENAME, LINE_NUMBER, COLUMN_NUMBER])
                    .into_iter()
                    .map(|name| EditorWarning::UnknownPlaceholder(name.to_string())),
            );
            if has_unquoted_filename(command) {
                warnings.push(EditorWarning::UnquotedFilename);
            }
            return (Self::new(command.clone(), EditorSource::Override), warnings);
        }

        let candidates = [
            (config::EDITOR_ENV, config.editor.as_deref()),
            ("EDITOR", config.editor_env.as_deref()),
        ];
        for (var, value) in candidates {
            let Some(value) = value else {
                continue;
            };
            if let Some(template) = lookup(value) {
                let source = if var == config::EDITOR_ENV {
                    EditorSource::Configured(value.to_string())
                } else {
                    EditorSource::Environment(value.to_string())
                };
                return (Self::new(template, source), warnings);
            }
            warnings.push(EditorWarning::UnknownEditor {
                var,
                value: value.to_string(),
            });
        }

        (Self::default(), warnings)
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub const fn source(&self) -> &EditorSource {
        &self.source
    }

    /// The command line opening `filename` at `line`:`column` (both 1-based)
    #[must_use]
    pub fn render(&self, filename: &str, line: u64, column: u64, dialect: ShellDialect) -> String {
        let filename = dialect.escape_double_quoted(filename);
        let line = line.to_string();
        let column = column.to_string();
        template::render(
            &self.template,
            &[
                (FILENAME, filename.as_str()),
                (LINE_NUMBER, line.as_str()),
                (COLUMN_NUMBER, column.as_str()),
            ],
        )
    }
}

impl Default for EditorCommand {
    fn default() -> Self {
        // EDITOR_DEFAULT is always in the table
        let template = lookup(config::EDITOR_DEFAULT).unwrap_or(EDITORS[EDITORS.len() - 1].1);
        Self::new(template, EditorSource::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(
        editor: Option<&str>,
        editor_env: Option<&str>,
        edit_command: Option<&str>,
    ) -> RigConfig {
        RigConfig {
            editor: editor.map(String::from),
            editor_env: editor_env.map(String::from),
            edit_command: edit_command.map(String::from),
            ..RigConfig::default()
        }
    }

    #[test]
    fn test_lookup_by_base_name() {
        assert_eq!(lookup("nvim"), lookup("/usr/local/bin/nvim"));
        assert!(lookup("nvim").unwrap().starts_with("nvim "));
        assert!(lookup("notepad").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_every_template_names_the_file() {
        for (name, body) in EDITORS {
            assert!(
                body.contains("{filename}"),
                "{name} has no filename placeholder"
            );
            let known = [FILENAME, LINE_NUMBER, COLUMN_NUMBER];
            assert!(template::unknown_placeholders(body, &known).is_empty());
        }
    }

    #[test]
    fn test_default_is_vim() {
        let (command, warnings) = EditorCommand::resolve(&RigConfig::default());
        assert!(warnings.is_empty());
        assert_eq!(command.source(), &EditorSource::Default);
        assert_eq!(command.template(), lookup("vim").unwrap());
    }

    #[test]
    fn test_override_wins() {
        let config = config_with(
            Some("nano"),
            Some("hx"),
            Some(r#"kak +{lineNumber} "{filename}""#),
        );
        let (command, warnings) = EditorCommand::resolve(&config);
        assert!(warnings.is_empty());
        assert_eq!(command.source(), &EditorSource::Override);
        assert_eq!(command.template(), r#"kak +{lineNumber} "{filename}""#);
    }

    #[test]
    fn test_override_with_unknown_placeholder_warns() {
        let config = config_with(None, None, Some(r#"kak +{line} "{filename}""#));
        let (_, warnings) = EditorCommand::resolve(&config);
        assert_eq!(
            warnings,
            vec![EditorWarning::UnknownPlaceholder("line".into())]
        );
    }

    #[test]
    fn test_override_with_bare_filename_warns() {
        let config = config_with(None, None, Some("kak +{lineNumber} {filename}"));
        let (command, warnings) = EditorCommand::resolve(&config);
        assert_eq!(warnings, vec![EditorWarning::UnquotedFilename]);

        // The split is visible in the rendered command
        let rendered = command.render("/tmp/my notes.txt", 2, 1, ShellDialect::Bash);
        assert_eq!(rendered, "kak +2 /tmp/my notes.txt");
    }

    #[test]
    fn test_unquoted_filename_detection() {
        assert!(has_unquoted_filename("ed {filename}"));
        assert!(has_unquoted_filename(r#"ed "{lineNumber}" {filename}"#));
        assert!(has_unquoted_filename(r#"ed \"{filename}\""#));
        assert!(!has_unquoted_filename(r#"ed "{filename}""#));
        assert!(!has_unquoted_filename(r#"code --goto "{filename}:{lineNumber}""#));
        assert!(!has_unquoted_filename(r#"emacs --file="{filename}""#));
        for (_, body) in EDITORS {
            assert!(!has_unquoted_filename(body));
        }
    }

    #[test]
    fn test_configured_editor_before_environment() {
        let config = config_with(Some("/usr/bin/micro"), Some("hx"), None);
        let (command, _) = EditorCommand::resolve(&config);
        assert_eq!(
            command.source(),
            &EditorSource::Configured("/usr/bin/micro".into())
        );
        assert_eq!(command.template(), lookup("micro").unwrap());
    }

    #[test]
    fn test_unknown_configured_editor_falls_back_to_environment() {
        let config = config_with(Some("gedit"), Some("code"), None);
        let (command, warnings) = EditorCommand::resolve(&config);
        assert_eq!(command.source(), &EditorSource::Environment("code".into()));
        assert_eq!(
            warnings,
            vec![EditorWarning::UnknownEditor {
                var: "RIG_EDITOR",
                value: "gedit".into()
            }]
        );
    }

    #[test]
    fn test_unknown_everything_falls_back_to_default() {
        let config = config_with(Some("gedit"), Some("kate"), None);
        let (command, warnings) = EditorCommand::resolve(&config);
        assert_eq!(command, EditorCommand::default());
        assert_eq!(warnings.len(), 2);
        assert_eq!(
            warnings[1].to_string(),
            "Unknown value 'kate' for EDITOR. To use kate, please configure it using RIG_EDIT_COMMAND instead."
        );
    }

    #[test]
    fn test_render_vim() {
        let command = EditorCommand::default();
        let rendered = command.render("/tmp/a.txt", 3, 6, ShellDialect::Bash);
        assert_eq!(rendered, r#"vim -c "call cursor(3, 6)" "/tmp/a.txt""#);
    }

    #[test]
    fn test_render_escapes_filename() {
        let command = EditorCommand::new(r#"ed "{filename}""#, EditorSource::Override);
        let rendered = command.render("/tmp/$HOME\"x", 1, 1, ShellDialect::Bash);
        assert_eq!(rendered, r#"ed "/tmp/\$HOME\"x""#);
    }
}
