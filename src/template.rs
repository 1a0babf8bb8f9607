//! Placeholder substitution for editor commands and shell snippets
//!
//! Placeholders are `{name}` where `name` is one of the supplied keys. Any
//! other brace sequence is copied through untouched, so shell text such as
//! `${HOME}` or `{1..3}` survives rendering. Substituted values are never
//! rescanned.

/// Render `template`, replacing each `{key}` with its value
#[must_use]
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });

        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Names of the placeholders in `template` that match none of `known`
///
/// Shell expansions (`${NAME}`) are not placeholders and are never reported.
#[must_use]
pub fn unknown_placeholders<'a>(template: &'a str, known: &[&str]) -> Vec<&'a str> {
    let mut unknown = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let key = &after[..close];
        let is_shell_expansion = rest[..open].ends_with('$');
        let is_identifier =
            !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if is_identifier && !is_shell_expansion && !known.contains(&key) {
            unknown.push(key);
        }
        rest = &after[close + 1..];
    }

    unknown
}
