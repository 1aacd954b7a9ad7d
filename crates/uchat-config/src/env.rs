use std::sync::LazyLock;

use regex::{Captures, Regex};

// `{{ env.NAME }}` or `{{ env.NAME | default("value") }}`
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
        .expect("placeholder pattern must compile")
});

/// Expand `{{ env.VAR }}` placeholders in raw config text
///
/// A placeholder may carry a fallback, `{{ env.VAR | default("x") }}`, used
/// when the variable is unset. Lines whose first non-blank character is `#`
/// are copied verbatim so commented-out secrets never need to resolve.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut lines = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_owned());
        } else {
            lines.push(expand_line(line)?);
        }
    }

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line(line: &str) -> Result<String, String> {
    let mut expanded = String::with_capacity(line.len());
    let mut cursor = 0;

    for captures in PLACEHOLDER_RE.captures_iter(line) {
        let Some(whole) = captures.get(0) else {
            continue;
        };

        expanded.push_str(&line[cursor..whole.start()]);
        expanded.push_str(&resolve(&captures)?);
        cursor = whole.end();
    }

    expanded.push_str(&line[cursor..]);
    Ok(expanded)
}

fn resolve(captures: &Captures<'_>) -> Result<String, String> {
    let key = captures.get(1).map_or("", |m| m.as_str());
    let fallback = captures.get(2).map(|m| m.as_str());

    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(var_name), fallback) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{var_name}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "listen_address = \"0.0.0.0:8000\"\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn expands_api_key() {
        temp_env::with_var("UCHAT_TEST_OPENAI_KEY", Some("sk-abc"), || {
            let result = expand_env("api_key = \"{{ env.UCHAT_TEST_OPENAI_KEY }}\"").unwrap();
            assert_eq!(result, "api_key = \"sk-abc\"");
        });
    }

    #[test]
    fn expands_several_variables_across_lines() {
        let vars = [("UCHAT_TEST_SERP", Some("serp")), ("UCHAT_TEST_WEATHER", Some("owm"))];
        temp_env::with_vars(vars, || {
            let input = "a = \"{{ env.UCHAT_TEST_SERP }}\"\nb = \"{{env.UCHAT_TEST_WEATHER}}\"";
            assert_eq!(expand_env(input).unwrap(), "a = \"serp\"\nb = \"owm\"");
        });
    }

    #[test]
    fn missing_variable_is_an_error() {
        temp_env::with_var_unset("UCHAT_TEST_UNSET", || {
            let err = expand_env("key = \"{{ env.UCHAT_TEST_UNSET }}\"").unwrap_err();
            assert!(err.contains("UCHAT_TEST_UNSET"));
        });
    }

    #[test]
    fn non_env_scope_is_rejected() {
        let err = expand_env("key = \"{{ vault.SECRET }}\"").unwrap_err();
        assert!(err.contains("only variables scoped with 'env.'"));
    }

    #[test]
    fn comment_lines_are_not_expanded() {
        temp_env::with_var_unset("UCHAT_TEST_UNSET", || {
            let input = "  # api_key = \"{{ env.UCHAT_TEST_UNSET }}\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }

    #[test]
    fn default_applies_only_when_unset() {
        temp_env::with_var_unset("UCHAT_TEST_UNSET", || {
            let result = expand_env("key = \"{{ env.UCHAT_TEST_UNSET | default(\"India\") }}\"").unwrap();
            assert_eq!(result, "key = \"India\"");
        });

        temp_env::with_var("UCHAT_TEST_SET", Some("Kerala"), || {
            let result = expand_env("key = \"{{ env.UCHAT_TEST_SET | default(\"India\") }}\"").unwrap();
            assert_eq!(result, "key = \"Kerala\"");
        });
    }

    #[test]
    fn empty_default_is_allowed() {
        temp_env::with_var_unset("UCHAT_TEST_UNSET", || {
            let result = expand_env("key = \"{{ env.UCHAT_TEST_UNSET | default(\"\") }}\"").unwrap();
            assert_eq!(result, "key = \"\"");
        });
    }
}
