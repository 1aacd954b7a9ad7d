use std::time::Duration;

use serde::Deserialize;

/// Cross-origin policy for the browser frontend
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins (`"*"` or a list)
    #[serde(default)]
    pub origins: AnyOrArray,
    /// Allowed methods (`"*"` or a list)
    #[serde(default)]
    pub methods: AnyOrArray,
    /// Allowed request headers (`"*"` or a list)
    #[serde(default)]
    pub headers: AnyOrArray,
    /// Allow cookies and auth headers
    #[serde(default)]
    pub credentials: bool,
    /// Preflight cache lifetime in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl CorsConfig {
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

/// Either the `"*"` wildcard or an explicit list
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawAnyOrArray")]
pub enum AnyOrArray {
    #[default]
    Any,
    List(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnyOrArray {
    One(String),
    Many(Vec<String>),
}

impl From<RawAnyOrArray> for AnyOrArray {
    fn from(raw: RawAnyOrArray) -> Self {
        let values = match raw {
            RawAnyOrArray::One(value) => vec![value],
            RawAnyOrArray::Many(values) => values,
        };

        if values.iter().any(|v| v == "*") {
            Self::Any
        } else {
            Self::List(values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_string_means_any() {
        let config: CorsConfig = toml::from_str("origins = \"*\"").unwrap();
        assert_eq!(config.origins, AnyOrArray::Any);
    }

    #[test]
    fn wildcard_inside_list_means_any() {
        let config: CorsConfig = toml::from_str("origins = [\"http://localhost:5173\", \"*\"]").unwrap();
        assert_eq!(config.origins, AnyOrArray::Any);
    }

    #[test]
    fn explicit_origins_are_kept() {
        let config: CorsConfig = toml::from_str(
            r#"
            origins = ["http://localhost:5173"]
            methods = ["GET", "POST"]
            max_age = 600
            "#,
        )
        .unwrap();

        assert_eq!(config.origins, AnyOrArray::List(vec!["http://localhost:5173".to_owned()]));
        assert_eq!(config.methods, AnyOrArray::List(vec!["GET".to_owned(), "POST".to_owned()]));
        assert_eq!(config.max_age_duration(), Some(Duration::from_secs(600)));
    }
}
