use regex::Regex;
use std::env;
use std::sync::OnceLock;

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

/// Expand environment variables in a string using ${VAR_NAME} syntax.
/// Unset variables are left as written.
pub fn expand_env_var_in_string(value: &str) -> String {
    env_var_pattern()
        .replace_all(value, |caps: &regex::Captures| {
            env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Interpret an environment flag the way the CLI documents it.
pub fn parse_bool_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_set_variables_and_keeps_unset() {
        env::set_var("AI_ASSISTANT_TEST_DIR", "/srv/projects");
        let expanded = expand_env_var_in_string("${AI_ASSISTANT_TEST_DIR}/x/${AI_ASSISTANT_UNSET_VAR}");
        assert_eq!(expanded, "/srv/projects/x/${AI_ASSISTANT_UNSET_VAR}");
    }

    #[test]
    fn bool_flags() {
        assert!(parse_bool_flag("TRUE"));
        assert!(parse_bool_flag("1"));
        assert!(parse_bool_flag("yes"));
        assert!(!parse_bool_flag("no"));
        assert!(!parse_bool_flag(""));
    }
}
