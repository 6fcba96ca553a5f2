//! `${ENV_VAR}` indirection strings.
//!
//! Provider blocks never carry the raw secret. They point at an entry of the
//! config's `env` section, which the gateway expands when it loads the file.

/// Build the reference string the gateway expands to the value of `name`.
pub fn env_reference(name: &str) -> String {
    format!("${{{name}}}")
}

/// Extract the variable name from a value of the exact form `${NAME}`.
///
/// Returns `None` for literals, partial placeholders, and strings that embed
/// a placeholder inside other text.
pub fn parse_env_reference(value: &str) -> Option<&str> {
    let name = value.strip_prefix("${")?.strip_suffix('}')?;
    if name.is_empty() || name.contains(['{', '}', '$']) {
        return None;
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_reference() {
        assert_eq!(env_reference("OPENAI_API_KEY"), "${OPENAI_API_KEY}");
    }

    #[test]
    fn parses_own_output() {
        let reference = env_reference("DEEPSEEK_API_KEY");
        assert_eq!(parse_env_reference(&reference), Some("DEEPSEEK_API_KEY"));
    }

    #[test]
    fn rejects_literals_and_malformed() {
        assert_eq!(parse_env_reference("sk-test123"), None);
        assert_eq!(parse_env_reference("${}"), None);
        assert_eq!(parse_env_reference("${OPEN"), None);
        assert_eq!(parse_env_reference("Bearer ${TOKEN}"), None);
        assert_eq!(parse_env_reference("${A}${B}"), None);
    }
}
