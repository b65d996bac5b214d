/// Replace `${ENV_VAR}` placeholders in config string values.
///
/// Unresolvable variables are left as-is.
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// Replace `${ENV_VAR}` placeholders using a custom lookup function.
fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unterminated placeholder, emit the remainder verbatim.
            result.push_str(&rest[start..]);
            return result;
        };

        let name = &after[..end];
        match lookup(name).filter(|_| !name.is_empty()) {
            Some(value) => result.push_str(&value),
            None => {
                result.push_str("${");
                result.push_str(name);
                result.push('}');
            },
        }
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "PLUGDEX_TEST_TOKEN" => Some("ghp_secret".to_string()),
            _ => None,
        }
    }

    #[test]
    fn substitutes_known_var() {
        assert_eq!(
            substitute_env_with("token = \"${PLUGDEX_TEST_TOKEN}\"", lookup),
            "token = \"ghp_secret\""
        );
    }

    #[test]
    fn leaves_unknown_and_empty_placeholders() {
        assert_eq!(
            substitute_env_with("${PLUGDEX_NOPE} ${}", lookup),
            "${PLUGDEX_NOPE} ${}"
        );
    }

    #[test]
    fn keeps_unterminated_placeholder() {
        assert_eq!(substitute_env_with("a ${OPEN", lookup), "a ${OPEN");
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_env("plain text"), "plain text");
    }
}
