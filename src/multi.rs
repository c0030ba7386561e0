//! Comma-joined multi-value fields (hosts, platforms): parsing, joining and
//! toggling of the token lists the backend stores as single strings.

/// The two grid columns backed by token lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiField {
    Host,
    Platform,
}

impl MultiField {
    pub fn label(self) -> &'static str {
        match self {
            MultiField::Host => "主播",
            MultiField::Platform => "发布平台",
        }
    }
}

/// Splits on both ASCII and full-width commas, trims, drops empties.
pub fn split_tokens(raw: &str) -> Vec<String> {
    raw.split([',', '，'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn join_tokens(tokens: &[String]) -> String {
    tokens.join(", ")
}

pub fn has_token(raw: &str, value: &str) -> bool {
    split_tokens(raw).iter().any(|token| token == value)
}

/// Adds `value` to the token list if absent, removes it if present, and
/// rewrites the list as a consistently ", "-joined string.
pub fn toggle_token(raw: &str, value: &str) -> String {
    let mut tokens = split_tokens(raw);
    if let Some(pos) = tokens.iter().position(|token| token == value) {
        tokens.remove(pos);
    } else {
        tokens.push(value.to_owned());
    }
    join_tokens(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_handles_both_comma_kinds() {
        assert_eq!(split_tokens("Alice, Bob，Carol"), ["Alice", "Bob", "Carol"]);
        assert_eq!(split_tokens("  , ,，"), Vec::<String>::new());
        assert_eq!(split_tokens(""), Vec::<String>::new());
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let with_carol = toggle_token("Alice, Bob", "Carol");
        assert_eq!(with_carol, "Alice, Bob, Carol");
        let without_bob = toggle_token(&with_carol, "Bob");
        assert_eq!(without_bob, "Alice, Carol");
    }

    #[test]
    fn test_double_toggle_restores_token_set() {
        let original = "抖音, 视频号";
        let once = toggle_token(original, "B站");
        let twice = toggle_token(&once, "B站");
        let mut before = split_tokens(original);
        let mut after = split_tokens(&twice);
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_toggle_normalizes_join() {
        assert_eq!(toggle_token("Alice，  Bob ,", "Dora"), "Alice, Bob, Dora");
    }

    #[test]
    fn test_has_token_matches_whole_tokens_only() {
        assert!(has_token("Alice, Bob", "Bob"));
        assert!(!has_token("Alice, Bobby", "Bob"));
    }
}
