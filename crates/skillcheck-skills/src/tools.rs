//! `allowed-tools` tokenizer.
//!
//! The field comes in two conventions: Claude Code writes
//! `Read, Grep, Glob` while the Agent Skills format writes `Read Grep Glob`.
//! [`Convention::detect`] picks one per input and [`tokenize`] splits with
//! it, never breaking inside `()`, `[]` or `{}` groups.

use std::fmt;

/// Delimiter convention of an `allowed-tools` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// `Read, Grep, Glob`
    Comma,
    /// `Read Grep Glob`
    Space,
}

impl Convention {
    /// Detect the convention used by `raw`.
    ///
    /// Comma-delimited iff the string contains `", "` or ends with a comma.
    pub fn detect(raw: &str) -> Self {
        if raw.contains(", ") || raw.trim_end().ends_with(',') {
            Convention::Comma
        } else {
            Convention::Space
        }
    }

    fn is_separator(self, c: char) -> bool {
        match self {
            Convention::Comma => c == ',',
            Convention::Space => c == ' ' || c == '\t',
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Convention::Comma => write!(f, "comma-separated"),
            Convention::Space => write!(f, "space-separated"),
        }
    }
}

/// Split `raw` into tool identifiers using its detected convention.
pub fn tokenize(raw: &str) -> Vec<String> {
    tokenize_with(raw, Convention::detect(raw))
}

/// Split `raw` into tool identifiers using an explicit convention.
pub fn tokenize_with(raw: &str, convention: Convention) -> Vec<String> {
    let mut tools = Vec::new();
    let mut current = String::new();
    let mut grouped = false;

    for c in raw.chars() {
        match c {
            '(' | '[' | '{' => {
                grouped = true;
                current.push(c);
            }
            ')' | ']' | '}' => {
                grouped = false;
                current.push(c);
            }
            c if !grouped && convention.is_separator(c) => {
                push_token(&mut tools, &mut current, convention);
            }
            c => current.push(c),
        }
    }
    push_token(&mut tools, &mut current, convention);

    tools
}

fn push_token(tools: &mut Vec<String>, current: &mut String, convention: Convention) {
    let token = std::mem::take(current);
    let token = match convention {
        Convention::Comma => token.trim().to_string(),
        Convention::Space => token,
    };
    if !token.is_empty() {
        tools.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_detect() {
        assert_eq!(Convention::detect("Read, Grep"), Convention::Comma);
        assert_eq!(Convention::detect("Read,"), Convention::Comma);
        assert_eq!(Convention::detect("Read Grep"), Convention::Space);
        assert_eq!(Convention::detect("Read"), Convention::Space);
        assert_eq!(Convention::detect("Read,Grep"), Convention::Space);
    }

    #[test]
    fn test_space_mode_groups() {
        assert_eq!(
            tokenize("Bash(git:*) Bash(jq:*) Read"),
            vec!["Bash(git:*)", "Bash(jq:*)", "Read"]
        );
        assert_eq!(tokenize("Bash(ls -la) Read"), vec!["Bash(ls -la)", "Read"]);
        assert_eq!(tokenize("Read\t Write  "), vec!["Read", "Write"]);
    }

    #[test]
    fn test_comma_mode() {
        assert_eq!(tokenize("Read, Grep, Glob"), vec!["Read", "Grep", "Glob"]);
        assert_eq!(tokenize("Read,"), vec!["Read"]);
        assert_eq!(
            tokenize("Bash(git add, git commit), Read"),
            vec!["Bash(git add, git commit)", "Read"]
        );
        assert_eq!(tokenize("Read, , Grep"), vec!["Read", "Grep"]);
    }

    #[test]
    fn test_explicit_convention() {
        assert_eq!(
            tokenize_with("Read Grep", Convention::Comma),
            vec!["Read Grep"]
        );
        assert_eq!(
            tokenize_with("Read, Grep", Convention::Space),
            vec!["Read,", "Grep"]
        );
    }
}
