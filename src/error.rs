use itertools::Itertools as _;
use thiserror::Error;

/// A display helper for acceptable-lookahead lists in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedTokens(Vec<String>);

impl ExpectedTokens {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let mut tokens: Vec<String> = tokens.into_iter().map(|t| t.to_string()).collect();
        tokens.sort();
        Self(tokens)
    }
}

impl std::fmt::Display for ExpectedTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().join(", ").fmt(f)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A grammar line could not be split into LHS/RHS, or an alternative
    /// was empty without the ε marker.
    #[error("line {line}: {reason}")]
    MalformedRule { line: usize, reason: String },

    /// FIRST of the symbol transitively depends on itself, typically
    /// unremoved left recursion.
    #[error("FIRST({0}) depends on itself, the grammar is left-recursive")]
    Cycle(String),

    /// Two rules claim the same parse-table cell: the grammar is not LL(1).
    #[error("parse-table conflict at ({nonterminal}, {lookahead}): {first_rule} vs {second_rule}")]
    Conflict {
        nonterminal: String,
        lookahead: String,
        first_rule: String,
        second_rule: String,
    },

    /// The terminal on top of the stack disagrees with the current token.
    #[error("unexpected token '{got}', expecting '{expected}'")]
    TokenMismatch { expected: String, got: String },

    /// No table entry for the current (nonterminal, token) pair.
    #[error("no rule for ({nonterminal}, '{got}'), acceptable lookaheads: {expected}")]
    NoRule {
        nonterminal: String,
        got: String,
        expected: ExpectedTokens,
    },

    /// The stack emptied before the input was exhausted, or vice versa.
    #[error("parsing incomplete: {0}")]
    Incomplete(String),
}

/// An error produced while building or driving the parser.
///
/// Parse errors carry the index of the input token the parser was looking
/// at; construction errors carry no position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct LlError {
    kind: ErrorKind,
    at: Option<usize>,
}

impl LlError {
    pub fn new(kind: ErrorKind, at: Option<usize>) -> Self {
        Self { kind, at }
    }

    pub(crate) fn at(kind: ErrorKind, at: usize) -> Self {
        Self::new(kind, Some(at))
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Token index the parser was looking at, for parse errors.
    pub fn position(&self) -> Option<usize> {
        self.at
    }
}

impl From<ErrorKind> for LlError {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, at: None }
    }
}

impl std::fmt::Display for LlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.at {
            Some(at) => write!(f, "token {}: {}", at, self.kind),
            None => self.kind.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_tokens_are_sorted_and_joined() {
        let expected = ExpectedTokens::new(["plus", "$", "id"]);
        assert_eq!(expected.to_string(), "$, id, plus");
    }

    #[test]
    fn test_parse_error_display_carries_position() {
        let err = LlError::at(
            ErrorKind::TokenMismatch {
                expected: "id".to_string(),
                got: "plus".to_string(),
            },
            2,
        );
        assert_eq!(
            err.to_string(),
            "token 2: unexpected token 'plus', expecting 'id'"
        );
    }
}
