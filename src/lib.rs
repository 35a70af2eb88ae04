//! Builds and drives predictive LL(1) parsers.
//!
//! The pipeline runs strictly forward: a [`Grammar`] is loaded from its
//! line-based text format, [`FirstSets`] and [`FollowSets`] are derived
//! from it, the [`LlTable`] is filled from those (rejecting non-LL(1)
//! grammars), and the [`LlParser`] drives a token sequence through the
//! table into a [`DerivationTree`]. Every artifact is immutable once built
//! and reusable across arbitrarily many parses.

pub mod error;
pub mod first;
pub mod follow;
pub mod grammar;
pub mod parser;
pub mod rule;
pub mod symbol;
pub mod table;
pub mod tree;

pub use error::{ErrorKind, ExpectedTokens, LlError};
pub use first::FirstSets;
pub use follow::FollowSets;
pub use grammar::Grammar;
pub use parser::LlParser;
pub use rule::{Rule, RuleId};
pub use symbol::{Symbol, SymbolIdx, SymbolKind, EOS, EPSILON};
pub use table::LlTable;
pub use tree::{DerivationTree, NodeId};

pub type LlResult<T> = Result<T, LlError>;

#[cfg(test)]
pub mod fixtures {
    use crate::Grammar;

    pub const EXPR_GRAMMAR: &str = "E -> T X\nX -> plus T X | ε\nT -> id";
    pub const REPEAT_GRAMMAR: &str = "S -> a S | ε";
    pub const LEFT_RECURSIVE_GRAMMAR: &str = "A -> A a | b";

    pub fn expr_grammar() -> Grammar {
        Grammar::parse(EXPR_GRAMMAR).unwrap()
    }

    pub fn repeat_grammar() -> Grammar {
        Grammar::parse(REPEAT_GRAMMAR).unwrap()
    }

    #[test]
    fn test_fixtures_load() {
        expr_grammar();
        repeat_grammar();
        Grammar::parse(LEFT_RECURSIVE_GRAMMAR).unwrap();
    }
}
