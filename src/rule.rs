use itertools::Itertools;

use crate::symbol::{Symbol, SymbolIdx};

/// The rule's identifier in the grammar.
pub type RuleId = usize;

/// Storage record of a rule, indices into the grammar's intern table.
///
/// The grammar materializes [`Rule`] views out of these on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuleDef {
    pub lhs: SymbolIdx,
    pub rhs: Vec<SymbolIdx>,
}

/// A grammar rule, with resolved symbol views.
///
/// # Example
/// `(1) X -> plus T X`
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Rule<'g> {
    pub id: RuleId,
    pub lhs: Symbol<'g>,
    pub rhs: Vec<Symbol<'g>>,
}

impl std::fmt::Display for Rule<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}) {}", self.id, self.expansion())
    }
}

impl Rule<'_> {
    /// Renders the rule as `LHS -> rhs…`, without the rule id.
    ///
    /// This is the label format of internal derivation-tree nodes.
    pub fn expansion(&self) -> String {
        format!(
            "{} -> {}",
            self.lhs,
            self.rhs.iter().map(|s| s.id).join(" ")
        )
    }
}
