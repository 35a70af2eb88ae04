use std::hash::Hash;

/// Index of a symbol in the grammar's intern table.
pub type SymbolIdx = usize;

/// The epsilon marker (ε), denoting an explicitly empty alternative.
pub const EPSILON: &str = "ε";

/// The end-of-input marker ($).
///
/// It is never a grammar symbol, but it appears in FOLLOW sets and
/// parse-table columns.
pub const EOS: &str = "$";

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
    Epsilon,
    Eos,
}

impl SymbolKind {
    /// Classifies a raw grammar token.
    ///
    /// A token composed entirely of uppercase letters is a nonterminal;
    /// `ε` and `$` are reserved; everything else is a terminal.
    pub fn classify(id: &str) -> Self {
        if id == EPSILON {
            SymbolKind::Epsilon
        } else if id == EOS {
            SymbolKind::Eos
        } else if !id.is_empty() && id.chars().all(|c| c.is_alphabetic() && c.is_uppercase()) {
            SymbolKind::NonTerminal
        } else {
            SymbolKind::Terminal
        }
    }
}

/// A symbol of the grammar, borrowed from its intern table.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct Symbol<'g> {
    /// *Unique* identifier of the symbol.
    pub id: &'g str,
    kind: SymbolKind,
}

impl std::fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<'g> Symbol<'g> {
    pub const fn new(id: &'g str, kind: SymbolKind) -> Self {
        Self { id, kind }
    }

    #[inline(always)]
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    #[inline(always)]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, SymbolKind::Terminal)
    }

    #[inline(always)]
    pub fn is_non_terminal(&self) -> bool {
        matches!(self.kind, SymbolKind::NonTerminal)
    }

    #[inline(always)]
    pub fn is_epsilon(&self) -> bool {
        matches!(self.kind, SymbolKind::Epsilon)
    }

    #[inline(always)]
    pub fn is_eos(&self) -> bool {
        matches!(self.kind, SymbolKind::Eos)
    }
}

impl Hash for Symbol<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
