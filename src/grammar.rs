use crate::error::ErrorKind;
use crate::rule::{Rule, RuleDef, RuleId};
use crate::symbol::{Symbol, SymbolIdx, SymbolKind, EOS, EPSILON};
use crate::LlResult;

pub(crate) const EPSILON_IDX: SymbolIdx = 0;
pub(crate) const EOS_IDX: SymbolIdx = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SymbolDef {
    id: String,
    kind: SymbolKind,
}

/// An in-memory grammar: interned symbols plus an ordered rule list.
///
/// The rule list is a genuine multi-map: a nonterminal keeps *all* of its
/// alternatives, in declaration order, even when several share a leading
/// symbol. Conflicts are only diagnosed at table-construction time, where
/// they can be reported precisely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    symbols: Vec<SymbolDef>,
    rules: Vec<RuleDef>,
    start: SymbolIdx,
}

impl Grammar {
    /// Parses the line-based grammar format.
    ///
    /// One declaration per line, `LHS -> ALT | ALT …`; symbols within an
    /// alternative are whitespace-separated; nonterminals are all-uppercase
    /// tokens; `ε` denotes an explicitly empty alternative. The first
    /// declared LHS becomes the start symbol. Blank lines are skipped.
    pub fn parse(text: &str) -> LlResult<Self> {
        let mut symbols = vec![
            SymbolDef {
                id: EPSILON.to_string(),
                kind: SymbolKind::Epsilon,
            },
            SymbolDef {
                id: EOS.to_string(),
                kind: SymbolKind::Eos,
            },
        ];
        let mut rules: Vec<RuleDef> = Vec::new();
        let mut start: Option<SymbolIdx> = None;

        let intern = |symbols: &mut Vec<SymbolDef>, id: &str| -> SymbolIdx {
            match symbols.iter().position(|def| def.id == id) {
                Some(idx) => idx,
                None => {
                    symbols.push(SymbolDef {
                        id: id.to_string(),
                        kind: SymbolKind::classify(id),
                    });
                    symbols.len() - 1
                }
            }
        };

        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }

            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() != 2 {
                return Err(ErrorKind::MalformedRule {
                    line: line_no,
                    reason: "expected exactly one '->'".to_string(),
                }
                .into());
            }

            let lhs_str = parts[0].trim();
            if lhs_str.split_whitespace().count() != 1 {
                return Err(ErrorKind::MalformedRule {
                    line: line_no,
                    reason: "left-hand side must be a single symbol".to_string(),
                }
                .into());
            }
            if SymbolKind::classify(lhs_str) != SymbolKind::NonTerminal {
                return Err(ErrorKind::MalformedRule {
                    line: line_no,
                    reason: format!("left-hand side '{lhs_str}' is not a nonterminal"),
                }
                .into());
            }
            let lhs = intern(&mut symbols, lhs_str);
            start.get_or_insert(lhs);

            for alt in parts[1].split('|') {
                let tokens: Vec<&str> = alt.split_whitespace().collect();
                if tokens.is_empty() {
                    return Err(ErrorKind::MalformedRule {
                        line: line_no,
                        reason: format!("empty alternative, use '{EPSILON}' to derive nothing"),
                    }
                    .into());
                }
                if tokens.contains(&EOS) {
                    return Err(ErrorKind::MalformedRule {
                        line: line_no,
                        reason: format!("'{EOS}' is reserved for end of input"),
                    }
                    .into());
                }

                let mut rhs: Vec<SymbolIdx> =
                    tokens.iter().map(|&tok| intern(&mut symbols, tok)).collect();
                // ε in a longer sequence derives nothing, keep it only as
                // the sole member of an empty alternative.
                if rhs.len() > 1 {
                    rhs.retain(|&s| s != EPSILON_IDX);
                    if rhs.is_empty() {
                        rhs.push(EPSILON_IDX);
                    }
                }

                rules.push(RuleDef { lhs, rhs });
            }
        }

        let start = start.ok_or_else(|| ErrorKind::MalformedRule {
            line: 0,
            reason: "grammar declares no rules".to_string(),
        })?;

        Ok(Self {
            symbols,
            rules,
            start,
        })
    }

    pub(crate) fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub(crate) fn rule_defs(&self) -> &[RuleDef] {
        &self.rules
    }

    pub(crate) fn start_idx(&self) -> SymbolIdx {
        self.start
    }

    /// Resolves a symbol name to its index in the intern table.
    pub fn symbol_index(&self, id: &str) -> Option<SymbolIdx> {
        self.symbols.iter().position(|def| def.id == id)
    }

    /// Returns the symbol view at the given index.
    pub fn sym(&self, idx: SymbolIdx) -> Symbol<'_> {
        let def = &self.symbols[idx];
        Symbol::new(&def.id, def.kind)
    }

    /// The designated start symbol (LHS of the first declared rule).
    pub fn start(&self) -> Symbol<'_> {
        self.sym(self.start)
    }

    /// Materializes the rule with the given id.
    pub fn rule(&self, id: RuleId) -> Rule<'_> {
        let def = &self.rules[id];
        Rule {
            id,
            lhs: self.sym(def.lhs),
            rhs: def.rhs.iter().map(|&s| self.sym(s)).collect(),
        }
    }

    /// Iterates over all rules, in declaration order.
    pub fn iter_rules(&self) -> impl Iterator<Item = Rule<'_>> {
        (0..self.rules.len()).map(|id| self.rule(id))
    }

    /// Iterates over the alternatives of one nonterminal, in declaration
    /// order.
    pub fn rules_of(&self, lhs: SymbolIdx) -> impl Iterator<Item = Rule<'_>> {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, def)| def.lhs == lhs)
            .map(|(id, _)| self.rule(id))
    }

    pub fn iter_terminals(&self) -> impl Iterator<Item = Symbol<'_>> {
        (0..self.symbols.len())
            .map(|idx| self.sym(idx))
            .filter(|sym| sym.is_terminal())
    }

    pub fn iter_non_terminals(&self) -> impl Iterator<Item = Symbol<'_>> {
        (0..self.symbols.len())
            .map(|idx| self.sym(idx))
            .filter(|sym| sym.is_non_terminal())
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{expr_grammar, EXPR_GRAMMAR};
    use crate::{ErrorKind, Grammar};

    #[test]
    fn test_parse_expr_grammar() {
        let grammar = Grammar::parse(EXPR_GRAMMAR).unwrap();

        assert_eq!(grammar.start().id, "E");
        assert_eq!(grammar.iter_rules().count(), 4);

        let terminals: Vec<_> = grammar.iter_terminals().map(|s| s.id.to_string()).collect();
        assert_eq!(terminals, vec!["plus", "id"]);

        let non_terminals: Vec<_> = grammar
            .iter_non_terminals()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(non_terminals, vec!["E", "T", "X"]);
    }

    #[test]
    fn test_alternatives_with_shared_leading_symbol_are_all_kept() {
        let grammar = Grammar::parse("A -> a | a b").unwrap();
        let a = grammar.symbol_index("A").unwrap();

        let alternatives: Vec<String> =
            grammar.rules_of(a).map(|rule| rule.expansion()).collect();
        assert_eq!(alternatives, vec!["A -> a", "A -> a b"]);
    }

    #[test]
    fn test_epsilon_alternative() {
        let grammar = Grammar::parse("S -> a S | ε").unwrap();
        let rule = grammar.rule(1);
        assert_eq!(rule.rhs.len(), 1);
        assert!(rule.rhs[0].is_epsilon());
    }

    #[test]
    fn test_missing_arrow_is_a_load_error() {
        let err = Grammar::parse("S a b").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::MalformedRule { line: 1, .. }
        ));
    }

    #[test]
    fn test_two_arrows_is_a_load_error() {
        let err = Grammar::parse("S -> a -> b").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::MalformedRule { line: 1, .. }
        ));
    }

    #[test]
    fn test_empty_alternative_is_a_load_error() {
        let err = Grammar::parse("S -> a | ").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::MalformedRule { line: 1, .. }
        ));
    }

    #[test]
    fn test_end_marker_is_rejected_in_rules() {
        let err = Grammar::parse("S -> a $").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::MalformedRule { line: 1, .. }
        ));
    }

    #[test]
    fn test_lowercase_lhs_is_a_load_error() {
        let err = Grammar::parse("s -> a").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::MalformedRule { line: 1, .. }
        ));
    }

    #[test]
    fn test_empty_grammar_is_a_load_error() {
        let err = Grammar::parse("  \n  ").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MalformedRule { .. }));
    }

    #[test]
    fn test_terminals_are_registered_once() {
        let grammar = expr_grammar();
        assert_eq!(
            grammar.iter_terminals().filter(|sym| sym.id == "id").count(),
            1
        );
    }
}
