use std::collections::HashSet;

use crate::error::ErrorKind;
use crate::grammar::{Grammar, EPSILON_IDX};
use crate::symbol::SymbolIdx;
use crate::LlResult;

/// FIRST(X) for every symbol of a grammar.
///
/// FIRST of a terminal is the terminal itself, FIRST(ε) = {ε}, and FIRST of
/// a nonterminal is the union over its alternatives of the FIRST of each
/// right-hand side. Sets are resolved once and memoized; they are a pure
/// function of the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstSets {
    sets: Vec<HashSet<SymbolIdx>>,
}

enum Slot {
    Pending,
    Visiting,
    Done(HashSet<SymbolIdx>),
}

impl FirstSets {
    /// Resolves FIRST for every symbol.
    ///
    /// A symbol whose FIRST transitively depends on itself (unremoved left
    /// recursion) is reported as [`ErrorKind::Cycle`] instead of recursing
    /// unboundedly.
    pub fn build(grammar: &Grammar) -> LlResult<Self> {
        let mut slots: Vec<Slot> = (0..grammar.symbol_count()).map(|_| Slot::Pending).collect();

        for idx in 0..grammar.symbol_count() {
            resolve(grammar, idx, &mut slots)?;
        }

        let sets = slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Done(set) => set,
                _ => HashSet::new(),
            })
            .collect();

        Ok(Self { sets })
    }

    /// FIRST(X) for a single symbol.
    pub fn first(&self, idx: SymbolIdx) -> &HashSet<SymbolIdx> {
        &self.sets[idx]
    }

    /// FIRST of a symbol sequence, scanning left to right and stopping at
    /// the first non-nullable member. The empty sequence yields {ε}.
    pub fn first_of_seq(&self, seq: &[SymbolIdx]) -> HashSet<SymbolIdx> {
        let mut set = HashSet::new();
        for &sym in seq {
            set.extend(self.sets[sym].iter().copied().filter(|&s| s != EPSILON_IDX));
            if !self.is_nullable(sym) {
                return set;
            }
        }
        set.insert(EPSILON_IDX);
        set
    }

    /// ε ∈ FIRST(X), i.e. X can derive the empty string.
    pub fn is_nullable(&self, idx: SymbolIdx) -> bool {
        self.sets[idx].contains(&EPSILON_IDX)
    }

    /// Every member of the sequence is nullable (trivially true when empty).
    pub fn is_nullable_seq(&self, seq: &[SymbolIdx]) -> bool {
        seq.iter().all(|&sym| self.is_nullable(sym))
    }
}

fn resolve(grammar: &Grammar, idx: SymbolIdx, slots: &mut Vec<Slot>) -> LlResult<()> {
    match slots[idx] {
        Slot::Done(_) => return Ok(()),
        Slot::Visiting => {
            return Err(ErrorKind::Cycle(grammar.sym(idx).id.to_string()).into());
        }
        Slot::Pending => {}
    }
    slots[idx] = Slot::Visiting;

    let mut set = HashSet::new();
    if grammar.sym(idx).is_non_terminal() {
        for def in grammar.rule_defs().iter().filter(|def| def.lhs == idx) {
            let mut all_nullable = true;
            for &sym in &def.rhs {
                resolve(grammar, sym, slots)?;
                let sym_first = match &slots[sym] {
                    Slot::Done(set) => set,
                    _ => unreachable!("resolve() always leaves a Done slot behind"),
                };
                set.extend(sym_first.iter().copied().filter(|&s| s != EPSILON_IDX));
                if !sym_first.contains(&EPSILON_IDX) {
                    all_nullable = false;
                    break;
                }
            }
            if all_nullable {
                set.insert(EPSILON_IDX);
            }
        }
    } else {
        // Terminals, ε and $ are their own FIRST.
        set.insert(idx);
    }

    slots[idx] = Slot::Done(set);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::fixtures::{expr_grammar, LEFT_RECURSIVE_GRAMMAR};
    use crate::symbol::EPSILON;
    use crate::{ErrorKind, FirstSets, Grammar};

    fn named(grammar: &Grammar, first: &FirstSets, sym: &str) -> HashSet<String> {
        first
            .first(grammar.symbol_index(sym).unwrap())
            .iter()
            .map(|&idx| grammar.sym(idx).id.to_string())
            .collect()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_expr_grammar_first_sets() {
        let grammar = expr_grammar();
        let first = FirstSets::build(&grammar).unwrap();

        assert_eq!(named(&grammar, &first, "E"), set(&["id"]));
        assert_eq!(named(&grammar, &first, "T"), set(&["id"]));
        assert_eq!(named(&grammar, &first, "X"), set(&["plus", EPSILON]));
        assert_eq!(named(&grammar, &first, "id"), set(&["id"]));
    }

    #[test]
    fn test_epsilon_in_first_iff_nullable() {
        let grammar = expr_grammar();
        let first = FirstSets::build(&grammar).unwrap();

        assert!(first.is_nullable(grammar.symbol_index("X").unwrap()));
        assert!(!first.is_nullable(grammar.symbol_index("E").unwrap()));
        assert!(!first.is_nullable(grammar.symbol_index("T").unwrap()));
        assert!(!first.is_nullable(grammar.symbol_index("id").unwrap()));
    }

    #[test]
    fn test_nullable_chain() {
        let grammar = Grammar::parse("S -> A B\nA -> ε\nB -> A | b").unwrap();
        let first = FirstSets::build(&grammar).unwrap();

        assert!(first.is_nullable(grammar.symbol_index("S").unwrap()));
        assert_eq!(named(&grammar, &first, "S"), set(&["b", EPSILON]));
    }

    #[test]
    fn test_first_of_sequence_stops_at_non_nullable() {
        let grammar = expr_grammar();
        let first = FirstSets::build(&grammar).unwrap();
        let x = grammar.symbol_index("X").unwrap();
        let t = grammar.symbol_index("T").unwrap();

        let seq_first = first.first_of_seq(&[x, t]);
        let names: HashSet<String> = seq_first
            .iter()
            .map(|&idx| grammar.sym(idx).id.to_string())
            .collect();
        // X is nullable so FIRST(T) shows through, but ε does not survive.
        assert_eq!(names, set(&["plus", "id"]));
    }

    #[test]
    fn test_empty_sequence_is_nullable() {
        let grammar = expr_grammar();
        let first = FirstSets::build(&grammar).unwrap();

        assert!(first.is_nullable_seq(&[]));
        assert_eq!(first.first_of_seq(&[]).len(), 1);
    }

    #[test]
    fn test_left_recursion_is_a_cycle_error() {
        let grammar = Grammar::parse(LEFT_RECURSIVE_GRAMMAR).unwrap();
        let err = FirstSets::build(&grammar).unwrap_err();

        assert_eq!(err.kind(), &ErrorKind::Cycle("A".to_string()));
    }

    #[test]
    fn test_indirect_left_recursion_is_a_cycle_error() {
        let grammar = Grammar::parse("A -> B a\nB -> A b | c").unwrap();
        let err = FirstSets::build(&grammar).unwrap_err();

        assert!(matches!(err.kind(), ErrorKind::Cycle(_)));
    }

    #[test]
    fn test_build_is_deterministic() {
        let grammar = expr_grammar();
        let first = FirstSets::build(&grammar).unwrap();
        let again = FirstSets::build(&grammar).unwrap();

        assert_eq!(first, again);
    }
}
