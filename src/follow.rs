use std::collections::HashSet;

use crate::first::FirstSets;
use crate::grammar::{Grammar, EOS_IDX, EPSILON_IDX};
use crate::symbol::SymbolIdx;

/// FOLLOW(A) for every nonterminal of a grammar.
///
/// Computed by fixpoint iteration: every rule is rescanned until a full
/// pass changes no set. A single ordered pass is not enough, FOLLOW sets of
/// mutually dependent nonterminals feed each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowSets {
    sets: Vec<HashSet<SymbolIdx>>,
}

impl FollowSets {
    pub fn build(grammar: &Grammar, first: &FirstSets) -> Self {
        let mut sets: Vec<HashSet<SymbolIdx>> = vec![HashSet::new(); grammar.symbol_count()];
        sets[grammar.start_idx()].insert(EOS_IDX);

        let mut changed = true;
        while changed {
            changed = false;
            for def in grammar.rule_defs() {
                for (i, &sym) in def.rhs.iter().enumerate() {
                    if !grammar.sym(sym).is_non_terminal() {
                        continue;
                    }

                    // B -> α A β: FIRST(β) \ {ε} ⊆ FOLLOW(A).
                    let beta = &def.rhs[i + 1..];
                    for t in first
                        .first_of_seq(beta)
                        .into_iter()
                        .filter(|&t| t != EPSILON_IDX)
                    {
                        changed |= sets[sym].insert(t);
                    }

                    // β empty or nullable: FOLLOW(B) ⊆ FOLLOW(A).
                    if first.is_nullable_seq(beta) {
                        let inherited: Vec<SymbolIdx> = sets[def.lhs].iter().copied().collect();
                        for t in inherited {
                            changed |= sets[sym].insert(t);
                        }
                    }
                }
            }
        }

        Self { sets }
    }

    /// FOLLOW(A); meaningful for nonterminals only.
    pub fn follow(&self, idx: SymbolIdx) -> &HashSet<SymbolIdx> {
        &self.sets[idx]
    }
}
