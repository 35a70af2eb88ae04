use prettytable::Table as PtTable;
use std::collections::HashMap;

use crate::error::ErrorKind;
use crate::first::FirstSets;
use crate::follow::FollowSets;
use crate::grammar::{Grammar, EPSILON_IDX};
use crate::rule::{Rule, RuleId};
use crate::symbol::{Symbol, SymbolIdx, EOS};
use crate::LlResult;

/// The predictive parse table: a partial map from (nonterminal, lookahead)
/// to the unique rule to apply.
///
/// Construction fails on the first cell claimed by two different rules,
/// which is exactly the grammar not being LL(1). A built table never holds
/// an overwritten entry.
pub struct LlTable<'g> {
    grammar: &'g Grammar,
    cells: HashMap<(SymbolIdx, SymbolIdx), RuleId>,
}

impl<'g> LlTable<'g> {
    /// Builds the table from scratch: FIRST, then FOLLOW, then the fill
    /// pass. Construction errors leave no partial artifact behind.
    pub fn build(grammar: &'g Grammar) -> LlResult<Self> {
        let first = FirstSets::build(grammar)?;
        let follow = FollowSets::build(grammar, &first);
        Self::with_sets(grammar, &first, &follow)
    }

    /// Builds the table from already-computed FIRST and FOLLOW sets.
    pub fn with_sets(
        grammar: &'g Grammar,
        first: &FirstSets,
        follow: &FollowSets,
    ) -> LlResult<Self> {
        let mut cells = HashMap::new();

        for (id, def) in grammar.rule_defs().iter().enumerate() {
            let rhs_first = first.first_of_seq(&def.rhs);

            for &t in rhs_first.iter().filter(|&&t| t != EPSILON_IDX) {
                Self::claim(grammar, &mut cells, def.lhs, t, id)?;
            }

            // Nullable alternative: predicted on every lookahead that may
            // follow the nonterminal, $ included.
            if rhs_first.contains(&EPSILON_IDX) {
                for &t in follow.follow(def.lhs) {
                    Self::claim(grammar, &mut cells, def.lhs, t, id)?;
                }
            }
        }

        Ok(Self { grammar, cells })
    }

    fn claim(
        grammar: &Grammar,
        cells: &mut HashMap<(SymbolIdx, SymbolIdx), RuleId>,
        lhs: SymbolIdx,
        lookahead: SymbolIdx,
        rule: RuleId,
    ) -> LlResult<()> {
        if let Some(&prev) = cells.get(&(lhs, lookahead)) {
            if prev != rule {
                return Err(ErrorKind::Conflict {
                    nonterminal: grammar.sym(lhs).id.to_string(),
                    lookahead: grammar.sym(lookahead).id.to_string(),
                    first_rule: grammar.rule(prev).to_string(),
                    second_rule: grammar.rule(rule).to_string(),
                }
                .into());
            }
            return Ok(());
        }
        cells.insert((lhs, lookahead), rule);
        Ok(())
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// The rule id predicted for (nonterminal, lookahead), if any.
    pub fn rule_id_for(&self, lhs: SymbolIdx, lookahead: SymbolIdx) -> Option<RuleId> {
        self.cells.get(&(lhs, lookahead)).copied()
    }

    /// The rule predicted for (nonterminal, lookahead), if any.
    pub fn rule_for(&self, lhs: SymbolIdx, lookahead: SymbolIdx) -> Option<Rule<'g>> {
        self.rule_id_for(lhs, lookahead)
            .map(|id| self.grammar.rule(id))
    }

    /// Lookaheads for which the nonterminal has an entry, sorted by name.
    pub fn lookaheads(&self, lhs: SymbolIdx) -> Vec<Symbol<'g>> {
        let mut lookaheads: Vec<Symbol<'g>> = self
            .cells
            .keys()
            .filter(|(nt, _)| *nt == lhs)
            .map(|&(_, la)| self.grammar.sym(la))
            .collect();
        lookaheads.sort_by(|a, b| a.id.cmp(b.id));
        lookaheads
    }

    /// All entries as (nonterminal, lookahead, rule id), sorted.
    pub fn entries(&self) -> Vec<(SymbolIdx, SymbolIdx, RuleId)> {
        let mut entries: Vec<_> = self
            .cells
            .iter()
            .map(|(&(lhs, la), &rule)| (lhs, la, rule))
            .collect();
        entries.sort_unstable();
        entries
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl std::fmt::Debug for LlTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::fmt::Display for LlTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = PtTable::new();

        let columns: Vec<&str> = self
            .grammar
            .iter_terminals()
            .map(|sym| sym.id)
            .chain([EOS])
            .collect();

        table.add_row(
            [""].into_iter()
                .chain(columns.iter().copied())
                .collect(),
        );

        for lhs in (0..self.grammar.symbol_count())
            .filter(|&idx| self.grammar.sym(idx).is_non_terminal())
        {
            let nt = self.grammar.sym(lhs);
            table.add_row(
                [nt.id.to_string()]
                    .into_iter()
                    .chain(columns.iter().map(|col| {
                        self.grammar
                            .symbol_index(col)
                            .and_then(|la| self.rule_for(lhs, la))
                            .map(|rule| rule.expansion())
                            .unwrap_or_default()
                    }))
                    .collect(),
            );
        }

        write!(f, "{}", table)
    }
}
