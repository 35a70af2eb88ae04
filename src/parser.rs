use crate::error::{ErrorKind, ExpectedTokens, LlError};
use crate::grammar::{Grammar, EOS_IDX, EPSILON_IDX};
use crate::symbol::{SymbolIdx, SymbolKind, EOS, EPSILON};
use crate::table::LlTable;
use crate::tree::{DerivationTree, NodeId};
use crate::LlResult;

/// The predictive parser: a stack machine driven by an [`LlTable`].
///
/// The stack holds (symbol, parent node) pairs so that every expansion
/// attaches its children under the node that actually produced it, however
/// many expansions are pending. A valid LL(1) table guarantees at most one
/// applicable rule per (nonterminal, lookahead) pair, so no decision is
/// ever revisited.
pub struct LlParser<'g, 't> {
    grammar: &'g Grammar,
    table: &'t LlTable<'g>,
}

impl<'g, 't> LlParser<'g, 't> {
    pub fn new(grammar: &'g Grammar, table: &'t LlTable<'g>) -> Self {
        Self { grammar, table }
    }

    /// Splits the input on whitespace and parses it. End of input is
    /// implicit, the caller never writes `$`.
    pub fn parse_str(&self, input: &str) -> LlResult<DerivationTree> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        self.parse(&tokens)
    }

    /// Parses a token sequence into its derivation tree.
    ///
    /// Fails on the first mismatch, missing table entry, or leftover
    /// input; the error carries the token index it happened at.
    pub fn parse(&self, tokens: &[&str]) -> LlResult<DerivationTree> {
        let start = self.grammar.start_idx();
        let mut tree = DerivationTree::new(self.grammar.start().id);
        let root = tree.root();

        // Bottom-to-top: $ below the start symbol, both under the root.
        let mut stack: Vec<(SymbolIdx, NodeId)> = vec![(EOS_IDX, root), (start, root)];
        let mut cursor = 0usize;

        while let Some((top, parent)) = stack.pop() {
            let sym = self.grammar.sym(top);
            match sym.kind() {
                SymbolKind::Eos => {
                    if cursor < tokens.len() {
                        return Err(LlError::at(
                            ErrorKind::Incomplete(format!(
                                "unconsumed input starting at '{}'",
                                tokens[cursor]
                            )),
                            cursor,
                        ));
                    }
                }
                SymbolKind::Terminal => match tokens.get(cursor) {
                    Some(&tok) if tok == sym.id => {
                        tree.push(tok, parent);
                        cursor += 1;
                    }
                    Some(&tok) => {
                        return Err(LlError::at(
                            ErrorKind::TokenMismatch {
                                expected: sym.id.to_string(),
                                got: tok.to_string(),
                            },
                            cursor,
                        ));
                    }
                    None => {
                        return Err(LlError::at(
                            ErrorKind::Incomplete(format!(
                                "input ended while expecting '{}'",
                                sym.id
                            )),
                            cursor,
                        ));
                    }
                },
                SymbolKind::Epsilon => {
                    tree.push(EPSILON, parent);
                }
                SymbolKind::NonTerminal => {
                    let lookahead = tokens.get(cursor).copied();
                    let rule_id = lookahead
                        .map_or(Some(EOS_IDX), |tok| self.grammar.symbol_index(tok))
                        .and_then(|la| self.table.rule_id_for(top, la));

                    let rule_id = match rule_id {
                        Some(id) => id,
                        None => {
                            return Err(LlError::at(
                                ErrorKind::NoRule {
                                    nonterminal: sym.id.to_string(),
                                    got: lookahead.unwrap_or(EOS).to_string(),
                                    expected: ExpectedTokens::new(
                                        self.table.lookaheads(top).iter().map(|s| s.id),
                                    ),
                                },
                                cursor,
                            ));
                        }
                    };

                    let rule = self.grammar.rule(rule_id);
                    let node = tree.push(&rule.expansion(), parent);

                    // Reverse push keeps the leftmost member on top. An ε
                    // member never goes on the stack, it becomes a leaf of
                    // the expansion right away.
                    let def = &self.grammar.rule_defs()[rule_id];
                    for &member in def.rhs.iter().rev() {
                        if member == EPSILON_IDX {
                            tree.push(EPSILON, node);
                        } else {
                            stack.push((member, node));
                        }
                    }
                }
            }
        }

        Ok(tree)
    }
}
