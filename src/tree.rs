use crate::symbol::EPSILON;

/// Index of a node in the tree's arena.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
struct TreeNode {
    label: String,
    children: Vec<NodeId>,
}

/// The ordered derivation tree produced by a successful parse.
///
/// The root is labeled with the start symbol. Internal nodes record the
/// expansion applied (`X -> plus T X`), leaves are matched terminals, plus
/// a single `ε` leaf under every empty expansion. Children are ordered
/// left to right as the expansion produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationTree {
    nodes: Vec<TreeNode>,
}

impl DerivationTree {
    pub(crate) fn new(root_label: &str) -> Self {
        Self {
            nodes: vec![TreeNode {
                label: root_label.to_string(),
                children: Vec::new(),
            }],
        }
    }

    pub(crate) fn push(&mut self, label: &str, parent: NodeId) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            label: label.to_string(),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id].label
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Leaf labels, left to right, ε leaves excluded.
    ///
    /// For a successful parse this is exactly the input token sequence.
    pub fn frontier(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.children.is_empty() {
                if node.label != EPSILON {
                    leaves.push(node.label.as_str());
                }
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        leaves
    }

    /// Exports the tree as a Graphviz digraph.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph derivation {\n");
        for (id, node) in self.nodes.iter().enumerate() {
            out.push_str(&format!(
                "    n{} [label=\"{}\"];\n",
                id,
                node.label.replace('"', "\\\"")
            ));
        }
        for (id, node) in self.nodes.iter().enumerate() {
            for &child in &node.children {
                out.push_str(&format!("    n{} -> n{};\n", id, child));
            }
        }
        out.push_str("}\n");
        out
    }

    fn render(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        id: NodeId,
        prefix: &str,
    ) -> std::fmt::Result {
        let children = &self.nodes[id].children;
        for (i, &child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let (branch, extend) = if last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            writeln!(f, "{}{}{}", prefix, branch, self.nodes[child].label)?;
            self.render(f, child, &format!("{}{}", prefix, extend))?;
        }
        Ok(())
    }
}

impl std::fmt::Display for DerivationTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.nodes[self.root()].label)?;
        self.render(f, self.root(), "")
    }
}

#[cfg(test)]
mod tests {
    use super::DerivationTree;
    use crate::symbol::EPSILON;

    fn sample() -> DerivationTree {
        let mut tree = DerivationTree::new("S");
        let expansion = tree.push("S -> a B", tree.root());
        tree.push("a", expansion);
        let b = tree.push("B -> ε", expansion);
        tree.push(EPSILON, b);
        tree
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let tree = sample();
        let expansion = tree.children(tree.root())[0];
        let labels: Vec<_> = tree
            .children(expansion)
            .iter()
            .map(|&id| tree.label(id))
            .collect();
        assert_eq!(labels, vec!["a", "B -> ε"]);
    }

    #[test]
    fn test_frontier_skips_epsilon_leaves() {
        let tree = sample();
        assert_eq!(tree.len(), 5);
        assert!(!tree.is_empty());
        assert_eq!(tree.frontier(), vec!["a"]);
    }

    #[test]
    fn test_display_renders_branches() {
        let rendered = sample().to_string();
        assert_eq!(
            rendered,
            "S\n\
             └── S -> a B\n\
             \u{20}   ├── a\n\
             \u{20}   └── B -> ε\n\
             \u{20}       └── ε\n"
        );
    }

    #[test]
    fn test_dot_export_lists_all_edges() {
        let dot = sample().to_dot();
        assert!(dot.starts_with("digraph derivation {"));
        assert!(dot.contains("n0 [label=\"S\"];"));
        assert!(dot.contains("n0 -> n1;"));
        assert!(dot.contains("n1 -> n2;"));
        assert!(dot.contains("n1 -> n3;"));
        assert!(dot.contains("n3 -> n4;"));
    }
}
