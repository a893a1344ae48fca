//! Depth-first traversal over method-body nodes.

use super::{Node, NodeKind};

/// Pre-order iterator over a node forest, including invocation arguments.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

#[must_use]
pub fn descendants(roots: &[Node]) -> Descendants<'_> {
    Descendants {
        stack: roots.iter().rev().collect(),
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push in reverse so the leftmost child is visited first.
        self.stack.extend(node.children.iter().rev());
        if let NodeKind::Invocation(inv) = &node.kind {
            self.stack.extend(inv.arguments.iter().rev());
        }
        Some(node)
    }
}
