// core/hierarchy.rs
//
// Body hierarchy: tracks parent-child relationships by BodyId.
// Holds no body data; the model keeps bodies in a flat Vec and asks the
// graph for update order and sibling groups.
//
// Usage:
//   let mut graph = BodyGraph::new();
//   graph.register(earth, None);
//   graph.register(moon, Some(earth));
//   for id in graph.update_order() { ... }  // parents before children

use std::collections::HashMap;

use crate::api::types::BodyId;

#[derive(Debug, Clone, Default)]
struct BodyNode {
    parent: Option<BodyId>,
    children: Vec<BodyId>,
}

/// Parent/child index over body handles.
///
/// The star is implicit: roots are the bodies orbiting it directly.
#[derive(Debug, Default)]
pub struct BodyGraph {
    nodes: HashMap<BodyId, BodyNode>,
    /// Top-level bodies in registration order.
    roots: Vec<BodyId>,
    /// Cached depth-first order, rebuilt when the hierarchy changes.
    order: Vec<BodyId>,
    dirty: bool,
}

impl BodyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body under `parent` (or as a root).
    /// A parent must be registered before its children.
    pub fn register(&mut self, id: BodyId, parent: Option<BodyId>) {
        self.nodes.entry(id).or_default().parent = parent;
        match parent {
            Some(p) => {
                let parent_node = self.nodes.entry(p).or_default();
                if !parent_node.children.contains(&id) {
                    parent_node.children.push(id);
                }
            }
            None => {
                if !self.roots.contains(&id) {
                    self.roots.push(id);
                }
            }
        }
        self.dirty = true;
    }

    pub fn parent(&self, id: BodyId) -> Option<BodyId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: BodyId) -> &[BodyId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[BodyId] {
        &self.roots
    }

    /// Bodies that have at least one child, in update order.
    pub fn parents(&mut self) -> Vec<BodyId> {
        self.update_order();
        self.order
            .iter()
            .copied()
            .filter(|id| !self.children(*id).is_empty())
            .collect()
    }

    /// Depth-first order from the roots: every parent precedes its children.
    pub fn update_order(&mut self) -> &[BodyId] {
        if self.dirty {
            self.rebuild_order();
        }
        &self.order
    }

    fn rebuild_order(&mut self) {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<BodyId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        self.order = order;
        self.dirty = false;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.order.clear();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_child_relationship() {
        let mut graph = BodyGraph::new();
        let earth = BodyId(0);
        let moon = BodyId(1);
        graph.register(earth, None);
        graph.register(moon, Some(earth));

        assert_eq!(graph.parent(moon), Some(earth));
        assert_eq!(graph.children(earth), [moon].as_slice());
        assert_eq!(graph.roots(), [earth].as_slice());
    }

    #[test]
    fn parents_come_before_children() {
        let mut graph = BodyGraph::new();
        graph.register(BodyId(0), None);
        graph.register(BodyId(1), None);
        graph.register(BodyId(2), Some(BodyId(1)));
        graph.register(BodyId(3), Some(BodyId(0)));
        graph.register(BodyId(4), Some(BodyId(1)));

        let order = graph.update_order().to_vec();
        assert_eq!(order, vec![BodyId(0), BodyId(3), BodyId(1), BodyId(2), BodyId(4)]);
        for &id in &order {
            if let Some(p) = graph.parent(id) {
                let pi = order.iter().position(|&x| x == p).unwrap();
                let ci = order.iter().position(|&x| x == id).unwrap();
                assert!(pi < ci);
            }
        }
    }

    #[test]
    fn parents_lists_only_bodies_with_children() {
        let mut graph = BodyGraph::new();
        graph.register(BodyId(0), None);
        graph.register(BodyId(1), None);
        graph.register(BodyId(2), Some(BodyId(1)));
        assert_eq!(graph.parents(), vec![BodyId(1)]);
    }

    #[test]
    fn clear_empties_graph() {
        let mut graph = BodyGraph::new();
        graph.register(BodyId(0), None);
        graph.clear();
        assert!(graph.is_empty());
        assert!(graph.update_order().is_empty());
    }
}
