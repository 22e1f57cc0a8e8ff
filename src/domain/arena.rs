use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::entities::{Group, Type};

/// Tree node in the arena-based forest: a group decorated with its children
/// and attached types.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Group record this node was built from
    pub group: Group,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in source order
    pub children: Vec<Index>,
    /// Types owned by this group, in source order
    pub types: Vec<Type>,
    /// Transient UI flag, not part of the node identity
    pub expanded: bool,
}

impl TreeNode {
    pub fn id(&self) -> i64 {
        self.group.id
    }

    pub fn name(&self) -> &str {
        &self.group.name
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [#{}]", self.group.name, self.group.id)
    }
}

/// Arena-backed forest of group trees.
///
/// Uses a generational arena for memory-safe node references and O(1)
/// index lookups. Roots are kept in source order.
#[derive(Debug)]
pub struct Forest {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Root indices in source order
    roots: Vec<Index>,
    /// Groups excluded because their parent chain ends at a missing group
    orphaned_groups: Vec<i64>,
    /// Types whose owning group is not in the forest
    unattached_types: Vec<i64>,
}

impl Default for Forest {
    fn default() -> Self {
        Self::new()
    }
}

impl Forest {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
            orphaned_groups: Vec::new(),
            unattached_types: Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self, group), fields(group_id = group.id))]
    pub fn insert_node(&mut self, group: Group, parent: Option<Index>) -> Index {
        let node = TreeNode {
            group,
            parent,
            children: Vec::new(),
            types: Vec::new(),
            expanded: false,
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.roots.push(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order iterator over all trees, roots in source order.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator {
            inner: self.iter_with_level(),
        }
    }

    /// Pre-order iterator yielding each node with its level (0 for a root).
    pub fn iter_with_level(&self) -> LevelIterator<'_> {
        LevelIterator::new(self)
    }

    /// Pre-order linearization of the forest: each node is immediately
    /// followed by the flattened sequence of its children.
    #[instrument(level = "debug", skip(self))]
    pub fn flatten(&self) -> Vec<Index> {
        self.iter().map(|(idx, _)| idx).collect()
    }

    /// Linear lookup by group id. Use [`crate::domain::TreeIndex`] for repeated lookups.
    pub fn find(&self, group_id: i64) -> Option<(Index, &TreeNode)> {
        self.iter().find(|(_, node)| node.group.id == group_id)
    }

    /// Number of levels of the deepest tree, 0 for an empty forest.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter_with_level()
            .map(|(_, level, _)| level + 1)
            .max()
            .unwrap_or(0)
    }

    /// Ancestor chain of a group, root first and ending with the group itself.
    /// Empty if the group is not part of the forest.
    pub fn path_to(&self, group_id: i64) -> Vec<&TreeNode> {
        let mut path = Vec::new();
        let mut current = self.find(group_id).map(|(idx, _)| idx);
        while let Some(idx) = current {
            match self.get_node(idx) {
                Some(node) => {
                    path.push(node);
                    current = node.parent;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Mirror externally owned expand state onto the transient node flags.
    pub fn sync_expanded(&mut self, is_expanded: impl Fn(i64) -> bool) {
        for (_, node) in self.arena.iter_mut() {
            node.expanded = is_expanded(node.group.id);
        }
    }

    pub fn orphaned_groups(&self) -> &[i64] {
        &self.orphaned_groups
    }

    pub fn unattached_types(&self) -> &[i64] {
        &self.unattached_types
    }

    pub(crate) fn set_orphaned_groups(&mut self, ids: Vec<i64>) {
        self.orphaned_groups = ids;
    }

    pub(crate) fn set_unattached_types(&mut self, ids: Vec<i64>) {
        self.unattached_types = ids;
    }
}

/// Depth-first walk over the forest carrying the level of each node.
pub struct LevelIterator<'a> {
    forest: &'a Forest,
    stack: Vec<(Index, usize)>,
}

impl<'a> LevelIterator<'a> {
    fn new(forest: &'a Forest) -> Self {
        // Roots in reverse so the first root is popped first
        let stack = forest.roots.iter().rev().map(|&root| (root, 0)).collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for LevelIterator<'a> {
    type Item = (Index, usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, level)) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, level + 1));
                }
                return Some((current_idx, level, node));
            }
        }
        None
    }
}

pub struct PreOrderIterator<'a> {
    inner: LevelIterator<'a>,
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(idx, _, node)| (idx, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //      1        4
    //     / \
    //    2   3
    fn sample_forest() -> Forest {
        let mut forest = Forest::new();
        let a = forest.insert_node(Group::new(1, "a", 0, None), None);
        forest.insert_node(Group::new(2, "b", 0, Some(1)), Some(a));
        forest.insert_node(Group::new(3, "c", 0, Some(1)), Some(a));
        forest.insert_node(Group::new(4, "d", 0, None), None);
        forest
    }

    #[test]
    fn test_iter_is_preorder_across_roots() {
        let forest = sample_forest();
        let ids: Vec<i64> = forest.iter().map(|(_, n)| n.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_depth_and_level() {
        let forest = sample_forest();
        assert_eq!(forest.depth(), 2);
        let levels: Vec<(i64, usize)> = forest
            .iter_with_level()
            .map(|(_, level, n)| (n.id(), level))
            .collect();
        assert_eq!(levels, vec![(1, 0), (2, 1), (3, 1), (4, 0)]);
        assert_eq!(Forest::new().depth(), 0);
    }

    #[test]
    fn test_depth_of_long_chain() {
        let mut forest = Forest::new();
        let mut parent = forest.insert_node(Group::new(0, "g", 0, None), None);
        for id in 1..200_000 {
            parent = forest.insert_node(Group::new(id, "g", 0, Some(id - 1)), Some(parent));
        }

        assert_eq!(forest.depth(), 200_000);
    }

    #[test]
    fn test_path_to_returns_root_first() {
        let forest = sample_forest();
        let path: Vec<i64> = forest.path_to(3).iter().map(|n| n.id()).collect();
        assert_eq!(path, vec![1, 3]);
        assert!(forest.path_to(99).is_empty());
    }

    #[test]
    fn test_sync_expanded_sets_flags() {
        let mut forest = sample_forest();
        forest.sync_expanded(|id| id == 1);
        let flags: Vec<(i64, bool)> = forest.iter().map(|(_, n)| (n.id(), n.expanded)).collect();
        assert_eq!(flags, vec![(1, true), (2, false), (3, false), (4, false)]);
    }
}
