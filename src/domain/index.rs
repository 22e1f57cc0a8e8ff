//! Id lookup over a built forest and type attachment.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{Forest, TreeNode};
use crate::domain::entities::Type;

/// Group id → arena index map, built in a single pass over the flattened forest.
#[derive(Debug, Default)]
pub struct TreeIndex {
    by_id: HashMap<i64, Index>,
}

impl TreeIndex {
    #[instrument(level = "debug", skip(forest), fields(nodes = forest.len()))]
    pub fn new(forest: &Forest) -> Self {
        let mut by_id = HashMap::with_capacity(forest.len());
        for idx in forest.flatten() {
            if let Some(node) = forest.get_node(idx) {
                by_id.insert(node.id(), idx);
            }
        }
        Self { by_id }
    }

    pub fn get(&self, group_id: i64) -> Option<Index> {
        self.by_id.get(&group_id).copied()
    }

    pub fn resolve<'a>(&self, forest: &'a Forest, group_id: i64) -> Option<&'a TreeNode> {
        self.get(group_id).and_then(|idx| forest.get_node(idx))
    }

    pub fn contains(&self, group_id: i64) -> bool {
        self.by_id.contains_key(&group_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Append each type to its owning node, preserving source order.
    ///
    /// Types whose `group_id` is not in the forest are skipped; their ids are
    /// returned in source order. The source collection is left untouched.
    #[instrument(level = "debug", skip_all, fields(types = types.len()))]
    pub fn attach_types(forest: &mut Forest, types: &[Type]) -> Vec<i64> {
        let index = Self::new(forest);
        let mut unattached = Vec::new();

        for ty in types {
            match index.get(ty.group_id).and_then(|idx| forest.get_node_mut(idx)) {
                Some(node) => node.types.push(ty.clone()),
                None => unattached.push(ty.id),
            }
        }

        debug!(
            "attach_types: attached={}, unattached={}",
            types.len() - unattached.len(),
            unattached.len()
        );
        unattached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Group;

    fn forest_with_two_groups() -> Forest {
        let mut forest = Forest::new();
        let root = forest.insert_node(Group::new(1, "root", 0, None), None);
        forest.insert_node(Group::new(2, "child", 0, Some(1)), Some(root));
        forest
    }

    #[test]
    fn test_index_resolves_every_node() {
        let forest = forest_with_two_groups();
        let index = TreeIndex::new(&forest);
        assert_eq!(index.len(), 2);
        assert_eq!(index.resolve(&forest, 2).map(|n| n.name()), Some("child"));
        assert!(!index.contains(3));
    }

    #[test]
    fn test_attach_types_keeps_source_order_and_reports_dangling() {
        let mut forest = forest_with_two_groups();
        let types = vec![
            Type::new(10, "x", 0, 2),
            Type::new(11, "y", 0, 99),
            Type::new(12, "z", 0, 2),
        ];

        let unattached = TreeIndex::attach_types(&mut forest, &types);

        assert_eq!(unattached, vec![11]);
        let (_, child) = forest.find(2).unwrap();
        let ids: Vec<i64> = child.types.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![10, 12]);
        assert_eq!(types.len(), 3);
    }
}
