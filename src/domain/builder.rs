//! Tree builder turning flat group/type records into a rooted forest.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::domain::arena::Forest;
use crate::domain::entities::{Group, Type};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::index::TreeIndex;

/// Constructs group forests from flat catalog records.
///
/// Child lookup goes through a parent id → children index built once per
/// build, so a build is O(G + T).
#[derive(Debug, Default)]
pub struct TreeBuilder {
    /// parent id -> positions of its children in the source slice
    relationship_cache: HashMap<i64, Vec<usize>>,
    /// group id -> position in the source slice
    positions: HashMap<i64, usize>,
    visited_ids: HashSet<i64>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the forest and attach types as a second pass.
    ///
    /// Groups whose parent chain ends at a missing id are left out and listed
    /// in [`Forest::orphaned_groups`]. Types pointing at a group outside the
    /// forest are listed in [`Forest::unattached_types`].
    ///
    /// # Errors
    /// * [`DomainError::DuplicateGroupId`] if two groups share an id
    /// * [`DomainError::CyclicHierarchy`] if a parent chain loops
    #[instrument(level = "debug", skip_all, fields(groups = groups.len(), types = types.len()))]
    pub fn build(&mut self, groups: &[Group], types: &[Type]) -> DomainResult<Forest> {
        // Reset state for fresh build
        self.relationship_cache.clear();
        self.positions.clear();
        self.visited_ids.clear();

        if let Some(id) = groups.iter().map(|g| g.id).duplicates().next() {
            return Err(DomainError::DuplicateGroupId(id));
        }

        self.index_relationships(groups);

        let mut forest = Forest::new();
        for (pos, _) in groups.iter().enumerate().filter(|(_, g)| g.is_root()) {
            self.build_tree(groups, pos, &mut forest)?;
        }

        let orphaned = self.find_orphans(groups)?;
        if !orphaned.is_empty() {
            warn!("excluded {} orphaned group(s): {:?}", orphaned.len(), orphaned);
        }
        forest.set_orphaned_groups(orphaned);

        let unattached = TreeIndex::attach_types(&mut forest, types);
        if !unattached.is_empty() {
            warn!("{} type(s) reference unknown groups: {:?}", unattached.len(), unattached);
        }
        forest.set_unattached_types(unattached);

        debug!(
            "build: roots={}, nodes={}, depth={}",
            forest.roots().len(),
            forest.len(),
            forest.depth()
        );
        Ok(forest)
    }

    fn index_relationships(&mut self, groups: &[Group]) {
        for (pos, group) in groups.iter().enumerate() {
            self.positions.insert(group.id, pos);
            if let Some(parent_id) = group.parent_id {
                self.relationship_cache.entry(parent_id).or_default().push(pos);
            }
        }
    }

    fn build_tree(&mut self, groups: &[Group], root_pos: usize, forest: &mut Forest) -> DomainResult<()> {
        let mut stack = vec![(root_pos, None)];

        while let Some((pos, parent_idx)) = stack.pop() {
            let group = &groups[pos];
            // Cycle detection
            if !self.visited_ids.insert(group.id) {
                return Err(DomainError::CyclicHierarchy { group_id: group.id });
            }

            let current_idx = forest.insert_node(group.clone(), parent_idx);

            // Reverse so siblings are popped, and thus inserted, in source order
            if let Some(children) = self.relationship_cache.get(&group.id) {
                for &child_pos in children.iter().rev() {
                    stack.push((child_pos, Some(current_idx)));
                }
            }
        }
        Ok(())
    }

    /// Classify every group not reached from a root.
    ///
    /// A parent chain ending at a missing id makes the group an orphan; a chain
    /// that revisits a group is a cycle. Each group is walked at most once:
    /// a chain that runs into an already classified orphan stops there.
    fn find_orphans(&self, groups: &[Group]) -> DomainResult<Vec<i64>> {
        let mut states: HashMap<i64, Reach> = HashMap::new();
        let mut chain = Vec::new();

        for group in groups.iter().filter(|g| !self.visited_ids.contains(&g.id)) {
            if states.contains_key(&group.id) {
                continue;
            }
            chain.clear();
            let mut current = group;

            loop {
                states.insert(current.id, Reach::Walking);
                chain.push(current.id);

                let Some(parent_id) = current.parent_id else {
                    break;
                };
                match states.get(&parent_id) {
                    Some(Reach::Walking) => {
                        return Err(DomainError::CyclicHierarchy { group_id: parent_id });
                    }
                    Some(Reach::Orphaned) => break,
                    None => {}
                }
                match self.positions.get(&parent_id) {
                    Some(&parent_pos) => current = &groups[parent_pos],
                    None => break,
                }
            }

            for id in &chain {
                states.insert(*id, Reach::Orphaned);
            }
        }

        Ok(groups
            .iter()
            .filter(|g| states.get(&g.id) == Some(&Reach::Orphaned))
            .map(|g| g.id)
            .collect())
    }
}

/// Classification of a group during the orphan walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
    /// On the chain currently being walked
    Walking,
    /// Parent chain ends at a missing group
    Orphaned,
}

/// Convenience wrapper around [`TreeBuilder::build`].
pub fn build_tree(groups: &[Group], types: &[Type]) -> DomainResult<Forest> {
    TreeBuilder::new().build(groups, types)
}
