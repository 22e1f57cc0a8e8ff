//! Tree session service
//!
//! Owns one built forest and one selection state for a UI session, and keeps
//! the forest's transient expand flags in step with the selection state.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::click::Click;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{
    Boundary, Forest, SelectionEntry, SelectionKind, SelectionState, TreeBuilder, TreeIndex,
};
use crate::infrastructure::traits::CatalogSource;

/// Service driving rebuilds and clicks against a catalog source.
pub struct TreeSession {
    source: Arc<dyn CatalogSource>,
    builder: TreeBuilder,
    forest: Forest,
    index: TreeIndex,
    selection: SelectionState,
}

impl TreeSession {
    /// Create a session with an empty forest. Call [`TreeSession::rebuild`] to load.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            builder: TreeBuilder::new(),
            forest: Forest::new(),
            index: TreeIndex::default(),
            selection: SelectionState::new(),
        }
    }

    /// Create a session and build the forest once.
    pub fn load(source: Arc<dyn CatalogSource>) -> ApplicationResult<Self> {
        let mut session = Self::new(source);
        session.rebuild()?;
        Ok(session)
    }

    /// Fetch the catalog again and replace the forest.
    ///
    /// Expand flags and the selection are owned by the session, not the
    /// forest, so they carry over to the new forest by id.
    #[instrument(level = "debug", skip(self))]
    pub fn rebuild(&mut self) -> ApplicationResult<&Forest> {
        let description = self.source.describe();
        let catalog = self
            .source
            .load()
            .with_source_context("load catalog", &description)?;
        debug!(
            "rebuild: {} groups, {} types from {}",
            catalog.groups.len(),
            catalog.types.len(),
            description
        );

        let mut forest = self.builder.build(&catalog.groups, &catalog.types)?;
        forest.sync_expanded(|id| self.selection.is_expanded(id));

        self.index = TreeIndex::new(&forest);
        self.forest = forest;
        info!("built forest with {} groups", self.forest.len());
        Ok(&self.forest)
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    pub fn selection_state(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selection(&self) -> Option<SelectionEntry> {
        self.selection.selected()
    }

    pub fn is_selected(&self, id: i64, kind: SelectionKind) -> bool {
        self.selection.is_selected(id, kind)
    }

    /// Select a group and toggle its visible children.
    pub fn select_group(&mut self, id: i64) {
        self.selection.select_group(id);
        let expanded = self.selection.is_expanded(id);
        if let Some(node) = self
            .index
            .get(id)
            .and_then(|idx| self.forest.get_node_mut(idx))
        {
            node.expanded = expanded;
        }
    }

    pub fn select_type(&mut self, id: i64) {
        self.selection.select_type(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Clear the selection if `target` lies outside `container`.
    pub fn notify_outside_click<T, B>(&mut self, target: &T, container: &B) -> bool
    where
        T: ?Sized,
        B: Boundary<T> + ?Sized,
    {
        self.selection.notify_outside_click(target, container)
    }

    /// Replay one host click.
    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, click: Click) {
        match click {
            Click::Group(id) => self.select_group(id),
            Click::Type(id) => self.select_type(id),
            Click::Outside => self.clear_selection(),
        }
    }

    /// Mark every group in the forest as expanded.
    pub fn expand_all(&mut self) {
        let ids: Vec<i64> = self.forest.iter().map(|(_, node)| node.id()).collect();
        for id in ids {
            self.selection.set_expanded(id, true);
        }
        self.forest.sync_expanded(|_| true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Catalog, Group, Type};
    use crate::infrastructure::traits::InMemoryCatalogSource;

    fn session() -> TreeSession {
        let catalog = Catalog {
            groups: vec![Group::new(1, "A", 0, None), Group::new(2, "B", 0, Some(1))],
            types: vec![Type::new(1, "T", 0, 2)],
        };
        TreeSession::load(Arc::new(InMemoryCatalogSource::new(catalog))).unwrap()
    }

    #[test]
    fn test_select_group_mirrors_expanded_flag_on_node() {
        let mut session = session();
        session.apply(Click::Group(1));
        let (_, node) = session.forest().find(1).unwrap();
        assert!(node.expanded);

        session.apply(Click::Group(1));
        let (_, node) = session.forest().find(1).unwrap();
        assert!(!node.expanded);
    }

    #[test]
    fn test_outside_click_clears() {
        let mut session = session();
        session.apply(Click::Type(1));
        session.apply(Click::Outside);
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn test_expand_all() {
        let mut session = session();
        session.expand_all();
        assert!(session.forest().iter().all(|(_, n)| n.expanded));
        assert!(session.selection_state().is_expanded(2));
    }
}
