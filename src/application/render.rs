//! Text rendering of a forest and its selection.

use generational_arena::Index;
use termtree::Tree;

use crate::config::DisplayConfig;
use crate::domain::{Forest, SelectionKind, SelectionState, TreeNode};

/// Levels below this one are rendered with their content.
pub const MAX_NESTING: usize = 256;

/// Node whose subtree is still being assembled.
struct Frame<'a> {
    node: &'a TreeNode,
    tree: Tree<String>,
    next_child: usize,
}

impl<'a> Frame<'a> {
    fn new(node: &'a TreeNode, tree: Tree<String>) -> Self {
        Self {
            node,
            tree,
            next_child: 0,
        }
    }
}

/// Converts a forest into printable `termtree` trees, one per root.
pub struct ForestRenderer<'a> {
    forest: &'a Forest,
    selection: &'a SelectionState,
    display: &'a DisplayConfig,
}

impl<'a> ForestRenderer<'a> {
    pub fn new(forest: &'a Forest, selection: &'a SelectionState, display: &'a DisplayConfig) -> Self {
        Self {
            forest,
            selection,
            display,
        }
    }

    pub fn render(&self) -> Vec<Tree<String>> {
        self.forest
            .roots()
            .iter()
            .filter_map(|&root| self.render_root(root))
            .collect()
    }

    /// Render everything as one string, trees separated by their own newlines.
    pub fn render_to_string(&self) -> String {
        let trees = self.render();
        if trees.is_empty() {
            return "(empty)\n".to_string();
        }
        trees.iter().map(|t| t.to_string()).collect()
    }

    /// Build one root's tree with an explicit stack of open nodes.
    ///
    /// Groups at level [`MAX_NESTING`] are shown with a `[...]` marker and
    /// their content is left out.
    fn render_root(&self, root: Index) -> Option<Tree<String>> {
        let node = self.forest.get_node(root)?;
        let mut open = vec![Frame::new(node, Tree::new(self.group_label(node)))];

        loop {
            let depth = open.len();
            let Some(frame) = open.last_mut() else {
                break;
            };
            let node = frame.node;
            let next_child = if self.shows_content(node) && depth <= MAX_NESTING {
                node.children.get(frame.next_child).copied()
            } else {
                None
            };

            if let Some(child_idx) = next_child {
                frame.next_child += 1;
                if let Some(child) = self.forest.get_node(child_idx) {
                    let label = if depth == MAX_NESTING && self.has_content(child) {
                        format!("{} [...]", self.label(child.name(), child.id(), SelectionKind::Group))
                    } else {
                        self.group_label(child)
                    };
                    open.push(Frame::new(child, Tree::new(label)));
                }
                continue;
            }

            let Some(Frame { node, mut tree, .. }) = open.pop() else {
                break;
            };
            if self.shows_content(node) && open.len() < MAX_NESTING && self.display.show_types {
                for ty in &node.types {
                    tree.push(Tree::new(self.label(&ty.name, ty.id, SelectionKind::Type)));
                }
            }
            match open.last_mut() {
                Some(parent) => {
                    parent.tree.push(tree);
                }
                None => return Some(tree),
            }
        }
        None
    }

    fn shows_content(&self, node: &TreeNode) -> bool {
        self.display.expand_all || node.expanded
    }

    fn has_content(&self, node: &TreeNode) -> bool {
        !node.children.is_empty() || (self.display.show_types && !node.types.is_empty())
    }

    fn group_label(&self, node: &TreeNode) -> String {
        let collapsed = self.has_content(node) && !self.shows_content(node);
        let label = self.label(node.name(), node.id(), SelectionKind::Group);
        if collapsed {
            format!("{label} [+]")
        } else {
            label
        }
    }

    fn label(&self, name: &str, id: i64, kind: SelectionKind) -> String {
        let mut label = match (kind, self.display.show_ids) {
            (SelectionKind::Group, true) => format!("{name} #{id}"),
            (SelectionKind::Type, true) => format!("{name} (type #{id})"),
            (SelectionKind::Group, false) => name.to_string(),
            (SelectionKind::Type, false) => format!("{name} (type)"),
        };
        if self.selection.is_selected(id, kind) {
            label = format!("{} {}", self.display.selected_marker, label);
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build_tree, Group, Type};

    fn display(expand_all: bool) -> DisplayConfig {
        DisplayConfig {
            expand_all,
            ..DisplayConfig::default()
        }
    }

    #[test]
    fn test_collapsed_group_hides_children() {
        let forest = build_tree(
            &[Group::new(1, "A", 0, None), Group::new(2, "B", 0, Some(1))],
            &[],
        )
        .unwrap();
        let selection = SelectionState::new();
        let display = display(false);

        let out = ForestRenderer::new(&forest, &selection, &display).render_to_string();

        assert!(out.contains("A #1 [+]"));
        assert!(!out.contains("B #2"));
    }

    #[test]
    fn test_expand_all_shows_types_and_marks_selection() {
        let forest = build_tree(&[Group::new(1, "A", 0, None)], &[Type::new(5, "T", 0, 1)]).unwrap();
        let mut selection = SelectionState::new();
        selection.select_type(5);
        let display = display(true);

        let out = ForestRenderer::new(&forest, &selection, &display).render_to_string();

        assert!(out.contains("A #1"));
        assert!(out.contains("* T (type #5)"));
    }

    #[test]
    fn test_deep_chain_is_cut_at_max_nesting() {
        let groups: Vec<Group> = (0..10_000)
            .map(|id| Group::new(id, format!("g{id}"), 0, (id > 0).then(|| id - 1)))
            .collect();
        let forest = build_tree(&groups, &[]).unwrap();
        let selection = SelectionState::new();
        let display = display(true);

        let trees = ForestRenderer::new(&forest, &selection, &display).render();
        let out = trees[0].to_string();

        let cut = MAX_NESTING as i64;
        assert!(out.contains(&format!("g{} #{}", cut - 1, cut - 1)));
        assert!(out.contains(&format!("g{cut} #{cut} [...]")));
        assert!(!out.contains(&format!("g{} #", cut + 1)));
    }

    #[test]
    fn test_types_follow_child_groups() {
        let forest = build_tree(
            &[Group::new(1, "A", 0, None), Group::new(2, "B", 0, Some(1))],
            &[Type::new(5, "T", 0, 1)],
        )
        .unwrap();
        let selection = SelectionState::new();
        let display = display(true);

        let out = ForestRenderer::new(&forest, &selection, &display).render_to_string();

        let child = out.find("B #2").unwrap();
        let ty = out.find("T (type #5)").unwrap();
        assert!(child < ty);
    }

    #[test]
    fn test_empty_forest() {
        let forest = Forest::new();
        let selection = SelectionState::new();
        let display = DisplayConfig::default();
        assert_eq!(
            ForestRenderer::new(&forest, &selection, &display).render_to_string(),
            "(empty)\n"
        );
    }
}
