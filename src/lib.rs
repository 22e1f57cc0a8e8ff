//! Hierarchical group/type tree builder with single-selection state.
//!
//! Flat [`domain::Group`] records (with optional parent ids) are assembled
//! into a forest, [`domain::Type`] records are attached to their owning
//! groups, and a [`domain::SelectionState`] tracks the one selected entity
//! together with per-group expand flags.
//!
//! ```
//! use grouptree::domain::{build_tree, Group, SelectionKind, SelectionState, Type};
//!
//! let groups = vec![Group::new(1, "A", 0, None), Group::new(2, "B", 0, Some(1))];
//! let types = vec![Type::new(1, "T", 0, 2)];
//! let forest = build_tree(&groups, &types).unwrap();
//! assert_eq!(forest.roots().len(), 1);
//!
//! let mut selection = SelectionState::new();
//! selection.select_group(1);
//! selection.select_type(1);
//! assert!(!selection.is_selected(1, SelectionKind::Group));
//! assert!(selection.is_selected(1, SelectionKind::Type));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
