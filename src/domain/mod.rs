//! Domain layer: entities and tree/selection logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod index;
pub mod selection;

pub use arena::{Forest, LevelIterator, PreOrderIterator, TreeNode};
pub use builder::{build_tree, TreeBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use index::TreeIndex;
pub use selection::{Boundary, SelectionState};
