//! Domain entities: flat catalog records and selection entries

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A node of the group hierarchy.
///
/// `parent_id == None` marks a root. Multiple roots are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
    #[serde(alias = "Id")]
    pub id: i64,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "enterpriseId", alias = "EnterpriseId")]
    pub enterprise_id: i64,
    #[serde(default, alias = "parentId", alias = "ParentId")]
    pub parent_id: Option<i64>,
}

impl Group {
    pub fn new(id: i64, name: impl Into<String>, enterprise_id: i64, parent_id: Option<i64>) -> Self {
        Self {
            id,
            name: name.into(),
            enterprise_id,
            parent_id,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A leaf entry owned by exactly one group via `group_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Type {
    #[serde(alias = "Id")]
    pub id: i64,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "enterpriseId", alias = "EnterpriseId")]
    pub enterprise_id: i64,
    #[serde(alias = "groupId", alias = "GroupId")]
    pub group_id: i64,
}

impl Type {
    pub fn new(id: i64, name: impl Into<String>, enterprise_id: i64, group_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            enterprise_id,
            group_id,
        }
    }
}

/// Flat input for one build: groups and types as supplied by a catalog source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, alias = "Groups")]
    pub groups: Vec<Group>,
    #[serde(default, alias = "Types")]
    pub types: Vec<Type>,
}

/// Which kind of entity a selection refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Group,
    Type,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKind::Group => write!(f, "group"),
            SelectionKind::Type => write!(f, "type"),
        }
    }
}

impl FromStr for SelectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "group" | "g" => Ok(SelectionKind::Group),
            "type" | "t" => Ok(SelectionKind::Type),
            other => Err(format!("unknown selection kind: {other}")),
        }
    }
}

/// The single selected entity, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub kind: SelectionKind,
    pub id: i64,
}

impl SelectionEntry {
    pub fn group(id: i64) -> Self {
        Self {
            kind: SelectionKind::Group,
            id,
        }
    }

    pub fn type_entry(id: i64) -> Self {
        Self {
            kind: SelectionKind::Type,
            id,
        }
    }

    pub fn matches(&self, id: i64, kind: SelectionKind) -> bool {
        self.kind == kind && self.id == id
    }
}

impl fmt::Display for SelectionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_original_pascal_case_json_when_deserializing_then_accepts_aliases() {
        let json = r#"{"Id": 8, "Name": "Group 2", "EnterpriseId": 4, "ParentId": 7}"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group, Group::new(8, "Group 2", 4, Some(7)));
    }

    #[test]
    fn given_null_parent_when_deserializing_then_group_is_root() {
        let json = r#"{"id": 1, "name": "A", "parentId": null}"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert!(group.is_root());
        assert_eq!(group.enterprise_id, 0);
    }

    #[test]
    fn given_kind_strings_when_parsing_then_short_forms_work() {
        assert_eq!("g".parse::<SelectionKind>(), Ok(SelectionKind::Group));
        assert_eq!("Type".parse::<SelectionKind>(), Ok(SelectionKind::Type));
        assert!("folder".parse::<SelectionKind>().is_err());
    }
}
