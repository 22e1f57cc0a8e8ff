//! Built-in demo catalog: three flat root groups, one three-level chain and a
//! handful of types spread over them.

use crate::domain::{Catalog, Group, Type};

pub fn catalog() -> Catalog {
    let groups = vec![
        Group::new(1, "string", 0, None),
        Group::new(2, "group 1", 0, None),
        Group::new(3, "group 1", 0, None),
        Group::new(4, "group 1", 0, None),
        Group::new(5, "dc vbn", 0, None),
        Group::new(6, "vgbnm", 0, None),
        Group::new(7, "Group No. 1", 4, None),
        Group::new(8, "Group No. 2", 4, Some(7)),
        Group::new(9, "Group No. 3", 4, Some(8)),
    ];

    let types = vec![
        Type::new(1, "1", 4, 1),
        Type::new(2, "string", 4, 2),
        Type::new(3, "string", 4, 3),
        Type::new(4, "string", 4, 3),
        Type::new(5, "string", 4, 9),
        Type::new(6, "Test", 4, 3),
    ];

    Catalog { groups, types }
}
