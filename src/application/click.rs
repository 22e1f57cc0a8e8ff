//! Host click events replayed into a tree session.

use std::fmt;
use std::str::FromStr;

use crate::application::ApplicationError;
use crate::domain::SelectionKind;

/// A click as seen by the host: on a group row, on a type row, or outside
/// the tree container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    Group(i64),
    Type(i64),
    Outside,
}

impl Click {
    pub fn on(kind: SelectionKind, id: i64) -> Self {
        match kind {
            SelectionKind::Group => Click::Group(id),
            SelectionKind::Type => Click::Type(id),
        }
    }
}

impl fmt::Display for Click {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Click::Group(id) => write!(f, "group:{id}"),
            Click::Type(id) => write!(f, "type:{id}"),
            Click::Outside => write!(f, "outside"),
        }
    }
}

/// Accepts `group:<id>`, `type:<id>`, the short forms `g<id>` / `t<id>`,
/// and `outside`.
impl FromStr for Click {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("outside") {
            return Ok(Click::Outside);
        }

        let (kind, id) = match s.split_once(':') {
            Some((kind, id)) => (kind, id),
            None => {
                let split = s
                    .find(|c: char| c.is_ascii_digit() || c == '-')
                    .ok_or_else(|| ApplicationError::InvalidClick(s.to_string()))?;
                s.split_at(split)
            }
        };

        let kind: SelectionKind = kind
            .parse()
            .map_err(|_| ApplicationError::InvalidClick(s.to_string()))?;
        let id: i64 = id
            .trim()
            .parse()
            .map_err(|_| ApplicationError::InvalidClick(s.to_string()))?;
        Ok(Click::on(kind, id))
    }
}
