use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Entity kinds addressable through the recycle bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Category,
    Collection,
    Field,
    Item,
    Tag,
}

impl EntityKind {
    pub const ALL: [Self; 5] = [
        Self::Category,
        Self::Collection,
        Self::Field,
        Self::Item,
        Self::Tag,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Collection => "collection",
            Self::Field => "field",
            Self::Item => "item",
            Self::Tag => "tag",
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown type '{s}'"))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
