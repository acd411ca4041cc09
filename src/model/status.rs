use serde::{Deserialize, Serialize};

use super::UnknownCode;

/// Progress state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ItemStatus {
    ToDo,
    InProgress,
    Paused,
    Abandoned,
    Completed,
}

impl ItemStatus {
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::ToDo => 1,
            Self::InProgress => 2,
            Self::Paused => 3,
            Self::Abandoned => 4,
            Self::Completed => 5,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Paused => "Paused",
            Self::Abandoned => "Abandoned",
            Self::Completed => "Completed",
        }
    }
}

impl TryFrom<i64> for ItemStatus {
    type Error = UnknownCode;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::ToDo),
            2 => Ok(Self::InProgress),
            3 => Ok(Self::Paused),
            4 => Ok(Self::Abandoned),
            5 => Ok(Self::Completed),
            _ => Err(UnknownCode {
                kind: "item status",
                code,
            }),
        }
    }
}

impl From<ItemStatus> for i64 {
    fn from(value: ItemStatus) -> Self {
        value.code()
    }
}
