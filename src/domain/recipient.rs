use core::fmt;

use serde::{Deserialize, Serialize};

/// Идентификатор места/игрока, которому раздаём карты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipientId(pub String);

impl RecipientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for RecipientId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Ссылка на визуальный якорь места (например, id DOM-элемента аватарки).
/// Сам по себе ничего не знает о координатах – их отдаёт `LayoutProvider`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AnchorRef(pub String);

/// Получатель карт в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Recipient {
    pub id: RecipientId,
    pub anchor: AnchorRef,
}

impl Recipient {
    pub fn new(id: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            id: RecipientId(id.into()),
            anchor: AnchorRef(anchor.into()),
        }
    }

    /// Якорь по умолчанию: `seat-<id>`.
    pub fn seat(id: impl Into<String>) -> Self {
        let id = id.into();
        let anchor = format!("seat-{id}");
        Self::new(id, anchor)
    }
}
