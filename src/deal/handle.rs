use core::fmt;

use serde::{Deserialize, Serialize};

/// Токен одной активации раздачи.
///
/// Возвращается из `DealScheduler::activate` и нужен для `deactivate`:
/// по нему отличаем живую раздачу от уже вытесненной.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DealHandle(pub u64);

impl fmt::Display for DealHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deal#{}", self.0)
    }
}
