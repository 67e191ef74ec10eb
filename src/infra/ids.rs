use std::sync::atomic::{AtomicU64, Ordering};

use crate::deal::DealHandle;

/// Генерация токенов активаций на монотонном счётчике.
///
/// Один генератор на планировщик: токены не повторяются,
/// поэтому "протухший" токен никогда не совпадёт с живой раздачей.
#[derive(Debug)]
pub struct HandleGenerator {
    counter: AtomicU64,
}

impl HandleGenerator {
    /// Создать генератор, первый токен = 1.
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_handle(&self) -> DealHandle {
        DealHandle(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for HandleGenerator {
    fn default() -> Self {
        Self::new()
    }
}
