//! Внешний API для фронта.
//!
//! Здесь только DTO (dto.rs) – удобные сериализуемые структуры,
//! которые уходят в слой отрисовки.

pub mod dto;

pub use dto::*;
