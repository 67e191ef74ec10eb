//! Доменная модель стола: карты, декодер кодов карт, колода, места и геометрия.

pub mod card;
pub mod deck;
pub mod decode;
pub mod geometry;
pub mod recipient;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use deck::*;
pub use decode::*;
pub use geometry::*;
pub use recipient::*;
