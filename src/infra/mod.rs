//! Инфраструктурный слой вокруг планировщика раздачи:
//! - генерация токенов активаций;
//! - раскладка мест и вьюпорт (замеры экрана);
//! - рендер карт;
//! - таймеры завершения;
//! - диагностика.

pub mod diagnostics;
pub mod ids;
pub mod layout;
pub mod render;
pub mod timer;

pub use diagnostics::*;
pub use ids::*;
pub use layout::*;
pub use render::*;
pub use timer::*;
