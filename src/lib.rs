//! Ядро отрисовки карточного стола.
//!
//! Две содержательные части:
//! - `domain::decode` – разбор кода карты ("AS", "10H", "14D") в то, что рисует фронт;
//! - `deal::DealScheduler` – анимация раздачи с таймингом, координатами и отменой.
//!
//! Всё остальное (замеры экрана, рендер, таймеры, логи) – коллабораторы из `infra`.

pub mod api;
pub mod deal;
pub mod domain;
pub mod infra;

pub use deal::{CardsPerRecipient, DealHandle, DealScheduler, DealTiming};
pub use domain::{decode, DecodedCard};
