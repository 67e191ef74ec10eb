// src/deal/mod.rs
//! Анимация раздачи: карты "летят" из центра стола к каждому месту.
//!
//! Здесь собираем:
//! - правила тайминга (`DealTiming`);
//! - расчёт плана (`FlightPlan`, `CardFlightUnit`);
//! - токен активации (`DealHandle`);
//! - сам планировщик `DealScheduler` со state machine Idle/Running.

pub mod errors;
pub mod flight;
pub mod handle;
pub mod scheduler;
pub mod timing;

pub use errors::DealConfigError;
pub use flight::{CardFlightUnit, FlightPlan};
pub use handle::DealHandle;
pub use scheduler::{DealActivation, DealScheduler};
pub use timing::{CardsPerRecipient, DealTiming, TimingProfile, LEGACY_SLOT_FACTOR};
