// src/deal/timing.rs
//! Конфигурация тайминга анимации раздачи.
//!
//! Здесь описываем только "правила", без состояния и без привязки к конкретной раздаче.
//! Все интервалы храним в целых миллисекундах: так формула задержек
//! воспроизводится бит-в-бит, без накопления ошибки f64.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::DealConfigError;

/// Множитель слотов исторической формулы.
pub const LEGACY_SLOT_FACTOR: u32 = 3;

/// Как считать общую длительность раздачи.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimingProfile {
    /// Историческая формула фронта: `R * 3 * player_stagger + flight`.
    /// Фиксированный множитель 3 не зависит от реального числа карт,
    /// поэтому при K > 3 итог может оказаться меньше, чем долетит последняя карта.
    #[default]
    Legacy,
    /// Исправленная формула: задержка последней карты + полёт.
    Exact,
}

/// Правила тайминга одной раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DealTiming {
    /// Сдвиг между соседними игроками (мс).
    pub player_stagger_ms: u32,
    /// Сдвиг между картами одного игрока (мс).
    pub card_stagger_ms: u32,
    /// Сколько длится появление одной карты (мс).
    pub flight_ms: u32,
    /// Множитель "слотов" в Legacy-формуле общей длительности.
    /// В профиле `Legacy` обязан быть `LEGACY_SLOT_FACTOR`, иначе `validate` вернёт ошибку.
    pub legacy_slot_factor: u32,
    /// С какого масштаба карта вырастает до 1.0.
    pub start_scale: f32,
    pub profile: TimingProfile,
}

impl Default for DealTiming {
    fn default() -> Self {
        Self::standard()
    }
}

impl DealTiming {
    /// Стандартный профиль: 0.15 с между игроками, 0.10 с между картами,
    /// полёт 0.5 с, Legacy-итог.
    pub const fn standard() -> Self {
        Self {
            player_stagger_ms: 150,
            card_stagger_ms: 100,
            flight_ms: 500,
            legacy_slot_factor: LEGACY_SLOT_FACTOR,
            start_scale: 0.2,
            profile: TimingProfile::Legacy,
        }
    }

    /// То же, но общая длительность считается по последней карте.
    pub const fn exact() -> Self {
        let mut t = Self::standard();
        t.profile = TimingProfile::Exact;
        t
    }

    pub const fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Legacy => Self::standard(),
            TimingProfile::Exact => Self::exact(),
        }
    }

    /// Загрузить правила из JSON. Отсутствующие поля берутся из `standard()`.
    pub fn from_json_str(json: &str) -> Result<Self, DealConfigError> {
        let timing: DealTiming = serde_json::from_str(json)?;
        timing.validate()?;
        Ok(timing)
    }

    pub fn validate(&self) -> Result<(), DealConfigError> {
        if self.flight_ms == 0 {
            return Err(DealConfigError::ZeroFlightDuration);
        }
        if !(0.0..1.0).contains(&self.start_scale) {
            return Err(DealConfigError::InvalidStartScale(self.start_scale));
        }
        if self.profile == TimingProfile::Legacy && self.legacy_slot_factor != LEGACY_SLOT_FACTOR {
            return Err(DealConfigError::LegacySlotFactor(self.legacy_slot_factor));
        }
        Ok(())
    }

    /// `p * player_stagger + c * card_stagger`.
    pub fn delay_for(&self, player_index: usize, card_index: usize) -> Duration {
        let ms = (player_index as u64).saturating_mul(self.player_stagger_ms as u64)
            + (card_index as u64).saturating_mul(self.card_stagger_ms as u64);
        Duration::from_millis(ms)
    }

    pub fn flight(&self) -> Duration {
        Duration::from_millis(self.flight_ms as u64)
    }

    /// Через сколько после старта раздача считается завершённой.
    pub fn total_for(&self, recipients: usize, cards_per_recipient: CardsPerRecipient) -> Duration {
        match self.profile {
            TimingProfile::Legacy => {
                let lead = (recipients as u64)
                    .saturating_mul(self.legacy_slot_factor as u64)
                    .saturating_mul(self.player_stagger_ms as u64);
                Duration::from_millis(lead) + self.flight()
            }
            TimingProfile::Exact => {
                if recipients == 0 {
                    return Duration::ZERO;
                }
                self.delay_for(recipients - 1, cards_per_recipient.get() - 1) + self.flight()
            }
        }
    }
}

/// Сколько карт получает каждый игрок (K ≥ 1).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "usize", into = "usize")]
pub struct CardsPerRecipient(usize);

impl CardsPerRecipient {
    /// Три карты на руку – то, под что рассчитана Legacy-формула.
    pub const STANDARD: CardsPerRecipient = CardsPerRecipient(3);

    pub fn new(count: usize) -> Result<Self, DealConfigError> {
        if count == 0 {
            return Err(DealConfigError::ZeroCardsPerRecipient);
        }
        Ok(Self(count))
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for CardsPerRecipient {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TryFrom<usize> for CardsPerRecipient {
    type Error = DealConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CardsPerRecipient> for usize {
    fn from(value: CardsPerRecipient) -> Self {
        value.0
    }
}
