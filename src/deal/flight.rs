// src/deal/flight.rs
//! Расчёт плана раздачи: по одной "летящей" карте на пару (игрок, слот).
//!
//! Чистая функция от входа – без коллабораторов и без состояния.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{Point, RecipientId};

use super::{CardsPerRecipient, DealTiming};

/// Одна анимируемая рубашка карты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CardFlightUnit {
    /// Индекс игрока `p` в порядке раздачи.
    pub recipient_index: usize,
    /// Индекс карты `c` внутри руки игрока.
    pub card_index: usize,
    pub recipient_id: RecipientId,
    /// Центр стола на момент активации.
    pub origin: Point,
    /// Где карта появляется (центр якоря места).
    pub destination: Point,
    pub delay: Duration,
    pub duration: Duration,
    /// С какого масштаба карта вырастает до 1.0.
    pub start_scale: f32,
}

impl CardFlightUnit {
    /// Момент, когда карта полностью проявилась (от старта раздачи).
    pub fn finishes_at(&self) -> Duration {
        self.delay + self.duration
    }
}

/// Полный план одной раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FlightPlan {
    /// Карты в порядке (p, c) – в этом же порядке они уходят в рендер.
    pub units: Vec<CardFlightUnit>,
    /// Когда срабатывает завершение раздачи.
    pub total_duration: Duration,
}

impl FlightPlan {
    /// Построить план.
    ///
    /// `destinations` – уже разрешённые позиции игроков, в том же порядке,
    /// что и раздача. Пересчитывать их во время полёта нельзя.
    pub fn build(
        origin: Point,
        destinations: &[(RecipientId, Point)],
        cards_per_recipient: CardsPerRecipient,
        timing: &DealTiming,
    ) -> Self {
        let per_recipient = cards_per_recipient.get();
        let mut units = Vec::with_capacity(destinations.len() * per_recipient);

        for (p, (recipient_id, destination)) in destinations.iter().enumerate() {
            for c in 0..per_recipient {
                units.push(CardFlightUnit {
                    recipient_index: p,
                    card_index: c,
                    recipient_id: recipient_id.clone(),
                    origin,
                    destination: *destination,
                    delay: timing.delay_for(p, c),
                    duration: timing.flight(),
                    start_scale: timing.start_scale,
                });
            }
        }

        Self {
            units,
            total_duration: timing.total_for(destinations.len(), cards_per_recipient),
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Когда реально долетает последняя карта (0, если карт нет).
    pub fn last_card_finishes_at(&self) -> Duration {
        self.units
            .iter()
            .map(CardFlightUnit::finishes_at)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Карты конкретного игрока.
    pub fn units_for<'a>(&'a self, recipient_id: &'a RecipientId) -> impl Iterator<Item = &'a CardFlightUnit> + 'a {
        self.units.iter().filter(move |u| &u.recipient_id == recipient_id)
    }
}
