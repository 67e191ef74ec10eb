// src/domain/decode.rs
//! Декодер кода карты для отрисовки лицевой стороны.
//!
//! Коды приходят с бэкенда раньше, чем готовы данные, поэтому пустой
//! или битый код – нормальная ситуация: отдаём заглушку, а не ошибку.

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, CardColor, Suit};

/// Что рисуем на лицевой стороне карты.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DecodedCard {
    /// Подпись ранга: "A", "10", "7" ...
    pub label: String,
    /// Глиф масти: ♠ ♥ ♦ ♣ (или сам символ, если масть неизвестна).
    pub glyph: String,
    pub color: CardColor,
}

impl DecodedCard {
    /// Заглушка: пустая подпись, пустой глиф, чёрный цвет.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        self.label.is_empty() && self.glyph.is_empty()
    }

    /// CSS-класс цвета (`"red"` / `"black"`).
    pub fn color_class(&self) -> &'static str {
        self.color.class()
    }
}

impl From<Card> for DecodedCard {
    fn from(card: Card) -> Self {
        Self {
            label: card.rank.label().to_string(),
            glyph: card.suit.glyph().to_string(),
            color: card.suit.color(),
        }
    }
}

/// Числовые ранги бэкенда -> буквенные. Остальное оставляем как есть.
fn normalize_rank(raw: &str) -> &str {
    match raw {
        "1" | "14" => "A",
        "11" => "J",
        "12" => "Q",
        "13" => "K",
        other => other,
    }
}

/// Разобрать код карты (`"AS"`, `"10H"`, `"14D"`) в то, что рисует фронт.
///
/// Тотальная функция: любой вход (включая `None` и `""`) даёт результат.
/// Код короче двух символов -> `DecodedCard::placeholder()`.
pub fn decode<'a>(code: impl Into<Option<&'a str>>) -> DecodedCard {
    let Some(code) = code.into() else {
        return DecodedCard::placeholder();
    };

    // Последний символ – масть, всё до него – ранг.
    let (split_at, suit_ch) = match code.char_indices().last() {
        Some((idx, ch)) if idx > 0 => (idx, ch),
        _ => return DecodedCard::placeholder(),
    };

    let label = normalize_rank(&code[..split_at]).to_string();
    let suit_lower: String = suit_ch.to_lowercase().collect();

    let (glyph, color) = match suit_lower.chars().next().and_then(Suit::from_char) {
        Some(suit) if suit_lower.chars().count() == 1 => (suit.glyph().to_string(), suit.color()),
        _ => (suit_lower, CardColor::Black),
    };

    DecodedCard { label, glyph, color }
}
