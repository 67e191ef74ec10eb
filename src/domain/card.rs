use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Цвет карты на столе. Совпадает с CSS-классом, который вешает рендер.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Red,
    #[default]
    Black,
}

impl CardColor {
    /// Имя CSS-класса: `"red"` / `"black"`.
    pub const fn class(self) -> &'static str {
        match self {
            CardColor::Red => "red",
            CardColor::Black => "black",
        }
    }
}

/// Масть карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,    // ♣
    Diamonds, // ♦
    Hearts,   // ♥
    Spades,   // ♠
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Масть по букве кода (`S/H/D/C`, регистр не важен).
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    pub const fn color(self) -> CardColor {
        match self {
            Suit::Diamonds | Suit::Hearts => CardColor::Red,
            Suit::Clubs | Suit::Spades => CardColor::Black,
        }
    }
}

/// Ранг карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Подпись ранга на лицевой стороне карты.
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    /// Строгий разбор ранга из кода.
    ///
    /// Принимает подписи `2..10/J/Q/K/A`, старое `T` для десятки
    /// и числовые алиасы бэкенда: 1 и 14 – туз, 11..13 – картинки.
    pub fn from_label(raw: &str) -> Option<Self> {
        let rank = match raw.to_ascii_uppercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" | "11" => Rank::Jack,
            "Q" | "12" => Rank::Queen,
            "K" | "13" => Rank::King,
            "A" | "1" | "14" => Rank::Ace,
            _ => return None,
        };
        Some(rank)
    }
}

/// Обычная карта 52-карточной колоды.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Card {
    /// Формат кода карты: `AS`, `10H`, `7C`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Ошибки строгого разбора кода карты.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("Код карты должен содержать ранг и масть, получено {0:?}")]
    TooShort(String),

    #[error("Неизвестный ранг: {0:?}")]
    InvalidRank(String),

    #[error("Неизвестная масть: {0:?}")]
    InvalidSuit(char),
}

/// Строгий парсинг кода вида "AS", "10h", "14D".
///
/// Для отрисовки используется `decode`, который никогда не падает;
/// здесь же битый код – это ошибка.
impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (split_at, suit_ch) = match trimmed.char_indices().last() {
            Some((idx, ch)) if idx > 0 => (idx, ch),
            _ => return Err(CardParseError::TooShort(trimmed.to_string())),
        };

        let rank_raw = &trimmed[..split_at];
        let rank = Rank::from_label(rank_raw)
            .ok_or_else(|| CardParseError::InvalidRank(rank_raw.to_string()))?;
        let suit = Suit::from_char(suit_ch).ok_or(CardParseError::InvalidSuit(suit_ch))?;

        Ok(Card { rank, suit })
    }
}
