use serde::{Deserialize, Serialize};

use crate::deal::CardFlightUnit;
use crate::domain::{decode, DecodedCard};

/// Кадр анимации появления карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct RevealKeyframe {
    pub scale: f32,
    pub opacity: f32,
}

impl RevealKeyframe {
    pub const fn hidden(scale: f32) -> Self {
        Self { scale, opacity: 0.0 }
    }

    pub const fn shown() -> Self {
        Self {
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

/// DTO одной карты для фронта.
///
/// Карта НЕ едет из центра: она стоит в точке назначения и "вырастает"
/// из `from` в `to` через `delay_secs`. Позиционную интерполяцию не делаем,
/// переход целиком на декларативном keyframe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightUnitDto {
    pub recipient_id: String,
    pub player_index: usize,
    pub card_index: usize,
    pub x: f64,
    pub y: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub delay_secs: f64,
    pub duration_secs: f64,
    pub from: RevealKeyframe,
    pub to: RevealKeyframe,
}

impl FlightUnitDto {
    pub fn from_unit(unit: &CardFlightUnit) -> Self {
        Self {
            recipient_id: unit.recipient_id.0.clone(),
            player_index: unit.recipient_index,
            card_index: unit.card_index,
            x: unit.destination.x,
            y: unit.destination.y,
            origin_x: unit.origin.x,
            origin_y: unit.origin.y,
            delay_secs: unit.delay.as_secs_f64(),
            duration_secs: unit.duration.as_secs_f64(),
            from: RevealKeyframe::hidden(unit.start_scale),
            to: RevealKeyframe::shown(),
        }
    }
}

/// DTO лицевой стороны карты (для отрисовки мест и стола).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardFaceDto {
    pub code: String,
    pub label: String,
    pub glyph: String,
    pub color_class: String,
    /// Код ещё не пришёл или битый – рисуем пустую карту.
    pub placeholder: bool,
}

impl CardFaceDto {
    pub fn from_code(code: &str) -> Self {
        let decoded: DecodedCard = decode(code);
        Self {
            code: code.to_string(),
            placeholder: decoded.is_placeholder(),
            color_class: decoded.color_class().to_string(),
            label: decoded.label,
            glyph: decoded.glyph,
        }
    }
}

/// Лицевые стороны для набора кодов (рука игрока, борд).
pub fn card_faces<S: AsRef<str>>(codes: &[S]) -> Vec<CardFaceDto> {
    codes.iter().map(|c| CardFaceDto::from_code(c.as_ref())).collect()
}
