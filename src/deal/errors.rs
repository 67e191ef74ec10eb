use thiserror::Error;

/// Ошибки настройки раздачи.
///
/// Сама анимация во время работы не падает никогда – эти ошибки
/// возможны только при сборке конфига/параметров до `activate`.
#[derive(Debug, Error)]
pub enum DealConfigError {
    #[error("Количество карт на игрока должно быть не меньше 1")]
    ZeroCardsPerRecipient,

    #[error("Длительность полёта карты не может быть нулевой")]
    ZeroFlightDuration,

    #[error("Начальный масштаб карты должен быть в диапазоне [0, 1), получено {0}")]
    InvalidStartScale(f32),

    #[error("Legacy-профиль считает итог ровно по 3 слотам, получено {0}")]
    LegacySlotFactor(u32),

    #[error("Не удалось разобрать JSON тайминга: {0}")]
    Json(#[from] serde_json::Error),
}
