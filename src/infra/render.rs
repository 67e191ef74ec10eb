use std::cell::RefCell;
use std::rc::Rc;

use crate::api::dto::FlightUnitDto;
use crate::deal::CardFlightUnit;

/// Слой отрисовки: получает готовые данные, сам двигает пиксели.
///
/// `render` заменяет текущий набор карт целиком,
/// `clear` убирает всё, чтобы не оставалось "зависших" рубашек.
pub trait FlightRenderer {
    fn render(&mut self, units: &[CardFlightUnit]);
    fn clear(&mut self);
}

#[derive(Debug, Default)]
struct RenderLog {
    visible: Vec<CardFlightUnit>,
    render_calls: usize,
    clear_calls: usize,
}

/// Рендер, который просто запоминает, что ему показали.
/// Клоны делят один журнал – удобно проверять в тестах и в dev-CLI.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    log: Rc<RefCell<RenderLog>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Что сейчас на экране.
    pub fn visible(&self) -> Vec<CardFlightUnit> {
        self.log.borrow().visible.clone()
    }

    pub fn render_calls(&self) -> usize {
        self.log.borrow().render_calls
    }

    pub fn clear_calls(&self) -> usize {
        self.log.borrow().clear_calls
    }
}

impl FlightRenderer for RecordingRenderer {
    fn render(&mut self, units: &[CardFlightUnit]) {
        let mut log = self.log.borrow_mut();
        log.visible = units.to_vec();
        log.render_calls += 1;
    }

    fn clear(&mut self) {
        let mut log = self.log.borrow_mut();
        log.visible.clear();
        log.clear_calls += 1;
    }
}

/// Рендер для JS-хоста: сериализует карты в JSON и отдаёт строку в `sink`
/// (например, в `postMessage` или в состояние компонента).
/// Масштаб появления берётся из самих карт, то есть из `DealTiming`.
pub struct JsonRenderer<F>
where
    F: FnMut(String),
{
    sink: F,
}

impl<F> JsonRenderer<F>
where
    F: FnMut(String),
{
    pub fn new(sink: F) -> Self {
        Self { sink }
    }
}

impl<F> FlightRenderer for JsonRenderer<F>
where
    F: FnMut(String),
{
    fn render(&mut self, units: &[CardFlightUnit]) {
        let dtos: Vec<FlightUnitDto> = units
            .iter()
            .map(FlightUnitDto::from_unit)
            .collect();

        match serde_json::to_string(&dtos) {
            Ok(json) => (self.sink)(json),
            Err(err) => tracing::warn!(error = %err, units = units.len(), "failed to serialize flight units"),
        }
    }

    fn clear(&mut self) {
        (self.sink)("[]".to_string());
    }
}
