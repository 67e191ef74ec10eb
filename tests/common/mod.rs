// tests/common/mod.rs
//
// Общие хелперы интеграционных тестов: логи + типовой стол.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use card_table::domain::{Point, Recipient};
use card_table::infra::InMemoryLayout;

static LOGGING: OnceCell<()> = OnceCell::new();

/// Логи для тестов: TEST_LOG -> RUST_LOG -> "warn".
/// Можно звать сколько угодно раз.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub const VIEWPORT_W: f64 = 1000.0;
pub const VIEWPORT_H: f64 = 600.0;

/// Места p1..pN, у каждого якорь `seat-pK` в точке (100*K, 50*K).
pub fn seated_table(n: usize) -> (Vec<Recipient>, InMemoryLayout) {
    let layout = InMemoryLayout::new();
    let recipients: Vec<Recipient> = (1..=n).map(|i| Recipient::seat(format!("p{i}"))).collect();
    for (i, r) in recipients.iter().enumerate() {
        layout.place(&r.anchor, seat_point(i));
    }
    (recipients, layout)
}

/// Где сидит место с индексом `i` в `seated_table`.
pub fn seat_point(i: usize) -> Point {
    let k = (i + 1) as f64;
    Point::new(100.0 * k, 50.0 * k)
}

/// Счётчик вызовов колбэка завершения.
#[derive(Clone, Default)]
pub struct CallCounter(Rc<Cell<u32>>);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }

    /// Колбэк, который увеличивает счётчик.
    pub fn callback(&self) -> impl FnOnce() + 'static {
        let cell = self.0.clone();
        move || cell.set(cell.get() + 1)
    }
}
