// src/bin/deal_dev_cli.rs
//
// Прогон одной раздачи на виртуальных часах:
//   deal_dev_cli [мест=6] [путь к JSON тайминга]
//
// Одно место специально без якоря – его карты должны уйти в {0, 0}.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use card_table::api::card_faces;
use card_table::deal::{CardsPerRecipient, DealScheduler, DealTiming};
use card_table::domain::{Deck, Point, Recipient};
use card_table::infra::{
    CompletionTimer, FixedViewport, InMemoryLayout, ManualTimer, RecordingRenderer,
    TracingDiagnostics,
};

const VIEWPORT_W: f64 = 1280.0;
const VIEWPORT_H: f64 = 720.0;
const TICK: Duration = Duration::from_millis(100);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .without_time()
        .init();

    let mut args = std::env::args().skip(1);
    let seats: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(6);

    let timing = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| DealTiming::from_json_str(&json).map_err(|e| e.to_string()))
        {
            Ok(t) => t,
            Err(err) => {
                eprintln!("Не удалось загрузить тайминг из {path}: {err}");
                std::process::exit(1);
            }
        },
        None => DealTiming::standard(),
    };

    println!("=== DEAL DEV CLI ===");
    println!("Мест: {seats}, профиль: {:?}\n", timing.profile);

    // 1. Рассаживаем игроков по эллипсу вокруг центра.
    let layout = InMemoryLayout::new();
    let recipients: Vec<Recipient> = (0..seats).map(|i| Recipient::seat(format!("p{}", i + 1))).collect();

    for (i, r) in recipients.iter().enumerate() {
        // Последнее место без якоря.
        if seats > 1 && i == seats - 1 {
            continue;
        }
        let angle = std::f64::consts::TAU * i as f64 / seats as f64;
        let at = Point::new(
            VIEWPORT_W / 2.0 + angle.cos() * VIEWPORT_W * 0.4,
            VIEWPORT_H / 2.0 + angle.sin() * VIEWPORT_H * 0.4,
        );
        layout.place(&r.anchor, at);
    }

    // 2. Лицевые стороны – то, что откроется после раздачи.
    let mut deck = Deck::standard_52();
    deck.cards.shuffle(&mut StdRng::seed_from_u64(42));

    let cards = CardsPerRecipient::STANDARD;
    for r in &recipients {
        let hand = Deck { cards: deck.draw_n(cards.get()) };
        let faces: Vec<String> = card_faces(hand.codes().as_slice())
            .into_iter()
            .map(|f| format!("{}{}({})", f.label, f.glyph, f.color_class))
            .collect();
        println!("  {:>4}: {}", r.id, faces.join(" "));
    }
    println!();

    // 3. Сама раздача.
    let timer = ManualTimer::new();
    let renderer = RecordingRenderer::new();
    let scheduler = DealScheduler::new(
        timer.clone(),
        layout,
        FixedViewport::new(VIEWPORT_W, VIEWPORT_H),
        renderer.clone(),
    )
    .with_timing(timing)
    .with_diagnostics(TracingDiagnostics);

    let done = Rc::new(Cell::new(false));
    let done_flag = done.clone();
    let handle = scheduler.activate(recipients, cards, move || done_flag.set(true));

    for unit in scheduler.flight_units() {
        println!(
            "  p={} c={} -> ({:>7.1}, {:>7.1}) delay={:.2}s",
            unit.recipient_index,
            unit.card_index,
            unit.destination.x,
            unit.destination.y,
            unit.delay.as_secs_f64(),
        );
    }

    let total = scheduler
        .snapshot()
        .map(|s| s.plan.total_duration)
        .unwrap_or_default();
    println!("\n{handle}: всего {:.2}s, карт на экране: {}", total.as_secs_f64(), renderer.visible().len());

    // 4. Крутим часы, пока не придёт завершение.
    while !done.get() {
        timer.advance(TICK);
    }

    println!(
        "Раздача завершена на {:.2}s, карт на экране: {}",
        timer.now().as_secs_f64(),
        renderer.visible().len()
    );
}
