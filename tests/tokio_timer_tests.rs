// tests/tokio_timer_tests.rs
//
// Тот же планировщик, но таймер на tokio (spawn_local + sleep).
// Время на паузе: часы двигаем через tokio::time::advance.

#![cfg(feature = "tokio-timer")]

mod common;

use std::time::Duration;

use tokio::task::LocalSet;

use card_table::deal::{CardsPerRecipient, DealScheduler};
use card_table::infra::{FixedViewport, RecordingRenderer, TokioTimer, TracingDiagnostics};

use common::{init_logging, seated_table, CallCounter, VIEWPORT_H, VIEWPORT_W};

/// Дать задачам LocalSet поработать после сдвига часов.
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn tokio_timer_fires_at_total_duration() {
    init_logging();
    let local = LocalSet::new();

    local
        .run_until(async {
            let (recipients, layout) = seated_table(2);
            let renderer = RecordingRenderer::new();
            let scheduler = DealScheduler::new(
                TokioTimer::new(),
                layout,
                FixedViewport::new(VIEWPORT_W, VIEWPORT_H),
                renderer.clone(),
            )
            .with_diagnostics(TracingDiagnostics);
            let calls = CallCounter::new();

            scheduler.activate(recipients, CardsPerRecipient::STANDARD, calls.callback());
            assert_eq!(renderer.visible().len(), 6);

            // 2 * 3 * 0.15 + 0.5 = 1.4 s
            tokio::time::advance(Duration::from_millis(1399)).await;
            settle().await;
            assert_eq!(calls.get(), 0);
            assert!(scheduler.is_running());

            tokio::time::advance(Duration::from_millis(1)).await;
            settle().await;
            assert_eq!(calls.get(), 1);
            assert!(!scheduler.is_running());
            assert!(renderer.visible().is_empty());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn tokio_reactivation_aborts_first_timer() {
    init_logging();
    let local = LocalSet::new();

    local
        .run_until(async {
            let (recipients, layout) = seated_table(3);
            let scheduler = DealScheduler::new(
                TokioTimer::new(),
                layout,
                FixedViewport::new(VIEWPORT_W, VIEWPORT_H),
                RecordingRenderer::new(),
            );
            let first = CallCounter::new();
            let second = CallCounter::new();

            scheduler.activate(recipients.clone(), CardsPerRecipient::STANDARD, first.callback());
            tokio::time::advance(Duration::from_millis(300)).await;
            settle().await;
            scheduler.activate(recipients, CardsPerRecipient::STANDARD, second.callback());

            tokio::time::advance(Duration::from_secs(10)).await;
            settle().await;

            assert_eq!(first.get(), 0);
            assert_eq!(second.get(), 1);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn tokio_drop_cancels_timer() {
    init_logging();
    let local = LocalSet::new();

    local
        .run_until(async {
            let (recipients, layout) = seated_table(1);
            let scheduler = DealScheduler::new(
                TokioTimer::new(),
                layout,
                FixedViewport::new(VIEWPORT_W, VIEWPORT_H),
                RecordingRenderer::new(),
            );
            let calls = CallCounter::new();

            scheduler.activate(recipients, CardsPerRecipient::STANDARD, calls.callback());
            drop(scheduler);

            tokio::time::advance(Duration::from_secs(10)).await;
            settle().await;
            assert_eq!(calls.get(), 0);
        })
        .await;
}
