// src/deal/scheduler.rs
//! Планировщик анимации раздачи.
//!
//! Два состояния: Idle и Running.
//! - `activate` – Idle -> Running: центр стола, позиции мест, план, рендер, таймер;
//! - истечение таймера или `deactivate(handle)` – Running -> Idle: колбэк ровно один раз,
//!   потом очистка рендера;
//! - повторный `activate` во время Running отменяет старый таймер, старый колбэк не зовётся.
//!
//! Однопоточная модель: состояние в `Rc`, изменяемые части в `RefCell`,
//! таймер держит только `Weak`.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{Point, Recipient};
use crate::infra::{
    CompletionReason, CompletionTimer, DealDiagnostics, FlightRenderer, HandleGenerator,
    LayoutProvider, NoopDiagnostics, TimerGuard, ViewportProvider,
};

use super::{CardFlightUnit, CardsPerRecipient, DealHandle, DealTiming, FlightPlan};

/// Данные живой раздачи (то, что можно показать наружу).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DealActivation {
    pub handle: DealHandle,
    pub recipients: Vec<Recipient>,
    pub cards_per_recipient: CardsPerRecipient,
    /// Центр стола, снятый один раз при активации.
    pub origin: Point,
    /// Время таймера в момент активации.
    pub started_at: Duration,
    pub plan: FlightPlan,
}

/// Живая раздача + то, что нельзя клонировать: колбэк и таймер.
struct LiveActivation {
    info: DealActivation,
    on_complete: Box<dyn FnOnce()>,
    // Drop = отмена таймера.
    timer: TimerGuard,
}

/// Общие данные планировщика. Каждая часть в своей ячейке: пока рендер
/// или диагностика работают, остальное состояние не занято, и коллаборатор
/// может спросить планировщик о текущей раздаче.
struct SchedulerState {
    layout: Box<dyn LayoutProvider>,
    viewport: Box<dyn ViewportProvider>,
    renderer: RefCell<Box<dyn FlightRenderer>>,
    diagnostics: RefCell<Box<dyn DealDiagnostics>>,
    timing: RefCell<DealTiming>,
    active: RefCell<Option<LiveActivation>>,
}

/// Планировщик раздачи. Одновременно живёт максимум одна активация.
pub struct DealScheduler<T: CompletionTimer> {
    state: Rc<SchedulerState>,
    timer: T,
    handles: HandleGenerator,
}

impl<T: CompletionTimer> DealScheduler<T> {
    /// Создать планировщик со стандартным таймингом и без диагностики.
    pub fn new<L, V, R>(timer: T, layout: L, viewport: V, renderer: R) -> Self
    where
        L: LayoutProvider + 'static,
        V: ViewportProvider + 'static,
        R: FlightRenderer + 'static,
    {
        let state = SchedulerState {
            layout: Box::new(layout),
            viewport: Box::new(viewport),
            renderer: RefCell::new(Box::new(renderer)),
            diagnostics: RefCell::new(Box::new(NoopDiagnostics)),
            timing: RefCell::new(DealTiming::standard()),
            active: RefCell::new(None),
        };

        Self {
            state: Rc::new(state),
            timer,
            handles: HandleGenerator::new(),
        }
    }

    pub fn with_timing(self, timing: DealTiming) -> Self {
        *self.state.timing.borrow_mut() = timing;
        self
    }

    pub fn with_diagnostics<D>(self, diagnostics: D) -> Self
    where
        D: DealDiagnostics + 'static,
    {
        *self.state.diagnostics.borrow_mut() = Box::new(diagnostics);
        self
    }

    pub fn timing(&self) -> DealTiming {
        self.state.timing.borrow().clone()
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn is_running(&self) -> bool {
        self.state.active.borrow().is_some()
    }

    pub fn active_handle(&self) -> Option<DealHandle> {
        self.state.active.borrow().as_ref().map(|a| a.info.handle)
    }

    /// Снимок живой раздачи (без колбэка и таймера).
    pub fn snapshot(&self) -> Option<DealActivation> {
        self.state.active.borrow().as_ref().map(|a| a.info.clone())
    }

    /// Карты текущей раздачи в порядке (p, c). Пусто в Idle.
    pub fn flight_units(&self) -> Vec<CardFlightUnit> {
        self.state
            .active
            .borrow()
            .as_ref()
            .map(|a| a.info.plan.units.clone())
            .unwrap_or_default()
    }

    /// Запустить раздачу.
    ///
    /// Если идёт предыдущая – её таймер отменяется, а колбэк так и не вызывается.
    /// Не найденный якорь места не ломает раздачу: его карты летят в `{0, 0}`.
    ///
    /// Коллабораторы вызываются без заёма `active`: рендер и диагностика
    /// могут читать `is_running`/`flight_units` и видят уже новую раздачу.
    pub fn activate<F>(
        &self,
        recipients: Vec<Recipient>,
        cards_per_recipient: CardsPerRecipient,
        on_complete: F,
    ) -> DealHandle
    where
        F: FnOnce() + 'static,
    {
        let state = &self.state;
        let handle = self.handles.next_handle();

        // 1. Снимаем предыдущую раздачу. Дропаем её уже без заёма состояния.
        let previous = state.active.borrow_mut().take();
        if let Some(previous) = previous {
            state
                .diagnostics
                .borrow()
                .superseded(previous.info.handle, handle);
            drop(previous);
        }

        // 2. Центр стола и позиции мест – один раз на активацию.
        let origin = state.viewport.viewport().center();
        let destinations: Vec<_> = recipients
            .iter()
            .map(|recipient| {
                let point = state.layout.anchor_center(recipient).unwrap_or_else(|| {
                    state.diagnostics.borrow().anchor_unresolved(handle, recipient);
                    Point::ORIGIN
                });
                (recipient.id.clone(), point)
            })
            .collect();

        // 3. План.
        let timing = state.timing.borrow().clone();
        let plan = FlightPlan::build(origin, &destinations, cards_per_recipient, &timing);
        let rendered = plan.clone();

        // 4. Единственный таймер завершения. Срабатывает не раньше следующего хода.
        let started_at = self.timer.now();
        let weak: Weak<SchedulerState> = Rc::downgrade(state);
        let timer = self.timer.schedule(
            plan.total_duration,
            Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    finish(&state, handle, CompletionReason::TimerExpired);
                }
            }),
        );

        let live = LiveActivation {
            info: DealActivation {
                handle,
                recipients,
                cards_per_recipient,
                origin,
                started_at,
                plan,
            },
            on_complete: Box::new(on_complete),
            timer,
        };
        let displaced = state.active.borrow_mut().replace(live);
        drop(displaced);

        // 5. Рендер и диагностика.
        state.renderer.borrow_mut().render(&rendered.units);
        state.diagnostics.borrow().activated(handle, &rendered);

        handle
    }

    /// Завершить раздачу досрочно: колбэк вызывается сразу, таймер отменяется.
    ///
    /// Чужой или уже завершённый токен – no-op, возвращаем `false`.
    pub fn deactivate(&self, handle: DealHandle) -> bool {
        let finished = finish(&self.state, handle, CompletionReason::Deactivated);
        if !finished {
            self.state.diagnostics.borrow().stale_deactivate(handle);
        }
        finished
    }

    /// Снять раздачу без колбэка (хост размонтируется).
    pub fn cancel(&self) {
        let live = self.state.active.borrow_mut().take();
        let Some(live) = live else {
            return;
        };

        let handle = live.info.handle;
        drop(live);

        self.state.renderer.borrow_mut().clear();
        self.state.diagnostics.borrow().cancelled(handle);
    }
}

impl<T: CompletionTimer> Drop for DealScheduler<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<T: CompletionTimer> fmt::Debug for DealScheduler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DealScheduler")
            .field("active", &self.active_handle())
            .finish()
    }
}

/// Running -> Idle для конкретного токена.
///
/// Колбэк зовётся без заёма состояния: из него можно снова вызвать `activate`.
/// Рендер чистим только если новая раздача не началась внутри колбэка.
fn finish(state: &SchedulerState, handle: DealHandle, reason: CompletionReason) -> bool {
    let live = {
        let mut active = state.active.borrow_mut();
        let current = active.as_ref().is_some_and(|a| a.info.handle == handle);
        if current {
            active.take()
        } else {
            None
        }
    };

    let Some(LiveActivation {
        info,
        on_complete,
        timer,
    }) = live
    else {
        return false;
    };

    state.diagnostics.borrow().completed(info.handle, reason);
    drop(timer);
    on_complete();

    let idle = state.active.borrow().is_none();
    if idle {
        state.renderer.borrow_mut().clear();
    }
    true
}
