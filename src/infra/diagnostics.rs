use std::cell::RefCell;
use std::rc::Rc;

use crate::deal::{DealHandle, FlightPlan};
use crate::domain::{Recipient, RecipientId};

/// Почему раздача перешла в Idle с вызовом колбэка.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionReason {
    /// Истёк таймер общей длительности.
    TimerExpired,
    /// Явный `deactivate` с живым токеном.
    Deactivated,
}

/// Диагностика планировщика. Вызывается из планировщика, а не из рендера,
/// поэтому в проде её можно заглушить, не трогая отрисовку.
///
/// Все методы по умолчанию ничего не делают.
pub trait DealDiagnostics {
    fn activated(&self, _handle: DealHandle, _plan: &FlightPlan) {}

    /// Якорь места не нашёлся – карты полетят в `{0, 0}`.
    fn anchor_unresolved(&self, _handle: DealHandle, _recipient: &Recipient) {}

    fn superseded(&self, _previous: DealHandle, _next: DealHandle) {}

    fn completed(&self, _handle: DealHandle, _reason: CompletionReason) {}

    /// Раздачу сняли без колбэка (размонтирование хоста).
    fn cancelled(&self, _handle: DealHandle) {}

    /// `deactivate` с токеном, который уже не активен.
    fn stale_deactivate(&self, _handle: DealHandle) {}
}

/// Ничего не пишет.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDiagnostics;

impl DealDiagnostics for NoopDiagnostics {}

/// Структурные логи через `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl DealDiagnostics for TracingDiagnostics {
    fn activated(&self, handle: DealHandle, plan: &FlightPlan) {
        tracing::debug!(
            handle = %handle,
            units = plan.len(),
            total_ms = plan.total_duration.as_millis() as u64,
            "deal activated"
        );
    }

    fn anchor_unresolved(&self, handle: DealHandle, recipient: &Recipient) {
        tracing::warn!(
            handle = %handle,
            recipient = %recipient.id,
            anchor = %recipient.anchor.0,
            "seat anchor not found, dealing to origin"
        );
    }

    fn superseded(&self, previous: DealHandle, next: DealHandle) {
        tracing::debug!(previous = %previous, next = %next, "deal superseded");
    }

    fn completed(&self, handle: DealHandle, reason: CompletionReason) {
        tracing::debug!(handle = %handle, ?reason, "deal completed");
    }

    fn cancelled(&self, handle: DealHandle) {
        tracing::debug!(handle = %handle, "deal cancelled");
    }

    fn stale_deactivate(&self, handle: DealHandle) {
        tracing::trace!(handle = %handle, "deactivate ignored for inactive handle");
    }
}

/// Событие для `RecordingDiagnostics`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticEvent {
    Activated { handle: DealHandle, units: usize },
    AnchorUnresolved { handle: DealHandle, recipient: RecipientId },
    Superseded { previous: DealHandle, next: DealHandle },
    Completed { handle: DealHandle, reason: CompletionReason },
    Cancelled { handle: DealHandle },
    StaleDeactivate { handle: DealHandle },
}

/// Копит события в общий журнал (клоны делят журнал). Для тестов.
#[derive(Clone, Debug, Default)]
pub struct RecordingDiagnostics {
    events: Rc<RefCell<Vec<DiagnosticEvent>>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.borrow().clone()
    }

    fn push(&self, event: DiagnosticEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl DealDiagnostics for RecordingDiagnostics {
    fn activated(&self, handle: DealHandle, plan: &FlightPlan) {
        self.push(DiagnosticEvent::Activated { handle, units: plan.len() });
    }

    fn anchor_unresolved(&self, handle: DealHandle, recipient: &Recipient) {
        self.push(DiagnosticEvent::AnchorUnresolved {
            handle,
            recipient: recipient.id.clone(),
        });
    }

    fn superseded(&self, previous: DealHandle, next: DealHandle) {
        self.push(DiagnosticEvent::Superseded { previous, next });
    }

    fn completed(&self, handle: DealHandle, reason: CompletionReason) {
        self.push(DiagnosticEvent::Completed { handle, reason });
    }

    fn cancelled(&self, handle: DealHandle) {
        self.push(DiagnosticEvent::Cancelled { handle });
    }

    fn stale_deactivate(&self, handle: DealHandle) {
        self.push(DiagnosticEvent::StaleDeactivate { handle });
    }
}
