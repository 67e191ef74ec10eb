// src/infra/timer.rs
//! Отложенный таймер завершения раздачи.
//!
//! Ровно один таймер на активацию. Он живёт внутри `TimerGuard`:
//! guard дропнули – таймер отменён, на любом пути выхода.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Колбэк, который таймер вызывает по истечении срока.
pub type TimerCallback = Box<dyn FnOnce()>;

/// Владение запущенным таймером. Drop = отмена.
pub struct TimerGuard {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerGuard {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TimerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerGuard")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Источник отложенных вызовов для планировщика.
///
/// Требование к реализациям: `schedule` никогда не вызывает `fire`
/// синхронно, даже при нулевой задержке – только на следующем "ходе" цикла.
pub trait CompletionTimer {
    /// Монотонное время таймера (от его создания).
    fn now(&self) -> Duration;

    fn schedule(&self, after: Duration, fire: TimerCallback) -> TimerGuard;
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), TimerCallback>,
}

/// Таймер на виртуальных часах: время двигает вызывающий код через `advance`.
///
/// Для тестов и dev-CLI. Клоны делят одни часы.
#[derive(Clone, Default)]
pub struct ManualTimer {
    state: Rc<RefCell<ManualState>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сколько таймеров ещё ждут срабатывания.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.state.borrow().pending.keys().next().map(|(at, _)| *at)
    }

    /// Сдвинуть часы на `by` и вызвать всё, что успело истечь,
    /// в порядке дедлайнов. Возвращает число сработавших таймеров.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.borrow().now + by;
        let mut fired = 0;

        loop {
            // Заём отпускаем до вызова колбэка: он может ставить и отменять таймеры.
            let due = {
                let mut state = self.state.borrow_mut();
                let key = match state.pending.keys().next() {
                    Some(key) if key.0 <= target => *key,
                    _ => break,
                };
                state.now = state.now.max(key.0);
                state.pending.remove(&key)
            };

            if let Some(fire) = due {
                fire();
                fired += 1;
            }
        }

        self.state.borrow_mut().now = target;
        fired
    }

    /// Докрутить часы до последнего известного дедлайна.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.next_deadline() {
            let now = self.now();
            fired += self.advance(deadline.saturating_sub(now));
        }
        fired
    }
}

impl fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualTimer")
            .field("now", &state.now)
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl CompletionTimer for ManualTimer {
    fn now(&self) -> Duration {
        self.state.borrow().now
    }

    fn schedule(&self, after: Duration, fire: TimerCallback) -> TimerGuard {
        let key = {
            let mut state = self.state.borrow_mut();
            let key = (state.now + after, state.next_seq);
            state.next_seq += 1;
            state.pending.insert(key, fire);
            key
        };

        let weak: Weak<RefCell<ManualState>> = Rc::downgrade(&self.state);
        TimerGuard::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().pending.remove(&key);
            }
        })
    }
}

/// Таймер поверх tokio: `spawn_local` + `sleep`, отмена через `abort`.
///
/// Работает только внутри `tokio::task::LocalSet` – колбэки не `Send`.
#[cfg(feature = "tokio-timer")]
#[derive(Clone, Debug)]
pub struct TokioTimer {
    started: tokio::time::Instant,
}

#[cfg(feature = "tokio-timer")]
impl TokioTimer {
    pub fn new() -> Self {
        Self {
            started: tokio::time::Instant::now(),
        }
    }
}

#[cfg(feature = "tokio-timer")]
impl Default for TokioTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tokio-timer")]
impl CompletionTimer for TokioTimer {
    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn schedule(&self, after: Duration, fire: TimerCallback) -> TimerGuard {
        // Дедлайн фиксируем сейчас, а не при первом опросе задачи.
        let deadline = tokio::time::Instant::now() + after;
        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep_until(deadline).await;
            fire();
        });
        TimerGuard::new(move || task.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn manual_timer_fires_in_deadline_order() {
        let timer = ManualTimer::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let o1 = order.clone();
        let _late = timer.schedule(Duration::from_millis(300), Box::new(move || o1.borrow_mut().push(300)));
        let o2 = order.clone();
        let _early = timer.schedule(Duration::from_millis(100), Box::new(move || o2.borrow_mut().push(100)));

        assert_eq!(timer.advance(Duration::from_millis(99)), 0);
        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
        assert_eq!(timer.advance(Duration::from_secs(1)), 1);
        assert_eq!(*order.borrow(), vec![100, 300]);
        assert_eq!(timer.now(), Duration::from_millis(1100));
    }

    #[test]
    fn dropping_guard_cancels() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();

        let guard = timer.schedule(Duration::from_millis(10), Box::new(move || f.set(true)));
        assert_eq!(timer.pending(), 1);
        drop(guard);
        assert_eq!(timer.pending(), 0);

        timer.advance(Duration::from_secs(1));
        assert!(!fired.get());
    }

    #[test]
    fn zero_delay_is_not_synchronous() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();

        let _guard = timer.schedule(Duration::ZERO, Box::new(move || f.set(true)));
        assert!(!fired.get());
        assert_eq!(timer.advance(Duration::ZERO), 1);
        assert!(fired.get());
    }
}
