//! Periodic blink service.
//!
//! [`BlinkControl`] is shared between the dispatcher (which starts and stops it from the BLINK
//! and PAUSE handlers) and a separate periodic context that calls [`BlinkControl::fire`] once
//! per period. The running flag and the callback are evaluated under the same blocking mutex,
//! so once [`BlinkControl::stop`] returns the callback cannot run again until the next start.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Duration;

use crate::error::TimerError;

/// Timer boundary used by the state handlers.
pub trait BlinkTimer {
    /// Configures the period. Must succeed before the first `start`.
    fn create(&mut self, period: Duration) -> Result<(), TimerError>;
    /// Starts toggling the first `led_count` LEDs every period. Restarting is allowed.
    fn start(&mut self, led_count: u8) -> Result<(), TimerError>;
    /// Stops toggling. Idempotent.
    fn stop(&mut self);
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    period: Option<Duration>,
    running: Option<u8>,
}

pub struct BlinkControl<M: RawMutex> {
    slot: Mutex<M, Cell<Slot>>,
    wake: Signal<M, ()>,
}

impl<M: RawMutex> BlinkControl<M> {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(Slot {
                period: None,
                running: None,
            })),
            wake: Signal::new(),
        }
    }

    pub fn create(&self, period: Duration) -> Result<(), TimerError> {
        if period.as_ticks() == 0 {
            return Err(TimerError::ZeroPeriod);
        }
        self.update(|slot| slot.period = Some(period));
        debug!("blink timer created, period {} ms", period.as_millis());
        Ok(())
    }

    pub fn start(&self, led_count: u8) -> Result<(), TimerError> {
        self.slot.lock(|cell| {
            let mut slot = cell.get();
            if slot.period.is_none() {
                return Err(TimerError::NotCreated);
            }
            slot.running = Some(led_count);
            cell.set(slot);
            Ok(())
        })?;
        self.wake.signal(());
        debug!("blink timer started for {} leds", led_count);
        Ok(())
    }

    pub fn stop(&self) {
        self.update(|slot| slot.running = None);
        trace!("blink timer stopped");
    }

    pub fn is_running(&self) -> bool {
        self.slot.lock(|cell| cell.get().running.is_some())
    }

    pub fn period(&self) -> Option<Duration> {
        self.slot.lock(|cell| cell.get().period)
    }

    /// Periodic callback entry point.
    ///
    /// Runs `toggle` with the LED count captured at start, while holding the lock, and returns
    /// `true`. Returns `false` without calling `toggle` when the timer is stopped.
    pub fn fire(&self, toggle: impl FnOnce(u8)) -> bool {
        self.slot.lock(|cell| match cell.get().running {
            Some(led_count) => {
                toggle(led_count);
                true
            }
            None => false,
        })
    }

    /// Waits until the timer is running and returns its period.
    pub async fn wait_started(&self) -> Duration {
        loop {
            let slot = self.slot.lock(|cell| cell.get());
            if let (Some(period), Some(_)) = (slot.period, slot.running) {
                return period;
            }
            self.wake.wait().await;
        }
    }

    fn update(&self, f: impl FnOnce(&mut Slot)) {
        self.slot.lock(|cell| {
            let mut slot = cell.get();
            f(&mut slot);
            cell.set(slot);
        });
    }
}

impl<M: RawMutex> Default for BlinkControl<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> BlinkTimer for &BlinkControl<M> {
    fn create(&mut self, period: Duration) -> Result<(), TimerError> {
        BlinkControl::create(*self, period)
    }

    fn start(&mut self, led_count: u8) -> Result<(), TimerError> {
        BlinkControl::start(*self, led_count)
    }

    fn stop(&mut self) {
        BlinkControl::stop(*self)
    }
}

#[cfg(test)]
mod tests {
    use core::future::Future;
    use core::pin::pin;
    use core::task::{Context, Poll, Waker};

    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    use super::*;

    #[test]
    fn start_requires_create() {
        let timer = BlinkControl::<NoopRawMutex>::new();
        assert_eq!(timer.start(2), Err(TimerError::NotCreated));
        assert!(!timer.is_running());
    }

    #[test]
    fn zero_period_is_rejected() {
        let timer = BlinkControl::<NoopRawMutex>::new();
        assert_eq!(timer.create(Duration::from_ticks(0)), Err(TimerError::ZeroPeriod));
        assert_eq!(timer.period(), None);
    }

    #[test]
    fn fire_passes_the_count_captured_at_start() {
        let timer = BlinkControl::<NoopRawMutex>::new();
        timer.create(Duration::from_millis(200)).unwrap();
        timer.start(3).unwrap();

        let mut seen = None;
        assert!(timer.fire(|count| seen = Some(count)));
        assert_eq!(seen, Some(3));
    }

    #[test]
    fn no_callback_after_stop_and_stop_is_idempotent() {
        let timer = BlinkControl::<NoopRawMutex>::new();
        timer.create(Duration::from_millis(200)).unwrap();
        timer.start(1).unwrap();
        timer.stop();
        timer.stop();

        let mut calls = 0;
        assert!(!timer.fire(|_| calls += 1));
        assert_eq!(calls, 0);

        timer.start(1).unwrap();
        assert!(timer.fire(|_| calls += 1));
        assert_eq!(calls, 1);
    }

    #[test]
    fn wait_started_wakes_on_start_with_the_period() {
        let timer = BlinkControl::<NoopRawMutex>::new();
        timer.create(Duration::from_millis(200)).unwrap();

        let mut cx = Context::from_waker(Waker::noop());
        let mut waiting = pin!(timer.wait_started());
        assert_eq!(waiting.as_mut().poll(&mut cx), Poll::Pending);

        timer.start(2).unwrap();
        assert_eq!(
            waiting.as_mut().poll(&mut cx),
            Poll::Ready(Duration::from_millis(200))
        );
    }

    #[test]
    fn wait_started_keeps_waiting_after_stop() {
        let timer = BlinkControl::<NoopRawMutex>::new();
        timer.create(Duration::from_millis(200)).unwrap();
        timer.start(1).unwrap();
        timer.stop();

        let mut cx = Context::from_waker(Waker::noop());
        let mut waiting = pin!(timer.wait_started());
        assert_eq!(waiting.as_mut().poll(&mut cx), Poll::Pending);
    }
}
