/// One-shot delay timers driven by elapsed frame time
use std::time::Duration;

/// A single pending callback delay.
///
/// Owners feed elapsed time through [`Timer::consume`]; the timer fires once
/// its delay is covered and hands back whatever time is left over, so a
/// component can fire several due callbacks from one long frame in the order
/// they were scheduled. Dropping the owner drops the timer, so nothing can
/// fire after the owner is gone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timer {
    remaining: Option<Duration>,
}

impl Timer {
    /// A timer with nothing scheduled
    pub fn idle() -> Self {
        Self::default()
    }

    /// A timer that fires after `delay`
    pub fn after(delay: Duration) -> Self {
        Self {
            remaining: Some(delay),
        }
    }

    /// Replace any pending delay with `delay`
    pub fn schedule(&mut self, delay: Duration) {
        self.remaining = Some(delay);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Time left before the timer fires
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Spend up to `budget` waiting. Returns `true` if the timer fired, in
    /// which case it is idle again and `budget` holds the unused time.
    pub fn consume(&mut self, budget: &mut Duration) -> bool {
        let Some(remaining) = self.remaining else {
            *budget = Duration::ZERO;
            return false;
        };
        if *budget >= remaining {
            *budget -= remaining;
            self.remaining = None;
            true
        } else {
            self.remaining = Some(remaining - *budget);
            *budget = Duration::ZERO;
            false
        }
    }
}

/// A component that owns a [`Timer`] and reacts when it fires
pub trait Animation {
    fn timer_mut(&mut self) -> &mut Timer;

    /// Handle one expiry. Reschedule the timer to keep the animation going;
    /// leaving it idle ends the animation.
    fn on_fire(&mut self);

    /// Feed elapsed time, handling every expiry it covers in schedule order.
    ///
    /// Owners reject zero delays up front, so this always terminates.
    fn update(&mut self, elapsed: Duration) {
        let mut budget = elapsed;
        while self.timer_mut().consume(&mut budget) {
            self.on_fire();
            if !self.timer_mut().is_pending() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_once_delay_is_covered() {
        let mut timer = Timer::after(100 * MS);
        let mut budget = 60 * MS;
        assert!(!timer.consume(&mut budget));
        assert_eq!(budget, Duration::ZERO);
        assert_eq!(timer.remaining(), Some(40 * MS));

        let mut budget = 50 * MS;
        assert!(timer.consume(&mut budget));
        assert_eq!(budget, 10 * MS);
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timer = Timer::after(MS);
        timer.cancel();
        let mut budget = Duration::from_secs(10);
        assert!(!timer.consume(&mut budget));
    }

    struct Steps {
        timer: Timer,
        delays: Vec<Duration>,
        fired: usize,
    }

    impl Animation for Steps {
        fn timer_mut(&mut self) -> &mut Timer {
            &mut self.timer
        }

        fn on_fire(&mut self) {
            self.fired += 1;
            if let Some(next) = self.delays.get(self.fired) {
                self.timer.schedule(*next);
            }
        }
    }

    #[test]
    fn test_update_fires_in_order_within_one_frame() {
        let delays = vec![10 * MS, 20 * MS, 30 * MS];
        let mut steps = Steps {
            timer: Timer::after(delays[0]),
            delays,
            fired: 0,
        };

        steps.update(45 * MS);
        assert_eq!(steps.fired, 2);
        assert_eq!(steps.timer.remaining(), Some(15 * MS));
    }

    #[test]
    fn test_update_stops_when_not_rescheduled() {
        let mut steps = Steps {
            timer: Timer::after(MS),
            delays: vec![MS],
            fired: 0,
        };
        steps.update(Duration::from_secs(1));
        assert_eq!(steps.fired, 1);
        assert!(!steps.timer.is_pending());
    }
}
