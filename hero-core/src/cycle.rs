/// Fixed-interval rotation through a list, paused while hovered
use std::time::Duration;

use crate::error::HeroError;
use crate::timer::{Animation, Timer};

/// How long each backer triple stays on screen
pub const BACKER_INTERVAL: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone)]
pub struct Cycle<T: 'static> {
    items: &'static [T],
    index: usize,
    interval: Duration,
    hovered: bool,
    timer: Timer,
}

impl<T: 'static> Cycle<T> {
    pub fn new(items: &'static [T], interval: Duration) -> Result<Self, HeroError> {
        if items.is_empty() {
            return Err(HeroError::EmptyList("cycle"));
        }
        if interval.is_zero() {
            return Err(HeroError::ZeroDelay("cycle interval"));
        }
        Ok(Self {
            items,
            index: 0,
            interval,
            hovered: false,
            timer: Timer::after(interval),
        })
    }

    pub fn current(&self) -> &'static T {
        &self.items[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Move to the next item, wrapping at the end
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.items.len();
    }

    /// Pause while hovered; leaving starts a fresh interval
    pub fn set_hovered(&mut self, hovered: bool) {
        if hovered == self.hovered {
            return;
        }
        self.hovered = hovered;
        if hovered {
            self.timer.cancel();
        } else {
            self.timer.schedule(self.interval);
        }
    }
}

impl<T: 'static> Animation for Cycle<T> {
    fn timer_mut(&mut self) -> &mut Timer {
        &mut self.timer
    }

    fn on_fire(&mut self) {
        self.advance();
        self.timer.schedule(self.interval);
    }
}
