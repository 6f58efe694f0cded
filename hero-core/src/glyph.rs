/// Wordmark letter that cross-fades with a tower icon
use std::time::Duration;

use crate::timer::{Animation, Timer};

/// Time between swaps of the letter and the icon
pub const GLYPH_INTERVAL: Duration = Duration::from_millis(3200);

/// Viewer's motion preference, read once when the page mounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionPreference {
    pub reduced: bool,
}

impl MotionPreference {
    pub fn reduced() -> Self {
        Self { reduced: true }
    }
}

#[derive(Debug, Clone)]
pub struct GlyphToggle {
    showing_icon: bool,
    timer: Timer,
}

impl GlyphToggle {
    /// With reduced motion the toggle never schedules a swap
    pub fn new(preference: MotionPreference) -> Self {
        let timer = if preference.reduced {
            Timer::idle()
        } else {
            Timer::after(GLYPH_INTERVAL)
        };
        Self {
            showing_icon: false,
            timer,
        }
    }

    pub fn showing_icon(&self) -> bool {
        self.showing_icon
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_pending()
    }
}

impl Animation for GlyphToggle {
    fn timer_mut(&mut self) -> &mut Timer {
        &mut self.timer
    }

    fn on_fire(&mut self) {
        self.showing_icon = !self.showing_icon;
        self.timer.schedule(GLYPH_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_each_interval() {
        let mut glyph = GlyphToggle::new(MotionPreference::default());
        assert!(!glyph.showing_icon());
        glyph.update(GLYPH_INTERVAL);
        assert!(glyph.showing_icon());
        glyph.update(GLYPH_INTERVAL);
        assert!(!glyph.showing_icon());
    }

    #[test]
    fn test_reduced_motion_never_changes() {
        let mut glyph = GlyphToggle::new(MotionPreference::reduced());
        assert!(!glyph.is_running());
        for step in [1, 100, 3200, 10_000, 60_000] {
            glyph.update(Duration::from_millis(step));
            assert!(!glyph.showing_icon());
        }
        assert!(!glyph.is_running());
    }
}
