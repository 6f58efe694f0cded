/// Page composition: the hero, the details section and their lifecycle.
///
/// Everything a surface needs to draw the page lives in [`PageRoot`]. Mounting
/// creates all animation state; unmounting consumes it, which drops every
/// pending timer with it.

use std::fmt::Display;
use std::time::Duration;

use crate::content::{
    DetailBlock, BACKERS, CTA_URL, CYCLING_WORDS, DETAILS, SWAP_GLYPH_INDEX, TERMINAL_LINES,
    TOWER_ICON, WORDMARK,
};
use crate::cycle::{Cycle, BACKER_INTERVAL};
use crate::error::HeroError;
use crate::glyph::{GlyphToggle, MotionPreference};
use crate::rotation::RotatingTower;
use crate::timer::Animation;
use crate::typing::{Typewriter, WordCycler};

/// Opens a URL in a new browsing context (browser tab, system browser)
pub trait LinkOpener {
    type Error: Display;

    fn open_in_new_context(&mut self, url: &str) -> Result<(), Self::Error>;
}

/// The animated top of the page
#[derive(Debug, Clone)]
pub struct HeroPage {
    tower: RotatingTower,
    intro: Typewriter,
    headline: WordCycler,
    backers: Cycle<[&'static str; 3]>,
    glyph: GlyphToggle,
}

impl HeroPage {
    pub fn mount(motion: MotionPreference) -> Result<Self, HeroError> {
        Ok(Self {
            tower: RotatingTower::mount()?,
            intro: Typewriter::new(TERMINAL_LINES)?,
            headline: WordCycler::new(CYCLING_WORDS)?,
            backers: Cycle::new(BACKERS, BACKER_INTERVAL)?,
            glyph: GlyphToggle::new(motion),
        })
    }

    /// Advance the frame callback and every timer by `elapsed`
    pub fn update(&mut self, elapsed: Duration) {
        self.tower.advance(elapsed.as_secs_f32());
        self.intro.update(elapsed);
        self.headline.update(elapsed);
        self.backers.update(elapsed);
        self.glyph.update(elapsed);
    }

    pub fn tower(&self) -> &RotatingTower {
        &self.tower
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.tower.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.tower.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.tower.pointer_up();
    }

    /// Hovering the backer line pauses its rotation
    pub fn set_backers_hovered(&mut self, hovered: bool) {
        self.backers.set_hovered(hovered);
    }

    /// Wordmark characters with the swapped letter replaced by the icon when it shows
    pub fn wordmark(&self) -> impl Iterator<Item = char> + '_ {
        WORDMARK.chars().enumerate().map(move |(i, c)| {
            if i == SWAP_GLYPH_INDEX && self.glyph.showing_icon() {
                TOWER_ICON
            } else {
                c
            }
        })
    }

    pub fn glyph(&self) -> &GlyphToggle {
        &self.glyph
    }

    /// Visible part of the cycling headline word
    pub fn headline_word(&self) -> &'static str {
        self.headline.text()
    }

    pub fn headline(&self) -> &WordCycler {
        &self.headline
    }

    pub fn terminal_line(&self, index: usize) -> &'static str {
        self.intro.line(index)
    }

    pub fn intro(&self) -> &Typewriter {
        &self.intro
    }

    pub fn backers(&self) -> &'static [&'static str; 3] {
        self.backers.current()
    }

    pub fn backer_cycle(&self) -> &Cycle<[&'static str; 3]> {
        &self.backers
    }

    /// Open the application page; a failure only affects the button
    pub fn activate_cta<O: LinkOpener>(&self, opener: &mut O) -> Result<(), O::Error> {
        log::info!("opening {CTA_URL}");
        opener.open_in_new_context(CTA_URL).inspect_err(|e| {
            log::warn!("could not open {CTA_URL}: {e}");
        })
    }
}

/// Static copy below the hero
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailsSection;

impl DetailsSection {
    pub fn blocks(&self) -> &'static [DetailBlock] {
        DETAILS
    }
}

/// The whole page: hero first, then details
#[derive(Debug, Clone)]
pub struct PageRoot {
    pub hero: HeroPage,
    pub details: DetailsSection,
}

impl PageRoot {
    pub fn mount(motion: MotionPreference) -> Result<Self, HeroError> {
        log::debug!("mounting page (reduced motion: {})", motion.reduced);
        Ok(Self {
            hero: HeroPage::mount(motion)?,
            details: DetailsSection,
        })
    }

    pub fn update(&mut self, elapsed: Duration) {
        self.hero.update(elapsed);
    }

    /// Tear the page down; no timer or frame callback survives this
    pub fn unmount(self) {
        log::debug!("unmounting page");
    }
}
