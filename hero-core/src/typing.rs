/// Typewriter effects for the hero text.
///
/// [`Typewriter`] types two fixed lines once, one after the other.
/// [`WordCycler`] types a word, holds it, deletes it and moves on to the next
/// word, forever. Each keystroke is its own timer expiry.

use std::time::Duration;

use crate::error::HeroError;
use crate::timer::{Animation, Timer};

/// Delay between keystrokes of the intro lines
pub const CHAR_DELAY: Duration = Duration::from_millis(45);
/// Pause between finishing the first intro line and starting the second
pub const LINE_GAP: Duration = Duration::from_millis(350);

/// Delay between keystrokes while a word is typed in
pub const TYPE_DELAY: Duration = Duration::from_millis(110);
/// Delay between keystrokes while a word is deleted
pub const DELETE_DELAY: Duration = Duration::from_millis(55);
/// How long a fully typed word stays before deletion starts
pub const PAUSE_DELAY: Duration = Duration::from_millis(1800);

/// First `chars` characters of `text`
fn prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn nonzero(what: &'static str, delay: Duration) -> Result<Duration, HeroError> {
    if delay.is_zero() {
        Err(HeroError::ZeroDelay(what))
    } else {
        Ok(delay)
    }
}

/// Two lines typed in sequence; the second waits for the first
#[derive(Debug, Clone)]
pub struct Typewriter {
    lines: [&'static str; 2],
    typed: [usize; 2],
    timer: Timer,
    char_delay: Duration,
    line_gap: Duration,
}

impl Typewriter {
    pub fn new(lines: [&'static str; 2]) -> Result<Self, HeroError> {
        Self::with_delays(lines, CHAR_DELAY, LINE_GAP)
    }

    pub fn with_delays(
        lines: [&'static str; 2],
        char_delay: Duration,
        line_gap: Duration,
    ) -> Result<Self, HeroError> {
        let char_delay = nonzero("keystroke", char_delay)?;
        let line_gap = nonzero("line gap", line_gap)?;
        let mut writer = Self {
            lines,
            typed: [0; 2],
            timer: Timer::idle(),
            char_delay,
            line_gap,
        };
        if !writer.is_complete() {
            writer.timer.schedule(char_delay);
        }
        Ok(writer)
    }

    /// The visible part of line `index` (0 or 1)
    pub fn line(&self, index: usize) -> &'static str {
        match (self.lines.get(index), self.typed.get(index)) {
            (Some(line), Some(&typed)) => prefix(line, typed),
            _ => "",
        }
    }

    /// Index of the line currently being typed, if any
    pub fn active_line(&self) -> Option<usize> {
        (0..2).find(|&i| self.typed[i] < self.target_len(i))
    }

    pub fn is_complete(&self) -> bool {
        self.active_line().is_none()
    }

    fn target_len(&self, index: usize) -> usize {
        self.lines[index].chars().count()
    }

    /// Type one character now. Returns `false` once both lines are done.
    pub fn step(&mut self) -> bool {
        let Some(active) = self.active_line() else {
            self.timer.cancel();
            return false;
        };
        self.typed[active] += 1;

        let line_done = self.typed[active] == self.target_len(active);
        match self.active_line() {
            Some(_) if line_done => self.timer.schedule(self.line_gap),
            Some(_) => self.timer.schedule(self.char_delay),
            None => self.timer.cancel(),
        }
        true
    }
}

impl Animation for Typewriter {
    fn timer_mut(&mut self) -> &mut Timer {
        &mut self.timer
    }

    fn on_fire(&mut self) {
        self.step();
    }
}

/// Phase of the word cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    /// Word fully shown, waiting for the pause to elapse
    Paused,
    Deleting,
}

/// Types, holds and deletes each word of a list in turn
#[derive(Debug, Clone)]
pub struct WordCycler {
    words: &'static [&'static str],
    index: usize,
    typed: usize,
    phase: TypingPhase,
    timer: Timer,
}

impl WordCycler {
    pub fn new(words: &'static [&'static str]) -> Result<Self, HeroError> {
        if words.is_empty() {
            return Err(HeroError::EmptyList("word"));
        }
        Ok(Self {
            words,
            index: 0,
            typed: 0,
            phase: TypingPhase::Typing,
            timer: Timer::after(TYPE_DELAY),
        })
    }

    /// The currently visible part of the current word
    pub fn text(&self) -> &'static str {
        prefix(self.word(), self.typed)
    }

    /// The word being typed or deleted
    pub fn word(&self) -> &'static str {
        self.words[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    /// Delay before the next transition
    pub fn pending_delay(&self) -> Option<Duration> {
        self.timer.remaining()
    }

    /// Perform the next transition now
    pub fn step(&mut self) {
        let word_len = self.word().chars().count();
        match self.phase {
            TypingPhase::Typing => {
                self.typed = (self.typed + 1).min(word_len);
                if self.typed == word_len {
                    self.phase = TypingPhase::Paused;
                    self.timer.schedule(PAUSE_DELAY);
                } else {
                    self.timer.schedule(TYPE_DELAY);
                }
            }
            TypingPhase::Paused => {
                self.phase = TypingPhase::Deleting;
                self.delete_one();
            }
            TypingPhase::Deleting => self.delete_one(),
        }
    }

    fn delete_one(&mut self) {
        self.typed = self.typed.saturating_sub(1);
        if self.typed == 0 {
            self.index = (self.index + 1) % self.words.len();
            self.phase = TypingPhase::Typing;
            self.timer.schedule(TYPE_DELAY);
        } else {
            self.timer.schedule(DELETE_DELAY);
        }
    }
}

impl Animation for WordCycler {
    fn timer_mut(&mut self) -> &mut Timer {
        &mut self.timer
    }

    fn on_fire(&mut self) {
        self.step();
    }
}
