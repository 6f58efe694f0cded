/// Terminal surface for the fellowship landing page
use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, terminal,
};
use hero_core::content::{BACKED_BY, SWAP_GLYPH_INDEX, TAGLINE, TOWER_ICON};
use hero_core::{AsciiRaster, Camera, LinkOpener, MotionPreference, PageRoot, HERO_LIGHTS};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod browser;
pub mod config;
pub mod layout;
pub mod renderer;

pub use browser::SystemOpener;
pub use config::HeroConfig;
pub use layout::Layout;
pub use renderer::{Screen, Tone};

use layout::{cta_text, DetailLine, CELL_ASPECT, CELL_HEIGHT_PX, CELL_WIDTH_PX, MARGIN};

const CURSOR_BLINK: Duration = Duration::from_millis(530);
const STATUS_HINT: &str = " q quit | enter apply | arrows scroll ";

/// Raw mode, alternate screen, mouse capture and hidden cursor, held for the
/// lifetime of the guard and restored when it drops, including on error paths.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self { _private: () };
        execute!(stdout(), terminal::EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let restored = execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );
        if let Err(e) = restored {
            log::warn!("failed to restore screen: {e}");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("failed to leave raw mode: {e}");
        }
    }
}

/// Main application struct for the terminal landing page
pub struct TerminalApp<O: LinkOpener = SystemOpener> {
    page: PageRoot,
    config: HeroConfig,
    layout: Layout,
    screen: Screen,
    raster: AsciiRaster,
    opener: O,
    scroll: u16,
    /// Last known mouse position in screen cells
    pointer: Option<(u16, u16)>,
    clock: Duration,
    motion: MotionPreference,
    notice: Option<String>,
    running: bool,
}

impl TerminalApp<SystemOpener> {
    pub fn new(
        config: HeroConfig,
        motion: MotionPreference,
        size: (u16, u16),
    ) -> anyhow::Result<Self> {
        Self::with_opener(config, motion, size, SystemOpener)
    }
}

impl<O: LinkOpener> TerminalApp<O> {
    pub fn with_opener(
        config: HeroConfig,
        motion: MotionPreference,
        (cols, rows): (u16, u16),
        opener: O,
    ) -> anyhow::Result<Self> {
        let page = PageRoot::mount(motion).context("mounting the page")?;
        let layout = Layout::compute(
            cols,
            rows,
            config.viewport_cols,
            config.viewport_rows,
            page.details.blocks(),
        );
        let mut app = Self {
            page,
            config,
            layout,
            screen: Screen::new(cols, rows),
            raster: AsciiRaster::new(0, 0),
            opener,
            scroll: 0,
            pointer: None,
            clock: Duration::ZERO,
            motion,
            notice: None,
            running: true,
        };
        app.resize(cols, rows);
        Ok(app)
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let _guard = TerminalGuard::acquire().context("preparing the terminal")?;
        self.main_loop(&mut stdout())
    }

    fn main_loop<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        let frame_time = self.config.frame_time();
        let mut last_frame = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input until the next frame is due
            while self.running {
                let waited = frame_start.elapsed();
                if waited >= frame_time || !event::poll(frame_time - waited)? {
                    break;
                }
                self.handle_event(event::read()?);
            }

            let now = Instant::now();
            self.update(now - last_frame);
            last_frame = now;

            self.render(out)?;
        }

        Ok(())
    }

    /// Recompute the layout for a new terminal size
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.layout = Layout::compute(
            cols,
            rows,
            self.config.viewport_cols,
            self.config.viewport_rows,
            self.page.details.blocks(),
        );
        self.screen.resize(cols, rows);
        match self.layout.viewport {
            Some(vp) => self.raster.resize(vp.width as usize, vp.height as usize),
            None => {
                log::warn!("terminal {cols}x{rows} is too small for the tower viewport");
                self.raster.resize(0, 0);
            }
        }
        self.scroll = self.scroll.min(self.layout.max_scroll());
        self.refresh_hover();
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(cols, rows) => self.resize(cols, rows),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let page_step = self.layout.rows.saturating_sub(2).max(1) as i32;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false
            }
            KeyCode::Enter => self.activate_cta(),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page_step),
            KeyCode::PageDown => self.scroll_by(page_step),
            KeyCode::Home => self.scroll_to(0),
            KeyCode::End => self.scroll_to(self.layout.max_scroll()),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.pointer = Some((mouse.column, mouse.row));
        let (col, row) = self.page_position(mouse.column, mouse.row);
        let (px, py) = (mouse.column as f32 * CELL_WIDTH_PX, mouse.row as f32 * CELL_HEIGHT_PX);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.layout.cta.contains(col, row) {
                    self.activate_cta();
                } else if self.layout.viewport.is_some_and(|vp| vp.contains(col, row)) {
                    self.page.hero.pointer_down(px, py);
                }
            }
            // Captured: follow the drag even outside the viewport
            MouseEventKind::Drag(MouseButton::Left) => self.page.hero.pointer_move(px, py),
            MouseEventKind::Up(MouseButton::Left) => self.page.hero.pointer_up(),
            MouseEventKind::ScrollDown => self.scroll_by(3),
            MouseEventKind::ScrollUp => self.scroll_by(-3),
            _ => {}
        }
        self.refresh_hover();
    }

    fn activate_cta(&mut self) {
        self.notice = match self.page.hero.activate_cta(&mut self.opener) {
            Ok(()) => None,
            Err(e) => Some(format!(" could not open the browser: {e} ")),
        };
    }

    fn page_position(&self, col: u16, row: u16) -> (u16, u16) {
        (col, row.saturating_add(self.scroll))
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = (self.scroll as i32 + delta).clamp(0, self.layout.max_scroll() as i32);
        self.scroll_to(target as u16);
    }

    fn scroll_to(&mut self, row: u16) {
        self.scroll = row.min(self.layout.max_scroll());
        self.refresh_hover();
    }

    /// Re-evaluate hover after the pointer or the page moved
    fn refresh_hover(&mut self) {
        let hovered = self.pointer.is_some_and(|(col, row)| {
            let (col, row) = self.page_position(col, row);
            self.layout.backers.contains(col, row)
        });
        self.page.hero.set_backers_hovered(hovered);
    }

    fn hovering(&self, rect: layout::Rect) -> bool {
        self.pointer.is_some_and(|(col, row)| {
            let (col, row) = self.page_position(col, row);
            rect.contains(col, row)
        })
    }

    pub fn update(&mut self, elapsed: Duration) {
        self.page.update(elapsed);
        self.clock += elapsed;
    }

    /// Draw the current page state into the back buffer
    pub fn compose(&mut self) {
        self.screen.clear();
        let scroll = self.scroll as i32;
        let at = |row: u16| row as i32 - scroll;
        let layout = &self.layout;
        let hero = &self.page.hero;

        // Wordmark
        let glyph_hovered = self.hovering(layout.glyph);
        for (i, ch) in hero.wordmark().enumerate() {
            let tone = match i {
                SWAP_GLYPH_INDEX if glyph_hovered => Tone::Highlight,
                SWAP_GLYPH_INDEX if ch == TOWER_ICON => Tone::Accent,
                _ => Tone::Heading,
            };
            let x = layout.wordmark.x as i32 + 2 * i as i32;
            self.screen.put_char(x, at(layout.wordmark.y), ch, tone);
        }

        // Tower
        if let Some(vp) = layout.viewport {
            let tower = hero.tower();
            let camera = Camera::hero(vp.width as f32 / (vp.height as f32 * CELL_ASPECT));
            self.raster.clear();
            self.raster
                .render_mesh(tower.mesh(), &tower.model_matrix(), &camera, &HERO_LIGHTS);
            self.screen.blit_raster(vp.x as i32, at(vp.y), &self.raster);
        }

        // Headline
        let width = layout.headline.width as usize;
        let tagline = clip(TAGLINE, width);
        self.screen
            .put_str(layout.tagline.x as i32, at(layout.tagline.y), &tagline, Tone::Dim);
        let word = clip(hero.headline_word(), width.saturating_sub(1));
        self.screen
            .put_str(layout.headline.x as i32, at(layout.headline.y), &word, Tone::Accent);
        if self.caret_visible() {
            let x = layout.headline.x as i32 + word.chars().count() as i32;
            self.screen.put_char(x, at(layout.headline.y), '_', Tone::Accent);
        }

        // Terminal block
        for i in 0..2 {
            let line = clip(hero.terminal_line(i), layout.terminal.width as usize);
            let y = at(layout.terminal.y + i as u16);
            self.screen
                .put_str(layout.terminal.x as i32, y, &line, Tone::Plain);
        }

        // Backers
        let [a, b, c] = hero.backers();
        let names = clip(&format!("{a}, {b} & {c}"), layout.backers.width as usize);
        let tone = if hero.backer_cycle().is_hovered() { Tone::Highlight } else { Tone::Plain };
        self.screen
            .put_str(layout.backers.x as i32, at(layout.backers.y), BACKED_BY, Tone::Dim);
        self.screen
            .put_str(layout.backers.x as i32, at(layout.backers.y + 1), &names, tone);

        // Call to action
        self.screen
            .put_str(layout.cta.x as i32, at(layout.cta.y), &cta_text(), Tone::Button);

        // Details
        for (i, line) in layout.details.iter().enumerate() {
            let y = at(layout.details_top + i as u16);
            let x = MARGIN as i32;
            match line {
                DetailLine::Heading(text) => self.screen.put_str(x, y, text, Tone::Heading),
                DetailLine::Text(text) => self.screen.put_str(x, y, text, Tone::Plain),
                DetailLine::Bullet { first, text } => {
                    self.screen.put_str(x, y, if *first { "- " } else { "  " }, Tone::Accent);
                    self.screen.put_str(x + 2, y, text, Tone::Plain);
                }
                DetailLine::Blank => {}
            }
        }

        // Status bar
        let status_row = self.screen.height() as i32 - 1;
        let status = self.notice.as_deref().unwrap_or(STATUS_HINT);
        self.screen.put_str(0, status_row, status, Tone::Dim);
    }

    /// The headline caret blinks unless reduced motion is set, then it stays on
    fn caret_visible(&self) -> bool {
        self.motion.reduced || (self.clock.as_millis() / CURSOR_BLINK.as_millis()) % 2 == 0
    }

    fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.compose();
        self.screen.draw(out)?;
        out.flush()
    }

    pub fn page(&self) -> &PageRoot {
        &self.page
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Tear the page down once the loop has ended
    pub fn unmount(self) {
        self.page.unmount();
    }
}

/// First `width` characters of `text`
fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
