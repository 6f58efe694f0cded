/// Placement of the page regions in page rows and terminal columns
use hero_core::content::{DetailBlock, CTA_LABEL, SWAP_GLYPH_INDEX, TAGLINE, WORDMARK};

/// Rows a terminal cell is tall relative to its width
pub const CELL_ASPECT: f32 = 2.0;
/// Approximate pixel size of a cell, used to feed pointer deltas to the tower
pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Smallest viewport worth drawing the tower into
pub const MIN_VIEWPORT_COLS: u16 = 12;
pub const MIN_VIEWPORT_ROWS: u16 = 8;

/// Narrowest text column placed beside the viewport
const MIN_TEXT_COLS: u16 = 30;
const MAX_DETAILS_COLS: u16 = 76;
pub const MARGIN: u16 = 2;

/// Rectangle in page coordinates (rows count from the top of the page, not the screen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.width && row >= self.y && row < self.y + self.height
    }

    pub fn bottom(&self) -> u16 {
        self.y + self.height
    }

    pub fn right(&self) -> u16 {
        self.x + self.width
    }
}

/// Kind of a details line, picked up by the drawing code for styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailLine {
    Heading(String),
    Text(String),
    Bullet { first: bool, text: String },
    Blank,
}

/// Where every region of the page sits for a given terminal size
#[derive(Debug, Clone)]
pub struct Layout {
    pub cols: u16,
    pub rows: u16,
    pub wordmark: Rect,
    pub glyph: Rect,
    /// `None` when the terminal is too small for the tower
    pub viewport: Option<Rect>,
    pub tagline: Rect,
    pub headline: Rect,
    pub terminal: Rect,
    pub backers: Rect,
    pub cta: Rect,
    pub details_top: u16,
    pub details: Vec<DetailLine>,
}

impl Layout {
    pub fn compute(
        cols: u16,
        rows: u16,
        viewport_cols: u16,
        viewport_rows: u16,
        blocks: &[DetailBlock],
    ) -> Self {
        // Wordmark letters are spaced one column apart
        let wordmark_width = (WORDMARK.chars().count() as u16 * 2).saturating_sub(1);
        let wordmark = Rect::new(cols.saturating_sub(wordmark_width) / 2, 1, wordmark_width, 1);
        let glyph = Rect::new(wordmark.x + SWAP_GLYPH_INDEX as u16 * 2, wordmark.y, 1, 1);

        let top = wordmark.bottom() + 2;
        let vp_cols = viewport_cols.min(cols.saturating_sub(2 * MARGIN));
        let vp_rows = viewport_rows.min(rows.saturating_sub(top + 2));
        let viewport = (vp_cols >= MIN_VIEWPORT_COLS && vp_rows >= MIN_VIEWPORT_ROWS)
            .then(|| Rect::new(MARGIN, top, vp_cols, vp_rows));

        // Text goes beside the viewport when there is room, below it otherwise
        let beside_x = viewport.map_or(MARGIN, |vp| vp.right() + 4);
        let (text_x, text_top) = match viewport {
            Some(vp) if cols.saturating_sub(beside_x + MARGIN) >= MIN_TEXT_COLS => {
                (beside_x, vp.y + 1)
            }
            Some(vp) => (MARGIN, vp.bottom() + 1),
            None => (MARGIN, top),
        };
        let text_width = cols.saturating_sub(text_x + MARGIN).max(1);

        let fit = |text: &str| (text.chars().count() as u16).min(text_width);
        let tagline = Rect::new(text_x, text_top, fit(TAGLINE), 1);
        let headline = Rect::new(text_x, tagline.bottom(), text_width, 1);
        let terminal = Rect::new(text_x, headline.bottom() + 2, text_width, 2);
        let backers = Rect::new(text_x, terminal.bottom() + 1, text_width, 2);
        let cta = Rect::new(text_x, backers.bottom() + 2, fit(cta_text().as_str()), 1);

        let hero_bottom = viewport.map_or(0, |vp| vp.bottom()).max(cta.bottom());
        let details_top = hero_bottom + 3;
        let details_width = cols.saturating_sub(2 * MARGIN).clamp(1, MAX_DETAILS_COLS) as usize;

        Self {
            cols,
            rows,
            wordmark,
            glyph,
            viewport,
            tagline,
            headline,
            terminal,
            backers,
            cta,
            details_top,
            details: detail_lines(blocks, details_width),
        }
    }

    /// Total height of the page in rows
    pub fn page_height(&self) -> u16 {
        self.details_top + self.details.len() as u16 + 1
    }

    /// Largest scroll offset that still fills the screen
    pub fn max_scroll(&self) -> u16 {
        self.page_height().saturating_sub(self.rows)
    }
}

/// Label of the call-to-action button as drawn
pub fn cta_text() -> String {
    format!("[ {CTA_LABEL} -> ]")
}

/// Flatten the details blocks into wrapped lines
pub fn detail_lines(blocks: &[DetailBlock], width: usize) -> Vec<DetailLine> {
    let mut lines = Vec::new();
    for block in blocks {
        lines.push(DetailLine::Heading(block.heading.to_string()));
        lines.push(DetailLine::Blank);
        for paragraph in block.paragraphs {
            lines.extend(wrap(paragraph, width).into_iter().map(DetailLine::Text));
            lines.push(DetailLine::Blank);
        }
        for bullet in block.bullets {
            let wrapped = wrap(bullet, width.saturating_sub(2).max(1));
            lines.extend(
                wrapped
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| DetailLine::Bullet { first: i == 0, text }),
            );
        }
        if !block.bullets.is_empty() {
            lines.push(DetailLine::Blank);
        }
        lines.push(DetailLine::Blank);
    }
    lines
}

/// Greedy word wrap; words longer than `width` get a line of their own
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() { 0 } else { line.chars().count() + 1 };
        if !line.is_empty() && needed + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
