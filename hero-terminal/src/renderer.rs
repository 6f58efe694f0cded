/// Character screen buffer drawn to the terminal in one pass per frame
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    QueueableCommand,
};
use hero_core::AsciiRaster;
use std::io::Write;

/// Visual role of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Dim,
    Accent,
    Highlight,
    Heading,
    Button,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Plain => Color::White,
            Tone::Dim => Color::DarkGrey,
            Tone::Accent => Color::Green,
            Tone::Highlight => Color::Yellow,
            Tone::Heading => Color::Cyan,
            Tone::Button => Color::Black,
        }
    }

    fn bold(self) -> bool {
        matches!(self, Tone::Heading | Tone::Highlight | Tone::Button)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
    bold: bool,
    reverse: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            color: Color::Reset,
            bold: false,
            reverse: false,
        }
    }
}

/// Colour for a shaded raster character
fn shade_color(c: char) -> Color {
    match c {
        ' ' | '.' | ':' => Color::DarkGrey,
        '-' | '=' => Color::Grey,
        '+' | '*' => Color::White,
        '#' | '%' | '@' => Color::Cyan,
        _ => Color::White,
    }
}

/// Full-screen back buffer.
///
/// Positions are signed so callers can place text above or below the visible
/// area while scrolling; anything outside is dropped.
pub struct Screen {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn put_char(&mut self, x: i32, y: i32, ch: char, tone: Tone) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = Cell {
                ch,
                color: tone.color(),
                bold: tone.bold(),
                reverse: tone == Tone::Button,
            };
        }
    }

    pub fn put_str(&mut self, x: i32, y: i32, text: &str, tone: Tone) {
        for (i, ch) in text.chars().enumerate() {
            self.put_char(x + i as i32, y, ch, tone);
        }
    }

    /// Copy the shaded raster with its top-left corner at `(x, y)`
    pub fn blit_raster(&mut self, x: i32, y: i32, raster: &AsciiRaster) {
        for row in 0..raster.height() {
            for (col, &ch) in raster.row(row).iter().enumerate() {
                if let Some(idx) = self.index(x + col as i32, y + row as i32) {
                    self.cells[idx] = Cell {
                        ch,
                        color: shade_color(ch),
                        bold: false,
                        reverse: false,
                    };
                }
            }
        }
    }

    /// Text of one row, for inspection
    pub fn row_text(&self, y: usize) -> String {
        self.cells[y * self.width..(y + 1) * self.width]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    /// Write the whole buffer, batching runs of equally styled cells
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            let row = &self.cells[y * self.width..(y + 1) * self.width];

            let mut run = String::new();
            let mut style: Option<(Color, bool, bool)> = None;
            for cell in row {
                let cell_style = (cell.color, cell.bold, cell.reverse);
                if style != Some(cell_style) {
                    if !run.is_empty() {
                        writer.queue(Print(&run))?;
                        run.clear();
                    }
                    writer.queue(SetAttribute(Attribute::Reset))?;
                    writer.queue(SetForegroundColor(cell.color))?;
                    if cell.bold {
                        writer.queue(SetAttribute(Attribute::Bold))?;
                    }
                    if cell.reverse {
                        writer.queue(SetAttribute(Attribute::Reverse))?;
                    }
                    style = Some(cell_style);
                }
                run.push(cell.ch);
            }
            if !run.is_empty() {
                writer.queue(Print(&run))?;
            }
        }
        writer.queue(SetAttribute(Attribute::Reset))?;
        writer.queue(ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_clips_outside() {
        let mut screen = Screen::new(5, 2);
        screen.put_str(-2, 0, "abcdefgh", Tone::Plain);
        screen.put_str(0, 5, "hidden", Tone::Plain);
        assert_eq!(screen.row_text(0), "cdefg");
        assert_eq!(screen.row_text(1), "     ");
    }

    #[test]
    fn test_blit_raster_offsets() {
        let raster = AsciiRaster::new(3, 1);
        let mut screen = Screen::new(6, 2);
        screen.put_str(0, 1, "xxxxxx", Tone::Dim);
        screen.blit_raster(2, 1, &raster);
        assert_eq!(screen.row_text(1), "xx   x");
    }

    #[test]
    fn test_draw_emits_text() {
        let mut screen = Screen::new(10, 1);
        screen.put_str(0, 0, "hello", Tone::Heading);
        let mut out = Vec::new();
        screen.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("hello"));
    }
}
