use crate::{Coords, TermInt};
use std::{io::{Stdout, Write, stdout}, thread::sleep, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::{Attribute, Color as TermColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use tracing::warn;

use crate::board::{Board, Cell, Wrap, BOARD_ROWS};
use crate::engine::{FrameEngine, TickReport};
use crate::error::Result;
use crate::frontend::{Banner, Frontend};
use crate::glyph::{HeadGlyph, FOOD};
use crate::snake::{Color, Snake};

const SCREEN_WIDTH: TermInt = 80;
const SCREEN_HEIGHT: TermInt = 24;
const PANEL_WIDTH: usize = 10;
const BANNER_LINE: TermInt = 11;
const PAUSE_LINE: TermInt = 18;

#[derive(Copy, Clone)]
pub struct Palette {
    cyan: TermColor,
    magenta: TermColor,
    plain: TermColor,
}

impl Palette {
    pub fn new() -> Self {
        Palette { cyan: TermColor::Cyan, magenta: TermColor::Magenta, plain: TermColor::White }
    }

    fn of(&self, color: Option<Color>) -> TermColor {
        match color {
            Some(Color::Cyan) => self.cyan,
            Some(Color::Magenta) => self.magenta,
            None => self.plain,
        }
    }
}

#[derive(Copy, Clone)]
struct Layout {
    top: TermInt,
    bottom: TermInt,
    left: TermInt,
    right: TermInt,
}

impl Layout {
    fn for_wrap(wrap: Wrap) -> Self {
        // Wrapped boards lose a column to make room for the edge tees.
        let left = if wrap.cols() { 16 } else { 15 };
        let width = Board::standard(wrap).width() as TermInt;
        Layout { top: 0, bottom: BOARD_ROWS as TermInt + 1, left, right: left + width * 2 + 2 }
    }

    /// Screen position of the left character of a cell's three columns.
    fn cell_origin(&self, cell: Cell) -> Option<Coords> {
        let x = cell.col * 2 + self.left as i32 + 1;
        let y = cell.row + self.top as i32 + 1;
        if x < 0 || y < 0 || x + 2 >= SCREEN_WIDTH as i32 || y >= SCREEN_HEIGHT as i32 {
            None
        } else {
            Some((x as TermInt, y as TermInt))
        }
    }

    fn panel_column(&self, side: usize) -> TermInt {
        2 + (self.right + 2) * side as TermInt
    }
}

pub struct TermManager {
    stdout: Stdout,
    palette: Palette,
    layout: Layout,
    players: usize,
}

impl TermManager {
    pub fn new(palette: Palette, wrap: Wrap, players: usize) -> Self {
        TermManager { stdout: stdout(), palette, layout: Layout::for_wrap(wrap), players }
    }

    pub fn setup(&mut self) -> Result<()> {
        let (width, height) = terminal::size()?;
        if width < SCREEN_WIDTH || height < SCREEN_HEIGHT {
            warn!(width, height, "terminal is smaller than 80x24");
        }

        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    fn print_at(&mut self, pos: Coords, text: &str, color: Option<Color>, bold: bool) -> Result<()> {
        let fg = self.palette.of(color);
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::SetForegroundColor(fg))?;
        if bold {
            queue!(self.stdout, style::SetAttribute(Attribute::Bold))?;
        }
        queue!(self.stdout, style::Print(text), style::SetAttribute(Attribute::Reset), style::ResetColor)?;
        Ok(())
    }

    fn print_char(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    fn panel_message(&mut self, line: TermInt, side: usize, lines: &[Option<&str>], color: Option<Color>) -> Result<()> {
        let column = self.layout.panel_column(side);
        for (i, part) in lines.iter().enumerate() {
            if let Some(text) = part {
                self.print_at((column, line + i as TermInt), text, color, true)?;
            }
        }
        Ok(())
    }

    fn draw_border(&mut self, wrap: Wrap) -> Result<()> {
        let Layout { top, bottom, left, right } = self.layout;

        for y in top..bottom {
            self.print_char((left, y), '│')?;
            self.print_char((right, y), '│')?;
        }
        for x in left..right {
            self.print_char((x, top), '─')?;
            self.print_char((x, bottom), '─')?;
        }
        self.print_char((left, top), '┌')?;
        self.print_char((right, top), '┐')?;
        self.print_char((left, bottom), '└')?;
        self.print_char((right, bottom), '┘')?;

        if wrap.cols() {
            for y in top + 1..bottom {
                self.print_char((left, y), '┤')?;
                self.print_char((left - 1, y), '─')?;
                self.print_char((right, y), '├')?;
                self.print_char((right + 1, y), '─')?;
            }
        }
        if wrap.rows() {
            for x in (left + 2..right).step_by(2) {
                self.print_char((x, top), '┴')?;
                self.print_char((x, bottom), '┬')?;
            }
        }
        Ok(())
    }

    fn draw_food(&mut self, food: Option<Cell>) -> Result<()> {
        if let Some(origin) = food.and_then(|c| self.layout.cell_origin(c)) {
            self.print_at((origin.0 + 1, origin.1), &FOOD.to_string(), None, true)?;
        }
        Ok(())
    }

    fn erase(&mut self, cell: Cell) -> Result<()> {
        if let Some(origin) = self.layout.cell_origin(cell) {
            self.print_char(origin, ' ')?;
            self.print_char((origin.0 + 1, origin.1), ' ')?;
            self.print_char((origin.0 + 2, origin.1), ' ')?;
        }
        Ok(())
    }

    fn blank_panels(&mut self) -> Result<()> {
        let blank = " ".repeat(PANEL_WIDTH);
        for side in 0..self.players {
            let column = self.layout.panel_column(side);
            for y in 0..=self.layout.bottom {
                self.print_at((column, y), &blank, None, false)?;
            }
        }
        Ok(())
    }
}

impl Frontend for TermManager {
    fn poll_keys(&mut self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    fn nap(&mut self, ms: u64) {
        sleep(Duration::from_millis(ms));
    }

    fn beep(&mut self) -> Result<()> {
        queue!(self.stdout, style::Print('\x07'))?;
        Ok(())
    }

    fn draw_board(&mut self, engine: &FrameEngine) -> Result<()> {
        let board: &Board = engine.board();
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.draw_border(board.wrap())?;
        self.draw_scores(engine.snakes())?;
        self.draw_food(engine.food())
    }

    fn draw_head(&mut self, snake: &Snake, glyph: HeadGlyph) -> Result<()> {
        if let Some(origin) = self.layout.cell_origin(snake.head()) {
            self.print_char(origin, '(')?;
            self.print_char((origin.0 + 2, origin.1), ')')?;
            self.print_at((origin.0 + 1, origin.1), &glyph.as_char().to_string(), Some(snake.color()), true)?;
        }
        Ok(())
    }

    fn draw_frame(&mut self, engine: &FrameEngine, report: &TickReport) -> Result<()> {
        let snakes = engine.snakes();

        for (snake, step) in snakes.iter().zip(&report.steps) {
            if let (Some(joint), Some(origin)) = (step.joint, self.layout.cell_origin(step.old_head)) {
                let text: String = joint.chars.iter().collect();
                self.print_at(origin, &text, Some(snake.color()), true)?;
            }
        }

        for cell in &report.vacated {
            self.erase(*cell)?;
        }

        for (snake, step) in snakes.iter().zip(&report.steps) {
            let glyph = if step.died { HeadGlyph::Dead } else { HeadGlyph::Normal };
            self.draw_head(snake, glyph)?;
        }

        if report.heads_adjacent {
            let (a, b) = (snakes[0].head(), snakes[1].head());
            let x = a.col + b.col + self.layout.left as i32 + 2;
            let y = a.row + self.layout.top as i32 + 1;
            self.print_char((x as TermInt, y as TermInt), '|')?;
        }

        self.draw_food(report.food)?;
        self.draw_scores(snakes)
    }

    fn draw_scores(&mut self, snakes: &[Snake]) -> Result<()> {
        self.blank_panels()?;

        for snake in snakes {
            let label = format!("PLAYER {}", ["ONE", "TWO"][snake.side()]);
            let score = format!("SCORE: {}", snake.round_score);
            let total = format!("TOTAL: {}", snake.game_score);
            let mut lines = vec![Some(label.as_str()), None, Some(score.as_str()), None];
            if snakes.len() > 1 {
                lines.push(Some(total.as_str()));
            }
            self.panel_message(2, snake.side(), &lines, Some(snake.color()))?;
        }
        Ok(())
    }

    fn show_banner(&mut self, snakes: &[Snake], banner: Banner) -> Result<()> {
        let (line, lines, color): (TermInt, Vec<Option<&str>>, Option<Color>) = match banner {
            Banner::Paused(heading) => (PAUSE_LINE, vec![Some(heading), None, Some(" G to Go"), Some("H to Halt")], None),
            Banner::RoundWinner(Some(side)) => (
                BANNER_LINE,
                vec![Some(["PLAYER ONE", "PLAYER TWO"][side]), Some("WINS ROUND")],
                Some(snakes[side].color()),
            ),
            Banner::RoundWinner(None) => (BANNER_LINE, vec![Some("  NOBODY"), Some("WINS ROUND")], None),
            Banner::GameWinner(Some(side)) => (
                BANNER_LINE,
                vec![Some(["PLAYER ONE", "PLAYER TWO"][side]), Some("WINS GAME")],
                Some(snakes[side].color()),
            ),
            Banner::GameWinner(None) => (BANNER_LINE, vec![Some("GAME TIED")], None),
        };

        for snake in snakes {
            self.panel_message(line, snake.side(), &lines, color)?;
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(SCREEN_WIDTH - 1, SCREEN_HEIGHT - 1))?;
        self.stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_map_to_three_columns() {
        let layout = Layout::for_wrap(Wrap::None);
        assert_eq!(layout.cell_origin(Cell::new(0, 0)), Some((16, 1)));
        assert_eq!(layout.cell_origin(Cell::new(21, 22)), Some((60, 22)));
        assert_eq!(layout.cell_origin(Cell::new(-1, 0)), Some((16, 0)));
    }

    #[test]
    fn test_wrapped_layout_is_narrower() {
        let layout = Layout::for_wrap(Wrap::Both);
        assert_eq!(layout.cell_origin(Cell::new(0, 0)), Some((17, 1)));
        assert_eq!(layout.cell_origin(Cell::new(0, 21)), Some((59, 1)));
        assert_eq!(layout.panel_column(1), 66);
    }

    #[test]
    fn test_palette_resolves_player_colours() {
        let palette = Palette::new();
        assert_eq!(palette.of(Some(Color::Cyan)), TermColor::Cyan);
        assert_eq!(palette.of(Some(Color::Magenta)), TermColor::Magenta);
        assert_eq!(palette.of(None), TermColor::White);
    }

    #[test]
    fn test_off_screen_cells_are_skipped() {
        let layout = Layout::for_wrap(Wrap::None);
        assert_eq!(layout.cell_origin(Cell::new(-2, 0)), None);
        assert_eq!(layout.cell_origin(Cell::new(0, 40)), None);
    }
}
