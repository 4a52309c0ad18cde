// vim: set ai et ts=4 sts=4 sw=4:
use std::error;
use log::{debug, info, warn};
use piston::window::{Window, WindowSettings};
use piston::event_loop::{Events, EventSettings};
use piston::input::{RenderEvent, GenericEvent, Button, Key, MouseButton};
use glutin_window::GlutinWindow;
use graphics::{Context, Graphics, clear};
use graphics::{Ellipse, Rectangle, Line, Transformed, Text};
use graphics::types::Color;
use graphics::character::CharacterCache;
use opengl_graphics::{OpenGL, GlGraphics, Filter, GlyphCache, TextureSettings};

use super::grid::{Cell, Error, Mode};
use super::puzzle::{Puzzle, SessionOutcome};
use super::util::{Direction, Direction::*};
use super::Args;

const BACKGROUND: Color        = [1.0, 1.0, 1.0, 1.0];
const SQUARE_FILL: Color       = [0.93, 0.93, 0.93, 1.0];
const SQUARE_FILL_HOVER: Color = [0.82, 0.82, 0.82, 1.0];
const MARK_COLOR: Color        = [99.0/255.0, 128.0/255.0, 1.0, 1.0];
const CROSS_COLOR: Color       = [0.35, 0.35, 0.35, 1.0];
const RULE_COLOR: Color        = [0.0, 0.0, 0.0, 1.0];
const CLUE_DONE: Color         = [0.7, 0.7, 0.7, 1.0];
const CLUE_OPEN: Color         = [0.0, 0.0, 0.0, 1.0];
const WIN_COLOR: Color         = [1.0, 0.0, 0.0, 1.0];

const CLUE_FONT_SIZE: u32 = 18;
const INFO_FONT_SIZE: u32 = 16;
const WIN_FONT_SIZE: u32  = 48;
const INFO_LINE_HEIGHT: f64 = 20.0;

// line widths; piston's Line takes a radius, so these get halved when drawn
const THIN_RULE: f64    = 1.0;
const GROUP_RULE: f64   = 2.0;
const OUTLINE_RULE: f64 = 3.0;

/// Screen geometry of the board. The only place that knows how pixels map to squares.
struct Layout {
    origin: [f64; 2],         // top left corner of the whole drawing, clue area included
    square_size: f64,
    group_size: Option<usize>, // heavier rule every N squares
    clue_area: [f64; 2],       // width of the row clue block, height of the column clue block
    board: [usize; 2],         // [height, width] in squares
}
impl Layout {
    pub fn new(puzzle: &Puzzle, group_size: Option<usize>) -> Self {
        let square_size = 30.0;
        Layout {
            origin: [20.0; 2],
            square_size,
            group_size,
            clue_area: [(puzzle.clues.max_row_len() as f64) * square_size,
                        (puzzle.clues.max_col_len() as f64) * square_size],
            board: [puzzle.height(), puzzle.width()],
        }
    }

    // top left corner of the grid proper, relative to the origin
    fn grid_offset(&self) -> [f64; 2] { self.clue_area }
    fn grid_size(&self) -> [f64; 2] {
        [(self.board[1] as f64) * self.square_size,
         (self.board[0] as f64) * self.square_size]
    }

    /// The `[row, col]` under a window position, or `None` off the grid.
    /// Rows grow downwards on screen just as they do in the grid, so nothing is mirrored.
    pub fn square_at(&self, pos: [f64; 2]) -> Option<[isize; 2]> {
        let x = pos[0] - self.origin[0] - self.clue_area[0];
        let y = pos[1] - self.origin[1] - self.clue_area[1];
        let col = (x / self.square_size).floor() as isize;
        let row = (y / self.square_size).floor() as isize;
        let inside = row >= 0 && (row as usize) < self.board[0]
                  && col >= 0 && (col as usize) < self.board[1];
        match inside {
            true  => Some([row, col]),
            false => None,
        }
    }

    fn rule_width(&self, index: usize, count: usize) -> f64 {
        match (index, self.group_size) {
            (i, _) if i == 0 || i == count              => OUTLINE_RULE,
            (i, Some(n)) if n > 0 && i % n == 0         => GROUP_RULE,
            _                                           => THIN_RULE,
        }
    }
}

// ------------------------------------------------

struct PuzzleController {
    pub puzzle: Puzzle,
    pub cursor_pos: [f64; 2],
    pub solved_for: Option<f64>, // seconds elapsed since the winning click
}
impl PuzzleController {
    pub fn new(puzzle: Puzzle) -> Self {
        PuzzleController {
            puzzle,
            cursor_pos: [-1.0, -1.0],
            solved_for: None,
        }
    }
    pub fn event<E: GenericEvent>(&mut self, layout: &Layout, e: &E) {
        if let Some(pos) = e.mouse_cursor_args() {
            self.cursor_pos = pos;
        }
        if let Some(args) = e.update_args() {
            if let Some(elapsed) = self.solved_for.as_mut() {
                *elapsed += args.dt;
            }
        }
        // the board is frozen once solved
        if self.solved_for.is_some() {
            return;
        }
        let mode = match e.press_args() {
            Some(Button::Mouse(MouseButton::Left))  => Mode::Mark,
            Some(Button::Mouse(MouseButton::Right)) => Mode::Exclude,
            Some(Button::Keyboard(Key::Backspace))  => {
                self.puzzle.reset();
                return;
            }
            _ => return,
        };
        if let Some([row, col]) = layout.square_at(self.cursor_pos) {
            self.toggle(row, col, mode);
        }
    }
    fn toggle(&mut self, row: isize, col: isize, mode: Mode) {
        match self.puzzle.toggle_mark(row, col, mode) {
            Ok(_) if self.puzzle.is_solved() => {
                info!("'{}' solved", self.puzzle.title);
                self.solved_for = Some(0.0);
            }
            Ok(_)                            => {}
            Err(e @ Error::OutOfRange { .. }) => warn!("click mapped outside the grid: {}", e),
            Err(e)                            => warn!("{}", e),
        }
    }
}

// ------------------------------------------------

fn draw_text<G: Graphics, C>(text: &str, color: Color, size: u32, c: &Context, glyphs: &mut C, g: &mut G)
    where C: CharacterCache<Texture = G::Texture>
{
    if Text::new_color(color, size).draw(text, glyphs, &c.draw_state, c.transform, g).is_err() {
        debug!("could not draw {:?}", text);
    }
}

fn draw_cell<G: Graphics>(cell: Cell, hovered: bool, size: f64, c: &Context, g: &mut G) {
    // drawn in a context translated to the square's top left corner
    let background = if hovered { SQUARE_FILL_HOVER } else { SQUARE_FILL };
    Rectangle::new(background).draw([0.0, 0.0, size, size], &c.draw_state, c.transform, g);

    let inset = size/5.0;
    match cell {
        Cell::Marked   => {
            Ellipse::new(MARK_COLOR).draw([inset, inset, size - 2.0*inset, size - 2.0*inset],
                                          &c.draw_state, c.transform, g);
        }
        Cell::Excluded => {
            let stroke = Line::new(CROSS_COLOR, 1.0);
            stroke.draw([inset, inset, size-inset, size-inset], &c.draw_state, c.transform, g);
            stroke.draw([size-inset, inset, inset, size-inset], &c.draw_state, c.transform, g);
        }
        Cell::Empty    => {}
    }
}

// one clue's numbers; row clues are right-aligned against the grid, column clues bottom-aligned
fn draw_clue<G: Graphics, C>(puzzle: &Puzzle, direction: Direction, index: usize,
                             layout: &Layout, c: &Context, glyphs: &mut C, g: &mut G)
    where C: CharacterCache<Texture = G::Texture>
{
    let size = layout.square_size;
    let [offset_x, offset_y] = layout.grid_offset();
    let color = if puzzle.is_satisfied(direction, index) { CLUE_DONE } else { CLUE_OPEN };

    for (n, len) in puzzle.clues.get(direction, index).runs().iter().rev().enumerate() {
        // text is positioned by its baseline, so y points at the bottom of the slot
        let nudge = if *len < 10 { size/4.0 } else { 0.0 };
        let [x, y] = match direction {
            Horizontal => [offset_x - ((n+1) as f64) * size + nudge,
                           offset_y + ((index+1) as f64) * size - size/4.0],
            Vertical   => [offset_x + (index as f64) * size + nudge,
                           offset_y - (n as f64) * size - size/4.0],
        };
        let text = len.to_string();
        draw_text(&text, color, CLUE_FONT_SIZE, &c.trans(x, y), glyphs, g);
    }
}

// the rules across one axis: `Horizontal` rules separate rows, `Vertical` rules separate columns
fn draw_rules<G: Graphics>(layout: &Layout, direction: Direction, c: &Context, g: &mut G) {
    let size = layout.square_size;
    let [clue_w, clue_h] = layout.clue_area;
    let [grid_w, grid_h] = layout.grid_size();
    let count = match direction {
        Horizontal => layout.board[0],
        Vertical   => layout.board[1],
    };
    for i in 0..=count {
        let at = (i as f64) * size;
        // rules run through the clue area so the numbers line up with their row/column
        let coords = match direction {
            Horizontal => [0.0, clue_h + at, clue_w + grid_w, clue_h + at],
            Vertical   => [clue_w + at, 0.0, clue_w + at, clue_h + grid_h],
        };
        Line::new(RULE_COLOR, layout.rule_width(i, count)/2.0)
             .draw(coords, &c.draw_state, c.transform, g);
    }
}

fn draw<G: Graphics, C>(controller: &PuzzleController, layout: &Layout,
                        c: &Context, glyphs: &mut C, g: &mut G)
    where C: CharacterCache<Texture = G::Texture>
{
    let puzzle = &controller.puzzle;
    let c = c.trans(layout.origin[0], layout.origin[1]);
    let size = layout.square_size;
    let [offset_x, offset_y] = layout.grid_offset();
    let [grid_w, grid_h] = layout.grid_size();
    let hovered = layout.square_at(controller.cursor_pos);

    for row in 0..puzzle.height() as isize {
        for col in 0..puzzle.width() as isize {
            let cell_c = c.trans(offset_x + (col as f64)*size, offset_y + (row as f64)*size);
            match puzzle.get_cell(row, col) {
                Ok(cell) => draw_cell(cell, hovered == Some([row, col]), size, &cell_c, g),
                Err(e)   => debug!("skipping square: {}", e),
            }
        }
    }
    for y in 0..puzzle.height() {
        draw_clue(puzzle, Horizontal, y, layout, &c, glyphs, g);
    }
    for x in 0..puzzle.width() {
        draw_clue(puzzle, Vertical, x, layout, &c, glyphs, g);
    }
    draw_rules(layout, Horizontal, &c, g);
    draw_rules(layout, Vertical, &c, g);

    // progress and controls to the right of the board
    let info = format!("{}\nMarked: {}/{}\n\nLeft click to mark a square.\nRight click to cross it out.\nBackspace clears the board.",
                       puzzle.title,
                       puzzle.state().marked_count(),
                       puzzle.state().filled_count());
    let info_c = c.trans(offset_x + grid_w + size, size);
    for (i, line) in info.lines().enumerate() {
        draw_text(line, CLUE_OPEN, INFO_FONT_SIZE, &info_c.trans(0.0, (i as f64) * INFO_LINE_HEIGHT), glyphs, g);
    }

    if controller.solved_for.is_some() {
        draw_text("YOU WON!!", WIN_COLOR, WIN_FONT_SIZE, &c.trans(0.0, offset_y + grid_h + 2.0*size), glyphs, g);
    }
}

pub fn ui_main(puzzle: Puzzle, args: &Args)
    -> Result<SessionOutcome, Box<dyn error::Error>>
{
    let opengl_version = OpenGL::V3_2;
    let settings = WindowSettings::new(puzzle.title.clone(), [1200, 800])
                                   .graphics_api(opengl_version)
                                   .exit_on_esc(true);
    let mut window: GlutinWindow = settings.build()
        .map_err(|e| format!("could not create window: {}", e))?;

    let mut events = Events::new(EventSettings::new());
    let mut gl = GlGraphics::new(opengl_version);

    let layout = Layout::new(&puzzle, args.visual_groups);
    let mut controller = PuzzleController::new(puzzle);

    let texture_settings = TextureSettings::new().filter(Filter::Nearest);
    let mut glyphs = GlyphCache::new(&args.font, (), texture_settings)
        .map_err(|e| format!("could not load font '{}': {:?}", args.font, e))?;

    while let Some(e) = events.next(&mut window) {
        controller.event(&layout, &e);
        if let Some(ev_args) = e.render_args() {
            gl.draw(ev_args.viewport(), |c, g| {
                clear(BACKGROUND, g);
                draw(&controller, &layout, &c, &mut glyphs, g);
            });
        }
        if let Some(elapsed) = controller.solved_for {
            if elapsed >= args.win_pause {
                debug!("closing window after {:.1}s win pause", elapsed);
                window.set_should_close(true);
            }
        }
    }

    Ok(match controller.solved_for {
        Some(_) => SessionOutcome::Solved,
        None    => SessionOutcome::Quit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        // clues are at most one run long in each direction, so the clue area is one square wide/high
        let puzzle = Puzzle::from_yaml_str("solution:\n  - '##.'\n  - '.#.'\n").unwrap();
        Layout::new(&puzzle, Some(2))
    }

    #[test]
    fn square_at_maps_pixels_without_mirroring() {
        let layout = layout();
        // origin 20 + clue area 30 = grid starts at 50 on both axes
        assert_eq!(layout.square_at([50.0, 50.0]), Some([0, 0]));
        assert_eq!(layout.square_at([79.9, 50.0]), Some([0, 0]));
        assert_eq!(layout.square_at([80.0, 50.0]), Some([0, 1]));
        assert_eq!(layout.square_at([139.0, 109.0]), Some([1, 2]));
    }

    #[test]
    fn square_at_rejects_positions_off_the_grid() {
        let layout = layout();
        assert_eq!(layout.square_at([-1.0, -1.0]), None);
        assert_eq!(layout.square_at([49.0, 60.0]), None);  // row clue area
        assert_eq!(layout.square_at([60.0, 49.0]), None);  // column clue area
        assert_eq!(layout.square_at([140.0, 60.0]), None); // right of the grid
        assert_eq!(layout.square_at([60.0, 110.0]), None); // below the grid
    }

    #[test]
    fn rule_widths() {
        let layout = layout();
        assert_eq!(layout.rule_width(0, 3), OUTLINE_RULE);
        assert_eq!(layout.rule_width(3, 3), OUTLINE_RULE);
        assert_eq!(layout.rule_width(2, 3), GROUP_RULE);
        assert_eq!(layout.rule_width(1, 3), THIN_RULE);
    }

    #[test]
    fn clicks_toggle_and_freeze_after_win() {
        let layout = layout();
        let puzzle = Puzzle::from_yaml_str("solution:\n  - '##.'\n  - '.#.'\n").unwrap();
        let mut controller = PuzzleController::new(puzzle);
        for &[row, col] in &[[0, 0], [0, 1], [1, 0]] {
            controller.toggle(row, col, Mode::Mark);
        }
        assert!(controller.solved_for.is_none());
        controller.toggle(1, 0, Mode::Exclude);
        controller.toggle(1, 1, Mode::Mark);
        assert_eq!(controller.solved_for, Some(0.0));

        // stray coordinates are logged, not applied
        controller.toggle(5, -1, Mode::Mark);
        assert!(controller.puzzle.is_solved());
        assert_eq!(layout.board, [2, 3]);
    }
}
