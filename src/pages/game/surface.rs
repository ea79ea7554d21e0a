use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
    widgets::Widget,
};

use crate::{
    constants::game,
    game::{bird::Bounds, RenderState},
};

/// Surface size in virtual pixels for a cell area.
pub fn pixel_size(area: Rect) -> (f32, f32) {
    (area.width as f32 * game::CELL_WIDTH, area.height as f32 * game::CELL_HEIGHT)
}

/// Cells covered by a box, clipped to `area`. `None` when nothing is left after clipping.
pub fn cells(bounds: &Bounds, area: Rect) -> Option<Rect> {
    let clip = |from: f32, to: f32, cell: f32, len: u16| {
        let begin = (from / cell).floor().max(0.0);
        let end = (to / cell).ceil().min(len as f32);
        (end > begin).then_some((begin as u16, (end - begin) as u16))
    };
    let (x, width) = clip(bounds.left(), bounds.right(), game::CELL_WIDTH, area.width)?;
    let (y, height) = clip(bounds.top(), bounds.bottom(), game::CELL_HEIGHT, area.height)?;
    Some(Rect::new(area.x + x, area.y + y, width, height))
}

/// Paints the sky, the pipes and the bird of one frame.
pub struct Surface<'a> {
    frame: &'a RenderState,
}

impl<'a> Surface<'a> {
    pub fn new(frame: &'a RenderState) -> Self {
        Self { frame }
    }

    fn fill(area: Rect, buf: &mut Buffer, color: Color) {
        buf.set_style(area, Style::default().bg(color));
        for position in area.positions() {
            if let Some(cell) = buf.cell_mut(position) {
                cell.set_char(' ');
            }
        }
    }

    fn draw_bird(&self, area: Rect, buf: &mut Buffer) {
        let Some(bird) = cells(&self.frame.bird, area) else {
            return;
        };
        Self::fill(bird, buf, game::BIRD_COLOR);

        let right = bird.right() - 1;
        let eye = Position::new(right.saturating_sub(1).max(bird.x), bird.y);
        let beak = Position::new(right, bird.y + bird.height / 2);
        for (position, symbol) in [(eye, game::BIRD_EYE), (beak, game::BIRD_BEAK)] {
            if let Some(cell) = buf.cell_mut(position) {
                cell.set_char(symbol).set_fg(Color::Black);
            }
        }
    }
}

impl Widget for Surface<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Self::fill(area, buf, game::SKY_COLOR);
        for (top, bottom) in &self.frame.pipes {
            for segment in [top, bottom] {
                if let Some(segment) = cells(segment, area) {
                    Self::fill(segment, buf, game::PIPE_COLOR);
                }
            }
        }
        self.draw_bird(area, buf);
    }
}
