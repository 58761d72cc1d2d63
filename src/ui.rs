use crate::canvas::Canvas;
use crate::config;
use crate::simulation::Cell;
use crate::viewport::Rect;

/// What a click on a fixed control region means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    TogglePlay,
    StepOnce,
    Select(Cell),
}

/// Fixed on-screen controls: play and step buttons on the left, four
/// state-picker swatches on the right. Positions depend only on the
/// window width, never on the camera.
pub struct UiLayout {
    play: Rect,
    next: Rect,
    indicators: [Rect; 4],
}

impl UiLayout {
    pub fn new(screen_w: f32) -> Self {
        let unit = config::UI_UNIT;
        let pad = unit / 2.0;

        let play = Rect::new(pad, pad, unit, unit);
        let next = Rect::new(play.x + unit + pad, pad, unit, unit);

        let group_x = screen_w - 4.0 * unit - pad;
        let indicators = std::array::from_fn(|i| Rect::new(group_x + i as f32 * unit, pad, unit, unit));

        Self {
            play,
            next,
            indicators,
        }
    }

    /// Action for a click at a screen point, if it lands on a control.
    pub fn hit(&self, px: f32, py: f32) -> Option<UiAction> {
        if self.play.contains(px, py) {
            return Some(UiAction::TogglePlay);
        }
        if self.next.contains(px, py) {
            return Some(UiAction::StepOnce);
        }
        for (i, rect) in self.indicators.iter().enumerate() {
            if rect.contains(px, py) {
                return Some(UiAction::Select(Cell::ALL[i]));
            }
        }
        None
    }

    /// True when a point collides with any control region. Painting is
    /// rejected there; the click handler owns those pixels.
    pub fn covers(&self, px: f32, py: f32) -> bool {
        self.hit(px, py).is_some()
    }

    pub fn draw(&self, canvas: &mut Canvas, running: bool, selected: Cell) {
        self.draw_play(canvas, running);
        self.draw_next(canvas, running);
        self.draw_indicators(canvas, selected);
    }

    fn draw_play(&self, canvas: &mut Canvas, running: bool) {
        let c = config::HIGHLIGHT_COLOR;
        if running {
            // Pause glyph: two vertical bars.
            let bar = self.play.w / 4.0;
            canvas.fill_rect(Rect::new(self.play.x, self.play.y, bar, self.play.h), c);
            canvas.fill_rect(
                Rect::new(self.play.x + 2.0 * bar, self.play.y, bar, self.play.h),
                c,
            );
        } else {
            canvas.fill_triangle_right(self.play.x, self.play.y, self.play.w, c);
        }
    }

    fn draw_next(&self, canvas: &mut Canvas, running: bool) {
        // Stepping is a paused-only affordance; hide the button while
        // running, as clicks on it do nothing then.
        if running {
            return;
        }
        let c = config::HIGHLIGHT_COLOR;
        let bar = self.next.w / 4.0;
        canvas.fill_triangle_right(self.next.x, self.next.y, self.next.w, c);
        canvas.fill_rect(
            Rect::new(self.next.x + self.next.w - bar, self.next.y, bar, self.next.h),
            c,
        );
    }

    fn draw_indicators(&self, canvas: &mut Canvas, selected: Cell) {
        for (i, rect) in self.indicators.iter().enumerate() {
            let state = Cell::ALL[i];
            canvas.fill_rect(*rect, state.color());
            canvas.stroke_rect(*rect, config::GRID_LINE_COLOR);
            if state == selected {
                canvas.stroke_rect(*rect, config::HIGHLIGHT_COLOR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_map_to_their_actions() {
        let ui = UiLayout::new(800.0);

        // Inside the play button (anchored at half a unit).
        assert_eq!(ui.hit(15.0, 15.0), Some(UiAction::TogglePlay));
        // Inside the step button, one unit and a gap to the right.
        assert_eq!(ui.hit(45.0, 15.0), Some(UiAction::StepOnce));
        // Dead center of the window hits nothing.
        assert_eq!(ui.hit(400.0, 230.0), None);
    }

    #[test]
    fn indicators_select_states_in_palette_order() {
        let ui = UiLayout::new(800.0);
        let unit = config::UI_UNIT;
        let group_x = 800.0 - 4.0 * unit - unit / 2.0;

        for (i, &state) in Cell::ALL.iter().enumerate() {
            let px = group_x + i as f32 * unit + unit / 2.0;
            assert_eq!(ui.hit(px, 15.0), Some(UiAction::Select(state)));
        }
    }

    #[test]
    fn covers_matches_hit() {
        let ui = UiLayout::new(640.0);
        assert!(ui.covers(15.0, 15.0));
        assert!(!ui.covers(320.0, 240.0));
        assert!(!ui.covers(15.0, 45.0));
    }
}
