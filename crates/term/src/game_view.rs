//! GameView: draws a shaft scene into a terminal framebuffer.
//!
//! The shaft is shown from above: columns run along x, rows along z (forward
//! is up). Each column shows its highest settled cube, coloured by layer, with
//! the active piece drawn on top. A gauge on the left shows the layers filled
//! so far and a panel on the right the score.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::scene::{HudState, Scene};
use crate::types::{RunState, Shaft};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything one frame needs
#[derive(Debug, Clone, Copy)]
pub struct ViewState<'a> {
    pub shaft: Shaft,
    pub scene: &'a Scene,
    pub hud: &'a HudState,
    /// Extra status line (e.g. the error that ended a session)
    pub message: Option<&'a str>,
}

/// Screen positions of the parts of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub gauge_x: u16,
    pub frame_x: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub panel_x: u16,
    pub top_y: u16,
}

const GAUGE_W: u16 = 4;
const PANEL_W: u16 = 18;

const BACKGROUND: Rgb = Rgb::new(30, 30, 40);
const BLACK: Rgb = Rgb::new(0, 0, 0);
const PIECE: Rgb = Rgb::new(245, 245, 245);

const LAYER_COLORS: [Rgb; 8] = [
    Rgb::new(80, 120, 220),
    Rgb::new(80, 220, 220),
    Rgb::new(100, 220, 120),
    Rgb::new(240, 220, 80),
    Rgb::new(255, 165, 0),
    Rgb::new(220, 80, 80),
    Rgb::new(200, 120, 220),
    Rgb::new(160, 160, 160),
];

/// Colour used for settled cubes in layer `y`
pub fn layer_color(y: i32) -> Rgb {
    LAYER_COLORS[y.rem_euclid(LAYER_COLORS.len() as i32) as usize]
}

/// Top-down terminal view of a shaft.
pub struct GameView {
    /// Shaft cell width in terminal columns.
    cell_w: u16,
    /// Shaft cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub fn layout(&self, shaft: Shaft, viewport: Viewport) -> Layout {
        let frame_w = shaft.size_x.max(0) as u16 * self.cell_w + 2;
        let frame_h = shaft.size_z.max(0) as u16 * self.cell_h + 2;
        let gauge_h = shaft.size_y.max(0) as u16 + 2;

        let total_w = GAUGE_W + 1 + frame_w + 2 + PANEL_W;
        let total_h = frame_h.max(gauge_h);

        let gauge_x = viewport.width.saturating_sub(total_w) / 2;
        let frame_x = gauge_x + GAUGE_W + 1;
        Layout {
            gauge_x,
            frame_x,
            frame_w,
            frame_h,
            panel_x: frame_x + frame_w + 2,
            top_y: viewport.height.saturating_sub(total_h) / 2,
        }
    }

    /// Terminal position of the top-left character of shaft column `(x, z)`
    pub fn cell_origin(&self, layout: &Layout, x: u16, z: u16) -> (u16, u16) {
        (
            layout.frame_x + 1 + x * self.cell_w,
            layout.top_y + 1 + z * self.cell_h,
        )
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, view: &ViewState<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(view, viewport, &mut fb);
        fb
    }

    /// Render a frame into an existing framebuffer.
    pub fn render_into(&self, view: &ViewState<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let shaft = view.shaft;
        let layout = self.layout(shaft, viewport);
        let border = CellStyle::fg(Rgb::new(200, 200, 200), BLACK);

        draw_border(fb, layout.frame_x, layout.top_y, layout.frame_w, layout.frame_h, border);
        self.draw_columns(fb, &layout, view);
        self.draw_gauge(fb, &layout, view);
        self.draw_panel(fb, &layout, view, viewport);

        let overlay = if view.hud.is_game_over {
            Some("GAME OVER")
        } else {
            match view.hud.state {
                RunState::Paused => Some("PAUSED"),
                RunState::Stopped => Some("PRESS ENTER"),
                RunState::Running => None,
            }
        };
        if let Some(text) = overlay {
            draw_overlay_text(fb, &layout, text);
        }

        if let Some(message) = view.message {
            let style = CellStyle::fg(Rgb::new(255, 120, 120), BLACK).bold();
            fb.put_str(0, viewport.height.saturating_sub(1), message, style);
        }
    }

    fn draw_columns(&self, fb: &mut FrameBuffer, layout: &Layout, view: &ViewState<'_>) {
        let shaft = view.shaft;
        let columns = shaft.layer_capacity();
        let mut tops: Vec<Option<i32>> = vec![None; columns];
        let column = |x: i32, z: i32| -> Option<usize> {
            shaft
                .contains_column(x, z)
                .then(|| (z * shaft.size_x + x) as usize)
        };

        for cube in view.scene.fallen_cubes() {
            if let Some(i) = column(cube.x, cube.z) {
                tops[i] = Some(tops[i].map_or(cube.y, |top| top.max(cube.y)));
            }
        }

        let empty = CellStyle::fg(Rgb::new(90, 90, 100), BACKGROUND).dim();
        for z in 0..shaft.size_z {
            for x in 0..shaft.size_x {
                let (px, py) = self.cell_origin(layout, x as u16, z as u16);
                match column(x, z).and_then(|i| tops[i]) {
                    Some(y) => {
                        let style = CellStyle::fg(layer_color(y), BACKGROUND);
                        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
                    }
                    None => fb.fill_rect(px, py, self.cell_w, self.cell_h, '·', empty),
                }
            }
        }

        let piece = CellStyle::fg(PIECE, BACKGROUND).bold();
        for cube in view.scene.piece_cubes() {
            if shaft.contains_column(cube.x, cube.z) {
                let (px, py) = self.cell_origin(layout, cube.x as u16, cube.z as u16);
                fb.fill_rect(px, py, self.cell_w, self.cell_h, '▓', piece);
            }
        }
    }

    fn draw_gauge(&self, fb: &mut FrameBuffer, layout: &Layout, view: &ViewState<'_>) {
        let size_y = view.shaft.size_y.max(0);
        let border = CellStyle::fg(Rgb::new(120, 120, 130), BLACK);
        draw_border(fb, layout.gauge_x, layout.top_y, GAUGE_W, size_y as u16 + 2, border);

        let filled = view.hud.score.fallen_cubes_height as i32;
        let piece_layers: Vec<i32> = view.scene.piece_cubes().iter().map(|c| c.y).collect();
        let empty = CellStyle::fg(Rgb::new(90, 90, 100), BACKGROUND).dim();

        for y in 0..size_y {
            let row = layout.top_y + 1 + (size_y - 1 - y) as u16;
            let x = layout.gauge_x + 1;
            if piece_layers.contains(&y) {
                fb.put_str(x, row, "▓▓", CellStyle::fg(PIECE, BACKGROUND));
            } else if y < filled {
                fb.put_str(x, row, "██", CellStyle::fg(layer_color(y), BACKGROUND));
            } else {
                fb.put_str(x, row, "··", empty);
            }
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        view: &ViewState<'_>,
        viewport: Viewport,
    ) {
        if layout.panel_x >= viewport.width {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220), BLACK).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200), BLACK);
        let score = view.hud.score;
        let x = layout.panel_x;
        let mut y = layout.top_y;

        fb.put_str(x, y, "ROWS", label);
        fb.put_u32(x, y + 1, score.removed_rows, value);
        y += 3;

        fb.put_str(x, y, "CUBES", label);
        fb.put_u32(x, y + 1, score.fallen_cubes, value);
        y += 3;

        fb.put_str(x, y, "HEIGHT", label);
        let height = format!("{}/{}", score.fallen_cubes_height, view.shaft.size_y);
        fb.put_str(x, y + 1, &height, value);
        y += 3;

        fb.put_str(x, y, "SHAFT", label);
        fb.put_str(x, y + 1, &view.shaft.to_string(), value);
        y += 3;

        let help = CellStyle::fg(Rgb::new(140, 140, 150), BLACK).dim();
        for line in [
            "arrows  move",
            "q/a w/s e/d turn",
            "space   drop",
            "p pause esc stop",
            "enter   restart",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, line, help);
            y += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, layout: &Layout, text: &str) {
    let mid_y = layout.top_y + layout.frame_h / 2;
    let text_w = text.chars().count() as u16;
    let x = layout.frame_x + layout.frame_w.saturating_sub(text_w) / 2;
    let style = CellStyle::fg(Rgb::new(255, 255, 255), BLACK).bold();
    fb.put_str(x, mid_y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Renderer;
    use crate::types::Cube;

    fn running() -> HudState {
        HudState {
            state: RunState::Running,
            ..HudState::default()
        }
    }

    #[test]
    fn test_layout_fits_small_shaft() {
        let view = GameView::default();
        let layout = view.layout(Shaft::new(4, 10, 4), Viewport::new(80, 24));
        assert_eq!(layout.frame_w, 10);
        assert_eq!(layout.frame_h, 6);
        assert_eq!(layout.frame_x, layout.gauge_x + 5);
        assert!(layout.panel_x + PANEL_W <= 80);
    }

    #[test]
    fn test_highest_cube_colours_column() {
        let shaft = Shaft::new(3, 6, 3);
        let mut scene = Scene::new();
        scene.render_fallen_cubes(&[Cube::new(1, 0, 1), Cube::new(1, 2, 1)]);
        let hud = running();
        let state = ViewState {
            shaft,
            scene: &scene,
            hud: &hud,
            message: None,
        };

        let view = GameView::default();
        let viewport = Viewport::new(60, 20);
        let fb = view.render(&state, viewport);
        let layout = view.layout(shaft, viewport);

        let (px, py) = view.cell_origin(&layout, 1, 1);
        let cell = fb.get(px, py).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, layer_color(2));

        let (ex, ey) = view.cell_origin(&layout, 0, 0);
        assert_eq!(fb.get(ex, ey).unwrap().ch, '·');
    }

    #[test]
    fn test_overlay_for_paused() {
        let shaft = Shaft::new(5, 8, 5);
        let scene = Scene::new();
        let hud = HudState {
            state: RunState::Paused,
            ..HudState::default()
        };
        let state = ViewState {
            shaft,
            scene: &scene,
            hud: &hud,
            message: None,
        };
        let fb = GameView::default().render(&state, Viewport::new(60, 20));
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("PAUSED"));
    }
}
