use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Block, Borders, Widget};

use contagion_core::palette::{self, Rgb};
use contagion_core::snapshot::{PersonSnapshot, WorldSnapshot};
use contagion_core::systems::effects;
use contagion_data::Status;

pub fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

fn cell_rgb(color: Color, fallback: Rgb) -> Rgb {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => fallback,
    }
}

/// Draws the simulation area scaled into the terminal.
///
/// Each cell stands for a `width / cols` by `height / rows` patch of the world.
/// Glow and flashes tint cell backgrounds additively, trails fade in with
/// alpha-over blending and each person is a single glyph.
pub struct WorldWidget<'a> {
    snapshot: &'a WorldSnapshot,
    paused: bool,
}

impl<'a> WorldWidget<'a> {
    pub fn new(snapshot: &'a WorldSnapshot, paused: bool) -> Self {
        Self { snapshot, paused }
    }

    pub fn get_inner_area(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    pub fn symbol_for(person: &PersonSnapshot, base_radius: f64) -> &'static str {
        match person.status {
            Status::Infected if person.current_radius > base_radius + 1.0 => "◉",
            _ => "●",
        }
    }

    /// Cell containing a world position, if the inner area is not empty.
    pub fn world_to_screen(
        world_x: f64,
        world_y: f64,
        area: Rect,
        world_w: u16,
        world_h: u16,
    ) -> Option<(u16, u16)> {
        let inner = Self::get_inner_area(area);
        if inner.width == 0 || inner.height == 0 || world_w == 0 || world_h == 0 {
            return None;
        }
        if !world_x.is_finite() || !world_y.is_finite() || world_x < 0.0 || world_y < 0.0 {
            return None;
        }
        let col = (world_x / f64::from(world_w) * f64::from(inner.width)) as u16;
        let row = (world_y / f64::from(world_h) * f64::from(inner.height)) as u16;
        if col >= inner.width || row >= inner.height {
            return None;
        }
        Some((inner.x + col, inner.y + row))
    }

    /// World position at the centre of a cell inside the inner area.
    pub fn screen_to_world(
        screen_x: u16,
        screen_y: u16,
        area: Rect,
        world_w: u16,
        world_h: u16,
    ) -> Option<(f64, f64)> {
        let inner = Self::get_inner_area(area);
        if screen_x >= inner.left()
            && screen_x < inner.right()
            && screen_y >= inner.top()
            && screen_y < inner.bottom()
        {
            let (cw, ch) = Self::cell_size(inner, world_w, world_h);
            Some((
                (f64::from(screen_x - inner.x) + 0.5) * cw,
                (f64::from(screen_y - inner.y) + 0.5) * ch,
            ))
        } else {
            None
        }
    }

    /// World units covered by one cell horizontally and vertically.
    pub fn cell_size(inner: Rect, world_w: u16, world_h: u16) -> (f64, f64) {
        (
            f64::from(world_w) / f64::from(inner.width.max(1)),
            f64::from(world_h) / f64::from(inner.height.max(1)),
        )
    }

    /// Calls `paint` for every cell whose centre lies within `radius` of
    /// `(cx, cy)`.
    fn for_each_cell_in_disc<F>(&self, inner: Rect, cx: f64, cy: f64, radius: f64, mut paint: F)
    where
        F: FnMut(u16, u16),
    {
        if inner.width == 0 || inner.height == 0 || radius <= 0.0 {
            return;
        }
        let (cw, ch) = Self::cell_size(inner, self.snapshot.width, self.snapshot.height);
        let min_col = ((cx - radius) / cw).floor().max(0.0) as u16;
        let max_col = (((cx + radius) / cw).floor().max(0.0) as u16).min(inner.width - 1);
        let min_row = ((cy - radius) / ch).floor().max(0.0) as u16;
        let max_row = (((cy + radius) / ch).floor().max(0.0) as u16).min(inner.height - 1);
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let wx = (f64::from(col) + 0.5) * cw;
                let wy = (f64::from(row) + 0.5) * ch;
                if (wx - cx).hypot(wy - cy) <= radius {
                    paint(inner.x + col, inner.y + row);
                }
            }
        }
    }

    fn background_at_row(inner: Rect, y: u16) -> Rgb {
        let span = f64::from(inner.height.saturating_sub(1).max(1));
        palette::background_at(f64::from(y - inner.y) / span)
    }

    fn tint_additive(cell: &mut Cell, color: Rgb, alpha: u8, fallback: Rgb) {
        let base = cell_rgb(cell.bg, fallback);
        cell.set_bg(rgb(palette::blend_add(base, color, alpha)));
    }

    fn render_flashes(&self, inner: Rect, buf: &mut Buffer) {
        for flash in &self.snapshot.flashes {
            let (radius, alpha) = effects::flash_appearance(flash);
            if radius == 0 || alpha == 0 {
                continue;
            }
            self.for_each_cell_in_disc(inner, flash.x, flash.y, f64::from(radius), |x, y| {
                let fallback = Self::background_at_row(inner, y);
                Self::tint_additive(&mut buf[(x, y)], palette::FLASH, alpha, fallback);
            });
        }
    }

    fn render_person(&self, person: &PersonSnapshot, area: Rect, inner: Rect, buf: &mut Buffer) {
        let visual = &self.snapshot.visual;
        let color = palette::status_color(person.status);
        let (world_w, world_h) = (self.snapshot.width, self.snapshot.height);

        if visual.trails_enabled {
            let dots = effects::trail_dots(
                &person.trail,
                person.trail_capacity,
                self.snapshot.person_radius,
                visual.trail_alpha_start,
            );
            for dot in dots {
                if let Some((x, y)) = Self::world_to_screen(dot.x, dot.y, area, world_w, world_h) {
                    let fallback = Self::background_at_row(inner, y);
                    let cell = &mut buf[(x, y)];
                    let base = cell_rgb(cell.bg, fallback);
                    cell.set_bg(rgb(palette::blend_over(base, color, dot.alpha)));
                    if cell.symbol() == " " {
                        cell.set_symbol("·");
                        let glyph_alpha = dot.alpha.saturating_mul(3);
                        cell.set_fg(rgb(palette::blend_over(base, color, glyph_alpha)));
                    }
                }
            }
        }

        if visual.glow_enabled {
            for (radius, alpha) in effects::glow_layers(person.current_radius, visual) {
                self.for_each_cell_in_disc(inner, person.x, person.y, f64::from(radius), |x, y| {
                    let fallback = Self::background_at_row(inner, y);
                    Self::tint_additive(&mut buf[(x, y)], color, alpha, fallback);
                });
            }
        }

        if let Some((x, y)) = Self::world_to_screen(person.x, person.y, area, world_w, world_h) {
            let cell = &mut buf[(x, y)];
            cell.set_symbol(Self::symbol_for(person, self.snapshot.person_radius));
            cell.set_fg(rgb(color));
        }
    }
}

impl<'a> Widget for WorldWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.paused {
            format!(" World (Tick: {}) [PAUSED] ", self.snapshot.tick)
        } else {
            format!(" World (Tick: {}) ", self.snapshot.tick)
        };
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(ratatui::style::Style::default().fg(rgb(palette::UI_TEXT)))
            .render(area, buf);

        let inner = Self::get_inner_area(area);
        for y in inner.top()..inner.bottom() {
            let bg = rgb(Self::background_at_row(inner, y));
            for x in inner.left()..inner.right() {
                let cell = &mut buf[(x, y)];
                cell.set_symbol(" ");
                cell.set_bg(bg);
            }
        }

        if self.snapshot.visual.flash_enabled {
            self.render_flashes(inner, buf);
        }
        for person in &self.snapshot.people {
            self.render_person(person, area, inner, buf);
        }
    }
}
