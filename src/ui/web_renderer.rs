use crate::model::palette::{self, Rgb};
use crate::model::snapshot::{PersonSnapshot, WorldSnapshot};
use crate::model::systems::effects;
use std::f64::consts::TAU;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

fn rgba(c: Rgb, alpha: u8) -> String {
    format!(
        "rgba({}, {}, {}, {:.3})",
        c.0,
        c.1,
        c.2,
        f64::from(alpha) / 255.0
    )
}

/// Draws a [`WorldSnapshot`] onto a 2D canvas scaled to `width` x `height`.
pub struct WebRenderer {
    width: f64,
    height: f64,
    scale_x: f64,
    scale_y: f64,
}

impl WebRenderer {
    pub fn new(width: f64, height: f64, world_width: u16, world_height: u16) -> Self {
        Self {
            width,
            height,
            scale_x: width / f64::from(world_width.max(1)),
            scale_y: height / f64::from(world_height.max(1)),
        }
    }

    /// Canvas position to world position.
    pub fn to_world(&self, x: f64, y: f64) -> (f64, f64) {
        (x / self.scale_x, y / self.scale_y)
    }

    fn disc(&self, ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, style: &str) {
        ctx.set_fill_style(&JsValue::from_str(style));
        ctx.begin_path();
        let r = radius * self.scale_x.min(self.scale_y);
        if ctx
            .arc(x * self.scale_x, y * self.scale_y, r, 0.0, TAU)
            .is_ok()
        {
            ctx.fill();
        }
    }

    fn additive<F: FnOnce()>(ctx: &CanvasRenderingContext2d, draw: F) {
        let _ = ctx.set_global_composite_operation("lighter");
        draw();
        let _ = ctx.set_global_composite_operation("source-over");
    }

    fn draw_background(&self, ctx: &CanvasRenderingContext2d) {
        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, self.height);
        let _ = gradient.add_color_stop(0.0, &palette::to_hex(palette::BACKGROUND_TOP));
        let _ = gradient.add_color_stop(1.0, &palette::to_hex(palette::BACKGROUND_BOTTOM));
        ctx.set_fill_style(&gradient);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_person(&self, ctx: &CanvasRenderingContext2d, person: &PersonSnapshot, snapshot: &WorldSnapshot) {
        let visual = &snapshot.visual;
        let color = palette::status_color(person.status);

        if visual.trails_enabled {
            for dot in effects::trail_dots(
                &person.trail,
                person.trail_capacity,
                snapshot.person_radius,
                visual.trail_alpha_start,
            ) {
                self.disc(ctx, dot.x, dot.y, f64::from(dot.radius), &rgba(color, dot.alpha));
            }
        }

        if visual.glow_enabled {
            let layers = effects::glow_layers(person.current_radius, visual);
            Self::additive(ctx, || {
                for (radius, alpha) in layers {
                    self.disc(ctx, person.x.trunc(), person.y.trunc(), f64::from(radius), &rgba(color, alpha));
                }
            });
        }

        let body = person.current_radius.trunc();
        if body > 0.0 {
            self.disc(ctx, person.x.trunc(), person.y.trunc(), body, &palette::to_hex(color));
        }
    }

    pub fn render(&self, ctx: &CanvasRenderingContext2d, snapshot: &WorldSnapshot) {
        self.draw_background(ctx);

        if snapshot.visual.flash_enabled {
            Self::additive(ctx, || {
                for flash in &snapshot.flashes {
                    let (radius, alpha) = effects::flash_appearance(flash);
                    if radius > 0 && alpha > 0 {
                        self.disc(ctx, flash.x, flash.y, f64::from(radius), &rgba(palette::FLASH, alpha));
                    }
                }
            });
        }

        for person in &snapshot.people {
            self.draw_person(ctx, person, snapshot);
        }
    }
}
