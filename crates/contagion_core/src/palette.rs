//! Colours shared by the terminal and browser renderers.

use contagion_data::Status;

pub type Rgb = (u8, u8, u8);

pub const BACKGROUND_TOP: Rgb = (10, 0, 20);
pub const BACKGROUND_BOTTOM: Rgb = (30, 0, 50);
pub const HEALTHY: Rgb = (0, 220, 120);
pub const INFECTED: Rgb = (255, 50, 50);
pub const RECOVERED: Rgb = (100, 100, 180);
pub const FLASH: Rgb = (255, 255, 200);
pub const UI_TEXT: Rgb = (230, 230, 230);
pub const UI_BACKGROUND: Rgb = (40, 40, 70);
pub const BUTTON: Rgb = (80, 80, 120);
pub const BUTTON_HOVER: Rgb = (110, 110, 160);
pub const BUTTON_SELECTED: Rgb = (70, 130, 180);

pub fn status_color(status: Status) -> Rgb {
    match status {
        Status::Healthy => HEALTHY,
        Status::Infected => INFECTED,
        Status::Recovered => RECOVERED,
    }
}

/// Vertical background gradient at `ratio` in `[0, 1]` from the top.
pub fn background_at(ratio: f64) -> Rgb {
    let ratio = ratio.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (f64::from(a) * (1.0 - ratio) + f64::from(b) * ratio) as u8;
    (
        lerp(BACKGROUND_TOP.0, BACKGROUND_BOTTOM.0),
        lerp(BACKGROUND_TOP.1, BACKGROUND_BOTTOM.1),
        lerp(BACKGROUND_TOP.2, BACKGROUND_BOTTOM.2),
    )
}

/// Additive blend of `color` scaled by `alpha` (0-255) onto `base`.
pub fn blend_add(base: Rgb, color: Rgb, alpha: u8) -> Rgb {
    let a = f64::from(alpha) / 255.0;
    let add = |b: u8, c: u8| (f64::from(b) + f64::from(c) * a).min(255.0) as u8;
    (add(base.0, color.0), add(base.1, color.1), add(base.2, color.2))
}

/// Alpha-over blend of `color` onto `base`.
pub fn blend_over(base: Rgb, color: Rgb, alpha: u8) -> Rgb {
    let a = f64::from(alpha) / 255.0;
    let mix = |b: u8, c: u8| (f64::from(b) * (1.0 - a) + f64::from(c) * a).round() as u8;
    (mix(base.0, color.0), mix(base.1, color.1), mix(base.2, color.2))
}

pub fn to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}
