#[cfg(not(target_arch = "wasm32"))]
pub mod app;
pub mod model;
pub mod ui;

#[cfg(target_arch = "wasm32")]
use crate::model::config::AppConfig;
#[cfg(target_arch = "wasm32")]
use crate::model::tuning::{Parameter, Step};
#[cfg(target_arch = "wasm32")]
use crate::model::world::World;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Browser entry point driven by `web/index.html`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct Simulation {
    world: World,
    canvas_size: (f64, f64),
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl Simulation {
    /// Creates a default-sized world. A missing or negative seed draws one
    /// from the browser's entropy source.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> Result<Simulation, JsValue> {
        console_error_panic_hook::set_once();

        let mut config = AppConfig::default();
        config.world.seed = seed.filter(|s| s.is_finite() && *s >= 0.0).map(|s| s as u64);
        let world = World::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let canvas_size = (f64::from(world.width), f64::from(world.height));

        Ok(Simulation { world, canvas_size })
    }

    pub fn width(&self) -> u16 {
        self.world.width
    }

    pub fn height(&self) -> u16 {
        self.world.height
    }

    /// Advances one frame and returns how many new infections happened.
    pub fn tick(&mut self) -> u32 {
        let events = self.world.update();
        events
            .iter()
            .filter(|e| matches!(e, crate::model::history::OutbreakEvent::Infection { .. }))
            .count() as u32
    }

    pub fn draw(&mut self, ctx: &web_sys::CanvasRenderingContext2d, width: f64, height: f64) {
        use crate::ui::web_renderer::WebRenderer;
        self.canvas_size = (width, height);
        let renderer = WebRenderer::new(width, height, self.world.width, self.world.height);
        renderer.render(ctx, &self.world.create_snapshot());
    }

    /// Steps a parameter by name (`move_speed`, `infection_chance`, ...) and
    /// returns the text the control panel should show.
    pub fn adjust(&mut self, name: &str, increase: bool) -> Result<String, JsValue> {
        let parameter: Parameter = name
            .parse()
            .map_err(|e: crate::model::error::SimError| JsValue::from_str(&e.to_string()))?;
        let step = if increase { Step::Increase } else { Step::Decrease };
        self.world.adjust(parameter, step);
        Ok(parameter.format_value(self.world.tunables.get(parameter)))
    }

    /// Formatted value of a parameter for the control panel.
    pub fn value(&self, name: &str) -> Result<String, JsValue> {
        let parameter: Parameter = name
            .parse()
            .map_err(|e: crate::model::error::SimError| JsValue::from_str(&e.to_string()))?;
        Ok(parameter.format_value(self.world.tunables.get(parameter)))
    }

    /// Infects the healthy person nearest to a canvas position.
    pub fn seed_infection(&mut self, canvas_x: f64, canvas_y: f64) -> bool {
        use crate::ui::web_renderer::WebRenderer;
        let (w, h) = self.canvas_size;
        let renderer = WebRenderer::new(w, h, self.world.width, self.world.height);
        let (x, y) = renderer.to_world(canvas_x, canvas_y);
        let reach = self.world.config.world.infection_radius() * 2.0;
        self.world.seed_infection_near(x, y, reach).is_some()
    }

    pub fn restart(&mut self) -> Result<(), JsValue> {
        self.world = self
            .world
            .restarted()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    pub fn stats(&self) -> js_sys::Object {
        let stats = self.world.population_stats();
        let obj = js_sys::Object::new();
        for (key, value) in [
            ("tick", self.world.tick as f64),
            ("healthy", stats.healthy as f64),
            ("infected", stats.infected as f64),
            ("immune", stats.recovered as f64),
            ("totalInfections", stats.total_infections as f64),
            ("peakInfected", stats.peak_infected as f64),
        ] {
            let _ = js_sys::Reflect::set(&obj, &JsValue::from_str(key), &JsValue::from_f64(value));
        }
        obj
    }
}
