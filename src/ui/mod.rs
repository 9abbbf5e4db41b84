#[cfg(not(target_arch = "wasm32"))]
pub mod tui {
    pub use contagion_tui::renderer::{rgb, WorldWidget};
    pub use contagion_tui::views::chronicle::ChronicleWidget;
    pub use contagion_tui::views::controls::{ControlButton, ControlPanel};
    pub use contagion_tui::views::overlays::HelpOverlay;
    pub use contagion_tui::views::sparklines::SparklinesWidget;
    pub use contagion_tui::views::status::StatusWidget;
    pub use contagion_tui::Tui;
}

#[cfg(target_arch = "wasm32")]
pub mod web_renderer;
