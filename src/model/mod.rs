pub mod config {
    pub use contagion_core::config::*;
}
pub mod error {
    pub use contagion_core::error::*;
}
pub mod history {
    pub use contagion_core::history::*;
}
pub mod palette {
    pub use contagion_core::palette::*;
}
pub mod snapshot {
    pub use contagion_core::snapshot::*;
}
pub mod spatial_hash {
    pub use contagion_core::spatial_hash::*;
}
pub mod systems {
    pub use contagion_core::systems::*;
}
pub mod tuning {
    pub use contagion_core::tuning::*;
}

pub mod state {
    pub use contagion_data::*;
}

pub mod world;
