pub mod chronicle;
pub mod controls;
pub mod overlays;
pub mod sparklines;
pub mod status;
