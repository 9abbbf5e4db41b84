pub mod data;

pub use data::effect::*;
pub use data::person::*;
pub use data::stats::*;
