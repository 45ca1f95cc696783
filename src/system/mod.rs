pub mod deps;
pub mod desktop;
pub mod picker;
