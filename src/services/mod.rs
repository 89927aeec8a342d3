pub mod clock_source;
pub mod display;
pub mod ticker;
