pub mod clock_time;
pub mod compose;
pub mod imperative;
