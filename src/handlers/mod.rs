pub mod ticks;
