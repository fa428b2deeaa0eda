#![forbid(unsafe_code)]

pub mod config;
pub mod gauge;
pub mod model;
pub mod time;

pub use time::Clock;
