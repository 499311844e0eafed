pub mod config;
pub mod display;
pub mod drift;
pub mod mapping;
pub mod temperature;
pub mod tracking;
pub mod wind;

#[cfg(test)]
pub(crate) mod fakes;

pub use config::get_config;
