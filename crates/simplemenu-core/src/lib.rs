pub mod config;
pub mod menu;
pub mod placement;

mod catalog;
mod error;

#[cfg(test)]
mod tests;

pub use catalog::load_catalog;
pub use error::{Error, Result};

pub use simplemenu_types::*;
