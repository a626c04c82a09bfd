#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod config;
mod engine;
mod error;

pub mod codec;
pub mod member;
pub mod strategy;
pub mod tracker;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use config::{EngineConfig, Mode};
pub use engine::{DeserializeDriver, Engine, EngineBuilder, SerializeDriver};
pub use error::{Error, Result};
