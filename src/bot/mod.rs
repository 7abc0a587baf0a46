//! Bot module - answers game-info queries from static datasets.

pub mod alias;
pub mod catalog;
pub mod data;
pub mod engine;
pub mod format;
pub mod message;
pub mod monsters;
pub mod settings;
pub mod skills;

#[cfg(test)]
mod tests;

pub use catalog::Catalog;
pub use data::Dataset;
pub use engine::{BotConfig, BotEngine};
pub use message::{InboundMessage, OutboundMessage};
