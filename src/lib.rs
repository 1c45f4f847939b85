//! Bowl League - score keeping and statistics for a multi-season bowling
//! league, driven by plain text chat messages

pub mod bot;
pub mod command;
pub mod core;
pub mod resolve;
pub mod source;
pub mod stats;
