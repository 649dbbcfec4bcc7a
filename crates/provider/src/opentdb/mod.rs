//! Open Trivia DB (<https://opentdb.com>) backed provider.

mod client;
mod wire;

pub use client::{OpenTdbConfig, OpenTdbProvider};
