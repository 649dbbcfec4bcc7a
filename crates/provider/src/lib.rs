#![forbid(unsafe_code)]

pub mod memory;
pub mod opentdb;
pub mod source;

pub use memory::InMemoryProvider;
pub use opentdb::{OpenTdbConfig, OpenTdbProvider};
pub use source::{ProviderError, QuestionProvider};
