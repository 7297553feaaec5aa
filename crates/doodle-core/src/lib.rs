pub mod config;
pub mod error;
pub mod generate;
pub mod replicate;

pub use config::{Config, PollPolicy};
pub use error::{Error, Result};
pub use generate::{Generator, generate_from_scribble};
