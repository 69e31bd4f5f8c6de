pub mod bridge;
pub mod config;
pub mod demo;
pub mod error;
pub mod runtime;
pub mod search;
pub mod syntax;

pub use bridge::{Borrowed, FromObject, Owned, RawObject, Runtime, ToObject};
pub use config::BridgeConfig;
pub use error::BridgeError;
