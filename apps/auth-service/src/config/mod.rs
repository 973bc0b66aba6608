//! Configuration loading for the credential signer.

pub mod source;
pub mod token;

pub use source::{ConfigSource, Lookup, MapSource, ProcessEnv};
pub use token::{ConfigDegraded, RuntimeEnv, TokenConfig};
