//! # asterix
//!
//! Facade crate: a catalogue-driven decoder for EUROCONTROL ASTERIX
//! surveillance messages. Wires together [`asterix_core`]'s runtime
//! engine and [`asterix_schema`]'s catalogue loader behind a small
//! [`Config`]/[`Decoder`] API.
//!
//! ```ignore
//! use asterix::{Config, Decoder};
//!
//! let config = Config {
//!     catalogue_path: Some("/opt/asterix/catalogue".into()),
//!     ..Config::default()
//! };
//! let decoder = Decoder::new(&config);
//! println!("{}", decoder.decode(&payload));
//! ```

pub mod config;
pub mod decoder;

pub use asterix_core as core;
pub use asterix_schema as schema;
pub use config::Config;
pub use decoder::Decoder;
