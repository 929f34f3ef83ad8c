//! Typed build configuration entities for the TeamCity REST API.
//!
//! The server represents most configuration objects (build steps, triggers,
//! ...) as an envelope with a `"type"` discriminator and a flat, ordered bag
//! of string properties. This crate turns those envelopes into typed Rust
//! values and back:
//!
//! - [`properties`] contains the property bag and the [`Properties`] derive
//!   which maps structs to and from it.
//! - [`registry`] dispatches a single envelope to its concrete variant.
//! - [`collection`] decodes and encodes `{"count": n, "<item>": [...]}` lists.
//! - [`step`] and [`trigger`] contain the supported entity variants.
//!
//! ## Crate Features
//!
//! - `default` enables the `octopus` feature.
//! - `full` enables all available features.
//! - `octopus` enables the Octopus Deploy build steps.
//!
//! [`Properties`]: derive@properties::Properties
pub mod collection;
pub mod entity;
pub mod error;
pub mod iter;
pub mod properties;
pub mod registry;
pub mod step;
pub mod trigger;

pub use error::{DecodeError, EncodeError};
