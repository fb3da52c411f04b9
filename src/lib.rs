//! This crate implements the channel encoder for WSPR (Weak Signal Propagation Reporter), a
//! digital radio protocol for probing weak-signal propagation paths. A message comprising a
//! callsign, a four-character Maidenhead grid locator and a transmit power level is packed into
//! two bit fields, encoded by a rate-1/2 convolutional code of constraint length 32, interleaved
//! by bit reversal, and merged with a fixed synchronization vector into 162 channel symbols with
//! values in `{0, 1, 2, 3}`.
//!
//! # Examples
//!
//! ```
//! use wspr::encode;
//!
//! let encoded = encode("AA0NT", "EM18", 20)?;
//! assert_eq!(encoded.symbols().len(), 162);
//! assert!(encoded.iter().all(|&sym| sym <= 3));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(
    clippy::complexity,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_allocation,
    unused_import_braces,
    unused_qualifications
)]

pub mod common;
pub mod convolutional;
pub mod interleaver;
pub mod pack;
pub mod utils;
pub mod wspr;

pub use common::{Bit, Error};
pub use interleaver::Interleaver;
pub use pack::PackedFields;
pub use wspr::{encode, encode_batch, save_reports, EncodeReport, EncodedMessage, Message};
