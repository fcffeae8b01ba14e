//! Deterministic binary serialization for ledger records.
//!
//! Every stored record goes through one bincode configuration so that
//! independent nodes derive byte-identical state from the same history.
//! Structs encode their fields in declaration order; records never hold maps.

mod bincode_config;

pub use bincode_config::{serialize, deserialize, serialized_size};
