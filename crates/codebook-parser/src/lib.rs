//! Parser for protocol workflow net dumps.
//!
//! A net dump is a brace-delimited, line-oriented text format: one metadata
//! block followed by one block per node, separated by blank lines. The
//! format is lenient by construction; fields that are absent or malformed
//! parse as empty strings, exactly like the generator that produces the
//! dumps tolerates. The public entry point is [`parse_net`].

mod blocks;
mod fields;
mod net;
mod node;
mod record;


pub use fields::{bare_field, quoted_field};
pub use net::parse_net;
