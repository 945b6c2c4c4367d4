//! Response decoder module
//!
//! Turns a raw page body into the JSON document and the list of record
//! values it carries. Typed deserialization of each record happens later,
//! in the resource adapter.

mod decoders;
mod types;

pub use decoders::{extract_path, extract_string, JsonDecoder};
pub(crate) use decoders::kind_of;
pub use types::RecordDecoder;
