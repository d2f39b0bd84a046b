pub mod json;
pub mod serialized;

pub use json::{decode_json, decode_json_str, JsonDecode, SkippedEntry};
pub use serialized::{decode, encode};
