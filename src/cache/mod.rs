//! Cache Module
//!
//! The entry store and its scalar value type.

mod scalar;
mod store;


// Re-export public types
pub use scalar::{decode_float, decode_int, decode_text, Scalar};
pub use store::{Cache, RawStore, STORE_OP_NAME};
