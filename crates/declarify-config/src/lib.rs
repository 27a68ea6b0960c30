//! declarify config layer
//!
//! Format-preserving model of INI-style `setup.cfg` documents.
//!
//! # Core Operations
//!
//! - **Parse**: [`ConfigDocument::parse`] keeps every byte of the input
//! - **Encode**: [`Encoding::encode`] turns a typed value into entry text
//! - **Set**: [`ConfigDocument::set`] edits one `(section, key)` in place
//! - **Serialize**: [`ConfigDocument::serialize`] prints the document back
//!
//! Unmutated documents serialize byte-for-byte identical to their input.
//!
//! # Example
//!
//! ```rust
//! use declarify_config::{ConfigDocument, Encoding, IniValue};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = ConfigDocument::parse("# project\n[metadata]\nname = old\n")?;
//! let value = Encoding::Plain.encode(&IniValue::Text("new".into()))?;
//! doc.set("metadata", "name", &value);
//!
//! assert_eq!(doc.serialize(), "# project\n[metadata]\nname = new\n");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod document;
pub mod encoding;
pub mod error;
mod style;

// Re-exports for convenience
pub use document::ConfigDocument;
pub use encoding::{EncodedValue, Encoding, IniValue};
pub use error::{DocumentError, EncodeError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
