//! declarify syntax layer
//!
//! Reads Python build scripts without executing them.
//!
//! # Core Operations
//!
//! - **Parse**: [`SourceFile::parse`] builds a lossless tree-sitter tree
//! - **Analyze**: [`analyze`] locates the single target call and its keyword arguments
//! - **Classify**: [`classify`] decides whether a value is a provable literal
//! - **Rewrite**: [`remove_keywords`] drops keyword arguments, touching nothing else
//!
//! # Example
//!
//! ```rust
//! use declarify_syntax::{analyze, remove_keywords, SourceFile};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = SourceFile::parse("setup(name=\"demo\", url=get_url())\n")?;
//! let analysis = analyze(&source, "setup")?;
//! let call = analysis.call_site().expect("single setup() call");
//!
//! let rewritten = remove_keywords(&source, call, ["name"])?;
//! assert_eq!(rewritten.text(), "setup(url=get_url())\n");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod analyzer;
pub mod classify;
pub mod error;
pub mod literal;
pub mod source;
mod strings;
pub mod transform;

// Re-exports for convenience
pub use analyzer::{analyze, Analysis, Argument, CallSite};
pub use classify::classify;
pub use error::{AnalyzeError, SyntaxError, TransformError};
pub use literal::{ClassifiedValue, Literal, Opaque, Scalar};
pub use source::SourceFile;
pub use transform::remove_keywords;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
