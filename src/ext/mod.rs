/// Extension traits for built-in Rust types.
///
/// Each extension trait lives in its own file named after the type it
/// extends; `path.rs` holds the `std::path::Path` extensions used by the
/// loaders.
pub mod path;

pub use path::PathExt;
