//! The text-processing stages of a render call.
//!
//! - `comments`: guards HTML comments behind placeholders
//! - `validate`: tag-balance checks run before and after processing
//! - `include`: single-pass `<include src="..."/>` expansion
//! - `loops`: `*for` expansion with per-call synthetic bindings
//! - `conditionals`: `*if` filtering
//! - `interpolate`: escaped `{{path}}` substitution
//! - `styles`: stylesheet inlining
//!
//! `scan`, `scope` and `value` hold the tag scanner, the expanded context and
//! the value rules the stages share.

pub mod comments;
pub mod conditionals;
pub mod include;
pub mod interpolate;
pub mod loops;
pub mod scan;
pub mod scope;
pub mod styles;
pub mod validate;
pub mod value;

pub use comments::CommentTable;
pub use scope::RenderScope;
pub use validate::{validate, Imbalance};
