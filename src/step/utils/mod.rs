//! String utilities for building the compiler command line.
//!
//! - `macros` - `${NAME}` expansion and whitespace normalization
//! - `tokenize` - quote-aware argument splitting
//! - `arguments` - the ordered [`ArgumentList`]

mod arguments;
mod macros;
mod tokenize;

pub use arguments::ArgumentList;
pub use macros::{expand, normalize, replace_macro};
pub use tokenize::tokenize;
