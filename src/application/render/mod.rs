//! Template-to-HTML compilation.
//!
//! The compiler is a pure function over a document snapshot and a layout
//! skeleton. Substitution is plain string replacement: `{{title}}`,
//! `{{content}}` and every `{{#each sections}}...{{/each}}` span. Missing
//! tokens leave the skeleton untouched; nothing is escaped.

mod compiler;
mod style;

pub use compiler::{
    CONTENT_TOKEN, DEFAULT_CONTENT, DEFAULT_TITLE, SECTIONS_BEGIN_TOKEN, SECTIONS_END_TOKEN,
    TITLE_TOKEN, render_block, render_document,
};
pub use style::{kebab_case, style_to_string};
