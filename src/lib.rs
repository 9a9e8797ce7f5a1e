//! # split-text
//!
//! Wraps the characters, words, sentences or custom-pattern matches of an HTML
//! element's text in individually addressable elements, typically so each one can be
//! styled or animated on its own.
//!
//! ```ignore
//! use split_text::{dom::HtmlDocument, split_text, Delimiter, SplitTextOptions};
//!
//! let doc = HtmlDocument::parse("<h1>Hello there</h1>");
//! let heading = doc.elements_by_tag("h1").remove(0);
//! let options = SplitTextOptions {
//!     delimiter: Delimiter::Character,
//!     ..Default::default()
//! };
//! let letters = split_text(&heading, &options);
//! assert_eq!(letters.len(), 10);
//! ```
//!
//! Layout:
//!
//!     .
//!     ├── splitting.rs      # split_text entry point
//!     ├── splitting
//!     │   ├── delimiter.rs  # selector → pattern
//!     │   ├── punctuation.rs
//!     │   ├── wrapper.rs
//!     │   ├── traversal.rs  # the split-and-splice pass
//!     │   └── options.rs
//!     ├── dom.rs            # rcdom primitives, parse and serialize
//!     ├── config.rs         # layered option loading
//!     ├── error.rs
//!     └── bin/split-text.rs
//!
//! The library never prints. Diagnostics go through `tracing`; installing a
//! subscriber is up to the application.

pub mod config;
pub mod dom;
pub mod error;
pub mod splitting;

pub use error::{Result, SplitError};
pub use splitting::{
    split_text, Delimiter, SplitTextOptions, DEFAULT_TAG, MARKER_CLASS, ROOT_CLASS,
};
