//! # cstyle-ts
//!
//! Tree-sitter based front end for cstyle.
//!
//! This crate parses C and C++ sources with `tree-sitter-cpp` and lowers
//! the parse tree into the `cstyle-core` [`TranslationUnit`] the rule engine
//! checks. It provides:
//!
//! - [`SyntaxTreeSource`] trait for pluggable front ends
//! - [`CppFrontend`] for C and C++ sources, with quoted-include splicing
//! - [`literal::decode`] for string literal escape decoding
//!
//! [`TranslationUnit`]: cstyle_core::TranslationUnit

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cpp;
pub mod literal;
mod lower;
pub mod source;

pub use cpp::CppFrontend;
pub use source::{FrontendError, SyntaxTreeSource};
