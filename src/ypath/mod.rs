//! YPath: a small path-query language for navigating parsed YAML documents.
//!
//! A YPath expression is parsed once with [`parse`] into an [`Expr`] tree,
//! then evaluated against a starting node with [`evaluate`]. Most callers
//! will instead reach for [`crate::NodeRef::query`] or
//! [`crate::Document::query`], which do both steps and return a plain
//! `Vec<NodeRef>`.
//!
//! ```
//! use fyaml::Document;
//!
//! let doc = Document::parse_str("users:\n  - name: Alice\n  - name: Bob").unwrap();
//! let names = doc.query("/users/*/name").unwrap();
//! let names: Vec<&str> = names.iter().map(|n| n.scalar_str().unwrap()).collect();
//! assert_eq!(names, vec!["Alice", "Bob"]);
//! ```

mod ast;
mod eval;
mod parse;
mod reader;
mod token;

pub mod error;

pub use ast::{Expr, ExprKind, SliceEnd};
pub use error::{PathError, Span};
pub use eval::{evaluate, evaluate_lenient, ResultSet};
pub use parse::parse;
