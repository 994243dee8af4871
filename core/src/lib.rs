//! The core of a parser for SURF, the Simple Unified Resource Format, a
//! textual notation for graphs of typed resources and for literal values of
//! many kinds, and for TURF, its terse form.
//!
//! A SURF document is a single term.  Terms are objects, which are resources
//! with a type handle and a property block, or literals: booleans, numbers,
//! characters, strings, binary data, UUIDs, email addresses, IRIs, telephone
//! numbers, temporals, regular expressions, and the collections lists, sets,
//! and maps.  Any term may carry a label: a tag IRI or an ID for an object, or
//! an alias for any value.  A label without a following term is a reference to
//! what was labeled elsewhere, which is how a document expresses a graph rather
//! than a tree.
//!
//! The [`Parser`] is parameterized over a [`CharClassifier`], over the
//! [`SourceStream`] of characters it reads, and over the [`LabelBindings`] that
//! remember labels for one parse.  Premade implementations of each are
//! provided in the `premade` sub-modules.  The result of a parse is a
//! [`Document`], which owns the arena of [`Resource`]s that the [`Value`]s in
//! it refer to by [`ResourceId`].
//!
//! Errors are reported as a [`SyntaxError`], which locates its [`ErrorKind`] by
//! [`SourcePos`] and classifies it by [`ErrorCategory`].
//!
//! [`Parser`]: parser/struct.Parser.html
//! [`CharClassifier`]: parser/trait.CharClassifier.html
//! [`LabelBindings`]: parser/trait.LabelBindings.html
//! [`SourceStream`]: source_stream/trait.SourceStream.html
//! [`Document`]: struct.Document.html
//! [`Resource`]: struct.Resource.html
//! [`ResourceId`]: struct.ResourceId.html
//! [`Value`]: enum.Value.html
//! [`SyntaxError`]: struct.SyntaxError.html
//! [`ErrorKind`]: enum.ErrorKind.html
//! [`ErrorCategory`]: enum.ErrorCategory.html
//! [`SourcePos`]: source_stream/struct.SourcePos.html

#![forbid(unsafe_code)]


pub mod error;
pub use error::{SyntaxError, ErrorKind, ErrorCategory, ParseResult};

pub mod source_stream;
pub use source_stream::{
    SourceStream, SourceIterItem, SourcePos,
    premade::StrSourceStream,
};

pub mod syntax;

pub mod value;
pub use value::{
    Value, ValueSet, ValueMap,
    EmailAddress, Iri, TelephoneNumber, Pattern, Temporal,
};

mod resource;
pub use resource::{Resource, ResourceId};

mod document;
pub use document::Document;

pub mod parser;
pub use parser::{Parser, CharClassifier, LabelBindings, LabelKey};
