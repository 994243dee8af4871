//! Additional, more convenient, functionality, which leverages the Rust
//! standard library more fully, layered on top of [`surf_core`].
//!
//! This crate:
//!
//! * Provides [`Parser`]s, for [ready-made](common/index.html) use for common
//! basic parsing applications, that set pre-chosen types for the generic
//! parameters.
//!
//! * Re-exports all of [`surf_core`].
//!
//! * Provides a [`SourceStream`] type suitable for streaming sources, which
//! retains only the few `char`s that the parser might backtrack over.
//!
//! * Provides a [`LabelBindings`] type that uses the standard `HashMap`.
//!
//! * Provides a [serializer](ser/index.html) that writes values back out as
//! SURF text, such that parsing it again yields equal values.
//!
//! Unlike [`surf_core`], this crate's purpose mostly is to provide premade
//! implementations intended for ready use.  So, instead of placing such items
//! in sub-modules named `premade`, they are placed at the top of their
//! respective modules, including for the premade items re-exported from
//! `surf_core`.
//!
//! [`surf_core`]: ../surf_core/index.html
//! [`Parser`]: ../surf_core/parser/struct.Parser.html
//! [`SourceStream`]: ../surf_core/source_stream/trait.SourceStream.html
//! [`LabelBindings`]: ../surf_core/parser/trait.LabelBindings.html


#![forbid(unsafe_code)]


// Re-export everything from the core crate. (Except items shadowed by ours,
// which are re-exported elsewhere.)
#[doc(no_inline)]
pub use surf_core::*;

/// `Parser`s and related types and functions, provided for convenience, that
/// use recommended types for instantiating the generic parameters of this
/// crate, for common basic parsing applications.
pub mod common {
    mod helper;
    pub mod inmem;
    pub mod stream;
}

pub mod ser;

// The below modules shadow those of `surf_core` but re-export everything from
// those in addition to providing some of their own items.

/// `SourceStream` types that use the `std` library, including heap allocation.
/// Also re-exports the core crate's module and premades.
pub mod source_stream {
    #[doc(no_inline)]
    pub use surf_core::source_stream::{*, premade::*};

    mod char_iter_src_strm;
    pub use char_iter_src_strm::CharIterSourceStream;
}

/// `LabelBindings` types that use the `std` library, including heap
/// allocation.  Also re-exports the core crate's module and premades.
pub mod parser {
    #[doc(no_inline)]
    pub use surf_core::parser::{*, premade::*};

    mod hashmap_bindings;
    pub use hashmap_bindings::LabelTable;
}
