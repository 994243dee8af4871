//! Errors that might be returned by parsing.

use thiserror::Error;

use crate::SourcePos;


/// The broad classes of [`ErrorKind`](enum.ErrorKind.html), which callers can
/// use to decide how to report a failure without matching every variant.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ErrorCategory {
    /// A malformed literal: bad escape, bad digit run, unterminated delimiter,
    /// and the like.
    Lexical,
    /// A term that is well-formed on its own but appears where it is not
    /// allowed, or that conflicts with what was already parsed.
    Structural,
    /// A label that was referenced but never bound.
    Reference,
}


/// The possible reasons a parse fails.
///
/// Every variant is fatal to the whole parse.  There is no partial result.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ErrorKind {
    /// End-of-stream reached where something else was required
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd {
        /// Description of what was required
        expected: String,
    },
    /// A character that cannot appear at this position
    #[error("unexpected character `{found}`, expected {expected}")]
    UnexpectedChar {
        /// The offending character
        found: char,
        /// Description of what was required
        expected: String,
    },
    /// Backslash followed by a character with no escape meaning
    #[error("invalid escape sequence `\\{found}`")]
    InvalidEscape {
        /// The character after the backslash
        found: char,
    },
    /// `\u` not followed by four hexadecimal digits
    #[error("invalid Unicode escape, expected four hexadecimal digits")]
    InvalidUnicodeEscape,
    /// A UTF-16 surrogate escape without its other half
    #[error("unpaired UTF-16 surrogate {code:#06X}")]
    UnpairedSurrogate {
        /// The code unit that was left unpaired
        code: u16,
    },
    /// A character literal that is empty or holds more than one code point
    #[error("character literal must contain exactly one code point")]
    InvalidCharacter,
    /// Neither `true` nor `false`
    #[error("invalid boolean literal")]
    InvalidBoolean,
    /// A number literal with a missing or misplaced digit run
    #[error("invalid number literal")]
    InvalidNumber,
    /// A native integer literal that does not fit in 64 bits
    #[error("integer literal `{text}` is out of 64-bit range, \
             use the decimal marker for arbitrary precision")]
    IntegerOverflow {
        /// The literal's digits
        text: String,
    },
    /// Bad base64url text
    #[error("invalid binary literal: {message}")]
    InvalidBinary {
        /// What the decoder reported
        message: String,
    },
    /// Not 8-4-4-4-12 hexadecimal groups
    #[error("invalid UUID literal: {message}")]
    InvalidUuid {
        /// What the decoder reported
        message: String,
    },
    /// Malformed local part or domain
    #[error("invalid email address literal")]
    InvalidEmailAddress,
    /// Not a `+` followed by 1 to 15 digits
    #[error("invalid telephone number literal")]
    InvalidTelephoneNumber,
    /// Not an absolute IRI
    #[error("invalid IRI `{text}`: {message}")]
    InvalidIri {
        /// The bracketed text
        text: String,
        /// What the IRI validator reported
        message: String,
    },
    /// A temporal literal whose shape or component values are invalid
    #[error("invalid temporal literal")]
    InvalidTemporal,
    /// A pattern that does not compile
    #[error("invalid regular expression: {message}")]
    InvalidRegex {
        /// What the regex compiler reported
        message: String,
    },
    /// A property or type name that is not a valid handle
    #[error("invalid handle")]
    InvalidHandle,

    /// Something other than filler follows the root resource
    #[error("content after root resource")]
    ContentAfterRoot,
    /// The same property handle appears twice in one property block
    #[error("duplicate property `{handle}`")]
    DuplicateProperty {
        /// The repeated handle
        handle: String,
    },
    /// An ID label on an object that declares no type
    #[error("ID `{id}` used without a type")]
    IdWithoutType {
        /// The ID string
        id: String,
    },
    /// A tag or ID label on something other than an object
    #[error("only an alias may label a collection or literal")]
    InvalidLabel,
    /// A comma immediately before the end delimiter of a sequence
    #[error("trailing separator before end of sequence")]
    TrailingSeparator,
    /// A label declared a second time, or a second description of a resource
    #[error("label {label} is already declared")]
    LabelRedeclared {
        /// The label as written
        label: String,
    },
    /// A labeled resource mentioned again with a different type
    #[error("type `{declared}` conflicts with earlier type `{existing}`")]
    ConflictingType {
        /// The type the resource already has
        existing: String,
        /// The type given at this occurrence
        declared: String,
    },
    /// Terms nested deeper than the parser permits
    #[error("nesting exceeds the maximum depth of {max}")]
    NestingTooDeep {
        /// The parser's configured limit
        max: usize,
    },

    /// An alias referenced before any term was bound to it
    #[error("unresolved alias `{alias}`")]
    UnresolvedAlias {
        /// The alias handle
        alias: String,
    },
}

impl ErrorKind {
    /// Which broad class of failure this is.
    pub fn category(&self) -> ErrorCategory {
        use ErrorKind::*;

        match self {
            UnexpectedEnd{..} | UnexpectedChar{..} | InvalidEscape{..}
            | InvalidUnicodeEscape | UnpairedSurrogate{..} | InvalidCharacter
            | InvalidBoolean | InvalidNumber | IntegerOverflow{..}
            | InvalidBinary{..} | InvalidUuid{..} | InvalidEmailAddress
            | InvalidTelephoneNumber | InvalidIri{..} | InvalidTemporal
            | InvalidRegex{..} | InvalidHandle
                => ErrorCategory::Lexical,
            ContentAfterRoot | DuplicateProperty{..} | IdWithoutType{..}
            | InvalidLabel | TrailingSeparator | LabelRedeclared{..}
            | ConflictingType{..} | NestingTooDeep{..}
                => ErrorCategory::Structural,
            UnresolvedAlias{..}
                => ErrorCategory::Reference,
        }
    }
}


/// A parse failure and where in the source it was detected.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
#[error("{kind} at {pos}")]
pub struct SyntaxError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where it went wrong
    pub pos: SourcePos,
}

impl SyntaxError {
    /// Make a new error of the given kind at the given position.
    #[inline]
    pub fn new(kind: ErrorKind, pos: SourcePos) -> Self {
        Self { kind, pos }
    }

    /// Shorthand for `self.kind.category()`.
    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}


/// The result of every scanning step.
pub type ParseResult<T> = Result<T, SyntaxError>;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(ErrorKind::InvalidNumber.category(), ErrorCategory::Lexical);
        assert_eq!(ErrorKind::UnpairedSurrogate{code: 0xD800}.category(),
                   ErrorCategory::Lexical);
        assert_eq!(ErrorKind::DuplicateProperty{handle: "a".into()}.category(),
                   ErrorCategory::Structural);
        assert_eq!(ErrorKind::ContentAfterRoot.category(), ErrorCategory::Structural);
        assert_eq!(ErrorKind::UnresolvedAlias{alias: "x".into()}.category(),
                   ErrorCategory::Reference);
    }

    #[test]
    fn display() {
        let pos = SourcePos { char_pos: 7, line: 2, column: 3 };
        let e = SyntaxError::new(ErrorKind::DuplicateProperty{handle: "foo".into()}, pos);
        assert_eq!(e.to_string(), "duplicate property `foo` at line 2, column 3");

        let e = SyntaxError::new(ErrorKind::UnpairedSurrogate{code: 0xD83D},
                                 SourcePos::START);
        assert_eq!(e.to_string(), "unpaired UTF-16 surrogate 0xD83D at line 1, column 1");

        let e = SyntaxError::new(ErrorKind::InvalidEscape{found: 'q'}, SourcePos::START);
        assert_eq!(e.to_string(), "invalid escape sequence `\\q` at line 1, column 1");
    }
}
