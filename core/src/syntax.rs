//! The marker characters and keywords of the SURF notation.
//!
//! The notation has had incompatible revisions that differ in these markers,
//! so the scanners refer only to these names.

/// Begins an object term.
pub const OBJECT_BEGIN: char = '*';
/// Begins an object's property block.  Must immediately follow the object
/// begin marker or the type handle.
pub const PROPERTIES_BEGIN: char = ':';
/// Ends an object's property block.
pub const PROPERTIES_END: char = ';';
/// Separates a property handle from its value.
pub const PROPERTY_VALUE_DELIMITER: char = '=';

/// Begins a list.
pub const LIST_BEGIN: char = '[';
/// Ends a list.
pub const LIST_END: char = ']';
/// Precedes the list delimiters to make a set.
pub const SET_MARKER: char = '#';
/// Begins a map.
pub const MAP_BEGIN: char = '{';
/// Ends a map.
pub const MAP_END: char = '}';
/// Separates a map entry's key from its value.
pub const ENTRY_KEY_VALUE_DELIMITER: char = ':';
/// The forced separator between items of a sequence.
pub const SEQUENCE_DELIMITER: char = ',';

/// Surrounds a label.
pub const LABEL_DELIMITER: char = '|';

/// Surrounds a string.
pub const STRING_DELIMITER: char = '"';
/// Surrounds a character.
pub const CHARACTER_DELIMITER: char = '\'';
/// Begins an escape sequence in strings and characters.
pub const ESCAPE: char = '\\';
/// Begins an IRI.
pub const IRI_BEGIN: char = '<';
/// Ends an IRI.
pub const IRI_END: char = '>';
/// Begins a binary literal.
pub const BINARY_BEGIN: char = '%';
/// Begins a UUID literal.  Inside IRI brackets it is the `urn:uuid:` short
/// form.
pub const UUID_BEGIN: char = '&';
/// Begins a telephone number literal.  Inside IRI brackets it is the `tel:`
/// short form.
pub const TELEPHONE_NUMBER_BEGIN: char = '+';
/// Begins an email address literal.  Inside IRI brackets it is the `mailto:`
/// short form.
pub const EMAIL_ADDRESS_BEGIN: char = '^';
/// Separates an email address's local part from its domain.
pub const EMAIL_ADDRESS_AT: char = '@';
/// Surrounds a regular expression.
pub const REGEX_DELIMITER: char = '/';
/// Begins a temporal literal.
pub const TEMPORAL_BEGIN: char = '@';
/// Selects the arbitrary-precision family for a number literal.
pub const DECIMAL_BEGIN: char = '$';
/// Begins a comment that runs to the end of the line.
pub const LINE_COMMENT_BEGIN: char = '!';

/// Separates the segments of a handle.
pub const HANDLE_SEGMENT_DELIMITER: char = '-';

/// The `true` keyword.
pub const TRUE: &str = "true";
/// The `false` keyword.
pub const FALSE: &str = "false";

/// The scheme that the email address IRI short form expands to.
pub const MAILTO_SCHEME: &str = "mailto:";
/// The scheme that the telephone number IRI short form expands to.
pub const TEL_SCHEME: &str = "tel:";
/// The prefix that the UUID IRI short form expands to.
pub const UUID_URN_PREFIX: &str = "urn:uuid:";
