use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
    ops::Deref,
};

use regex::Regex;


/// An email address, split at its `@`.
///
/// The domain is either a dot-separated host name or a bracketed literal like
/// `[192.0.2.1]`, kept with its brackets.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct EmailAddress {
    local_part: String,
    domain: String,
}

impl EmailAddress {
    pub(crate) fn new(local_part: String, domain: String) -> Self {
        Self { local_part, domain }
    }

    /// The part before the `@`.
    #[inline]
    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    /// The part after the `@`.
    #[inline]
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}


/// An absolute IRI, validated when constructed.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Iri(String);

impl Iri {
    /// Validate `text` as an absolute IRI.
    pub fn parse<S: Into<String>>(text: S) -> Result<Self, oxiri::IriParseError> {
        oxiri::Iri::parse(text.into()).map(|iri| Iri(iri.into_inner()))
    }

    /// The IRI text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Iri {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


/// A telephone number in E.164 form: `+` followed by 1 to 15 digits.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TelephoneNumber(String);

impl TelephoneNumber {
    /// The maximum count of digits.
    pub const MAX_DIGITS: usize = 15;

    /// Make a telephone number from its digits, without the `+`.  Returns
    /// `None` if `digits` is empty, too long, or has non-digits.
    pub fn from_digits(digits: &str) -> Option<Self> {
        if (1 ..= Self::MAX_DIGITS).contains(&digits.len())
            && digits.bytes().all(|b| b.is_ascii_digit())
        {
            Some(TelephoneNumber(format!("+{}", digits)))
        } else {
            None
        }
    }

    /// The full form, including the `+`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Only the digits.
    #[inline]
    pub fn digits(&self) -> &str {
        &self.0[1 ..]
    }
}

impl Display for TelephoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


/// A compiled regular expression that compares and hashes by its pattern
/// text.
#[derive(Clone, Debug)]
pub struct Pattern(Regex);

impl Pattern {
    /// The source text it was compiled from.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The compiled form.
    #[inline]
    pub fn regex(&self) -> &Regex {
        &self.0
    }
}

impl From<Regex> for Pattern {
    #[inline]
    fn from(regex: Regex) -> Self {
        Pattern(regex)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}
