//! Display label of a timed scope.
//!
//! A label either borrows text that the compiler proves outlives the timer
//! (string literals, `&str` views, `&String`) or owns a copy taken from a
//! `String` or formatted value. Empty or absent input resolves to
//! [`DEFAULT_LABEL`] without allocating.

use std::borrow::Cow;
use std::fmt::{self, Display};

/// Placeholder shown when no label, or an empty one, is supplied.
pub const DEFAULT_LABEL: &str = "ScopeTimer";

/// Non-empty label text, borrowed or owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label<'a>(Cow<'a, str>);

impl<'a> Label<'a> {
    /// Borrows `text`; empty text resolves to the placeholder.
    pub fn borrowed(text: &'a str) -> Self {
        if text.is_empty() {
            Self::default()
        } else {
            Self(Cow::Borrowed(text))
        }
    }

    /// Takes ownership of `text`; empty text resolves to the placeholder.
    pub fn owned(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::default()
        } else {
            Self(Cow::Owned(text))
        }
    }

    /// Resolves in priority order: non-empty owned text, then non-empty
    /// borrowed text, then the placeholder.
    pub fn resolve(borrowed: Option<&'a str>, owned: Option<String>) -> Self {
        match owned {
            Some(text) if !text.is_empty() => Self(Cow::Owned(text)),
            _ => borrowed.map(Self::borrowed).unwrap_or_default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the label holds its own copy of the text.
    pub fn is_owned(&self) -> bool {
        matches!(self.0, Cow::Owned(_))
    }

    pub fn into_owned(self) -> Label<'static> {
        Label(Cow::Owned(self.0.into_owned()))
    }
}

impl Default for Label<'_> {
    fn default() -> Self {
        Self(Cow::Borrowed(DEFAULT_LABEL))
    }
}

impl Display for Label<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Label<'_> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'a> From<&'a str> for Label<'a> {
    fn from(text: &'a str) -> Self {
        Self::borrowed(text)
    }
}

impl<'a> From<&'a String> for Label<'a> {
    fn from(text: &'a String) -> Self {
        Self::borrowed(text)
    }
}

impl<'a> From<Option<&'a str>> for Label<'a> {
    fn from(text: Option<&'a str>) -> Self {
        Self::resolve(text, None)
    }
}

impl From<String> for Label<'_> {
    fn from(text: String) -> Self {
        Self::owned(text)
    }
}

impl From<Box<str>> for Label<'_> {
    fn from(text: Box<str>) -> Self {
        Self::owned(text)
    }
}

impl<'a> From<Cow<'a, str>> for Label<'a> {
    fn from(text: Cow<'a, str>) -> Self {
        match text {
            Cow::Borrowed(text) => Self::borrowed(text),
            Cow::Owned(text) => Self::owned(text),
        }
    }
}

impl From<fmt::Arguments<'_>> for Label<'_> {
    fn from(args: fmt::Arguments<'_>) -> Self {
        match args.as_str() {
            Some(text) => Self::borrowed(text),
            None => Self::owned(args.to_string()),
        }
    }
}

impl From<()> for Label<'_> {
    fn from((): ()) -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_is_borrowed() {
        let label = Label::from("tests:label:literal");
        assert_eq!(label.as_str(), "tests:label:literal");
        assert!(!label.is_owned());
    }

    #[test]
    fn empty_and_absent_inputs_use_placeholder_without_owning() {
        let empty_view: &str = &String::new();
        let cases = [
            Label::from(""),
            Label::from(empty_view),
            Label::from(None::<&str>),
            Label::from(Some("")),
            Label::from(String::new()),
            Label::from(()),
            Label::default(),
            Label::resolve(None, None),
            Label::resolve(Some(""), Some(String::new())),
        ];
        for label in cases {
            assert_eq!(label.as_str(), DEFAULT_LABEL);
            assert!(!label.is_owned(), "{label:?} should not own storage");
        }
    }

    #[test]
    fn temporary_string_is_owned() {
        let label = Label::from(String::from("tests:label:temporary"));
        assert_eq!(label.as_str(), "tests:label:temporary");
        assert!(label.is_owned());

        let source = String::from("tests:label:moved");
        let label = Label::from(source);
        assert_eq!(label.as_str(), "tests:label:moved");
        assert!(label.is_owned());
    }

    #[test]
    fn string_reference_borrows() {
        let source = String::from("tests:label:lvalue");
        let label = Label::from(&source);
        assert_eq!(label.as_str(), "tests:label:lvalue");
        assert!(!label.is_owned());
    }

    #[test]
    fn owned_text_wins_over_borrowed() {
        let label = Label::resolve(Some("view"), Some("owned".to_owned()));
        assert_eq!(label.as_str(), "owned");
        assert!(label.is_owned());

        let label = Label::resolve(Some("view"), Some(String::new()));
        assert_eq!(label.as_str(), "view");
        assert!(!label.is_owned());
    }

    #[test]
    fn format_arguments_only_allocate_when_interpolating() {
        let label = Label::from(format_args!("static text"));
        assert!(!label.is_owned());

        let n = 3;
        let label = Label::from(format_args!("worker {n}"));
        assert_eq!(label.as_str(), "worker 3");
        assert!(label.is_owned());
    }

    #[test]
    fn into_owned_detaches_from_source() {
        let label = {
            let source = String::from("short-lived");
            Label::from(&source).into_owned()
        };
        assert_eq!(label.as_str(), "short-lived");
        assert!(label.is_owned());
    }
}
