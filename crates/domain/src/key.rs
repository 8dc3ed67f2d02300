use derive_more::{AsRef, Deref, Display};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Key under which the history of an exercise of a sheet is stored.
///
/// The key is part of the persisted data. Any change to [`derive_key`]
/// makes history recorded under the previous algorithm unreachable.
#[derive(AsRef, Deref, Display, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExerciseKey(String);

impl From<String> for ExerciseKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ExerciseKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

const SEPARATOR: &str = "||";

// Characters left unescaped by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Derive the history key of an exercise in a sheet.
///
/// Whitespace runs are collapsed into `_`, the result is lowercased and all
/// remaining special characters are percent-encoded. Distinct pairs which
/// normalize identically share a key.
#[must_use]
pub fn derive_key(sheet: &str, exercise: &str) -> ExerciseKey {
    let joined = format!("{sheet}{SEPARATOR}{exercise}");
    let mut collapsed = String::with_capacity(joined.len());
    let mut in_whitespace = false;

    for c in joined.chars() {
        if is_whitespace(c) {
            if !in_whitespace {
                collapsed.push('_');
            }
            in_whitespace = true;
        } else {
            collapsed.push(c);
            in_whitespace = false;
        }
    }

    ExerciseKey(utf8_percent_encode(&collapsed.to_lowercase(), COMPONENT).to_string())
}

// Matches the whitespace class of ECMAScript regular expressions.
fn is_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}
