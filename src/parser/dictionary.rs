//! Stream dictionary parsing.
//!
//! Only the first `<< ... >>` span of an object is read, and it is read
//! flat: the interior is split on `/` and every piece becomes one entry.
//! Nested dictionaries and arrays are not resolved.

use indexmap::IndexMap;

use super::scanner::find_ci;
use crate::filter::Filter;

/// A dictionary value: either a bare flag or the text after the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictValue {
    /// Key present with no value (e.g. `/FlateDecode`)
    Flag,
    /// Key followed by a value (e.g. `/Length 44`)
    Scalar(String),
}

impl DictValue {
    /// Whether the value counts as set. Empty and `0` scalars do not.
    pub fn is_set(&self) -> bool {
        match self {
            DictValue::Flag => true,
            DictValue::Scalar(s) => !(s.is_empty() || s == "0"),
        }
    }

    /// The scalar text, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DictValue::Flag => None,
            DictValue::Scalar(s) => Some(s),
        }
    }
}

/// Entries of a stream dictionary, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamDictionary {
    entries: IndexMap<String, DictValue>,
}

impl StreamDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the first `<< ... >>` span of an object body.
    ///
    /// Returns an empty dictionary when the object has none.
    pub fn parse(object: &[u8]) -> Self {
        let mut dict = Self::new();

        let Some(open) = find_ci(object, 0, b"<<") else {
            return dict;
        };
        let Some(close) = find_ci(object, open + 2, b">>") else {
            return dict;
        };

        let interior: String = object[open + 2..close].iter().map(|&b| b as char).collect();

        for piece in interior.split('/').skip(1) {
            let token = piece
                .split(is_dict_whitespace)
                .filter(|word| !word.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if token.is_empty() {
                continue;
            }
            match token.split_once(' ') {
                Some((key, value)) => dict.insert(key, DictValue::Scalar(value.to_string())),
                None => dict.insert(&token, DictValue::Flag),
            }
        }

        dict
    }

    /// Insert an entry. Array brackets stuck to a key are dropped.
    ///
    /// Re-inserting a key replaces its value but keeps its original position.
    pub fn insert(&mut self, key: &str, value: DictValue) {
        let key = key.trim_matches(|c| c == '[' || c == ']');
        self.entries.insert(key.to_string(), value);
    }

    /// Look up an entry.
    pub fn get(&self, key: &str) -> Option<&DictValue> {
        self.entries.get(key)
    }

    /// Whether `key` is present with a set value.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(DictValue::is_set)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DictValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether this dictionary describes a font file, image, or typed
    /// structural object rather than page content or a character map.
    pub fn is_non_content(&self) -> bool {
        ["Length1", "Type", "Subtype"]
            .iter()
            .any(|key| self.is_set(key))
    }

    /// Filters to apply, in declaration order.
    ///
    /// Empty unless a `Filter` entry is set. Unknown filter names are
    /// skipped.
    pub fn filters(&self) -> Vec<Filter> {
        if !self.is_set("Filter") {
            return Vec::new();
        }
        self.entries
            .keys()
            .filter_map(|key| Filter::from_name(key))
            .collect()
    }

    /// Direct `Length` value in bytes.
    ///
    /// An indirect reference (`12 0 R`) or a non-numeric value yields `None`.
    pub fn length(&self) -> Option<usize> {
        let value = self.get("Length")?.as_str()?;
        let mut words = value.split_whitespace();
        let length = words.next()?.parse().ok()?;
        match (words.next(), words.next()) {
            (Some(_), Some(r)) if r.eq_ignore_ascii_case("R") => None,
            _ => Some(length),
        }
    }
}

fn is_dict_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r' | '\0')
}
