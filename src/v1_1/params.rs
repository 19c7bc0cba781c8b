/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use std::collections::BTreeMap;
use std::fmt;

/// A single parameter value.
///
/// Lists hold multi-valued parameters such as named transformations or flags. How a list is
/// joined depends on where it is rendered (`.` inside a transformation, `,` when signing).
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl ParamValue {
    /// True when rendering this value would produce nothing
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Text(s) => s.is_empty(),
            ParamValue::Number(_) => false,
            ParamValue::List(l) => l.iter().all(|v| v.is_empty()),
        }
    }

    /// Renders the value, joining list entries with `separator`
    pub fn render(&self, separator: &str) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            // f64's Display already drops a trailing ".0"
            ParamValue::Number(n) => n.to_string(),
            ParamValue::List(l) => l
                .iter()
                .filter(|v| !v.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(separator),
        }
    }

    /// Numeric view of the value, parsing text when possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(s) => s.parse().ok(),
            ParamValue::List(_) => None,
        }
    }

    /// Text view of the value when it is a single token
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render("."))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Number(value as f64)
    }
}

// Largest magnitude an f64 holds without losing integer precision
const MAX_EXACT_INTEGER: u64 = 1 << 53;

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        if value.unsigned_abs() <= MAX_EXACT_INTEGER {
            ParamValue::Number(value as f64)
        } else {
            ParamValue::Text(value.to_string())
        }
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for ParamValue {
    fn from(value: &[&str]) -> Self {
        ParamValue::List(value.iter().map(|v| v.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(value: [&str; N]) -> Self {
        ParamValue::List(value.iter().map(|v| v.to_string()).collect())
    }
}

/// Key to value(s) accumulator.
///
/// Keys are kept sorted so two tables built with the same values in a different order are
/// identical. Empty values are never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterTable {
    entries: BTreeMap<String, ParamValue>,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`. An empty value removes the key instead.
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) -> &mut Self {
        let value = value.into();
        if value.is_empty() {
            self.entries.remove(key);
        } else {
            self.entries.insert(key.to_string(), value);
        }
        self
    }

    /// Stores an optional value, skipping `None`
    pub fn set_opt<V: Into<ParamValue>>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.set(key, v);
        }
        self
    }

    pub fn set_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.set(key, if value { "true" } else { "false" })
    }

    /// Appends one entry to a list parameter, converting a single value into a list
    pub fn push(&mut self, key: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            return self;
        }
        let list = match self.entries.remove(key) {
            Some(ParamValue::List(mut l)) => {
                l.push(value.to_string());
                l
            }
            Some(other) => vec![other.render("."), value.to_string()],
            None => vec![value.to_string()],
        };
        self.entries.insert(key.to_string(), ParamValue::List(list));
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copies every entry of `other` into this table, overwriting duplicates
    pub fn extend(&mut self, other: &ParameterTable) -> &mut Self {
        for (k, v) in other.iter() {
            self.set(k, v.clone());
        }
        self
    }
}

impl<K: AsRef<str>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = ParameterTable::new();
        for (k, v) in iter {
            table.set(k.as_ref(), v);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_not_stored() {
        let mut table = ParameterTable::new();
        table.set("public_id", "");
        table.set("tags", Vec::<String>::new());
        table.set("flags", vec![""]);
        assert!(table.is_empty());

        table.set("public_id", "sample");
        table.set("public_id", "");
        assert!(!table.contains("public_id"));
    }

    #[test]
    fn numbers_render_in_shortest_form() {
        assert_eq!(ParamValue::from(2.0).render("."), "2");
        assert_eq!(ParamValue::from(0.4).render("."), "0.4");
        assert_eq!(ParamValue::from(-15).render("."), "-15");
    }

    #[test]
    fn large_integers_keep_every_digit() {
        assert_eq!(ParamValue::from(1315060510_i64), ParamValue::Number(1315060510.0));
        assert_eq!(
            ParamValue::from(9007199254740993_i64).render("."),
            "9007199254740993"
        );
        assert_eq!(
            ParamValue::from(i64::MIN).render("."),
            "-9223372036854775808"
        );
    }

    #[test]
    fn lists_render_with_separator() {
        let value = ParamValue::from(["blip", "blop"]);
        assert_eq!(value.render("."), "blip.blop");
        assert_eq!(value.render(","), "blip,blop");
    }

    #[test]
    fn push_builds_a_list() {
        let mut table = ParameterTable::new();
        table.set("tags", "a");
        table.push("tags", "b").push("tags", "");
        assert_eq!(table.get("tags"), Some(&ParamValue::from(["a", "b"])));
    }

    #[test]
    fn clones_are_independent() {
        let mut original: ParameterTable = [("flags", ParamValue::from(["a"]))].into_iter().collect();
        let copy = original.clone();
        original.push("flags", "b");
        assert_eq!(copy.get("flags"), Some(&ParamValue::from(["a"])));
        assert_eq!(original.get("flags"), Some(&ParamValue::from(["a", "b"])));
    }
}
