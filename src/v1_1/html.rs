/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

/// Escapes a value for use inside a single-quoted HTML attribute
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders ` name='value'` pairs in the given order
pub fn attributes(attrs: &[(&str, &str)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(" {name}='{}'", escape(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_are_escaped_in_order() {
        let rendered = attributes(&[("alt", "Tom's <cat>"), ("class", "a&b")]);
        assert_eq!(rendered, " alt='Tom&#39;s &lt;cat&gt;' class='a&amp;b'");
    }
}
