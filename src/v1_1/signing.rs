/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1_1::ParameterTable;
use sha1::{Digest, Sha1};

// Parameters sent with a request but never part of the signature
const UNSIGNED_PARAMS: [&str; 4] = ["file", "resource_type", "api_key", "signature"];

/// Builds the `key=value&...` string a request signature is computed over.
///
/// Entries are taken in ascending byte order of their keys and list values are joined with `,`.
pub fn canonical_parameter_string(params: &ParameterTable) -> String {
    let mut entries: Vec<(&str, String)> = params
        .iter()
        .filter(|(key, _)| !UNSIGNED_PARAMS.contains(key))
        .map(|(key, value)| (key, value.render(",")))
        .filter(|(_, value)| !value.is_empty())
        .collect();
    entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    entries
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Signs `params` with the account secret, returning a lowercase hex SHA-1 digest
pub fn sign(params: &ParameterTable, secret: &str) -> String {
    let to_sign = format!("{}{secret}", canonical_parameter_string(params));
    format!("{:x}", Sha1::digest(to_sign.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1_1::ParamValue;

    #[test]
    fn transport_only_params_are_excluded() {
        let params: ParameterTable = [
            ("file", "sample.jpg"),
            ("resource_type", "image"),
            ("api_key", "1234"),
            ("timestamp", "1315060510"),
        ]
        .into_iter()
        .collect();
        assert_eq!(canonical_parameter_string(&params), "timestamp=1315060510");
    }

    #[test]
    fn list_values_are_comma_joined() {
        let mut params = ParameterTable::new();
        params.set("tags", ParamValue::from(["a", "b"]));
        params.set("public_id", "x");
        assert_eq!(canonical_parameter_string(&params), "public_id=x&tags=a,b");
    }
}
