// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error code registry.
//!
//! Maps error codes to titles and categories. Used by `ivan explain <code>`
//! and by the JSON report.

use std::collections::BTreeMap;
use std::fmt;

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: BTreeMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
#[derive(Debug)]
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Syntax,
    Resolution,
    Configuration,
    Generation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Resolution => write!(f, "Resolution"),
            ErrorCategory::Configuration => write!(f, "Configuration"),
            ErrorCategory::Generation => write!(f, "Generation"),
        }
    }
}

macro_rules! register_codes {
    ($($code:literal => ($title:literal, $cat:expr)),* $(,)?) => {{
        let mut map = BTreeMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                "E0001" => ("invalid token", Syntax),
                "E0100" => ("syntax error", Syntax),
                "E0200" => ("unresolved type", Resolution),
                "E0201" => ("duplicate type", Resolution),
                "E0202" => ("declaration shadows a builtin type", Resolution),
                "E0300" => ("invalid module name", Configuration),
                "E0301" => ("invalid import", Configuration),
                "E0302" => ("wrappers for an unknown interface", Configuration),
                "E0303" => ("wrapper list names an unknown method", Configuration),
                "E0304" => ("argument clashes with the wrapper receiver", Generation),
                "E0305" => ("no default value for the return type", Generation),
                "E0306" => ("mapping for an undeclared opaque type", Configuration),
                "E0307" => ("name is reserved in the target language", Generation),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    /// All codes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorCodeInfo> {
        self.codes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        let registry = ErrorCodeRegistry::default();
        let info = registry.get("E0200").unwrap();
        assert_eq!(info.title, "unresolved type");
        assert_eq!(info.category, ErrorCategory::Resolution);
        assert!(registry.get("E9999").is_none());
    }

    #[test]
    fn codes_are_sorted_and_prefixed_by_category() {
        let registry = ErrorCodeRegistry::default();
        let codes: Vec<_> = registry.iter().map(|info| info.code).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);
        for info in registry.iter() {
            if info.category == ErrorCategory::Syntax {
                assert!(info.code.starts_with("E00") || info.code.starts_with("E01"));
            }
        }
    }
}
