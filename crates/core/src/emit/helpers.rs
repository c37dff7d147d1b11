//! Runtime helpers the generated classes call into.
//!
//! The sources are written with tab indentation and re-indented to the
//! configured unit at render time.

use crate::naming::reindent;

const TS_HELPERS: &str = include_str!("helpers.ts");
const ES6_HELPERS: &str = include_str!("helpers.js");

/// Functions defined by the helper block, in export order.
pub const HELPER_NAMES: [&str; 4] = ["ParseDate", "ParseNumber", "FromArray", "ToObject"];

/// Helper source for the target dialect, indented with `unit`.
pub fn helper_source(es6: bool, unit: &str) -> String {
    let src = if es6 { ES6_HELPERS } else { TS_HELPERS };
    reindent(src, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_helper_is_defined() {
        for es6 in [false, true] {
            let src = helper_source(es6, "\t");
            for name in HELPER_NAMES {
                assert!(src.contains(&format!("function {name}")), "{name} missing");
            }
            assert!(src.ends_with("}\n"));
        }
    }

    #[test]
    fn test_es6_helpers_are_untyped() {
        let src = helper_source(true, "\t");
        assert!(!src.contains(": any"));
        assert!(!src.contains("<T>"));
        let typed = helper_source(false, "\t");
        assert!(typed.contains("function ParseDate(d: Date | number | string): Date {"));
    }

    #[test]
    fn test_to_object_hints() {
        for es6 in [false, true] {
            let src = helper_source(es6, "\t");
            let day = "\t\t\tcase 'date':\n\t\t\t\treturn o.toISOString().slice(0, 10);\n";
            assert!(src.contains(day));
            assert!(src.contains("typeof typeOrCfg === 'string' ? typeOrCfg : null;"));
            assert!(src.contains("d[k] = ToObject(v, hint || typeOrCfg[k] || {}, true);"));
        }
    }

    #[test]
    fn test_reindented() {
        let src = helper_source(false, "  ");
        assert!(!src.contains('\t'));
        assert!(src.contains("\n    return new Date(d * 1000); // unix seconds\n"));
    }
}
