//! Label reference extraction and substitution.
//!
//! Expressions reference other nodes by quoting their label: `"rate" * 12`.
//! [`extract_references`] scans out those quoted tokens; [`substitute`]
//! replaces each one with the decimal form of its resolved value, producing
//! a string the arithmetic evaluator can consume.
//!
//! Both functions are total over malformed quoting: a lone unmatched quote
//! never closes, so the dangling fragment yields no reference and is left
//! verbatim by the substitutor.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::error::EvalError;

/// The quote delimiter enclosing a label reference.
const QUOTE: char = '"';

/// Returns the quoted label references in `expression`, in source order,
/// with duplicate occurrences preserved.
///
/// Never fails: an unterminated quoted region at the end of the string is
/// silently dropped.
pub fn extract_references(expression: &str) -> SmallVec<[&str; 4]> {
    let mut refs = SmallVec::new();
    let mut rest = expression;
    while let Some(open) = rest.find(QUOTE) {
        let after = &rest[open + QUOTE.len_utf8()..];
        match after.find(QUOTE) {
            Some(close) => {
                refs.push(&after[..close]);
                rest = &after[close + QUOTE.len_utf8()..];
            }
            // Dangling open quote: not a reference.
            None => break,
        }
    }
    refs
}

/// Replaces every quoted label in `expression` with the decimal form of its
/// mapped value, quote delimiters removed, all other characters preserved
/// verbatim.
///
/// The scan is a single left-to-right pass, so substituted numeric text is
/// never re-scanned for further delimiters. A label missing from `values`
/// is an [`EvalError::UnresolvedReference`]; callers resolve all references
/// before this stage.
pub fn substitute(
    expression: &str,
    values: &HashMap<&str, f64>,
) -> Result<String, EvalError> {
    let mut out = String::with_capacity(expression.len());
    let mut rest = expression;
    while let Some(open) = rest.find(QUOTE) {
        out.push_str(&rest[..open]);
        let after = &rest[open + QUOTE.len_utf8()..];
        match after.find(QUOTE) {
            Some(close) => {
                let label = &after[..close];
                let value = values.get(label).ok_or_else(|| {
                    EvalError::UnresolvedReference {
                        label: label.to_string(),
                    }
                })?;
                out.push_str(&render_value(*value));
                rest = &after[close + QUOTE.len_utf8()..];
            }
            None => {
                // Dangling open quote: keep the fragment as-is.
                out.push_str(&rest[open..]);
                return Ok(out);
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

/// Renders a value for splicing into expression text. Negative values are
/// parenthesized so they stay a single factor next to any operator.
fn render_value(value: f64) -> String {
    if value < 0.0 {
        format!("({})", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn extracts_references_in_order_with_duplicates() {
        let refs = extract_references("\"a\" + \"b\" * \"a\"");
        assert_eq!(refs.as_slice(), ["a", "b", "a"]);
    }

    #[test]
    fn no_references_in_plain_arithmetic() {
        assert!(extract_references("1 + 2 * 3").is_empty());
    }

    #[test]
    fn dangling_quote_yields_no_reference() {
        assert!(extract_references("1 + \"unterminated").is_empty());
        let refs = extract_references("\"ok\" + \"dangling");
        assert_eq!(refs.as_slice(), ["ok"]);
    }

    #[test]
    fn empty_label_is_still_a_reference() {
        let refs = extract_references("\"\" + 1");
        assert_eq!(refs.as_slice(), [""]);
    }

    #[test]
    fn substitutes_all_occurrences() {
        let mut values = HashMap::new();
        values.insert("a", 2.0);
        values.insert("b", 0.5);
        let out = substitute("\"a\" + \"b\" * \"a\"", &values).unwrap();
        assert_eq!(out, "2 + 0.5 * 2");
    }

    #[test]
    fn substitution_preserves_other_characters() {
        let mut values = HashMap::new();
        values.insert("x", 3.0);
        let out = substitute("( \"x\" )/2", &values).unwrap();
        assert_eq!(out, "( 3 )/2");
    }

    #[test]
    fn negative_values_are_parenthesized() {
        let mut values = HashMap::new();
        values.insert("x", -1.5);
        let out = substitute("2-\"x\"", &values).unwrap();
        assert_eq!(out, "2-(-1.5)");
    }

    #[test]
    fn missing_label_is_unresolved_reference() {
        let values = HashMap::new();
        let err = substitute("\"ghost\"", &values).unwrap_err();
        assert_eq!(
            err,
            EvalError::UnresolvedReference {
                label: "ghost".into()
            }
        );
    }

    #[test]
    fn substituted_text_is_not_rescanned() {
        // A label whose value renders next to a dangling quote must not
        // produce a phantom reference pair on a second pass.
        let mut values = HashMap::new();
        values.insert("a", 1.0);
        let out = substitute("\"a\" + \"dangling", &values).unwrap();
        assert_eq!(out, "1 + \"dangling");
    }

    proptest! {
        #[test]
        fn extraction_never_panics(expression in ".*") {
            let _ = extract_references(&expression);
        }

        #[test]
        fn extraction_finds_every_wrapped_label(
            labels in proptest::collection::vec("[a-z]{1,6}", 1..5)
        ) {
            let expression = labels
                .iter()
                .map(|l| format!("\"{}\"", l))
                .collect::<Vec<_>>()
                .join("+");
            let refs = extract_references(&expression);
            prop_assert_eq!(refs.as_slice(), labels.as_slice());
        }
    }
}
