//! Album type query fragment builder.
//!
//! # Responsibility
//! - Turn the checked/unchecked state of type filter controls into a URL
//!   query fragment (`?type=lp&type=!live`).
//!
//! # Invariants
//! - Output is empty when every control is checked, including when there
//!   are no controls at all.
//! - Otherwise output starts with `?` and holds one `&`-joined token per
//!   control, in selection order.
//! - Names are embedded verbatim (no escaping or percent-encoding).
//! - Building never mutates the controls and never fails.

use crate::model::control::FilterControl;

/// Query key shared by every type token.
pub const TYPE_QUERY_KEY: &str = "type";
/// Prefix marking an excluded (unchecked) type.
pub const EXCLUDE_MARKER: char = '!';

/// Capability that selects the type filter controls of the current view.
///
/// Implementations return controls in document order. Selection failures are
/// surfaced as `Self::Error` and propagated unchanged by
/// [`query_from_source`].
pub trait ControlSource {
    type Control: FilterControl;
    type Error;

    fn select_type_controls(&self) -> Result<Vec<Self::Control>, Self::Error>;
}

/// Builds the type query fragment for `controls`.
///
/// Returns `""` when every control is checked, meaning no filter is needed.
pub fn type_query_fragment<I>(controls: I) -> String
where
    I: IntoIterator,
    I::Item: FilterControl,
{
    let mut all_checked = true;
    let mut fragment = String::new();

    for control in controls {
        let checked = control.is_checked();
        all_checked = all_checked && checked;

        fragment.push(if fragment.is_empty() { '?' } else { '&' });
        push_token(&mut fragment, control.name(), checked);
    }

    if all_checked {
        String::new()
    } else {
        fragment
    }
}

/// Selects controls from `source` and builds their fragment.
///
/// # Errors
/// - Returns the source's own error when selection fails.
pub fn query_from_source<S: ControlSource>(source: &S) -> Result<String, S::Error> {
    let controls = source.select_type_controls()?;
    Ok(type_query_fragment(controls))
}

pub(crate) fn push_token(out: &mut String, name: &str, included: bool) {
    out.push_str(TYPE_QUERY_KEY);
    out.push('=');
    if !included {
        out.push(EXCLUDE_MARKER);
    }
    out.push_str(name);
}

#[cfg(test)]
mod tests {
    use super::{query_from_source, type_query_fragment, ControlSource};
    use crate::model::control::TypeFilterControl;

    struct BrokenView;

    impl ControlSource for BrokenView {
        type Control = TypeFilterControl;
        type Error = String;

        fn select_type_controls(&self) -> Result<Vec<Self::Control>, Self::Error> {
            Err("no active view".to_string())
        }
    }

    #[test]
    fn mixed_selection_builds_include_and_exclude_tokens() {
        let controls = [("raw", true), ("edited", false)];
        assert_eq!(type_query_fragment(controls), "?type=raw&type=!edited");
    }

    #[test]
    fn all_checked_yields_empty_fragment() {
        let controls = [("raw", true), ("edited", true)];
        assert_eq!(type_query_fragment(controls), "");
    }

    #[test]
    fn empty_selection_yields_empty_fragment() {
        let controls: [(&str, bool); 0] = [];
        assert_eq!(type_query_fragment(controls), "");
    }

    #[test]
    fn single_unchecked_control() {
        assert_eq!(type_query_fragment([("x", false)]), "?type=!x");
    }

    #[test]
    fn accepts_borrowed_controls() {
        let controls = vec![
            TypeFilterControl::unchecked("foo"),
            TypeFilterControl::checked("bar"),
        ];
        assert_eq!(type_query_fragment(&controls), "?type=!foo&type=bar");
        assert_eq!(controls.len(), 2);
    }

    #[test]
    fn selection_error_is_propagated_unchanged() {
        let err = query_from_source(&BrokenView).unwrap_err();
        assert_eq!(err, "no active view");
    }
}
