use albumfilter_core::{
    default_type_controls, parse_type_query, query_from_source, type_query_fragment,
    InMemoryControls, TypeFilterControl,
};

fn controls(states: &[(&str, bool)]) -> Vec<TypeFilterControl> {
    states
        .iter()
        .map(|(name, checked)| TypeFilterControl::new(*name, *checked))
        .collect()
}

#[test]
fn one_checked_one_unchecked() {
    let fragment = type_query_fragment(&controls(&[("raw", true), ("edited", false)]));
    assert_eq!(fragment, "?type=raw&type=!edited");
}

#[test]
fn everything_checked_needs_no_query() {
    let fragment = type_query_fragment(&controls(&[("raw", true), ("edited", true)]));
    assert_eq!(fragment, "");
}

#[test]
fn no_controls_needs_no_query() {
    assert_eq!(type_query_fragment(&controls(&[])), "");
}

#[test]
fn lone_unchecked_control() {
    assert_eq!(type_query_fragment(&controls(&[("x", false)])), "?type=!x");
}

#[test]
fn tokens_follow_selection_order_without_sorting() {
    let fragment = type_query_fragment(&controls(&[
        ("single", true),
        ("ep", false),
        ("lp", true),
        ("demo", false),
    ]));
    assert_eq!(fragment, "?type=single&type=!ep&type=lp&type=!demo");
}

#[test]
fn separators_are_one_question_mark_and_n_minus_one_ampersands() {
    let states = [
        ("lp", true),
        ("ep", false),
        ("compilation", true),
        ("live", false),
        ("various", true),
    ];
    let fragment = type_query_fragment(&controls(&states));

    assert!(fragment.starts_with('?'));
    assert_eq!(fragment.matches('?').count(), 1);
    assert_eq!(fragment.matches('&').count(), states.len() - 1);
}

#[test]
fn names_are_embedded_verbatim() {
    let fragment = type_query_fragment(&controls(&[("a b&c", false)]));
    assert_eq!(fragment, "?type=!a b&c");
}

#[test]
fn building_does_not_mutate_controls() {
    let input = controls(&[("lp", true), ("live", false)]);
    let snapshot = input.clone();

    let first = type_query_fragment(&input);
    let second = type_query_fragment(&input);

    assert_eq!(first, second);
    assert_eq!(input, snapshot);
}

#[test]
fn default_panel_yields_empty_fragment_until_something_is_unchecked() {
    let mut panel = InMemoryControls::new(default_type_controls());
    assert_eq!(query_from_source(&panel).unwrap(), "");

    panel.set_checked("live", false);
    panel.set_checked("demo", false);
    assert_eq!(
        query_from_source(&panel).unwrap(),
        "?type=lp&type=ep&type=compilation&type=!live&type=various&type=!demo&type=single"
    );
}

#[test]
fn parsed_fragment_rebuilds_to_the_same_text() {
    let fragment = type_query_fragment(&controls(&[("lp", true), ("live", false)]));
    let filter = parse_type_query(&fragment).unwrap();
    assert_eq!(filter.to_fragment(), fragment);
}
