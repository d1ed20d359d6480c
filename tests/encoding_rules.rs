use admit_dotplot::encoding::{
    self, DEFAULT_RULE, FAIL_RULE, MarkerGlyph, PASS_RULE, WAITLIST_PASS_RULE, colors,
};

#[test]
fn known_outcomes_resolve_to_fixed_rules() {
    let pass = encoding::resolve("합");
    assert_eq!(pass.color, colors::BLUE);
    assert_eq!(pass.marker, MarkerGlyph::Circle);
    assert_eq!(pass.opacity, 0.9);
    assert_eq!(pass.draw_priority, 3);

    assert_eq!(encoding::resolve("추합"), WAITLIST_PASS_RULE);
    assert_eq!(encoding::resolve("추합").color, colors::GREEN);

    let fail = encoding::resolve("불");
    assert_eq!(fail, FAIL_RULE);
    assert_eq!(fail.marker, MarkerGlyph::Cross);
    assert_eq!(fail.opacity, 0.5);
    assert_eq!(fail.draw_priority, 1);
}

#[test]
fn unknown_outcomes_fall_back_to_gray_circle() {
    for label in ["보류", "", "합 ", "PASS"] {
        let rule = encoding::resolve(label);
        assert_eq!(rule, DEFAULT_RULE, "label {label:?}");
        assert_eq!(rule.color_name, "gray");
        assert_eq!(rule.opacity, 1.0);
        assert!(!encoding::is_known(label));
    }
}

#[test]
fn passes_outrank_fails() {
    assert!(PASS_RULE.draw_priority > FAIL_RULE.draw_priority);
    assert_eq!(PASS_RULE.draw_priority, WAITLIST_PASS_RULE.draw_priority);
}
