mod common;

use common::FakeElement;
use cosmic_text_fit::{
    text_fit, BoxSizing, ContainerBox, FitError, FitOptions, Insets, MeasurableElement,
    WhiteSpace,
};

fn fit(element: &mut FakeElement, options: &FitOptions) -> Option<f32> {
    text_fit(element, options, false).expect("valid options")
}

#[test]
fn shrinks_as_text_gets_longer() {
    let options = FitOptions::default();
    let short = fit(&mut FakeElement::new("rat", 50.0, 50.0), &options).unwrap();
    let medium = fit(&mut FakeElement::new("a cool, dece rat", 50.0, 50.0), &options).unwrap();
    let long = fit(
        &mut FakeElement::new("a totally DECENT rat! I think!", 50.0, 50.0),
        &options,
    )
    .unwrap();

    assert!(long < medium, "{long} < {medium}");
    assert!(medium < short, "{medium} < {short}");
}

#[test]
fn short_text_beats_sentence() {
    let options = FitOptions::default();
    let rat = fit(&mut FakeElement::new("rat", 50.0, 50.0), &options).unwrap();
    let sentence = fit(
        &mut FakeElement::new("a totally decent rat, I think", 50.0, 50.0),
        &options,
    )
    .unwrap();
    assert!(rat > sentence);
}

#[test]
fn result_is_tightest_fit_within_bounds() {
    let options = FitOptions::default();
    let cases = [
        ("rat", 50.0, 50.0),
        ("hello there", 80.0, 80.0),
        ("a cool, dece rat", 120.0, 30.0),
        ("x", 300.0, 300.0),
        ("tiny box", 40.0, 10.0),
    ];

    for (text, width, height) in cases {
        let mut element = FakeElement::new(text, width, height);
        let size = fit(&mut element, &options).unwrap();

        assert!(
            (options.min..=options.max).contains(&size),
            "{text:?}: {size} out of bounds"
        );
        assert_eq!(element.font_size(), Some(size), "{text:?}: applied size");
        assert!(!element.overflows_at(size), "{text:?}: overflows at {size}");

        // the search never probes its upper bound, the container height capped by max
        let next = size + 0.1;
        let upper = height.min(options.max);
        assert!(
            element.overflows_at(next) || next >= upper - 0.05,
            "{text:?}: {next} would still fit"
        );
    }
}

#[test]
fn fitting_twice_is_idempotent() {
    let mut element = FakeElement::new("a cool, dece rat", 90.0, 40.0);
    let first = fit(&mut element, &FitOptions::default());
    let second = fit(&mut element, &FitOptions::default());
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn hidden_element_is_not_probed() {
    let mut element = FakeElement::new("rat", 50.0, 50.0).hidden();
    assert_eq!(fit(&mut element, &FitOptions::default()), None);
    assert_eq!(element.font_size_writes, 0);
    assert_eq!(element.measurements, 1);

    // the last attempt only adds a warning
    assert_eq!(
        text_fit(&mut element, &FitOptions::default(), true).unwrap(),
        None
    );
    assert_eq!(element.font_size_writes, 0);
}

#[test]
fn white_space_follows_word_wrap() {
    let mut element = FakeElement::new("two words", 50.0, 50.0);
    fit(&mut element, &FitOptions::default());
    assert_eq!(element.white_space, WhiteSpace::NoWrap);

    fit(&mut element, &FitOptions::new().word_wrap(true));
    assert_eq!(element.white_space, WhiteSpace::Normal);
}

#[test]
fn word_wrap_allows_larger_text() {
    let text = "wrapping lets words stack";
    let no_wrap = fit(&mut FakeElement::new(text, 60.0, 200.0), &FitOptions::default()).unwrap();
    let wrapped = fit(
        &mut FakeElement::new(text, 60.0, 200.0),
        &FitOptions::new().word_wrap(true),
    )
    .unwrap();
    assert!(wrapped > no_wrap, "{wrapped} > {no_wrap}");
}

#[test]
fn border_box_padding_shrinks_available_space() {
    let plain = fit(&mut FakeElement::new("rat", 50.0, 50.0), &FitOptions::default()).unwrap();

    let padded = ContainerBox::new(50.0, 50.0)
        .padding(Insets::uniform(10.0))
        .box_sizing(BoxSizing::BorderBox);
    let mut element = FakeElement::new("rat", 50.0, 50.0).container(padded);
    let size = fit(&mut element, &FitOptions::default()).unwrap();

    assert!(size < plain);
    // three characters of half the font size in a 30px content box
    assert_eq!(size, 20.0);
}

#[test]
fn content_box_padding_is_ignored() {
    let padded = ContainerBox::new(50.0, 50.0).padding(Insets::uniform(10.0));
    let plain = fit(&mut FakeElement::new("rat", 50.0, 50.0), &FitOptions::default());
    let with_padding = fit(
        &mut FakeElement::new("rat", 50.0, 50.0).container(padded),
        &FitOptions::default(),
    );
    assert_eq!(plain, with_padding);
}

#[test]
fn max_caps_large_containers() {
    let mut element = FakeElement::new("x", 1000.0, 1000.0);
    let size = fit(&mut element, &FitOptions::new().max(48.0)).unwrap();
    assert!(size <= 48.0);
    assert!(size >= 47.9);
}

#[test]
fn min_is_the_floor() {
    let mut element = FakeElement::new("much too long for this box", 20.0, 20.0);
    let size = fit(&mut element, &FitOptions::new().min(8.0)).unwrap();
    assert_eq!(size, 8.0);
    assert_eq!(element.font_size(), Some(8.0));
}

#[test]
fn accuracy_trades_precision_for_probes() {
    let mut exact = FakeElement::new("hello", 100.0, 100.0);
    let exact_size = fit(&mut exact, &FitOptions::default()).unwrap();

    let mut rough = FakeElement::new("hello", 100.0, 100.0);
    let rough_size = fit(&mut rough, &FitOptions::new().accuracy(4.0)).unwrap();

    assert!(rough.measurements < exact.measurements);
    assert!(rough_size <= exact_size);
    assert!(exact_size - rough_size <= 4.0);
    assert!(!rough.overflows_at(rough_size));
}

#[test]
fn malformed_options_fail_fast() {
    let mut element = FakeElement::new("rat", 50.0, 50.0);
    let result = text_fit(&mut element, &FitOptions::new().min(40.0).max(20.0), false);
    assert_eq!(
        result,
        Err(FitError::InvalidBounds {
            min: 40.0,
            max: 20.0
        })
    );
    assert_eq!(element.measurements, 0);
}

#[test]
fn debug_tracing_does_not_change_result() {
    let plain = fit(&mut FakeElement::new("rat", 50.0, 50.0), &FitOptions::default());
    let traced = fit(
        &mut FakeElement::new("rat", 50.0, 50.0),
        &FitOptions::new().debug("scoreboard"),
    );
    assert_eq!(plain, traced);
}
