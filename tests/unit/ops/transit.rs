use super::*;
use crate::eval::node::evaluate;
use crate::foundation::error::FormuloidError;
use crate::ops::lambda::with_context;

fn poison() -> Node<f64> {
    with_context(
        "poison",
        Vec::<Node<f64>>::new(),
        |_: &mut Context, _: &[Node<f64>]| Err(FormuloidError::frame("evaluated")),
    )
}

#[test]
fn outside_the_window_only_one_side_is_evaluated() {
    let f = transit(1.0, 3.0, id() * 10.0, poison(), poison());
    assert_eq!(evaluate(&f, 1.0 - 1e-9).unwrap(), (1.0 - 1e-9) * 10.0);

    let g = transit(1.0, 3.0, poison(), id() + 100.0, poison());
    assert_eq!(evaluate(&g, 3.0).unwrap(), 103.0);
    assert_eq!(evaluate(&g, 50.0).unwrap(), 150.0);
}

#[test]
fn inside_the_window_the_result_lies_between_both_sides() {
    let before = id() * 0.0 + 2.0;
    let after = id() * 0.0 + 6.0;
    let f = transit(0.0, 4.0, before, after, id());
    assert_eq!(evaluate(&f, 0.0).unwrap(), 2.0);
    assert_eq!(evaluate(&f, 1.0).unwrap(), 3.0);
    assert_eq!(evaluate(&f, 2.0).unwrap(), 4.0);
    for i in 1..40 {
        let v = evaluate(&f, f64::from(i) * 0.1).unwrap();
        assert!((2.0..=6.0).contains(&v));
    }
}

#[test]
fn zero_coefficient_side_is_skipped() {
    // A step ease reaches 1 immediately: `before` is never needed inside the window.
    let step = Node::constant(1.0);
    let f = transit(0.0, 1.0, poison(), Node::constant(7.0), step);
    assert_eq!(evaluate(&f, 0.5).unwrap(), 7.0);
}

#[test]
fn reversed_window_inverts_the_blend() {
    let f = transit_linear(4.0, 0.0, 0.0, 1.0);
    assert_eq!(evaluate(&f, -1.0).unwrap(), 0.0);
    assert_eq!(evaluate(&f, 5.0).unwrap(), 1.0);
    // u = 1 - 1/4 after inversion, so before weighs 0.75.
    assert_eq!(evaluate(&f, 1.0).unwrap(), 0.25);
}

#[test]
fn empty_window_behaves_like_after() {
    let f = transit_linear(2.0, 2.0, 0.0, 1.0);
    assert_eq!(evaluate(&f, 1.9).unwrap(), 0.0);
    assert_eq!(evaluate(&f, 2.0).unwrap(), 1.0);
}

#[test]
fn ease_is_evaluated_on_the_normalized_position() {
    let f = transit(10.0, 20.0, 0.0, 1.0, id() * &id());
    assert_eq!(evaluate(&f, 15.0).unwrap(), 0.25);
    assert_eq!(f.formula(), "(transit 10. 20. 0. 1. (* @ @))");
}

#[test]
fn transit_reads_the_parameter() {
    let f = transit_linear(0.0, 1.0, 0.0, 1.0);
    evaluate(&f, 0.5).unwrap();
    assert!(!f.is_pure_constant());
}

#[test]
fn morph_places_the_easing_around_t() {
    let easing = Easing::new(id());
    let f = morph(0.0, 10.0, 1.0, &easing);
    assert_eq!(evaluate(&f, 9.0).unwrap(), 0.0);
    assert_eq!(evaluate(&f, 10.0).unwrap(), 0.5);
    assert_eq!(evaluate(&f, 10.5).unwrap(), 1.0);

    let abrupt = morph(0.0, 10.0, 1.0, &easing.resize(0.0));
    assert_eq!(evaluate(&abrupt, 9.99).unwrap(), 0.0);
    assert_eq!(evaluate(&abrupt, 10.0).unwrap(), 1.0);
}
