use super::*;
use crate::eval::node::evaluate;
use crate::ops::lambda::{id, map1};

/// Pass-through node counting its evaluations.
fn pass(counter: &Rc<Cell<usize>>, arg: Node<f64>) -> Node<f64> {
    let counter = Rc::clone(counter);
    map1("pass", arg, move |a: f64| {
        counter.set(counter.get() + 1);
        a
    })
}

fn counters<const N: usize>() -> [Rc<Cell<usize>>; N] {
    std::array::from_fn(|_| Rc::new(Cell::new(0)))
}

fn reference(c: &Rc<Cell<usize>>, x: Node<f64>) -> Node<f64> {
    let a = pass(c, x);
    &a * (&a + 2.0) * (&a * 3.4)
}

fn framed(inner: &Rc<Cell<usize>>, outer: &Rc<Cell<usize>>, x: Node<f64>) -> Node<f64> {
    let fb = FrameBuilder::new();
    let a = pass(outer, fb.bind("arg1", pass(inner, x)));
    let_(fb, &a * (&a + 2.0) * (&a * 3.4))
}

#[test]
fn bound_subexpression_is_evaluated_once() {
    let [c0, c1, c2, c3, c4] = counters::<5>();
    let r = reference(&c0, pass(&c3, id().sin()));
    let t = framed(&c1, &c2, pass(&c4, id().sin()));

    assert_eq!(evaluate(&r, 2.3).unwrap(), evaluate(&t, 2.3).unwrap());
    assert_eq!(c0.get(), 3);
    assert_eq!(c1.get(), 1);
    assert_eq!(c2.get(), 3);
    assert_eq!(c3.get(), 3);
    assert_eq!(c4.get(), 1);

    // Every new evaluation recomputes the binding exactly once.
    evaluate(&t, 0.7).unwrap();
    assert_eq!(c1.get(), 2);
    assert_eq!(c4.get(), 2);
}

#[test]
fn nested_lets_are_independent() {
    let [c0, c1, c2, c3, c4] = counters::<5>();
    let r = reference(&c0, reference(&c0, pass(&c3, id().sin())));
    let t = framed(&c1, &c2, framed(&c1, &c2, pass(&c4, id().sin())));

    let vr = evaluate(&r, 2.3).unwrap();
    let vt = evaluate(&t, 2.3).unwrap();
    assert_eq!(vr, vt);
    assert_eq!(c0.get(), 3 + 3 * 3);
    assert_eq!(c1.get(), 1 + 1);
    assert_eq!(c2.get(), 3 + 3);
    assert_eq!(c3.get(), 3 * 3);
    assert_eq!(c4.get(), 1);
}

#[test]
fn binding_referenced_n_times() {
    for n in [2usize, 3, 10] {
        let [bound, unbound] = counters::<2>();

        let fb = FrameBuilder::new();
        let x = fb.bind("x", pass(&bound, id() * 2.0));
        let body = crate::ops::math::sum(std::iter::repeat_n(x, n));
        let f = let_(fb, body);

        let y = pass(&unbound, id() * 2.0);
        let g = crate::ops::math::sum(std::iter::repeat_n(y, n));

        assert_eq!(evaluate(&f, 1.5).unwrap(), evaluate(&g, 1.5).unwrap());
        assert_eq!(bound.get(), 1);
        assert_eq!(unbound.get(), n);
    }
}

#[test]
fn constants_are_not_bound() {
    let fb = FrameBuilder::new();
    let c = fb.bind("c", Node::constant(3.0));
    assert!(c.is_pure_constant());
    assert!(!fb.has_bindings());
    let f = let_(fb, id() + c);
    assert_eq!(f.formula(), "(+ @ 3.)");
}

#[test]
fn parameter_free_binding_lets_the_let_fold() {
    let [c] = counters::<1>();
    let fb = FrameBuilder::new();
    let x = fb.bind("x", pass(&c, Node::constant(2.0) + id().apply(4.0)));
    let f = let_(fb, &x * &x);
    assert_eq!(evaluate(&f, 0.0).unwrap(), 36.0);
    assert!(f.is_pure_constant());
    assert_eq!(evaluate(&f, 9.0).unwrap(), 36.0);
    assert_eq!(c.get(), 1);
}

#[test]
fn parameter_dependent_let_does_not_fold() {
    let fb = FrameBuilder::new();
    let x = fb.bind("x", id() + 1.0);
    let f = let_(fb, &x * &x);
    assert_eq!(evaluate(&f, 1.0).unwrap(), 4.0);
    assert!(!f.is_pure_constant());
    assert_eq!(evaluate(&f, 2.0).unwrap(), 9.0);
}

#[test]
fn binding_outside_its_let_is_an_error() {
    let fb = FrameBuilder::new();
    let x = fb.bind("x", id() + 1.0);
    let err = evaluate(&x, 0.0).unwrap_err();
    assert!(matches!(err, FormuloidError::Frame(_)));

    drop(fb);
    let err = evaluate(&x, 0.0).unwrap_err();
    assert!(matches!(err, FormuloidError::Frame(_)));
}

#[test]
fn bindings_may_use_earlier_bindings() {
    let fb = FrameBuilder::new();
    let a = fb.bind("a", id() * 2.0);
    let b = fb.bind("b", &a + 1.0);
    let f = let_(fb, &a * &b);
    assert_eq!(evaluate(&f, 3.0).unwrap(), 42.0);
    assert_eq!(evaluate(&f, 1.0).unwrap(), 6.0);
}

#[test]
fn let_formula_lists_bindings_with_frame_ids() {
    let fb = FrameBuilder::new();
    let a = fb.bind("a", id() * 2.0);
    let b = fb.bind("b", id().sin());
    let f = let_(fb, &a + &b);
    let expected = "(let ((a_1 (* @ 2.)) (b_1 (sin @))) (+ a_1 b_1))";
    assert_eq!(f.formula(), expected);
    // Identifiers restart with every rendering.
    assert_eq!(f.formula(), expected);

    let fb = FrameBuilder::new();
    let c = fb.bind("c", id() - 1.0);
    let g = let_(fb, &c + &f);
    assert_eq!(
        g.formula(),
        "(let ((c_1 (- @ 1.))) (+ c_1 (let ((a_2 (* @ 2.)) (b_2 (sin @))) (+ a_2 b_2))))"
    );
}
