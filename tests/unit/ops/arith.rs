use super::*;
use crate::eval::node::evaluate;
use crate::ops::lambda::id;

const PARAMS: [f64; 5] = [0.0, 1.0, -1.4, -123.7, 44.5];

#[test]
fn float_arithmetic_is_bit_exact() {
    let x = id();
    let add = &x + 1.0;
    let sub = &x - 1.0;
    let mul = &x * 3.0;
    let div = &x / 4.0;
    let rsub = 10.0 - &x;
    let neg = -&x;
    for p in PARAMS {
        assert_eq!(evaluate(&add, p).unwrap().to_bits(), (p + 1.0).to_bits());
        assert_eq!(evaluate(&sub, p).unwrap().to_bits(), (p - 1.0).to_bits());
        assert_eq!(evaluate(&mul, p).unwrap().to_bits(), (p * 3.0).to_bits());
        assert_eq!(evaluate(&div, p).unwrap().to_bits(), (p / 4.0).to_bits());
        assert_eq!(evaluate(&rsub, p).unwrap().to_bits(), (10.0 - p).to_bits());
        assert_eq!(evaluate(&neg, p).unwrap().to_bits(), (-p).to_bits());
    }
}

#[test]
fn comparisons_follow_native_semantics() {
    let x = id();
    let lt = x.lt(1.0);
    let le = x.le(1.0);
    let gt = x.gt(1.0);
    let ge = x.ge(1.0);
    let eq = x.equals(1.0);
    let ne = x.not_equals(1.0);
    for p in PARAMS {
        assert_eq!(evaluate(&lt, p).unwrap(), p < 1.0);
        assert_eq!(evaluate(&le, p).unwrap(), p <= 1.0);
        assert_eq!(evaluate(&gt, p).unwrap(), p > 1.0);
        assert_eq!(evaluate(&ge, p).unwrap(), p >= 1.0);
        assert_eq!(evaluate(&eq, p).unwrap(), p == 1.0);
        assert_eq!(evaluate(&ne, p).unwrap(), p != 1.0);
    }
}

#[test]
fn nan_is_not_equal_to_itself() {
    let nan = id() * f64::NAN;
    let eq = nan.equals(&nan);
    assert!(!evaluate(&eq, 0.0).unwrap());
    let ne = nan.not_equals(&nan);
    assert!(evaluate(&ne, 0.0).unwrap());
}

#[test]
fn constant_operands_fold_at_construction() {
    let n = Node::constant(2.0f64) * 3.0 + 1.0;
    assert!(n.is_pure_constant());
    assert_eq!(n.constant_value(), Some(7.0));

    let m = Node::constant(7i32) % 4;
    assert_eq!(m.constant_value(), Some(3));
}

#[test]
fn integer_operators() {
    let base = crate::ops::lambda::map_param0("@i", |p| p as i64);
    let f = (&base * 3i64 + 1i64) ^ 2i64;
    assert_eq!(evaluate(&f, 4.0).unwrap(), (4i64 * 3 + 1) ^ 2);
    let masked = &base & 6i64;
    assert_eq!(evaluate(&masked, 7.0).unwrap(), 6);
    let inverted = !&base;
    assert_eq!(evaluate(&inverted, 0.0).unwrap(), -1);
    assert_eq!(inverted.formula(), "(~ @i)");
}

#[test]
fn integer_division_by_zero_is_an_error() {
    let zero = crate::ops::lambda::map_param0("@i", |p| p as i32);
    let q = Node::constant(10i32) / zero.clone();
    assert!(matches!(evaluate(&q, 0.0).unwrap_err(), FormuloidError::Arithmetic(_)));
    assert_eq!(evaluate(&q, 3.0).unwrap(), 3);

    let folded_later = Node::constant(1i32) % 0;
    assert!(!folded_later.is_pure_constant());
    assert!(evaluate(&folded_later, 0.0).is_err());
}

#[test]
fn float_division_by_zero_is_a_value() {
    let q = Node::constant(1.0f64) / id();
    assert_eq!(evaluate(&q, 0.0).unwrap(), f64::INFINITY);
}

#[test]
fn logic_short_circuits() {
    let crashing = crate::ops::lambda::with_context(
        "crash",
        Vec::<Node<bool>>::new(),
        |_: &mut Context, _: &[Node<bool>]| Err(FormuloidError::frame("must not run")),
    );
    let pos = id().gt(0.0);
    let and = pos.and(&crashing);
    assert!(!evaluate(&and, -1.0).unwrap());
    assert!(evaluate(&and, 1.0).is_err());

    let or = pos.or(&crashing);
    assert!(evaluate(&or, 1.0).unwrap());

    assert!(Node::constant(false).and(&crashing).is_pure_constant());
    assert_eq!(Node::constant(true).and(&pos).formula(), "(> @ 0.)");
    let not = !pos;
    assert!(evaluate(&not, -1.0).unwrap());
    assert_eq!(not.formula(), "(not (> @ 0.))");
}

#[test]
fn formulas_use_operator_names() {
    let f = (id() + 1.0) * 2.0;
    assert_eq!(f.formula(), "(* (+ @ 1.) 2.)");
    assert_eq!(id().le(0.5).formula(), "(<= @ 0.5)");
    assert_eq!((-id()).formula(), "(- @)");
    let g = id().gt(0.0).or(id().lt(-1.0));
    assert_eq!(g.formula(), "(or (> @ 0.) (< @ -1.))");
}

#[test]
fn f32_operators() {
    let x = crate::ops::lambda::map_param0("@f", |p| p as f32);
    let y = &x * 0.5f32 + 1.0f32;
    assert_eq!(evaluate(&y, 2.0).unwrap(), 2.0f32);
    assert_eq!(y.formula(), "(+ (* @f 0.5f) 1.f)");
}
