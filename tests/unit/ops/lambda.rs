use super::*;
use crate::eval::node::evaluate;
use crate::foundation::error::FormuloidError;

#[test]
fn identity_returns_the_parameter() {
    let f = id();
    for p in [0.0, 1.34, -1.111, -111.2] {
        assert_eq!(evaluate(&f, p).unwrap(), p);
    }
    assert_eq!(f.formula(), "@");
    assert!(!f.is_pure_constant());
}

#[test]
fn value_scheme_folds_constant_inputs_at_construction() {
    let n = map1("twice", 4i32, |a: i32| a * 2);
    assert!(n.is_pure_constant());
    assert_eq!(n.constant_value(), Some(8));

    let m = map2("cat", String::from("ab"), String::from("cd"), |a: String, b: String| a + &b);
    assert_eq!(m.constant_value().as_deref(), Some("abcd"));
}

#[test]
fn value_scheme_over_parameter() {
    let n = map2("avg", id(), 3.0, |a: f64, b: f64| (a + b) / 2.0);
    assert!(!n.is_pure_constant());
    assert_eq!(evaluate(&n, 1.0).unwrap(), 2.0);
    assert_eq!(n.formula(), "(avg @ 3.)");

    let t = map3("fma", id(), 2.0, 1.0, |a: f64, b: f64, c: f64| a * b + c);
    assert_eq!(evaluate(&t, 5.0).unwrap(), 11.0);
}

#[test]
fn parameter_scheme_always_reads_the_parameter() {
    let n = map_param1("shift", 10i64, |p: f64, a: i64| p as i64 + a);
    assert_eq!(evaluate(&n, 2.0).unwrap(), 12);
    assert_eq!(n.formula(), "(shift 10l)");
    assert!(!n.is_pure_constant());

    let named = map_param0("clock", |p| p * 60.0);
    assert_eq!(named.formula(), "(clock)");

    let two = map_param2("box", 1.0, 2.0, |p: f64, lo: f64, hi: f64| p.clamp(lo, hi));
    assert_eq!(evaluate(&two, 5.0).unwrap(), 2.0);
}

#[test]
fn context_scheme_controls_evaluation() {
    let first_positive = with_context("first+", [id() - 1.0, id(), id() + 1.0], |ctxt: &mut Context, args: &[Node<f64>]| {
        for a in args {
            let v = a.eval(ctxt)?;
            if v > 0.0 {
                return Ok(v);
            }
        }
        Ok(0.0)
    });
    assert_eq!(evaluate(&first_positive, 0.5).unwrap(), 0.5);
    assert_eq!(evaluate(&first_positive, 3.0).unwrap(), 2.0);
    assert_eq!(first_positive.formula(), "(first+ (- @ 1.) @ (+ @ 1.))");
}

#[test]
fn failing_constant_computation_is_deferred_to_evaluation() {
    let n: Node<i32> = unary("boom", Node::constant(1i32), |_| {
        Err(FormuloidError::arithmetic("boom"))
    });
    assert!(!n.is_pure_constant());
    assert!(matches!(
        evaluate(&n, 0.0).unwrap_err(),
        FormuloidError::Arithmetic(_)
    ));
}
