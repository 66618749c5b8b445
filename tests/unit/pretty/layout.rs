use super::*;

const LET: &str = "(let ((a_1 (* @ 2.)) (b_1 (sin @))) (+ a_1 b_1))";

#[test]
fn short_formulas_stay_on_one_line() {
    assert_eq!(pretty("(+ @ 1.)"), "(+ @ 1.)");
    assert_eq!(pretty("(+   @\n  (* @ 2.))"), "(+ @ (* @ 2.))");
    assert_eq!(pretty("@"), "@");
    assert_eq!(pretty("()"), "()");
    assert_eq!(pretty(""), "");
}

#[test]
fn wide_calls_put_arguments_on_their_own_lines() {
    let out = pretty("(+ aaaaaaaa bbbbbbbbb cccccccccc ddddddddd)");
    assert_eq!(out, "(+\n  aaaaaaaa\n  bbbbbbbbb\n  cccccccccc\n  ddddddddd)");
}

#[test]
fn small_gains_do_not_split() {
    let text = "(f aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa)";
    assert_eq!(pretty(text), text);
}

#[test]
fn let_keeps_its_binding_list_together_when_it_fits() {
    assert_eq!(
        pretty(LET),
        "(let\n  ((a_1 (* @ 2.)) (b_1 (sin @)))\n  (+ a_1 b_1))"
    );
}

#[test]
fn paired_lists_align_under_their_first_element() {
    let opts = PrettyOpts {
        max_per_line: 20,
        split_gain: 4,
    };
    let expected = "\
(let
  ((a_1 (* @ 2.))
   (b_1 (sin @)))
  (+ a_1 b_1))";
    assert_eq!(pretty_with(LET, &opts), expected);
}

#[test]
fn nested_splits_indent_from_their_own_column() {
    let opts = PrettyOpts {
        max_per_line: 12,
        split_gain: 2,
    };
    let out = pretty_with("(f (g aaaa bbbb cccc) dddd)", &opts);
    assert_eq!(out, "(f\n  (g\n    aaaa\n    bbbb\n    cccc)\n  dddd)");
}

#[test]
fn output_is_stable() {
    let opts = PrettyOpts {
        max_per_line: 20,
        split_gain: 4,
    };
    for text in [LET, "(+ aaaaaaaa bbbbbbbbb cccccccccc ddddddddd)", "(+ @ 1.)"] {
        let once = pretty_with(text, &opts);
        assert_eq!(pretty_with(&once, &opts), once);
    }
}

#[test]
fn malformed_input_is_returned_verbatim() {
    for text in ["(+ 1 2", ")(", "(+ 1 2))", "(a) (b)", "(s \"abc)"] {
        assert_eq!(pretty(text), text);
    }
}

#[test]
fn string_literals_are_single_tokens() {
    assert_eq!(
        pretty("(concat  \"a (b\" \"c  d\")"),
        "(concat \"a (b\" \"c  d\")"
    );
    assert_eq!(pretty("(s \"x\\\"y)\")"), "(s \"x\\\"y)\")");
}

#[test]
fn opts_deserialize_with_defaults() {
    let opts: PrettyOpts = serde_json::from_str(r#"{"max_per_line": 50}"#).unwrap();
    assert_eq!(opts.max_per_line, 50);
    assert_eq!(opts.split_gain, 10);
    assert_eq!(serde_json::from_str::<PrettyOpts>("{}").unwrap(), PrettyOpts::default());
}
