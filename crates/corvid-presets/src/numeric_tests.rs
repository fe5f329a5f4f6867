use super::*;

#[test]
fn integer_parses_positive_and_negative() {
    let program = make_integer_program();
    assert_eq!(program.run(b"42", &()).unwrap(), 42);
    assert_eq!(program.run(b"-3", &()).unwrap(), -3);
}

#[test]
fn integer_rejects_trailing_garbage() {
    let program = make_integer_program();
    assert!(program.run(b"42r", &()).unwrap_err().to_string().contains("syntax error"));
}

#[test]
fn float_parses_exponent_and_fraction() {
    let program = make_float_program();
    assert!((program.run(b"-3.5e2", &()).unwrap() - (-350.0)).abs() < 1e-3);
}

#[test]
fn double_parses_plain_integer_literal() {
    let program = make_double_program();
    assert_eq!(program.run(b"42", &()).unwrap(), 42.0);
}

#[test]
fn hex_parses_mixed_case_digits() {
    let program = make_hex_program();
    assert_eq!(program.run(b"1aF", &()).unwrap(), 0x1af);
}

#[test]
fn integer_overflow_is_a_typed_error_not_a_panic() {
    let program = make_integer_program();
    assert!(program.run(b"99999999999999999999", &()).is_err());
}

#[test]
fn hex_overflow_is_a_typed_error_not_a_panic() {
    let program = make_hex_program();
    assert!(program.run(b"ffffffffffffffffff", &()).is_err());
}
