// Complex Number Codegen Tests

use super::{compile, compile_err, lines};
use crate::{CodegenError, Complex};
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn test_complex_literal_sets_mode() {
    assert_eq!(lines("z = 3 + 4j\n"), vec!["a+bi", "3+4i→A"]);
    assert_eq!(lines("z = 1 - 2j\n"), vec!["a+bi", "1-2i→A"]);
}

#[test]
fn test_real_program_has_no_mode_line() {
    assert_eq!(lines("x = 1\n"), vec!["1→A"]);
}

#[test]
fn test_complex_constructor() {
    assert_eq!(lines("z = Complex(1, 2)\n"), vec!["a+bi", "1+2i→A"]);
    assert_eq!(lines("z = Complex(imag=1)\n"), vec!["a+bi", "i→A"]);
}

#[test]
fn test_complex_constructor_from_variables() {
    let src = indoc! {"
        x = 2
        y = 3
        z = Complex(x, y)
    "};
    assert_eq!(lines(src), vec!["a+bi", "2→A", "3→B", "A+B*i→C"]);
}

#[test]
fn test_imaginary_unit_folding() {
    assert_eq!(lines("z = 1j * 1j\n"), vec!["a+bi", "⁻1→A"]);
    assert_eq!(lines("c = i()\n"), vec!["a+bi", "i→A"]);
}

#[test]
fn test_real_and_imag_parts() {
    let src = indoc! {"
        z = 2j
        r = z.real
        m = z.imag
    "};
    assert_eq!(lines(src), vec!["a+bi", "2i→A", "real(A)→B", "imag(A)→C"]);
    assert_eq!(lines("r = (3 + 4j).imag\n"), vec!["a+bi", "4→A"]);
}

#[test]
fn test_complex_methods() {
    let src = indoc! {"
        z = Complex(1, 1)
        w = z.conjugate()
        m = z.modulus()
        a = z.argument()
        s = z.add(w)
        q = z.div(w)
    "};
    assert_eq!(
        lines(src),
        vec!["a+bi", "1+i→A", "conj(A)→B", "abs(A)→C", "angle(A)→D", "A+B→E", "A/B→F"]
    );
}

#[test]
fn test_constant_methods_fold() {
    assert_eq!(lines("z = (3 + 4j).modulus()\n"), vec!["a+bi", "5→A"]);
    assert_eq!(lines("w = (1 + 2j).conjugate()\n"), vec!["a+bi", "1-2i→A"]);
    assert_eq!(lines("a = (1 + 1j).argument()\n"), vec!["a+bi", "angle(1+i)→A"]);
}

#[test]
fn test_complex_functions() {
    let src = indoc! {"
        z = 3 + 4j
        m = magnitude(z)
    "};
    assert_eq!(lines(src), vec!["a+bi", "3+4i→A", "abs(A)→B"]);
}

#[test]
fn test_complex_list() {
    assert_eq!(lines("zs = [1j, 2]\n"), vec!["a+bi", "{i,2}→∟ZS"]);
}

#[test]
fn test_complex_not_ordered() {
    let src = indoc! {"
        z = 1j
        b = z > 0
    "};
    assert!(matches!(compile_err(src), CodegenError::TypeError { .. }));
}

#[test]
fn test_mode_line_per_program() {
    let src = indoc! {"
        def rotate(z: Complex) -> Complex:
            return z * 1j

        x = 1
    "};
    let programs = compile(src);
    assert_eq!(programs[0].lines, vec!["1→B"]);
    assert_eq!(programs[1].lines, vec!["a+bi", "A*i", "Return"]);
}

#[test]
fn test_complex_display() {
    assert_eq!(Complex::new(3.0, 2.0).to_string(), "3+2i");
    assert_eq!(Complex::new(3.0, -1.0).to_string(), "3-i");
    assert_eq!(Complex::new(0.0, -2.0).to_string(), "⁻2i");
    assert_eq!(Complex::new(-1.5, 0.0).to_string(), "⁻1.5");
}

#[test]
fn test_complex_arithmetic() {
    let a = Complex::new(1.0, 2.0);
    let b = Complex::new(3.0, -1.0);
    assert_eq!(a + b, Complex::new(4.0, 1.0));
    assert_eq!(a * b, Complex::new(5.0, 5.0));
    assert_eq!(a.conjugate(), Complex::new(1.0, -2.0));
    assert_eq!(Complex::new(3.0, 4.0).modulus(), 5.0);
    assert_eq!(a.checked_div(Complex::default()), None);
}
