// Expression compilation
//
// Expressions compile to calculator text plus the static type and binding
// strength of the result. Parentheses are only added where TI-BASIC
// precedence would otherwise regroup the operands.

use crate::calls::CallCompiler;
use crate::complex::Complex;
use crate::helpers::check_range;
use crate::operators;
use crate::symbols::Storage;
use crate::{CodegenError, CodegenResult, Compiler, CrunchType};
use parser::ast::{BinaryOp, Expr, ExprKind, Literal, Span};

/// Binding strength of an emitted expression, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Prec {
    Or,
    And,
    Compare,
    Sum,
    Product,
    Negate,
    Power,
    Atom,
}

/// A compiled expression
#[derive(Debug, Clone, PartialEq)]
pub struct Emitted {
    pub code: String,
    pub ty: CrunchType,
    pub prec: Prec,
    /// Known numeric value, for folding
    pub value: Option<Complex>,
    /// Set when the expression is exactly a calculator variable
    pub storage: Option<Storage>,
}

impl Emitted {
    pub fn new(code: impl Into<String>, ty: CrunchType, prec: Prec) -> Self {
        Self {
            code: code.into(),
            ty,
            prec,
            value: None,
            storage: None,
        }
    }

    pub fn constant(value: Complex, ty: CrunchType) -> Self {
        let prec = if value.real != 0.0 && value.imag != 0.0 {
            Prec::Sum
        } else if value.imag == 0.0 {
            if value.real < 0.0 { Prec::Negate } else { Prec::Atom }
        } else if value.imag < 0.0 {
            Prec::Negate
        } else if value.imag == 1.0 {
            Prec::Atom
        } else {
            Prec::Product
        };
        Self {
            code: value.to_string(),
            ty,
            prec,
            value: Some(value),
            storage: None,
        }
    }

    pub fn variable(storage: Storage, ty: CrunchType) -> Self {
        Self {
            code: storage.to_string(),
            ty,
            prec: Prec::Atom,
            value: None,
            storage: Some(storage),
        }
    }

    /// Code, parenthesized when it binds looser than `min`
    pub fn wrapped(&self, min: Prec) -> String {
        if self.prec < min {
            format!("({})", self.code)
        } else {
            self.code.clone()
        }
    }

    /// Constant integer value, if known
    pub fn int_value(&self) -> Option<i64> {
        self.value
            .filter(|v| v.is_real() && v.real.fract() == 0.0)
            .map(|v| v.real as i64)
    }
}

/// Trait for expression compilation helper methods
pub trait ExpressionCompiler {
    /// Compile any expression in value position
    fn compile_expr(&mut self, expr: &Expr) -> CodegenResult<Emitted>;

    /// Compile literal expression (Int, Float, Imaginary, String, Bool)
    fn compile_literal_expr(&self, lit: &Literal, span: &Span) -> CodegenResult<Emitted>;

    /// Resolve a name to its calculator variable
    fn compile_identifier_expr(&self, name: &str, span: &Span) -> CodegenResult<Emitted>;

    /// `{1,2,3}` lists and `[[1,2][3,4]]` matrices
    fn compile_list_expr(&mut self, items: &[Expr], span: &Span) -> CodegenResult<Emitted>;

    /// `lst[i]` and `m[i][j]`
    fn compile_index_expr(&mut self, target: &Expr, index: &Expr, span: &Span) -> CodegenResult<Emitted>;

    /// `m.name`, `c.real`, `c.imag`
    fn compile_attribute_expr(&mut self, target: &Expr, name: &str, span: &Span) -> CodegenResult<Emitted>;

    /// Calculator position (1-based) of a Python index into `list`
    fn compile_position(&mut self, index: &Expr, list: &str) -> CodegenResult<String>;

    /// `[A](r,c)` for `m[r][c]`, if `target[index]` indexes a matrix variable
    fn compile_matrix_element(&mut self, target: &Expr, index: &Expr) -> CodegenResult<Option<String>>;
}

impl ExpressionCompiler for Compiler {
    fn compile_expr(&mut self, expr: &Expr) -> CodegenResult<Emitted> {
        let emitted = match &expr.kind {
            ExprKind::Literal(lit) => self.compile_literal_expr(lit, &expr.span)?,
            ExprKind::Identifier(name) => self.compile_identifier_expr(name, &expr.span)?,
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.compile_expr(lhs)?;
                let rhs = self.compile_expr(rhs)?;
                operators::binary(*op, lhs, rhs, &expr.span)?
            }
            ExprKind::Unary { op, expr: operand } => {
                let operand = self.compile_expr(operand)?;
                operators::unary(*op, operand, &expr.span)?
            }
            ExprKind::List(items) => self.compile_list_expr(items, &expr.span)?,
            ExprKind::Index { target, index } => self.compile_index_expr(target, index, &expr.span)?,
            ExprKind::Call { func, args, kwargs } => self.compile_call_expr(func, args, kwargs, &expr.span)?,
            ExprKind::Attribute { target, name } => self.compile_attribute_expr(target, name, &expr.span)?,
        };

        if emitted.ty.is_complex() {
            self.uses_complex = true;
        }
        Ok(emitted)
    }

    fn compile_literal_expr(&self, lit: &Literal, span: &Span) -> CodegenResult<Emitted> {
        let in_range = |v: f64| check_range(v, span);

        match lit {
            Literal::Int(n) => {
                let v = in_range(*n as f64)?;
                Ok(Emitted::constant(Complex::from_real(v), CrunchType::Int))
            }
            Literal::Float(f) => Ok(Emitted::constant(
                Complex::from_real(in_range(*f)?),
                CrunchType::Float,
            )),
            Literal::Imaginary(f) => Ok(Emitted::constant(
                Complex::new(0.0, in_range(*f)?),
                CrunchType::Complex,
            )),
            Literal::Bool(b) => Ok(Emitted::constant(
                Complex::from_real(if *b { 1.0 } else { 0.0 }),
                CrunchType::Bool,
            )),
            Literal::String(s) => {
                if let Some(bad) = s.chars().find(|c| matches!(c, '"' | '→' | '\n')) {
                    return Err(CodegenError::invalid(
                        "string literal",
                        format!("calculator strings cannot contain {:?}", bad),
                        span,
                    ));
                }
                Ok(Emitted::new(format!("\"{}\"", s), CrunchType::Str, Prec::Atom))
            }
            Literal::None => Err(CodegenError::invalid(
                "None",
                "None has no calculator value",
                span,
            )),
        }
    }

    fn compile_identifier_expr(&self, name: &str, span: &Span) -> CodegenResult<Emitted> {
        if let Some(symbol) = self.resolve(name) {
            return Ok(Emitted::variable(symbol.storage.clone(), symbol.ty));
        }
        if self.functions.contains_key(name) || crate::builtins::lookup(name).is_some() {
            return Err(CodegenError::invalid(
                name,
                "functions are not values; call it instead",
                span,
            ));
        }
        Err(CodegenError::UndefinedSymbol {
            name: name.to_string(),
            context: format!("program {}", self.program_name()),
            span: Some(span.clone()),
        })
    }

    fn compile_list_expr(&mut self, items: &[Expr], span: &Span) -> CodegenResult<Emitted> {
        if items.is_empty() {
            return Err(CodegenError::MissingValue {
                what: "element type".to_string(),
                context: "empty list literal (annotate it: `xs: list[int] = []`)".to_string(),
                span: Some(span.clone()),
            });
        }

        // Nested literal: a matrix, one list per row
        if items.iter().all(|i| matches!(i.kind, ExprKind::List(_))) {
            let mut rows = Vec::with_capacity(items.len());
            let mut width = None;
            for row in items {
                let ExprKind::List(cells) = &row.kind else { continue };
                if *width.get_or_insert(cells.len()) != cells.len() || cells.is_empty() {
                    return Err(CodegenError::invalid(
                        "matrix literal",
                        "every row must have the same, non-zero length",
                        &row.span,
                    ));
                }
                let mut codes = Vec::with_capacity(cells.len());
                for cell in cells {
                    let e = self.compile_expr(cell)?;
                    if !e.ty.is_real() {
                        return Err(CodegenError::mismatch("float", e.ty, "matrix literal", &cell.span));
                    }
                    codes.push(e.code);
                }
                rows.push(format!("[{}]", codes.join(",")));
            }
            return Ok(Emitted::new(format!("[{}]", rows.concat()), CrunchType::Matrix, Prec::Atom));
        }

        let mut codes = Vec::with_capacity(items.len());
        let mut elem = CrunchType::Bool;
        for item in items {
            let e = self.compile_expr(item)?;
            if !e.ty.is_numeric() {
                return Err(CodegenError::mismatch("number", e.ty, "list literal", &item.span));
            }
            elem = CrunchType::unify(elem, e.ty).unwrap_or(CrunchType::Complex);
            codes.push(e.code);
        }
        let ty = elem.list_of().unwrap_or(CrunchType::FloatList);
        Ok(Emitted::new(format!("{{{}}}", codes.join(",")), ty, Prec::Atom))
    }

    fn compile_index_expr(&mut self, target: &Expr, index: &Expr, span: &Span) -> CodegenResult<Emitted> {
        if let Some(code) = self.compile_matrix_element(target, index)? {
            return Ok(Emitted::new(code, CrunchType::Float, Prec::Atom));
        }

        let list = self.compile_expr(target)?;
        let elem = match (&list.storage, list.ty.element()) {
            (Some(Storage::List(_)), Some(elem)) => elem,
            (_, _) if list.ty == CrunchType::Matrix => {
                return Err(CodegenError::invalid(
                    "matrix row",
                    "index a matrix with both coordinates: m[row][col]",
                    span,
                ));
            }
            (_, Some(_)) => {
                return Err(CodegenError::invalid(
                    "index",
                    "only list variables can be indexed; assign the list first",
                    &target.span,
                ));
            }
            (_, None) => {
                return Err(CodegenError::mismatch("list", list.ty, "index expression", &target.span));
            }
        };

        let position = self.compile_position(index, &list.code)?;
        Ok(Emitted::new(format!("{}({})", list.code, position), elem, Prec::Atom))
    }

    fn compile_attribute_expr(&mut self, target: &Expr, name: &str, span: &Span) -> CodegenResult<Emitted> {
        let receiver = self.compile_expr(target)?;

        match (receiver.ty, name) {
            (CrunchType::Matrix, "name") => match &receiver.storage {
                Some(Storage::Matrix(label)) => {
                    Ok(Emitted::new(format!("\"{}\"", label), CrunchType::Str, Prec::Atom))
                }
                _ => Err(CodegenError::invalid(
                    ".name",
                    "only matrix variables have a name",
                    span,
                )),
            },
            (ty, "real" | "imag") if ty.is_numeric() => {
                if let Some(v) = receiver.value {
                    let part = if name == "real" { v.real } else { v.imag };
                    return Ok(Emitted::constant(Complex::from_real(part), CrunchType::Float));
                }
                Ok(Emitted::new(
                    format!("{}({})", name, receiver.code),
                    CrunchType::Float,
                    Prec::Atom,
                ))
            }
            (ty, _) => Err(CodegenError::UndefinedSymbol {
                name: format!("{}.{}", ty, name),
                context: "attribute access".to_string(),
                span: Some(span.clone()),
            }),
        }
    }

    fn compile_position(&mut self, index: &Expr, list: &str) -> CodegenResult<String> {
        let idx = self.compile_expr(index)?;
        if !CrunchType::Int.is_assignable_from(&idx.ty) {
            return Err(CodegenError::mismatch("int", idx.ty, "list index", &index.span));
        }

        // Negative constants count from the end, as in Python
        match idx.int_value() {
            Some(-1) => Ok(format!("dim({})", list)),
            Some(k) if k < 0 => match k.checked_neg().and_then(|n| n.checked_sub(1)) {
                Some(offset) => Ok(format!("dim({})-{}", list, offset)),
                None => Err(CodegenError::invalid(
                    "list index",
                    format!("index {} is out of range", k),
                    &index.span,
                )),
            },
            _ => {
                let one = Emitted::constant(Complex::from_real(1.0), CrunchType::Int);
                Ok(operators::binary(BinaryOp::Add, idx, one, &index.span)?.code)
            }
        }
    }

    fn compile_matrix_element(&mut self, target: &Expr, index: &Expr) -> CodegenResult<Option<String>> {
        let ExprKind::Index { target: matrix, index: row } = &target.kind else {
            return Ok(None);
        };
        let label = match self.symbol_of(matrix) {
            Some(symbol) => match symbol.storage {
                Storage::Matrix(label) => label,
                _ => return Ok(None),
            },
            None => return Ok(None),
        };

        let mut coords = Vec::with_capacity(2);
        for coord in [row.as_ref(), index] {
            let e = self.compile_expr(coord)?;
            if !CrunchType::Int.is_assignable_from(&e.ty) {
                return Err(CodegenError::mismatch("int", e.ty, "matrix index", &coord.span));
            }
            let one = Emitted::constant(Complex::from_real(1.0), CrunchType::Int);
            coords.push(operators::binary(BinaryOp::Add, e, one, &coord.span)?.code);
        }
        Ok(Some(format!("[{}]({})", label, coords.join(","))))
    }
}
