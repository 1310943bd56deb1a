// Call compilation
//
// Resolves a call to a user function (a separate calculator program), one of
// the `Matrix` / `Complex` constructors, or a catalogue builtin, and binds
// and type-checks its arguments.

use crate::builtins::{self, Builtin, Category, Emit, Param, ParamType, Returns};
use crate::complex::Complex;
use crate::expr::{Emitted, ExpressionCompiler, Prec};
use crate::helpers::bind_args;
use crate::operators;
use crate::symbols::{Storage, MATRIX_LABELS};
use crate::{CodegenError, CodegenResult, Compiler, CrunchType};
use parser::ast::{BinaryOp, Expr, ExprKind, Literal, Span};

/// What a called name refers to
pub(crate) enum Callee {
    User,
    Matrix,
    Complex,
    Range,
    Builtin(&'static Builtin),
    Unknown,
}

/// Compiled arguments of a builtin call, in parameter order
pub(crate) struct BuiltinArgs {
    pub args: Vec<Emitted>,
    pub rest: Vec<Emitted>,
}

/// Trait for call compilation helper methods
pub trait CallCompiler {
    /// Call in value position
    fn compile_call_expr(
        &mut self,
        func: &Expr,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<Emitted>;

    /// Call used as a whole statement
    fn compile_call_stmt(
        &mut self,
        func: &Expr,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<()>;

    /// Store arguments into the callee's parameters and run its program.
    /// Returns the declared return type.
    fn compile_user_call(
        &mut self,
        name: &str,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<Option<CrunchType>>;

    /// `Matrix("X")`: validates and returns the label
    fn compile_matrix_ctor(&mut self, args: &[Expr], kwargs: &[(String, Expr)], span: &Span) -> CodegenResult<char>;

    /// `Complex(re, im)`
    fn compile_complex_ctor(
        &mut self,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<Emitted>;

    /// Value of a catalogue call, optionally on a receiver
    fn compile_builtin_value(
        &mut self,
        builtin: &Builtin,
        receiver: Option<Emitted>,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<Emitted>;

    /// Program lines of a catalogue call used as a statement
    fn compile_builtin_stmt(
        &mut self,
        builtin: &Builtin,
        receiver: Option<Emitted>,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<()>;
}

impl Compiler {
    pub(crate) fn callee(&self, name: &str) -> Callee {
        if self.functions.contains_key(name) {
            return Callee::User;
        }
        match name {
            "Matrix" => Callee::Matrix,
            "Complex" => Callee::Complex,
            "range" => Callee::Range,
            _ => builtins::lookup(name).map_or(Callee::Unknown, Callee::Builtin),
        }
    }

    /// Method table entry for `target.name(...)` plus the compiled receiver
    pub(crate) fn resolve_method(
        &mut self,
        target: &Expr,
        name: &str,
        span: &Span,
    ) -> CodegenResult<(&'static Builtin, Emitted)> {
        let receiver = self.compile_expr(target)?;
        let method = match receiver.ty {
            CrunchType::Matrix => builtins::matrix_method(name),
            ty if ty.is_numeric() => builtins::complex_method(name),
            _ => None,
        };
        match method {
            Some(method) if method.needs_variable && !matches!(receiver.storage, Some(Storage::Matrix(_))) => {
                Err(CodegenError::invalid(
                    format!("Matrix.{}", name),
                    "needs a matrix variable such as Matrix(\"A\")",
                    &target.span,
                ))
            }
            Some(method) => Ok((method, receiver)),
            None => Err(CodegenError::UndefinedSymbol {
                name: format!("{}.{}", receiver.ty, name),
                context: "method call".to_string(),
                span: Some(span.clone()),
            }),
        }
    }

    fn compile_builtin_args(
        &mut self,
        builtin: &Builtin,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<BuiltinArgs> {
        let names: Vec<(&str, bool)> = builtin
            .params
            .iter()
            .map(|p| (p.name, p.default.is_some()))
            .collect();
        let bound = bind_args(builtin.name, &names, builtin.variadic.is_some(), args, kwargs, span)?;

        let mut compiled = Vec::with_capacity(builtin.params.len());
        for (param, slot) in builtin.params.iter().zip(&bound.slots) {
            match slot {
                Some(expr) => compiled.push(self.compile_builtin_arg(builtin, param, expr)?),
                None => compiled.push(Emitted::new(param.default.unwrap_or_default(), CrunchType::None, Prec::Atom)),
            }
        }

        let mut rest = Vec::with_capacity(bound.rest.len());
        if let Some(variadic) = &builtin.variadic {
            for expr in bound.rest {
                rest.push(self.compile_builtin_arg(builtin, variadic, expr)?);
            }
        }
        Ok(BuiltinArgs { args: compiled, rest })
    }

    fn compile_builtin_arg(&mut self, builtin: &Builtin, param: &Param, expr: &Expr) -> CodegenResult<Emitted> {
        let context = format!("argument '{}' of {}()", param.name, builtin.name);

        if param.ty == ParamType::VarName {
            let ExprKind::Literal(Literal::String(name)) = &expr.kind else {
                return Err(CodegenError::mismatch(param.ty, "expression", context, &expr.span));
            };
            let symbol = self.resolve(name).cloned().ok_or_else(|| CodegenError::UndefinedSymbol {
                name: name.clone(),
                context: context.clone(),
                span: Some(expr.span.clone()),
            })?;
            if !symbol.ty.is_numeric() && symbol.ty != CrunchType::Str {
                return Err(CodegenError::mismatch("number or str variable", symbol.ty, context, &expr.span));
            }
            return Ok(Emitted::variable(symbol.storage, symbol.ty));
        }

        let emitted = self.compile_expr(expr)?;
        if !param.ty.accepts(&emitted.ty) {
            return Err(CodegenError::mismatch(param.ty, emitted.ty, context, &expr.span));
        }
        if param.ty == ParamType::MatrixVar && !matches!(emitted.storage, Some(Storage::Matrix(_))) {
            return Err(CodegenError::invalid(
                format!("{}()", builtin.name),
                "needs a matrix variable such as Matrix(\"A\")",
                &expr.span,
            ));
        }
        Ok(emitted)
    }

    fn return_type(builtin: &Builtin, args: &[Emitted]) -> CrunchType {
        match builtin.returns {
            Returns::Fixed(ty) => ty,
            Returns::SameAs(index) => args
                .get(index)
                .map_or(CrunchType::Float, |a| a.ty.arithmetic()),
        }
    }

    fn no_value(builtin: &Builtin, span: &Span) -> CodegenError {
        let reason = match builtin.emit {
            Emit::Input => "input can only be the whole right-hand side of an assignment".to_string(),
            Emit::Sort(_) => "sorts a list variable in place, or a copy as the right-hand side of an assignment".to_string(),
            Emit::Unsupported(reason) => reason.to_string(),
            _ => "is a statement and has no value".to_string(),
        };
        CodegenError::invalid(format!("{}()", builtin.name), reason, span)
    }
}

impl CallCompiler for Compiler {
    fn compile_call_expr(
        &mut self,
        func: &Expr,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<Emitted> {
        match &func.kind {
            ExprKind::Identifier(name) => match self.callee(name) {
                Callee::User => Err(CodegenError::invalid(
                    format!("{}()", name),
                    "user function calls must be a statement or the whole right-hand side of an assignment",
                    span,
                )),
                Callee::Matrix => {
                    let label = self.compile_matrix_ctor(args, kwargs, span)?;
                    Ok(Emitted::variable(Storage::Matrix(label), CrunchType::Matrix))
                }
                Callee::Complex => self.compile_complex_ctor(args, kwargs, span),
                Callee::Range => Err(CodegenError::invalid(
                    "range()",
                    "only valid as the iterable of a for loop",
                    span,
                )),
                Callee::Builtin(builtin) => self.compile_builtin_value(builtin, None, args, kwargs, span),
                Callee::Unknown => Err(CodegenError::UndefinedSymbol {
                    name: name.clone(),
                    context: "function call".to_string(),
                    span: Some(func.span.clone()),
                }),
            },
            ExprKind::Attribute { target, name } => {
                let (method, receiver) = self.resolve_method(target, name, span)?;
                self.compile_builtin_value(method, Some(receiver), args, kwargs, span)
            }
            _ => Err(CodegenError::invalid(
                "call",
                "only named functions and methods can be called",
                span,
            )),
        }
    }

    fn compile_call_stmt(
        &mut self,
        func: &Expr,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<()> {
        match &func.kind {
            ExprKind::Identifier(name) => match self.callee(name) {
                Callee::User => self.compile_user_call(name, args, kwargs, span).map(|_| ()),
                Callee::Builtin(builtin) => self.compile_builtin_stmt(builtin, None, args, kwargs, span),
                _ => {
                    let value = self.compile_call_expr(func, args, kwargs, span)?;
                    self.emit(value.code);
                    Ok(())
                }
            },
            ExprKind::Attribute { target, name } => {
                let (method, receiver) = self.resolve_method(target, name, span)?;
                self.compile_builtin_stmt(method, Some(receiver), args, kwargs, span)
            }
            _ => {
                let value = self.compile_call_expr(func, args, kwargs, span)?;
                self.emit(value.code);
                Ok(())
            }
        }
    }

    fn compile_user_call(
        &mut self,
        name: &str,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<Option<CrunchType>> {
        let Some(function) = self.functions.get(name).cloned() else {
            return Err(CodegenError::UndefinedSymbol {
                name: name.to_string(),
                context: "function call".to_string(),
                span: Some(span.clone()),
            });
        };

        let names: Vec<(&str, bool)> = function
            .params
            .iter()
            .map(|p| (p.name.as_str(), p.default.is_some()))
            .collect();
        let bound = bind_args(name, &names, false, args, kwargs, span)?;

        for (param, slot) in function.params.iter().zip(bound.slots) {
            let Some(expr) = slot.or(param.default.as_ref()) else { continue };
            let value = self.compile_expr(expr)?;
            if !param.ty.is_assignable_from(&value.ty) {
                return Err(CodegenError::mismatch(
                    param.ty,
                    value.ty,
                    format!("argument '{}' of {}()", param.name, name),
                    &expr.span,
                ));
            }
            if value.storage.as_ref() != Some(&param.storage) {
                self.emit(format!("{}→{}", value.code, param.storage));
            }
        }

        self.emit(format!("prgm{}", function.program));
        Ok(function.returns)
    }

    fn compile_matrix_ctor(&mut self, args: &[Expr], kwargs: &[(String, Expr)], span: &Span) -> CodegenResult<char> {
        let bound = bind_args("Matrix", &[("name", false)], false, args, kwargs, span)?;
        let label = bound.slots[0].and_then(|expr| match &expr.kind {
            ExprKind::Literal(Literal::String(s)) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if MATRIX_LABELS.contains(&c) => Some(c),
                    _ => None,
                }
            }
            _ => None,
        });

        label.ok_or_else(|| {
            CodegenError::invalid(
                "Matrix()",
                "the label must be a string literal \"A\" through \"J\"",
                span,
            )
        })
    }

    fn compile_complex_ctor(
        &mut self,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<Emitted> {
        let bound = bind_args("Complex", &[("real", true), ("imag", true)], false, args, kwargs, span)?;

        let mut parts = Vec::with_capacity(2);
        for (slot, name) in bound.slots.iter().zip(["real", "imag"]) {
            let part = match slot {
                Some(expr) => {
                    let e = self.compile_expr(expr)?;
                    if !e.ty.is_real() {
                        return Err(CodegenError::mismatch(
                            "float",
                            e.ty,
                            format!("argument '{}' of Complex()", name),
                            &expr.span,
                        ));
                    }
                    e
                }
                None => Emitted::constant(Complex::default(), CrunchType::Float),
            };
            parts.push(part);
        }

        self.uses_complex = true;
        let imag = parts.pop().unwrap_or_else(|| Emitted::constant(Complex::default(), CrunchType::Float));
        let real = parts.pop().unwrap_or_else(|| Emitted::constant(Complex::default(), CrunchType::Float));
        let unit = Emitted::constant(Complex::new(0.0, 1.0), CrunchType::Complex);

        let imag = operators::binary(BinaryOp::Mul, imag, unit, span)?;
        let value = operators::binary(BinaryOp::Add, real, imag, span)?;
        Ok(Emitted {
            ty: CrunchType::Complex,
            ..value
        })
    }

    fn compile_builtin_value(
        &mut self,
        builtin: &Builtin,
        receiver: Option<Emitted>,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<Emitted> {
        if builtin.is_statement() || matches!(builtin.emit, Emit::Input | Emit::Unsupported(_)) {
            return Err(Self::no_value(builtin, span));
        }

        let BuiltinArgs { args, rest } = self.compile_builtin_args(builtin, args, kwargs, span)?;
        if builtin.variadic.is_some() && builtin.params.is_empty() && rest.is_empty() {
            return Err(CodegenError::MissingValue {
                what: "arguments".to_string(),
                context: format!("call to {}()", builtin.name),
                span: Some(span.clone()),
            });
        }
        let ty = Self::return_type(builtin, &args);

        if let Some(value) = receiver.as_ref().and_then(|r| r.value) {
            if let Some(folded) = fold_complex_method(builtin, value) {
                return Ok(Emitted::constant(folded, ty));
            }
        }

        let emitted = match &builtin.emit {
            Emit::Call(template) => {
                let codes: Vec<String> = args.iter().map(|a| a.code.clone()).collect();
                let rest: Vec<String> = rest.iter().map(|a| a.code.clone()).collect();
                let code = builtins::render(template, &codes, &rest, receiver.as_ref().map(|r| r.code.as_str()));
                Emitted::new(code, ty, Prec::Atom)
            }
            Emit::Operator(template, prec) => {
                let codes: Vec<String> = args.iter().map(|a| a.wrapped(Prec::Atom)).collect();
                let receiver = receiver.as_ref().map(|r| r.wrapped(Prec::Atom));
                let code = builtins::render(template, &codes, &[], receiver.as_deref());
                Emitted::new(code, ty, *prec)
            }
            Emit::Binary(op) => {
                let (Some(lhs), Some(rhs)) = (receiver, args.into_iter().next()) else {
                    return Err(CodegenError::MissingValue {
                        what: "operand".to_string(),
                        context: format!("call to {}()", builtin.name),
                        span: Some(span.clone()),
                    });
                };
                let value = operators::binary(*op, lhs, rhs, span)?;
                Emitted { ty, ..value }
            }
            _ => return Err(Self::no_value(builtin, span)),
        };

        if emitted.ty.is_complex() {
            self.uses_complex = true;
        }
        Ok(emitted)
    }

    fn compile_builtin_stmt(
        &mut self,
        builtin: &Builtin,
        receiver: Option<Emitted>,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<()> {
        match &builtin.emit {
            Emit::Statement(template) => {
                let BuiltinArgs { args, rest } = self.compile_builtin_args(builtin, args, kwargs, span)?;
                let codes: Vec<String> = args.into_iter().map(|a| a.code).collect();
                let rest: Vec<String> = rest.into_iter().map(|a| a.code).collect();
                let line = builtins::render(template, &codes, &rest, receiver.as_ref().map(|r| r.code.as_str()));
                self.emit(line.trim_end().to_string());
            }
            Emit::Toggle { on, off } => {
                let BuiltinArgs { args, .. } = self.compile_builtin_args(builtin, args, kwargs, span)?;
                let flag = args.into_iter().next().ok_or_else(|| CodegenError::MissingValue {
                    what: "argument 'on_or_off'".to_string(),
                    context: format!("call to {}()", builtin.name),
                    span: Some(span.clone()),
                })?;
                match flag.value {
                    Some(v) if v.real != 0.0 => self.emit(*on),
                    Some(_) => self.emit(*off),
                    None => {
                        self.emit(format!("If {}", flag.code));
                        self.emit("Then");
                        self.emit(*on);
                        self.emit("Else");
                        self.emit(*off);
                        self.emit("End");
                    }
                }
            }
            Emit::Sort(template) => {
                let BuiltinArgs { args, .. } = self.compile_builtin_args(builtin, args, kwargs, span)?;
                match args.first() {
                    Some(list) if matches!(list.storage, Some(Storage::List(_))) => {
                        let line = builtins::render(template, &[list.code.clone()], &[], None);
                        self.emit(line);
                    }
                    _ => {
                        return Err(CodegenError::invalid(
                            format!("{}()", builtin.name),
                            "sorting in place needs a list variable",
                            span,
                        ));
                    }
                }
            }
            Emit::Return => {
                let BuiltinArgs { args, .. } = self.compile_builtin_args(builtin, args, kwargs, span)?;
                if let Some(value) = args.into_iter().next() {
                    self.emit(value.code);
                }
                self.emit("Return");
            }
            Emit::Input | Emit::Unsupported(_) => return Err(Self::no_value(builtin, span)),
            Emit::Call(_) | Emit::Operator(..) | Emit::Binary(_) => {
                let value = self.compile_builtin_value(builtin, receiver, args, kwargs, span)?;
                self.emit(value.code);
            }
        }
        Ok(())
    }
}

/// Known result of a complex method on a constant receiver. `argument()`
/// stays with the calculator since `angle(` follows its angle mode.
fn fold_complex_method(method: &Builtin, value: Complex) -> Option<Complex> {
    if method.category != Category::ComplexMethod {
        return None;
    }
    match method.name {
        "conjugate" => Some(value.conjugate()),
        "modulus" => Some(Complex::from_real(value.modulus())),
        _ => None,
    }
}
