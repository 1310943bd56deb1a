// Statement compilation
//
// Python statements become program lines. Blocks close with `End`; loops use
// `For(`/`While`; assignments store with `→`.

use crate::builtins::{self, Emit};
use crate::calls::{CallCompiler, Callee};
use crate::complex::Complex;
use crate::expr::{Emitted, ExpressionCompiler};
use crate::operators;
use crate::symbols::{Storage, Symbol};
use crate::{CodegenError, CodegenResult, Compiler, CrunchType};
use parser::ast::{BinaryOp, Expr, ExprKind, Literal, Span, Stmt, StmtKind, TypeExpr};

/// Trait for statement compilation helper methods
pub trait StatementCompiler {
    /// Compile a block of statements in order
    fn compile_block(&mut self, statements: &[Stmt]) -> CodegenResult<()>;

    fn compile_stmt(&mut self, stmt: &Stmt) -> CodegenResult<()>;

    /// Compile import statement (only crunch_lib, emits nothing)
    fn compile_import_stmt(&mut self, module: &str, span: &Span) -> CodegenResult<()>;

    /// `x: T = value` / `x: T`
    fn compile_decl_stmt(
        &mut self,
        name: &str,
        type_hint: &TypeExpr,
        value: Option<&Expr>,
        span: &Span,
    ) -> CodegenResult<()>;

    /// `target = value` for names, list elements and matrix elements
    fn compile_assignment_stmt(&mut self, target: &Expr, value: &Expr, span: &Span) -> CodegenResult<()>;

    /// Compile if statement (with optional else block)
    fn compile_if_stmt(
        &mut self,
        condition: &Expr,
        then_block: &[Stmt],
        else_block: Option<&[Stmt]>,
    ) -> CodegenResult<()>;

    /// Compile while loop
    fn compile_while_stmt(&mut self, condition: &Expr, body: &[Stmt]) -> CodegenResult<()>;

    /// `for v in range(...)` and `for v in lst`
    fn compile_for_stmt(&mut self, var_name: &str, iterable: &Expr, body: &[Stmt], span: &Span) -> CodegenResult<()>;

    /// Compile return statement (value left in Ans)
    fn compile_return_stmt(&mut self, value: Option<&Expr>, span: &Span) -> CodegenResult<()>;

    /// Compile expression as statement
    fn compile_expr_stmt(&mut self, expr: &Expr) -> CodegenResult<()>;
}

impl Compiler {
    /// Symbol a name is (re)assigned through, declaring it on first use
    fn target_symbol(
        &mut self,
        name: &str,
        declared: Option<CrunchType>,
        value_ty: CrunchType,
        span: &Span,
    ) -> CodegenResult<Symbol> {
        let context = format!("assignment to '{}'", name);
        let existing = self.symbols.lookup(&self.scope(), name).cloned();

        let ty = match (declared, &existing) {
            (Some(declared), Some(existing)) if existing.ty != declared => {
                return Err(CodegenError::mismatch(existing.ty, declared, format!("redeclaration of '{}'", name), span));
            }
            (Some(declared), _) => declared,
            (None, Some(existing)) => existing.ty,
            (None, None) => value_ty,
        };

        if !ty.is_assignable_from(&value_ty) {
            return Err(CodegenError::mismatch(ty, value_ty, context, span));
        }
        match existing {
            Some(symbol) => Ok(symbol),
            None => self.declare(name, ty, span),
        }
    }

    fn store(&mut self, value: &Emitted, target: &Symbol) {
        if value.storage.as_ref() != Some(&target.storage) {
            self.emit(format!("{}→{}", value.code, target.storage));
        }
    }

    /// `name = value` with the right-hand-side forms that need a whole line
    fn assign_name(&mut self, name: &str, declared: Option<CrunchType>, value: &Expr, span: &Span) -> CodegenResult<()> {
        if let ExprKind::Call { func, args, kwargs } = &value.kind {
            if let ExprKind::Identifier(callee) = &func.kind {
                match self.callee(callee) {
                    Callee::Matrix => {
                        let label = self.compile_matrix_ctor(args, kwargs, &value.span)?;
                        if let Some(ty) = declared.filter(|t| *t != CrunchType::Matrix) {
                            return Err(CodegenError::mismatch(ty, CrunchType::Matrix, format!("assignment to '{}'", name), span));
                        }
                        if let Some(existing) = self.symbols.lookup(&self.scope(), name) {
                            if existing.ty != CrunchType::Matrix {
                                return Err(CodegenError::mismatch(existing.ty, CrunchType::Matrix, format!("assignment to '{}'", name), span));
                            }
                        }
                        let scope = self.scope();
                        self.symbols.bind_matrix(&scope, name, label);
                        return Ok(());
                    }
                    Callee::User => {
                        let returns = self.compile_user_call(callee, args, kwargs, &value.span)?;
                        let ty = returns.filter(|t| *t != CrunchType::None).ok_or_else(|| CodegenError::MissingValue {
                            what: "return type annotation".to_string(),
                            context: format!("{}() used as a value", callee),
                            span: Some(value.span.clone()),
                        })?;
                        let target = self.target_symbol(name, declared, ty, span)?;
                        self.emit(format!("Ans→{}", target.storage));
                        return Ok(());
                    }
                    Callee::Builtin(builtin) if builtin.emit == Emit::Input => {
                        return self.assign_input(name, declared, builtin, args, kwargs, &value.span);
                    }
                    Callee::Builtin(builtin) => {
                        if let Emit::Sort(template) = builtin.emit {
                            return self.assign_sorted(name, declared, builtin, template, args, &value.span, span);
                        }
                    }
                    _ => {}
                }
            }
        }

        if let ExprKind::List(items) = &value.kind {
            if items.is_empty() {
                let ty = declared
                    .or_else(|| self.symbols.lookup(&self.scope(), name).map(|s| s.ty))
                    .filter(|t| t.is_list())
                    .ok_or_else(|| CodegenError::MissingValue {
                        what: "list type annotation".to_string(),
                        context: format!("empty list assigned to '{}'", name),
                        span: Some(span.clone()),
                    })?;
                let target = self.target_symbol(name, Some(ty), ty, span)?;
                self.emit(format!("0→dim({})", target.storage));
                return Ok(());
            }
        }

        let emitted = self.compile_expr(value)?;
        if emitted.ty == CrunchType::None {
            return Err(CodegenError::invalid(name, "the right-hand side has no value", &value.span));
        }
        let target = self.target_symbol(name, declared, emitted.ty, span)?;
        self.store(&emitted, &target);
        Ok(())
    }

    /// `y = sort_up(x)`: copy into `y`, then sort `y` in place
    #[allow(clippy::too_many_arguments)]
    fn assign_sorted(
        &mut self,
        name: &str,
        declared: Option<CrunchType>,
        builtin: &builtins::Builtin,
        template: &str,
        args: &[Expr],
        call_span: &Span,
        span: &Span,
    ) -> CodegenResult<()> {
        let [list] = args else {
            return Err(CodegenError::invalid(
                format!("{}()", builtin.name),
                "takes exactly one list",
                call_span,
            ));
        };
        let source = self.compile_expr(list)?;
        if !source.ty.is_list() {
            return Err(CodegenError::mismatch(
                "list",
                source.ty,
                format!("argument 'lst' of {}()", builtin.name),
                &list.span,
            ));
        }
        let target = self.target_symbol(name, declared, source.ty, span)?;
        self.store(&source, &target);
        self.emit(builtins::render(template, &[target.storage.to_string()], &[], None));
        Ok(())
    }

    /// `x = input_int("MSG")` -> `Input "MSG",X`
    fn assign_input(
        &mut self,
        name: &str,
        declared: Option<CrunchType>,
        builtin: &builtins::Builtin,
        args: &[Expr],
        kwargs: &[(String, Expr)],
        span: &Span,
    ) -> CodegenResult<()> {
        let bound = crate::helpers::bind_args(builtin.name, &[("msg", true)], false, args, kwargs, span)?;
        let prompt = match bound.slots[0] {
            Some(expr) => {
                let msg = self.compile_expr(expr)?;
                if msg.ty != CrunchType::Str {
                    return Err(CodegenError::mismatch("str", msg.ty, format!("argument 'msg' of {}()", builtin.name), &expr.span));
                }
                Some(msg.code).filter(|code| code != "\"\"")
            }
            None => None,
        };

        let ty = match builtin.returns {
            builtins::Returns::Fixed(ty) => ty,
            builtins::Returns::SameAs(_) => CrunchType::Float,
        };
        let target = self.target_symbol(name, declared, ty, span)?;
        match prompt {
            Some(prompt) => self.emit(format!("Input {},{}", prompt, target.storage)),
            None => self.emit(format!("Input {}", target.storage)),
        }
        Ok(())
    }

    fn compile_condition(&mut self, condition: &Expr) -> CodegenResult<String> {
        let cond = self.compile_expr(condition)?;
        if !cond.ty.is_real() {
            return Err(CodegenError::mismatch("bool", cond.ty, "condition", &condition.span));
        }
        Ok(cond.code)
    }

    fn compile_range_loop(&mut self, var_name: &str, args: &[Expr], kwargs: &[(String, Expr)], body: &[Stmt], span: &Span) -> CodegenResult<()> {
        if let Some((_, value)) = kwargs.first() {
            return Err(CodegenError::invalid("range()", "takes no keyword arguments", &value.span));
        }
        if args.is_empty() || args.len() > 3 {
            return Err(CodegenError::invalid("range()", format!("takes 1 to 3 arguments, got {}", args.len()), span));
        }

        let mut bounds = Vec::with_capacity(3);
        for arg in args {
            let e = self.compile_expr(arg)?;
            if !CrunchType::Int.is_assignable_from(&e.ty) {
                return Err(CodegenError::mismatch("int", e.ty, "range()", &arg.span));
            }
            bounds.push(e);
        }

        let zero = || Emitted::constant(Complex::default(), CrunchType::Int);
        let one = || Emitted::constant(Complex::from_real(1.0), CrunchType::Int);
        let (start, end, step) = match bounds.len() {
            1 => (zero(), bounds.remove(0), one()),
            2 => {
                let end = bounds.remove(1);
                (bounds.remove(0), end, one())
            }
            _ => {
                let step = bounds.remove(2);
                let end = bounds.remove(1);
                (bounds.remove(0), end, step)
            }
        };

        let step_value = step.int_value().ok_or_else(|| {
            CodegenError::invalid("range()", "the step must be a constant integer", &args[args.len() - 1].span)
        })?;
        if step_value == 0 {
            return Err(CodegenError::invalid("range()", "the step must not be zero", span));
        }

        // Python's end is exclusive, For('s is inclusive
        let adjust = if step_value < 0 { BinaryOp::Add } else { BinaryOp::Sub };
        let last = operators::binary(adjust, end, one(), span)?;

        let var = self.target_symbol(var_name, None, CrunchType::Int, span)?;
        if !matches!(var.storage, Storage::Real(_)) {
            return Err(CodegenError::mismatch(var.ty, CrunchType::Int, "for loop variable", span));
        }

        if step_value == 1 {
            self.emit(format!("For({},{},{})", var.storage, start.code, last.code));
        } else {
            self.emit(format!("For({},{},{},{})", var.storage, start.code, last.code, step.code));
        }
        self.compile_block(body)?;
        self.emit("End");
        Ok(())
    }
}

impl StatementCompiler for Compiler {
    fn compile_block(&mut self, statements: &[Stmt]) -> CodegenResult<()> {
        for stmt in statements {
            self.compile_stmt(stmt)?;
        }
        Ok(())
    }

    fn compile_stmt(&mut self, stmt: &Stmt) -> CodegenResult<()> {
        match &stmt.kind {
            StmtKind::Import { module, .. } => self.compile_import_stmt(module, &stmt.span),
            StmtKind::FunctionDef { name, .. } => Err(CodegenError::invalid(
                format!("def {}", name),
                "functions can only be defined at the top level of a file",
                &stmt.span,
            )),
            StmtKind::VariableDecl { name, type_hint, value } => {
                self.compile_decl_stmt(name, type_hint, value.as_ref(), &stmt.span)
            }
            StmtKind::Assignment { target, value } => self.compile_assignment_stmt(target, value, &stmt.span),
            StmtKind::If { condition, then_block, else_block } => {
                self.compile_if_stmt(condition, then_block, else_block.as_deref())
            }
            StmtKind::While { condition, body } => self.compile_while_stmt(condition, body),
            StmtKind::For { var_name, iterable, body } => self.compile_for_stmt(var_name, iterable, body, &stmt.span),
            StmtKind::Return { value } => self.compile_return_stmt(value.as_ref(), &stmt.span),
            StmtKind::Pass => Ok(()),
            StmtKind::Expr(expr) => self.compile_expr_stmt(expr),
        }
    }

    fn compile_import_stmt(&mut self, module: &str, span: &Span) -> CodegenResult<()> {
        if module != "crunch_lib" {
            return Err(CodegenError::invalid(
                format!("import {}", module),
                "only crunch_lib can be imported",
                span,
            ));
        }
        Ok(())
    }

    fn compile_decl_stmt(
        &mut self,
        name: &str,
        type_hint: &TypeExpr,
        value: Option<&Expr>,
        span: &Span,
    ) -> CodegenResult<()> {
        let ty = CrunchType::from_annotation(type_hint).ok_or_else(|| CodegenError::UndefinedSymbol {
            name: type_hint.name.clone(),
            context: format!("type annotation of '{}'", name),
            span: Some(type_hint.span.clone()),
        })?;

        match value {
            Some(value) => self.assign_name(name, Some(ty), value, span),
            None => self.target_symbol(name, Some(ty), ty, span).map(|_| ()),
        }
    }

    fn compile_assignment_stmt(&mut self, target: &Expr, value: &Expr, span: &Span) -> CodegenResult<()> {
        match &target.kind {
            ExprKind::Identifier(name) => self.assign_name(name, None, value, span),

            ExprKind::Index { target: list, index } => {
                if let Some(element) = self.compile_matrix_element(list, index)? {
                    let v = self.compile_expr(value)?;
                    if !v.ty.is_real() {
                        return Err(CodegenError::mismatch("float", v.ty, "matrix element assignment", &value.span));
                    }
                    self.emit(format!("{}→{}", v.code, element));
                    return Ok(());
                }

                let symbol = self.symbol_of(list);
                let Some(Symbol { storage: storage @ Storage::List(_), ty }) = symbol else {
                    return Err(CodegenError::invalid(
                        "index assignment",
                        "only elements of list variables can be assigned",
                        &list.span,
                    ));
                };
                let elem = ty.element().unwrap_or(CrunchType::Float);
                let v = self.compile_expr(value)?;
                if !elem.is_assignable_from(&v.ty) {
                    return Err(CodegenError::mismatch(elem, v.ty, "list element assignment", &value.span));
                }
                let list_code = storage.to_string();
                let position = self.compile_position(index, &list_code)?;
                self.emit(format!("{}→{}({})", v.code, list_code, position));
                Ok(())
            }

            ExprKind::Attribute { name, .. } => Err(CodegenError::invalid(
                format!(".{} =", name),
                "attributes are read-only",
                &target.span,
            )),

            _ => Err(CodegenError::invalid(
                "assignment",
                "can only assign to a name, a list element or a matrix element",
                &target.span,
            )),
        }
    }

    fn compile_if_stmt(
        &mut self,
        condition: &Expr,
        then_block: &[Stmt],
        else_block: Option<&[Stmt]>,
    ) -> CodegenResult<()> {
        let cond = self.compile_condition(condition)?;
        self.emit(format!("If {}", cond));
        self.emit("Then");
        self.compile_block(then_block)?;
        if let Some(else_block) = else_block {
            self.emit("Else");
            self.compile_block(else_block)?;
        }
        self.emit("End");
        Ok(())
    }

    fn compile_while_stmt(&mut self, condition: &Expr, body: &[Stmt]) -> CodegenResult<()> {
        let cond = self.compile_condition(condition)?;
        self.emit(format!("While {}", cond));
        self.compile_block(body)?;
        self.emit("End");
        Ok(())
    }

    fn compile_for_stmt(&mut self, var_name: &str, iterable: &Expr, body: &[Stmt], span: &Span) -> CodegenResult<()> {
        if let ExprKind::Call { func, args, kwargs } = &iterable.kind {
            if let ExprKind::Identifier(name) = &func.kind {
                if matches!(self.callee(name), Callee::Range) {
                    return self.compile_range_loop(var_name, args, kwargs, body, span);
                }
            }
        }

        let source = self.compile_expr(iterable)?;
        let Some(elem) = source.ty.element() else {
            return Err(CodegenError::mismatch("range(...) or a list", source.ty, "for loop", &iterable.span));
        };

        let list = match &source.storage {
            Some(storage @ Storage::List(_)) => storage.clone(),
            _ => {
                let temp = self.symbols.temp_list(&iterable.span)?;
                self.emit(format!("{}→{}", source.code, temp));
                temp
            }
        };
        let index = self.symbols.temp_real(span)?;
        let var = self.target_symbol(var_name, None, elem, span)?;

        self.emit(format!("For({},1,dim({}))", index, list));
        self.emit(format!("{}({})→{}", list, index, var.storage));
        self.compile_block(body)?;
        self.emit("End");
        Ok(())
    }

    fn compile_return_stmt(&mut self, value: Option<&Expr>, span: &Span) -> CodegenResult<()> {
        let Some(function) = self.current_function.as_ref().and_then(|f| self.functions.get(f)) else {
            return Err(CodegenError::invalid("return", "return outside of a function", span));
        };
        let returns = function.returns.filter(|t| *t != CrunchType::None);
        let name = function.name.clone();

        match (value, returns) {
            (Some(value), Some(ty)) => {
                let e = self.compile_expr(value)?;
                if !ty.is_assignable_from(&e.ty) {
                    return Err(CodegenError::mismatch(ty, e.ty, format!("return value of {}()", name), &value.span));
                }
                self.emit(e.code);
            }
            (Some(value), None) => {
                return Err(CodegenError::MissingValue {
                    what: "return type annotation".to_string(),
                    context: format!("function '{}' returning a value", name),
                    span: Some(value.span.clone()),
                });
            }
            (None, Some(ty)) => {
                return Err(CodegenError::MissingValue {
                    what: format!("return value of type {}", ty),
                    context: format!("function '{}'", name),
                    span: Some(span.clone()),
                });
            }
            (None, None) => {}
        }
        self.emit("Return");
        Ok(())
    }

    fn compile_expr_stmt(&mut self, expr: &Expr) -> CodegenResult<()> {
        match &expr.kind {
            // Bare strings are documentation
            ExprKind::Literal(Literal::String(_)) => Ok(()),
            ExprKind::Call { func, args, kwargs } => self.compile_call_stmt(func, args, kwargs, &expr.span),
            _ => {
                let value = self.compile_expr(expr)?;
                self.emit(value.code);
                Ok(())
            }
        }
    }
}
