use crate::ast::{
    BinaryOp, Expr, ExprKind, Literal, Param, Program, Span, Stmt, StmtKind, TypeExpr, UnaryOp,
};
use chumsky::prelude::*;
use chumsky::Stream;
use lexer::token::Token;

pub fn parser() -> impl Parser<Token, Program, Error = Simple<Token>> {
    let stmt = stmt_parser();

    stmt.repeated()
        .map(|statements| Program { statements })
        .then_ignore(end())
}

/// Parse a laid-out token stream. `source_len` positions the end-of-input span.
pub fn parse_tokens(
    tokens: Vec<(Token, Span)>,
    source_len: usize,
) -> Result<Program, Vec<Simple<Token>>> {
    let eoi = source_len..source_len;
    parser().parse(Stream::from_iter(eoi, tokens.into_iter()))
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span.start..rhs.span.end;
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    )
}

#[derive(Clone)]
enum CallArg {
    Positional(Expr),
    Keyword(String, Expr),
}

#[derive(Clone)]
enum Postfix {
    Call(Vec<Expr>, Vec<(String, Expr)>),
    Index(Expr),
    Attribute(String),
}

pub(crate) fn type_parser() -> impl Parser<Token, TypeExpr, Error = Simple<Token>> + Clone {
    recursive(|ty| {
        select! {
            Token::Identifier(name) => name,
            Token::None => "None".to_string(),
        }
        .then(
            ty.separated_by(just(Token::Comma))
                .at_least(1)
                .delimited_by(just(Token::LBracket), just(Token::RBracket))
                .or_not(),
        )
        .map_with_span(|(name, args), span| TypeExpr {
            name,
            args: args.unwrap_or_default(),
            span,
        })
    })
}

fn stmt_parser() -> impl Parser<Token, Stmt, Error = Simple<Token>> {
    recursive(|stmt| {
        let ident = select! { Token::Identifier(name) => name };
        let expr = expr_parser();
        let newline = just(Token::Newline);

        // from crunch_lib import *  |  import crunch_lib
        let import_stmt = just(Token::From)
            .ignore_then(ident.clone())
            .then_ignore(just(Token::Import))
            .then(
                just(Token::Star)
                    .to("*".to_string())
                    .or(ident.clone())
                    .separated_by(just(Token::Comma))
                    .at_least(1),
            )
            .map(|(module, names)| StmtKind::Import { module, names })
            .or(just(Token::Import)
                .ignore_then(ident.clone())
                .map(|module| StmtKind::Import {
                    module,
                    names: Vec::new(),
                }));

        let pass_stmt = just(Token::Pass).to(StmtKind::Pass);

        let return_stmt = just(Token::Return)
            .ignore_then(expr.clone().or_not())
            .map(|value| StmtKind::Return { value });

        // x: int = 5  |  x: list[int]
        let decl = ident
            .clone()
            .then_ignore(just(Token::Colon))
            .then(type_parser())
            .then(just(Token::Eq).ignore_then(expr.clone()).or_not())
            .map(|((name, type_hint), value)| StmtKind::VariableDecl {
                name,
                type_hint,
                value,
            });

        let assignment = expr
            .clone()
            .then(choice((
                just(Token::Eq).to(None),
                just(Token::PlusEq).to(Some(BinaryOp::Add)),
                just(Token::MinusEq).to(Some(BinaryOp::Sub)),
                just(Token::StarEq).to(Some(BinaryOp::Mul)),
                just(Token::SlashEq).to(Some(BinaryOp::Div)),
                just(Token::PercentEq).to(Some(BinaryOp::Mod)),
            )))
            .then(expr.clone())
            .map(|((target, maybe_op), value)| match maybe_op {
                None => StmtKind::Assignment { target, value },
                Some(op) => StmtKind::Assignment {
                    target: target.clone(),
                    value: binary(op, target, value),
                },
            });

        let expr_stmt = expr.clone().map(StmtKind::Expr);

        let simple_line = choice((
            import_stmt,
            pass_stmt,
            return_stmt,
            decl,
            assignment,
            expr_stmt,
        ))
        .map_with_span(Stmt::new)
        .then_ignore(newline.clone())
        .boxed();

        // Indented suite, or a single simple statement after the colon
        let suite = newline
            .ignore_then(just(Token::Indent))
            .ignore_then(stmt.clone().repeated().at_least(1))
            .then_ignore(just(Token::Dedent));

        let block = just(Token::Colon)
            .ignore_then(suite.or(simple_line.clone().map(|s| vec![s])))
            .boxed();

        let if_stmt = just(Token::If)
            .ignore_then(expr.clone())
            .then(block.clone())
            .then(
                just(Token::Elif)
                    .map_with_span(|_, span: Span| span)
                    .then(expr.clone())
                    .then(block.clone())
                    .repeated(),
            )
            .then(just(Token::Else).ignore_then(block.clone()).or_not())
            .map_with_span(|(((condition, then_block), elifs), else_block), span: Span| {
                // elif chains nest into the else branch, innermost last
                let else_block = elifs.into_iter().rev().fold(
                    else_block,
                    |else_block, ((elif_span, condition), body)| {
                        let end = else_block
                            .as_ref()
                            .and_then(|b| b.last())
                            .or(body.last())
                            .map_or(elif_span.end, |s| s.span.end);
                        Some(vec![Stmt::new(
                            StmtKind::If {
                                condition,
                                then_block: body,
                                else_block,
                            },
                            elif_span.start..end,
                        )])
                    },
                );
                Stmt::new(
                    StmtKind::If {
                        condition,
                        then_block,
                        else_block,
                    },
                    span,
                )
            });

        let while_stmt = just(Token::While)
            .ignore_then(expr.clone())
            .then(block.clone())
            .map_with_span(|(condition, body), span| {
                Stmt::new(StmtKind::While { condition, body }, span)
            });

        let for_stmt = just(Token::For)
            .ignore_then(ident.clone())
            .then_ignore(just(Token::In))
            .then(expr.clone())
            .then(block.clone())
            .map_with_span(|((var_name, iterable), body), span| {
                Stmt::new(
                    StmtKind::For {
                        var_name,
                        iterable,
                        body,
                    },
                    span,
                )
            });

        // Parameters: (name: type, name: type = default)
        let param = ident
            .clone()
            .then(just(Token::Colon).ignore_then(type_parser()).or_not())
            .then(just(Token::Eq).ignore_then(expr.clone()).or_not())
            .map_with_span(|((name, type_hint), default), span| Param {
                name,
                type_hint,
                default,
                span,
            });

        let function_def = just(Token::Def)
            .ignore_then(ident.clone())
            .then(
                param
                    .separated_by(just(Token::Comma))
                    .allow_trailing()
                    .delimited_by(just(Token::LParen), just(Token::RParen)),
            )
            .then(just(Token::Arrow).ignore_then(type_parser()).or_not())
            .then(block)
            .map_with_span(|(((name, params), return_type), body), span| {
                Stmt::new(
                    StmtKind::FunctionDef {
                        name,
                        params,
                        return_type,
                        body,
                    },
                    span,
                )
            });

        choice((function_def, if_stmt, while_stmt, for_stmt, simple_line)).boxed()
    })
}

pub(crate) fn expr_parser() -> impl Parser<Token, Expr, Error = Simple<Token>> + Clone {
    recursive(|expr| {
        let ident = select! { Token::Identifier(name) => name };

        let literal = select! {
            Token::Int(n) => Literal::Int(n),
            Token::String(s) => Literal::String(s),
            Token::True => Literal::Bool(true),
            Token::False => Literal::Bool(false),
            Token::None => Literal::None,
        };

        let float = select! { Token::Float(s) => s }.try_map(|s, span: Span| {
            s.parse::<f64>()
                .map(Literal::Float)
                .map_err(|_| Simple::custom(span, format!("invalid float literal '{}'", s)))
        });

        let imaginary = select! { Token::Imaginary(s) => s }.try_map(|s, span: Span| {
            s.parse::<f64>()
                .map(Literal::Imaginary)
                .map_err(|_| Simple::custom(span, format!("invalid imaginary literal '{}j'", s)))
        });

        let value = literal
            .or(float)
            .or(imaginary)
            .map_with_span(|lit, span| Expr::new(ExprKind::Literal(lit), span));

        let identifier =
            ident.clone().map_with_span(|name, span| Expr::new(ExprKind::Identifier(name), span));

        let list_literal = expr
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map_with_span(|items, span| Expr::new(ExprKind::List(items), span));

        let parenthesized = expr
            .clone()
            .delimited_by(just(Token::LParen), just(Token::RParen));

        let atom = value.or(identifier).or(list_literal).or(parenthesized);

        // Call arguments: positional first, then name=value
        let call_arg = ident
            .clone()
            .then_ignore(just(Token::Eq))
            .then(expr.clone())
            .map(|(name, value)| CallArg::Keyword(name, value))
            .or(expr.clone().map(CallArg::Positional));

        let call_args = call_arg
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .try_map(|args, _span: Span| {
                let mut positional = Vec::new();
                let mut keywords = Vec::new();
                for arg in args {
                    match arg {
                        CallArg::Positional(e) if keywords.is_empty() => positional.push(e),
                        CallArg::Positional(e) => {
                            return Err(Simple::custom(
                                e.span,
                                "positional argument follows keyword argument",
                            ));
                        }
                        CallArg::Keyword(name, e) => keywords.push((name, e)),
                    }
                }
                Ok(Postfix::Call(positional, keywords))
            });

        let postfix = atom
            .then(
                call_args
                    .or(expr
                        .clone()
                        .delimited_by(just(Token::LBracket), just(Token::RBracket))
                        .map(Postfix::Index))
                    .or(just(Token::Dot).ignore_then(ident.clone()).map(Postfix::Attribute))
                    .map_with_span(|op, span: Span| (op, span))
                    .repeated(),
            )
            .foldl(|lhs, (op, span)| {
                let full = lhs.span.start..span.end;
                let kind = match op {
                    Postfix::Call(args, kwargs) => ExprKind::Call {
                        func: Box::new(lhs),
                        args,
                        kwargs,
                    },
                    Postfix::Index(index) => ExprKind::Index {
                        target: Box::new(lhs),
                        index: Box::new(index),
                    },
                    Postfix::Attribute(name) => ExprKind::Attribute {
                        target: Box::new(lhs),
                        name,
                    },
                };
                Expr::new(kind, full)
            })
            .boxed();

        // Unary binds looser than '**' on its right: -2**2 == -(2**2), 2**-1 is legal
        let unary = recursive(|unary| {
            let power = postfix
                .clone()
                .then(just(Token::Pow).ignore_then(unary).or_not())
                .map(|(base, exponent)| match exponent {
                    Some(exponent) => binary(BinaryOp::Pow, base, exponent),
                    None => base,
                });

            just(Token::Minus)
                .to(UnaryOp::Negate)
                .or(just(Token::Plus).to(UnaryOp::Plus))
                .map_with_span(|op, span: Span| (op, span))
                .repeated()
                .then(power)
                .foldr(|(op, span), expr| {
                    let full = span.start..expr.span.end;
                    Expr::new(
                        ExprKind::Unary {
                            op,
                            expr: Box::new(expr),
                        },
                        full,
                    )
                })
        })
        .boxed();

        let product = unary
            .clone()
            .then(
                choice((
                    just(Token::Star).to(BinaryOp::Mul),
                    just(Token::Slash).to(BinaryOp::Div),
                    just(Token::DoubleSlash).to(BinaryOp::FloorDiv),
                    just(Token::Percent).to(BinaryOp::Mod),
                ))
                .then(unary)
                .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary(op, lhs, rhs))
            .boxed();

        let sum = product
            .clone()
            .then(
                just(Token::Plus)
                    .to(BinaryOp::Add)
                    .or(just(Token::Minus).to(BinaryOp::Sub))
                    .then(product)
                    .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary(op, lhs, rhs))
            .boxed();

        let comparison = sum
            .clone()
            .then(
                choice((
                    just(Token::DoubleEq).to(BinaryOp::Eq),
                    just(Token::NotEq).to(BinaryOp::NotEq),
                    just(Token::Gt).to(BinaryOp::Gt),
                    just(Token::Lt).to(BinaryOp::Lt),
                    just(Token::GtEq).to(BinaryOp::GtEq),
                    just(Token::LtEq).to(BinaryOp::LtEq),
                ))
                .then(sum)
                .repeated(),
            )
            .map(|(lhs, pairs)| {
                // Chained Comparison: 1 <= n <= 10  ->  (1 <= n) and (n <= 10)
                let mut pairs = pairs.into_iter();
                let Some((first_op, first_rhs)) = pairs.next() else {
                    return lhs;
                };

                let mut final_expr = binary(first_op, lhs, first_rhs.clone());
                let mut prev_rhs = first_rhs;

                for (op, rhs) in pairs {
                    let next_comparison = binary(op, prev_rhs, rhs.clone());
                    final_expr = binary(BinaryOp::LogicalAnd, final_expr, next_comparison);
                    prev_rhs = rhs;
                }

                final_expr
            })
            .boxed();

        let negation = just(Token::Not)
            .map_with_span(|_, span: Span| span)
            .repeated()
            .then(comparison)
            .foldr(|span, expr| {
                let full = span.start..expr.span.end;
                Expr::new(
                    ExprKind::Unary {
                        op: UnaryOp::Not,
                        expr: Box::new(expr),
                    },
                    full,
                )
            })
            .boxed();

        let logic_and = negation
            .clone()
            .then(
                just(Token::And)
                    .to(BinaryOp::LogicalAnd)
                    .then(negation)
                    .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary(op, lhs, rhs))
            .boxed();

        logic_and
            .clone()
            .then(
                just(Token::Or)
                    .to(BinaryOp::LogicalOr)
                    .then(logic_and)
                    .repeated(),
            )
            .foldl(|lhs, (op, rhs)| binary(op, lhs, rhs))
            .boxed()
    })
}
