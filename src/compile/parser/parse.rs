use chumsky::input::ValueInput;
use chumsky::prelude::*;

use crate::compile::ast::int_literal::IntLiteral;
use crate::compile::ast::parsed::{Block, Decl, Expr, FunctionDecl, Program, Stmt, VarDecl};
use crate::compile::ast::{BinaryOp, SourcePos};
use crate::compile::parser::lex::Token;

type ErrorParserExtra<'src> = extra::Err<Rich<'src, Token<'src>, SourcePos>>;

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary(op, lhs.boxed(), rhs.boxed())
}

pub fn expr_parser<'src, I>() -> impl Parser<'src, I, Expr, ErrorParserExtra<'src>> + Clone
where
    I: ValueInput<'src, Token = Token<'src>, Span = SourcePos>,
{
    let num = select! {Token::NUM {value, base} => (value, base)};
    let ident = select! {Token::IDENT(ident) => ident};

    recursive(|expr| {
        let args = expr
            .clone()
            .separated_by(just(Token::COMMA))
            .collect::<Vec<_>>()
            .delimited_by(just(Token::L_ROUND), just(Token::R_ROUND));

        let atomic_expr = choice((
            num.map_with(|(value, base), ctx| Expr::Int(IntLiteral::new(value, base), ctx.span())),
            ident
                .clone()
                .then(args)
                .map_with(|(name, args), ctx| Expr::Call(name.to_string(), args, ctx.span())),
            ident.map_with(|ident, ctx| Expr::Ident(ident.to_string(), ctx.span())),
            expr.clone()
                .delimited_by(just(Token::L_ROUND), just(Token::R_ROUND)),
        ))
        .boxed();

        let mult_op = choice((
            just(Token::STAR).to(BinaryOp::Mul),
            just(Token::SLASH).to(BinaryOp::Div),
            just(Token::PERCENT).to(BinaryOp::Mod),
        ));

        let mult = atomic_expr
            .clone()
            .foldl(mult_op.then(atomic_expr).repeated(), |a, (op, b)| {
                binary(op, a, b)
            })
            .boxed();

        let sum_op = choice((
            just(Token::PLUS).to(BinaryOp::Add),
            just(Token::MINUS).to(BinaryOp::Sub),
        ));

        let sum = mult
            .clone()
            .foldl(sum_op.then(mult).repeated(), |a, (op, b)| binary(op, a, b))
            .boxed();

        let shift_op = choice((
            just(Token::SHIFT_LEFT).to(BinaryOp::ShiftLeft),
            just(Token::SHIFT_RIGHT).to(BinaryOp::ShiftRight),
        ));

        let shift = sum
            .clone()
            .foldl(shift_op.then(sum).repeated(), |a, (op, b)| binary(op, a, b))
            .boxed();

        let relational_op = choice((
            just(Token::LESS_EQ).to(BinaryOp::LessEq),
            just(Token::LESS).to(BinaryOp::Less),
            just(Token::GREATER_EQ).to(BinaryOp::GreaterEq),
            just(Token::GREATER).to(BinaryOp::Greater),
        ));

        let relational = shift
            .clone()
            .foldl(relational_op.then(shift).repeated(), |a, (op, b)| {
                binary(op, a, b)
            })
            .boxed();

        let equality_op = choice((
            just(Token::EQ_EQ).to(BinaryOp::Eq),
            just(Token::NOT_EQ).to(BinaryOp::NotEq),
        ));

        let equality = relational
            .clone()
            .foldl(equality_op.then(relational).repeated(), |a, (op, b)| {
                binary(op, a, b)
            })
            .boxed();

        let bitwise_and = equality
            .clone()
            .foldl(
                just(Token::AMP).to(BinaryOp::BitwiseAnd).then(equality).repeated(),
                |a, (op, b)| binary(op, a, b),
            )
            .boxed();

        let bitwise_xor = bitwise_and
            .clone()
            .foldl(
                just(Token::CARET)
                    .to(BinaryOp::BitwiseXor)
                    .then(bitwise_and)
                    .repeated(),
                |a, (op, b)| binary(op, a, b),
            )
            .boxed();

        let bitwise_or = bitwise_xor
            .clone()
            .foldl(
                just(Token::PIPE)
                    .to(BinaryOp::BitwiseOr)
                    .then(bitwise_xor)
                    .repeated(),
                |a, (op, b)| binary(op, a, b),
            )
            .boxed();

        let logical_and = bitwise_or
            .clone()
            .foldl(
                just(Token::AND_AND)
                    .to(BinaryOp::LogicalAnd)
                    .then(bitwise_or)
                    .repeated(),
                |a, (op, b)| binary(op, a, b),
            )
            .boxed();

        let logical_or = logical_and
            .clone()
            .foldl(
                just(Token::OR_OR)
                    .to(BinaryOp::LogicalOr)
                    .then(logical_and)
                    .repeated(),
                |a, (op, b)| binary(op, a, b),
            )
            .boxed();

        // Right associative. Whether the target is assignable is checked
        // during validation.
        logical_or
            .then(just(Token::ASSIGN).ignore_then(expr).or_not())
            .map(|(target, value)| match value {
                Some(value) => binary(BinaryOp::Assign, target, value),
                None => target,
            })
    })
}

fn var_parser<'src, I>() -> impl Parser<'src, I, VarDecl, ErrorParserExtra<'src>> + Clone
where
    I: ValueInput<'src, Token = Token<'src>, Span = SourcePos>,
{
    let ident = select! {Token::IDENT(x) => x};

    ident
        .clone()
        .then(ident)
        .then(just(Token::ASSIGN).ignore_then(expr_parser()).or_not())
        .map_with(|((ty, name), init), ctx| VarDecl {
            ty: ty.to_string(),
            name: name.to_string(),
            init,
            span: ctx.span(),
        })
}

fn param_parser<'src, I>() -> impl Parser<'src, I, VarDecl, ErrorParserExtra<'src>> + Clone
where
    I: ValueInput<'src, Token = Token<'src>, Span = SourcePos>,
{
    let ident = select! {Token::IDENT(x) => x};

    ident.clone().then(ident).map_with(|(ty, name), ctx| VarDecl {
        ty: ty.to_string(),
        name: name.to_string(),
        init: None,
        span: ctx.span(),
    })
}

pub fn stmt_parser<'src, I>() -> impl Parser<'src, I, Stmt, ErrorParserExtra<'src>> + Clone
where
    I: ValueInput<'src, Token = Token<'src>, Span = SourcePos>,
{
    recursive(|stmt| {
        let block = block_of(stmt.clone());

        let decl = var_parser()
            .then_ignore(just(Token::SEMICOLON))
            .map(Stmt::Decl);

        let ret = just(Token::RETURN)
            .ignore_then(expr_parser().or_not())
            .then_ignore(just(Token::SEMICOLON))
            .map_with(|expr, ctx| Stmt::Return(expr, ctx.span()));

        let cond = just(Token::IF)
            .ignore_then(expr_parser().delimited_by(just(Token::L_ROUND), just(Token::R_ROUND)))
            .then(stmt.clone())
            .then(just(Token::ELSE).ignore_then(stmt).or_not())
            .map_with(|((cond, then), otherwise), ctx| {
                Stmt::If(cond, then.boxed(), otherwise.map(Stmt::boxed), ctx.span())
            });

        let empty = just(Token::SEMICOLON).map_with(|_, ctx| Stmt::Empty(ctx.span()));

        let expr = expr_parser()
            .then_ignore(just(Token::SEMICOLON))
            .map(Stmt::Expr);

        choice((decl, ret, cond, block.map(Stmt::Block), empty, expr)).boxed()
    })
}

/// `{ stmt* }` over the given statement parser.
fn block_of<'src, I, S>(stmt: S) -> impl Parser<'src, I, Block, ErrorParserExtra<'src>> + Clone
where
    I: ValueInput<'src, Token = Token<'src>, Span = SourcePos>,
    S: Parser<'src, I, Stmt, ErrorParserExtra<'src>> + Clone,
{
    stmt.repeated()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::L_CURLY), just(Token::R_CURLY))
        .map_with(|stmts, ctx| Block {
            stmts,
            span: ctx.span(),
        })
}

pub fn block_parser<'src, I>() -> impl Parser<'src, I, Block, ErrorParserExtra<'src>> + Clone
where
    I: ValueInput<'src, Token = Token<'src>, Span = SourcePos>,
{
    block_of(stmt_parser())
}

pub fn decl_parser<'src, I>() -> impl Parser<'src, I, Decl, ErrorParserExtra<'src>>
where
    I: ValueInput<'src, Token = Token<'src>, Span = SourcePos>,
{
    let ident = select! {Token::IDENT(x) => x};

    let function = ident
        .clone()
        .then(ident)
        .then(
            param_parser()
                .separated_by(just(Token::COMMA))
                .collect::<Vec<_>>()
                .delimited_by(just(Token::L_ROUND), just(Token::R_ROUND)),
        )
        .then(block_parser())
        .map_with(|(((ty, name), params), body), ctx| {
            Decl::Func(FunctionDecl {
                ty: ty.to_string(),
                name: name.to_string(),
                params,
                body,
                span: ctx.span(),
            })
        });

    let global = var_parser()
        .then_ignore(just(Token::SEMICOLON))
        .map(Decl::Var);

    function.or(global)
}

pub fn program_parser<'src, I>() -> impl Parser<'src, I, Program, ErrorParserExtra<'src>>
where
    I: ValueInput<'src, Token = Token<'src>, Span = SourcePos>,
{
    decl_parser()
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|decls| Program { decls })
}
