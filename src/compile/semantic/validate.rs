//! Turns the parse tree into the typed AST.
//!
//! Errors are recovered only at top-level declarations: a failing declaration
//! is reported through the [`DiagnosticSink`], left out of the AST, and
//! validation moves on to the next one. Inside a declaration the first error
//! aborts the whole declaration.

use std::rc::Rc;

use crate::{
    compile::{
        ast::{BinaryOp, SourcePos, parsed, typed},
        semantic::{
            ArgumentMismatch, Diagnostic, DiagnosticSink, FatalError, SemanticError,
            controlflow,
            symbols::{Function, Symbol, SymbolTable, Variable},
            typecheck,
        },
        types::{BOOL_TYPE, LITERAL_TYPE, TypeRef, TypeRegistry, VOID_TYPE},
    },
    datstructures::scope_stack::{ScopeError, ScopeStack},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Require a return on every path of a non-void function.
    pub strict_returns: bool,
}

/// Outcome of validating one compilation unit.
#[derive(Debug)]
pub struct Validation {
    pub ast: typed::Program,
    pub symbols: SymbolTable,
    /// Set when at least one declaration was rejected.
    pub had_error: bool,
}

impl Validation {
    pub fn into_parts(self) -> (typed::Program, SymbolTable, bool) {
        (self.ast, self.symbols, self.had_error)
    }
}

enum Failure {
    Diagnostic(Diagnostic),
    Fatal(FatalError),
}

impl From<Diagnostic> for Failure {
    fn from(value: Diagnostic) -> Self {
        Failure::Diagnostic(value)
    }
}

impl From<FatalError> for Failure {
    fn from(value: FatalError) -> Self {
        Failure::Fatal(value)
    }
}

type Validated<T> = Result<T, Failure>;

/// State threaded through the statements of one function body.
struct ReturnContext {
    function: String,
    ty: TypeRef,
    /// Set by any `return`, whichever branch it sits in.
    returns: bool,
}

#[tracing::instrument(level = "debug", skip_all, fields(decls = program.decls.len()))]
pub fn validate<S: DiagnosticSink>(
    program: &parsed::Program,
    types: &TypeRegistry,
    sink: &mut S,
    options: ValidatorOptions,
) -> Result<Validation, FatalError> {
    let mut validator = Validator {
        types,
        scopes: ScopeStack::new(),
        options,
    };

    let mut decls = Vec::new();
    let mut had_error = false;

    for decl in program.decls.iter() {
        match validator.decl(decl) {
            Ok(decl) => {
                push(&mut decls, decl)?;
            }
            Err(Failure::Diagnostic(diagnostic)) => {
                tracing::debug!(error = %diagnostic, "declaration discarded");
                sink.emit(diagnostic);
                had_error = true;
            }
            Err(Failure::Fatal(err)) => return Err(err),
        }
    }

    Ok(Validation {
        ast: typed::Program { decls },
        symbols: validator.scopes.into_root(),
        had_error,
    })
}

fn push<T>(list: &mut Vec<T>, item: T) -> Result<(), FatalError> {
    list.try_reserve(1)
        .map_err(|_| FatalError::AllocationFailure)?;
    list.push(item);

    Ok(())
}

struct Validator<'a> {
    types: &'a TypeRegistry,
    scopes: ScopeStack<String, Symbol>,
    options: ValidatorOptions,
}

impl Validator<'_> {
    fn decl(&mut self, decl: &parsed::Decl) -> Validated<typed::Decl> {
        match decl {
            parsed::Decl::Var(var) => {
                tracing::debug!(name = %var.name, "validating variable");
                Ok(typed::Decl::Var(self.var_decl(var)?))
            }
            parsed::Decl::Func(func) => {
                tracing::debug!(name = %func.name, "validating function");
                Ok(typed::Decl::Func(self.func_decl(func)?))
            }
        }
    }

    fn var_decl(&mut self, decl: &parsed::VarDecl) -> Validated<typed::VarDecl> {
        let ty = self.lookup_type(&decl.ty, &decl.span)?;

        if ty.is_void() {
            return Err(SemanticError::VoidVariable {
                name: decl.name.clone(),
            }
            .at(decl.span.clone())
            .into());
        }

        let init = match &decl.init {
            Some(expr) => {
                let init = self.expr(expr)?;
                typecheck::compatible(&ty, init.ty()).map_err(|err| err.at(expr.span()))?;
                Some(init)
            }
            None => None,
        };

        let var = Variable {
            name: decl.name.clone(),
            ty,
            scope: self.scopes.current_id(),
        };

        let depth = self.scopes.depth() - 1;
        self.declare(depth, Symbol::Variable(var.clone()), &decl.span)?;

        Ok(typed::VarDecl { var, init })
    }

    fn func_decl(&mut self, decl: &parsed::FunctionDecl) -> Validated<typed::FunctionDecl> {
        let return_type = self.lookup_type(&decl.ty, &decl.span)?;
        let enclosing = self.scopes.depth() - 1;

        self.scoped(|this| {
            let mut params = Vec::new();
            for param in decl.params.iter() {
                push(&mut params, this.var_decl(param)?)?;
            }

            let func = Function {
                name: decl.name.clone(),
                return_type: Rc::clone(&return_type),
                params: params.iter().map(|param| param.var.clone()).collect(),
            };

            // Visible to its own body, withdrawn again if the body fails.
            this.declare(enclosing, Symbol::Function(func.clone()), &decl.span)?;

            let body = this.function_body(decl, &return_type);
            if body.is_err() {
                this.scopes.remove_at(enclosing, decl.name.as_str());
            }

            Ok(typed::FunctionDecl {
                func,
                params,
                body: body?,
            })
        })
    }

    fn function_body(
        &mut self,
        decl: &parsed::FunctionDecl,
        return_type: &TypeRef,
    ) -> Validated<typed::Block> {
        let mut ctx = ReturnContext {
            function: decl.name.clone(),
            ty: Rc::clone(return_type),
            returns: false,
        };

        let body = self.block(&decl.body, &mut ctx)?;

        if !return_type.is_void() {
            if self.options.strict_returns && !controlflow::block_returns(&body) {
                return Err(SemanticError::MissingReturn {
                    function: decl.name.clone(),
                }
                .at(decl.span.clone())
                .into());
            }

            if !ctx.returns {
                tracing::debug!(name = %decl.name, "non-void function never returns");
            }
        }

        Ok(body)
    }

    fn block(
        &mut self,
        block: &parsed::Block,
        ctx: &mut ReturnContext,
    ) -> Validated<typed::Block> {
        self.scoped(|this| {
            let mut stmts = Vec::new();
            for stmt in block.stmts.iter() {
                push(&mut stmts, this.stmt(stmt, ctx)?)?;
            }

            Ok(typed::Block { stmts })
        })
    }

    fn stmt(&mut self, stmt: &parsed::Stmt, ctx: &mut ReturnContext) -> Validated<typed::Stmt> {
        match stmt {
            parsed::Stmt::Decl(decl) => Ok(typed::Stmt::Decl(self.var_decl(decl)?)),
            parsed::Stmt::Expr(expr) => Ok(typed::Stmt::Expr(self.expr(expr)?)),
            parsed::Stmt::Block(block) => Ok(typed::Stmt::Block(self.block(block, ctx)?)),
            parsed::Stmt::Return(expr, span) => self.return_stmt(expr.as_ref(), span, ctx),
            parsed::Stmt::If(cond, then, otherwise, _) => {
                let bool_ty = self.lookup_type(BOOL_TYPE, &cond.span())?;
                let cond_span = cond.span();
                let cond = self.expr(cond)?;
                typecheck::compatible(&bool_ty, cond.ty()).map_err(|err| err.at(cond_span))?;

                let then = self.scoped(|this| this.stmt(then, ctx))?;
                let otherwise = match otherwise {
                    Some(otherwise) => Some(self.scoped(|this| this.stmt(otherwise, ctx))?.boxed()),
                    None => None,
                };

                Ok(typed::Stmt::If(cond, then.boxed(), otherwise))
            }
            parsed::Stmt::Empty(_) => Ok(typed::Stmt::Empty),
        }
    }

    fn return_stmt(
        &mut self,
        expr: Option<&parsed::Expr>,
        span: &SourcePos,
        ctx: &mut ReturnContext,
    ) -> Validated<typed::Stmt> {
        let expr = match expr {
            Some(expr) => Some(self.expr(expr)?),
            None => None,
        };

        if !ctx.ty.is_void() {
            let got = match &expr {
                Some(expr) => Rc::clone(expr.ty()),
                None => self.lookup_type(VOID_TYPE, span)?,
            };

            typecheck::compatible(&ctx.ty, &got).map_err(|err| err.at(span.clone()))?;
        } else if expr.is_some() {
            return Err(SemanticError::ReturnFromVoid {
                function: ctx.function.clone(),
            }
            .at(span.clone())
            .into());
        }

        ctx.returns = true;

        Ok(typed::Stmt::Return(expr))
    }

    fn expr(&mut self, expr: &parsed::Expr) -> Validated<typed::Expr> {
        match expr {
            parsed::Expr::Int(literal, span) => {
                let value = literal.parse().map_err(|err| err.at(span.clone()))?;
                let ty = self.lookup_type(LITERAL_TYPE, span)?;

                Ok(typed::Expr::Int(value, ty))
            }
            parsed::Expr::Ident(name, span) => match self.scopes.lookup(name.as_str()) {
                Some(Symbol::Variable(var)) => Ok(typed::Expr::Ident(var.clone())),
                _ => Err(SemanticError::UnknownIdentifier { name: name.clone() }
                    .at(span.clone())
                    .into()),
            },
            parsed::Expr::Binary(BinaryOp::Assign, target, value) => {
                let parsed::Expr::Ident(_, _) = target.as_ref() else {
                    return Err(SemanticError::InvalidAssignment.at(target.span()).into());
                };

                let target = self.expr(target)?;
                let value_span = value.span();
                let value = self.expr(value)?;
                typecheck::compatible(target.ty(), value.ty())
                    .map_err(|err| err.at(value_span))?;

                let ty = Rc::clone(target.ty());
                Ok(typed::Expr::Binary(
                    BinaryOp::Assign,
                    target.boxed(),
                    value.boxed(),
                    ty,
                ))
            }
            parsed::Expr::Binary(op, lhs, rhs) => {
                let span = expr.span();
                let lhs = self.expr(lhs)?;
                let rhs = self.expr(rhs)?;
                let bool_ty = self.lookup_type(BOOL_TYPE, &span)?;

                let ty = typecheck::binary(*op, lhs.ty(), rhs.ty(), &bool_ty)
                    .map_err(|err| err.at(span))?;

                Ok(typed::Expr::Binary(*op, lhs.boxed(), rhs.boxed(), ty))
            }
            parsed::Expr::Call(name, args, span) => self.call(name, args, span),
        }
    }

    fn call(
        &mut self,
        name: &str,
        args: &[parsed::Expr],
        span: &SourcePos,
    ) -> Validated<typed::Expr> {
        let func = match self.scopes.lookup(name) {
            Some(Symbol::Function(func)) => func.clone(),
            _ => {
                return Err(SemanticError::UnknownFunction {
                    name: name.to_string(),
                }
                .at(span.clone())
                .into());
            }
        };

        let mut typed_args = Vec::new();
        for arg in args.iter() {
            push(&mut typed_args, self.expr(arg)?)?;
        }

        if typed_args.len() != func.params.len() {
            return Err(SemanticError::ArgumentMismatch {
                callee: func.name.clone(),
                mismatch: ArgumentMismatch::Arity {
                    expected: func.params.len(),
                    got: typed_args.len(),
                },
            }
            .at(span.clone())
            .into());
        }

        for (index, ((param, arg), source)) in func
            .params
            .iter()
            .zip(typed_args.iter())
            .zip(args.iter())
            .enumerate()
        {
            if typecheck::compatible(&param.ty, arg.ty()).is_err() {
                return Err(SemanticError::ArgumentMismatch {
                    callee: func.name.clone(),
                    mismatch: ArgumentMismatch::Type {
                        index,
                        expected: Rc::clone(&param.ty),
                        got: Rc::clone(arg.ty()),
                    },
                }
                .at(source.span())
                .into());
            }
        }

        Ok(typed::Expr::Call(func, typed_args))
    }

    /// Runs `f` inside a fresh child scope, which is discarded afterwards
    /// whether `f` succeeded or not.
    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> Validated<T>) -> Validated<T> {
        let id = self.scopes.push();
        tracing::trace!(scope = id.0, "enter scope");

        let result = f(self);

        self.scopes.pop();
        tracing::trace!(scope = id.0, "leave scope");

        result
    }

    fn lookup_type(&self, name: &str, span: &SourcePos) -> Validated<TypeRef> {
        self.types
            .lookup(name)
            .map_err(|err| SemanticError::from(err).at(span.clone()).into())
    }

    fn declare(&mut self, depth: usize, symbol: Symbol, span: &SourcePos) -> Validated<()> {
        let name = symbol.name().to_string();

        match self.scopes.declare_at(depth, name.clone(), symbol) {
            Ok(_) => Ok(()),
            Err(ScopeError::AlreadyDeclared) => {
                Err(SemanticError::DuplicateSymbol { name }.at(span.clone()).into())
            }
            Err(ScopeError::StackNotDeepEnough) => {
                unreachable!("declarations only target scopes that are open")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::ast::int_literal::IntLiteral;

    fn span() -> SourcePos {
        0..0
    }

    fn int(value: u32) -> parsed::Expr {
        parsed::Expr::Int(IntLiteral::decimal(value), span())
    }

    fn ident(name: &str) -> parsed::Expr {
        parsed::Expr::Ident(name.to_string(), span())
    }

    fn var(ty: &str, name: &str, init: Option<parsed::Expr>) -> parsed::VarDecl {
        parsed::VarDecl {
            ty: ty.to_string(),
            name: name.to_string(),
            init,
            span: span(),
        }
    }

    fn func(
        ty: &str,
        name: &str,
        params: Vec<parsed::VarDecl>,
        stmts: Vec<parsed::Stmt>,
    ) -> parsed::Decl {
        parsed::Decl::Func(parsed::FunctionDecl {
            ty: ty.to_string(),
            name: name.to_string(),
            params,
            body: parsed::Block {
                stmts,
                span: span(),
            },
            span: span(),
        })
    }

    fn ret(expr: Option<parsed::Expr>) -> parsed::Stmt {
        parsed::Stmt::Return(expr, span())
    }

    fn run(decls: Vec<parsed::Decl>) -> (Validation, Vec<Diagnostic>) {
        run_with(decls, ValidatorOptions::default())
    }

    fn run_with(
        decls: Vec<parsed::Decl>,
        options: ValidatorOptions,
    ) -> (Validation, Vec<Diagnostic>) {
        let types = TypeRegistry::with_builtins();
        let mut diagnostics = Vec::new();
        let validation = validate(
            &parsed::Program { decls },
            &types,
            &mut diagnostics,
            options,
        )
        .unwrap();

        (validation, diagnostics)
    }

    fn errors(diagnostics: &[Diagnostic]) -> Vec<&SemanticError> {
        diagnostics.iter().map(|d| &d.error).collect()
    }

    #[test]
    fn minimal_program_validates() {
        let (validation, diagnostics) =
            run(vec![func("int", "main", vec![], vec![ret(Some(int(0)))])]);

        assert!(!validation.had_error);
        assert!(diagnostics.is_empty());
        assert_eq!(validation.ast.decls.len(), 1);
        assert!(matches!(
            validation.symbols.get("main"),
            Some(Symbol::Function(_))
        ));
    }

    #[test]
    fn unknown_type_is_reported() {
        let (validation, diagnostics) = run(vec![parsed::Decl::Var(var("string", "s", None))]);

        assert!(validation.had_error);
        assert_eq!(
            errors(&diagnostics),
            vec![&SemanticError::UnknownType {
                name: "string".to_string()
            }]
        );
    }

    #[test]
    fn duplicate_in_same_scope_fails() {
        let (validation, diagnostics) = run(vec![
            parsed::Decl::Var(var("int", "x", None)),
            parsed::Decl::Var(var("long", "x", None)),
        ]);

        assert!(validation.had_error);
        assert_eq!(validation.ast.decls.len(), 1);
        assert_eq!(
            errors(&diagnostics),
            vec![&SemanticError::DuplicateSymbol {
                name: "x".to_string()
            }]
        );
    }

    #[test]
    fn shadowing_in_nested_scope_succeeds() {
        let (validation, diagnostics) = run(vec![
            parsed::Decl::Var(var("int", "x", None)),
            func(
                "int",
                "main",
                vec![],
                vec![
                    parsed::Stmt::Decl(var("double", "x", None)),
                    ret(Some(int(0))),
                ],
            ),
        ]);

        assert!(!validation.had_error, "{diagnostics:?}");
    }

    #[test]
    fn undeclared_identifier_fails() {
        let (validation, diagnostics) = run(vec![func(
            "int",
            "main",
            vec![],
            vec![ret(Some(ident("y"))), parsed::Stmt::Decl(var("int", "y", None))],
        )]);

        assert!(validation.had_error);
        assert_eq!(
            errors(&diagnostics),
            vec![&SemanticError::UnknownIdentifier {
                name: "y".to_string()
            }]
        );
    }

    #[test]
    fn locals_do_not_leak_out_of_blocks() {
        let (validation, diagnostics) = run(vec![func(
            "int",
            "main",
            vec![],
            vec![
                parsed::Stmt::Block(parsed::Block {
                    stmts: vec![parsed::Stmt::Decl(var("int", "inner", None))],
                    span: span(),
                }),
                ret(Some(ident("inner"))),
            ],
        )]);

        assert!(validation.had_error);
        assert!(matches!(
            errors(&diagnostics)[..],
            [SemanticError::UnknownIdentifier { .. }]
        ));
    }

    #[test]
    fn call_arity_is_checked() {
        let add = func(
            "int",
            "add",
            vec![var("int", "a", None), var("int", "b", None)],
            vec![ret(Some(parsed::Expr::Binary(
                BinaryOp::Add,
                ident("a").boxed(),
                ident("b").boxed(),
            )))],
        );

        let call = |args: Vec<parsed::Expr>| {
            func(
                "int",
                "main",
                vec![],
                vec![ret(Some(parsed::Expr::Call("add".to_string(), args, span())))],
            )
        };

        let (validation, _) = run(vec![add.clone(), call(vec![int(1), int(2)])]);
        assert!(!validation.had_error);

        for args in [vec![int(1)], vec![int(1), int(2), int(3)]] {
            let (validation, diagnostics) = run(vec![add.clone(), call(args)]);

            assert!(validation.had_error);
            assert!(matches!(
                errors(&diagnostics)[..],
                [SemanticError::ArgumentMismatch {
                    mismatch: ArgumentMismatch::Arity { expected: 2, .. },
                    ..
                }]
            ));
        }
    }

    #[test]
    fn call_argument_types_are_checked() {
        let (validation, diagnostics) = run(vec![
            parsed::Decl::Var(var("double", "d", None)),
            func("int", "id", vec![var("int", "a", None)], vec![ret(Some(ident("a")))]),
            func(
                "int",
                "main",
                vec![],
                vec![ret(Some(parsed::Expr::Call(
                    "id".to_string(),
                    vec![ident("d")],
                    span(),
                )))],
            ),
        ]);

        assert!(validation.had_error);
        assert!(matches!(
            errors(&diagnostics)[..],
            [SemanticError::ArgumentMismatch {
                mismatch: ArgumentMismatch::Type { index: 0, .. },
                ..
            }]
        ));
    }

    #[test]
    fn unknown_function_fails() {
        let (validation, diagnostics) = run(vec![func(
            "int",
            "main",
            vec![],
            vec![ret(Some(parsed::Expr::Call("nope".to_string(), vec![], span())))],
        )]);

        assert!(validation.had_error);
        assert!(matches!(
            errors(&diagnostics)[..],
            [SemanticError::UnknownFunction { .. }]
        ));
    }

    #[test]
    fn recursion_sees_the_function() {
        let (validation, diagnostics) = run(vec![func(
            "int",
            "f",
            vec![var("int", "n", None)],
            vec![ret(Some(parsed::Expr::Call(
                "f".to_string(),
                vec![ident("n")],
                span(),
            )))],
        )]);

        assert!(!validation.had_error, "{diagnostics:?}");
    }

    #[test]
    fn returning_value_from_void_fails() {
        let (validation, diagnostics) = run(vec![func("void", "f", vec![], vec![ret(Some(int(1)))])]);

        assert!(validation.had_error);
        assert_eq!(
            errors(&diagnostics),
            vec![&SemanticError::ReturnFromVoid {
                function: "f".to_string()
            }]
        );

        let (validation, _) = run(vec![func("void", "f", vec![], vec![ret(None)])]);
        assert!(!validation.had_error);
    }

    #[test]
    fn bare_return_from_int_function_is_a_mismatch() {
        let (validation, diagnostics) = run(vec![func("int", "f", vec![], vec![ret(None)])]);

        assert!(validation.had_error);
        assert!(matches!(
            errors(&diagnostics)[..],
            [SemanticError::TypeMismatch { .. }]
        ));
    }

    #[test]
    fn float_initialiser_for_int_is_a_mismatch() {
        let (validation, diagnostics) = run(vec![
            parsed::Decl::Var(var("float", "f", None)),
            parsed::Decl::Var(var("int", "i", Some(ident("f")))),
        ]);

        assert!(validation.had_error);
        assert_eq!(validation.ast.decls.len(), 1);
        assert!(matches!(
            errors(&diagnostics)[..],
            [SemanticError::TypeMismatch { .. }]
        ));
    }

    #[test]
    fn errors_are_isolated_per_declaration() {
        let (validation, diagnostics) = run(vec![
            parsed::Decl::Var(var("int", "bad", Some(ident("missing")))),
            parsed::Decl::Var(var("int", "good", Some(int(1)))),
            func("void", "worse", vec![], vec![ret(Some(int(1)))]),
        ]);

        assert!(validation.had_error);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(validation.ast.decls.len(), 1);
        assert!(validation.symbols.get("good").is_some());
        assert!(validation.symbols.get("bad").is_none());
    }

    #[test]
    fn function_with_failing_body_is_not_bound() {
        let (validation, diagnostics) = run(vec![
            func("int", "f", vec![], vec![ret(Some(ident("missing")))]),
            func(
                "int",
                "main",
                vec![],
                vec![ret(Some(parsed::Expr::Call("f".to_string(), vec![], span())))],
            ),
        ]);

        assert!(validation.had_error);
        assert!(validation.symbols.get("f").is_none());
        assert!(validation.symbols.get("main").is_none());
        assert_eq!(
            errors(&diagnostics),
            vec![
                &SemanticError::UnknownIdentifier {
                    name: "missing".to_string()
                },
                &SemanticError::UnknownFunction {
                    name: "f".to_string()
                },
            ]
        );
    }

    #[test]
    fn failed_function_name_can_be_declared_again() {
        let (validation, diagnostics) = run(vec![
            func("int", "f", vec![], vec![ret(Some(ident("missing")))]),
            func("int", "f", vec![], vec![ret(Some(int(1)))]),
        ]);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(validation.ast.decls.len(), 1);
        assert!(matches!(
            validation.symbols.get("f"),
            Some(Symbol::Function(_))
        ));
    }

    #[test]
    fn first_error_in_a_body_aborts_the_declaration() {
        let (_, diagnostics) = run(vec![func(
            "int",
            "main",
            vec![],
            vec![
                parsed::Stmt::Expr(ident("a")),
                parsed::Stmt::Expr(ident("b")),
            ],
        )]);

        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn void_variables_are_rejected() {
        let (_, diagnostics) = run(vec![parsed::Decl::Var(var("void", "v", None))]);

        assert!(matches!(
            errors(&diagnostics)[..],
            [SemanticError::VoidVariable { .. }]
        ));
    }

    #[test]
    fn assignment_needs_a_variable_target() {
        let (_, diagnostics) = run(vec![func(
            "void",
            "f",
            vec![],
            vec![parsed::Stmt::Expr(parsed::Expr::Binary(
                BinaryOp::Assign,
                int(1).boxed(),
                int(2).boxed(),
            ))],
        )]);

        assert!(matches!(
            errors(&diagnostics)[..],
            [SemanticError::InvalidAssignment]
        ));
    }

    #[test]
    fn if_condition_must_be_integral() {
        let (_, diagnostics) = run(vec![
            parsed::Decl::Var(var("double", "d", None)),
            func(
                "void",
                "f",
                vec![],
                vec![parsed::Stmt::If(
                    ident("d"),
                    parsed::Stmt::Empty(span()).boxed(),
                    None,
                    span(),
                )],
            ),
        ]);

        assert!(matches!(
            errors(&diagnostics)[..],
            [SemanticError::TypeMismatch { .. }]
        ));
    }

    #[test]
    fn one_branch_return_passes_by_default() {
        let body = vec![parsed::Stmt::If(
            ident("c"),
            ret(Some(int(1))).boxed(),
            None,
            span(),
        )];
        let decls = vec![
            parsed::Decl::Var(var("int", "c", None)),
            func("int", "f", vec![], body),
        ];

        let (validation, _) = run(decls.clone());
        assert!(!validation.had_error);

        let (validation, diagnostics) = run_with(
            decls,
            ValidatorOptions {
                strict_returns: true,
            },
        );
        assert!(validation.had_error);
        assert!(matches!(
            errors(&diagnostics)[..],
            [SemanticError::MissingReturn { .. }]
        ));
    }

    #[test]
    fn literal_out_of_range_fails() {
        let (_, diagnostics) = run(vec![parsed::Decl::Var(var(
            "long",
            "big",
            Some(parsed::Expr::Int(IntLiteral::new("4294967296", 10), span())),
        ))]);

        assert!(matches!(
            errors(&diagnostics)[..],
            [SemanticError::IntLiteralOutOfBounds { .. }]
        ));
    }

    #[test]
    fn expressions_carry_inferred_types() {
        let (validation, _) = run(vec![
            parsed::Decl::Var(var("char", "c", None)),
            parsed::Decl::Var(var("double", "d", None)),
            parsed::Decl::Var(var(
                "double",
                "sum",
                Some(parsed::Expr::Binary(
                    BinaryOp::Add,
                    ident("c").boxed(),
                    ident("d").boxed(),
                )),
            )),
        ]);

        let Some(typed::Decl::Var(typed::VarDecl {
            init: Some(init), ..
        })) = validation.ast.decls.last()
        else {
            panic!("expected an initialised variable");
        };

        assert_eq!(init.ty().name(), "double");
    }
}
