//! Emits a validated program as C source.
//!
//! Output depends only on the AST, so generating the same tree twice yields the
//! same bytes. Every expression is wrapped in its own pair of parentheses so C
//! evaluates it with the source language's precedence.

use std::fmt::{self, Write};

use crate::compile::{
    ast::typed::{Block, Decl, Expr, FunctionDecl, Program, Stmt, VarDecl},
    types::{Format, Type},
};

pub const HEADER: &str = "/* Generated by yfc. */\n\n#include <stdint.h>\n\n";

/// C spelling of a primitive type.
pub fn c_type(ty: &Type) -> &'static str {
    match (ty.format(), ty.size_bits()) {
        (Format::None, _) => "void",
        (Format::Int, 0..=8) => "int8_t",
        (Format::Int, 9..=16) => "int16_t",
        (Format::Int, 17..=32) => "int32_t",
        (Format::Int, _) => "int64_t",
        (Format::Float, 0..=32) => "float",
        (Format::Float, _) => "double",
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(decls = program.decls.len()))]
pub fn generate(program: &Program) -> Result<String, fmt::Error> {
    let mut out = String::new();
    generate_into(program, &mut out)?;

    Ok(out)
}

/// Writes the header and the program into `out` as it goes.
pub fn generate_into<W: Write>(program: &Program, out: &mut W) -> fmt::Result {
    out.write_str(HEADER)?;

    Emitter::new(out).program(program)
}

struct Emitter<'w, W> {
    out: &'w mut W,
    indent: usize,
}

impl<'w, W: Write> Emitter<'w, W> {
    fn new(out: &'w mut W) -> Self {
        Emitter { out, indent: 0 }
    }

    /// Writes `data`, then starts a new line at the current indentation.
    fn line(&mut self, data: &str) -> fmt::Result {
        writeln!(self.out, "{data}")?;

        for _ in 0..self.indent {
            self.out.write_char('\t')?;
        }

        Ok(())
    }

    fn program(&mut self, program: &Program) -> fmt::Result {
        for decl in program.decls.iter() {
            match decl {
                Decl::Var(var) => {
                    self.var_decl(var)?;
                    self.line(";")?;
                }
                Decl::Func(func) => {
                    self.func_decl(func)?;
                    self.line("")?;
                }
            }
        }

        Ok(())
    }

    fn var_decl(&mut self, decl: &VarDecl) -> fmt::Result {
        let ty = &decl.var.ty;
        write!(self.out, "{} /* {} */ {}", c_type(ty), ty.name(), decl.var.name)?;

        if let Some(init) = &decl.init {
            self.out.write_str(" = ")?;
            self.expr(init)?;
        }

        Ok(())
    }

    fn func_decl(&mut self, decl: &FunctionDecl) -> fmt::Result {
        let ty = &decl.func.return_type;
        write!(self.out, "{} /* {} */ {}(", c_type(ty), ty.name(), decl.func.name)?;

        for (i, param) in decl.params.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.var_decl(param)?;
        }

        self.out.write_str(") ")?;
        self.block(&decl.body)
    }

    fn expr(&mut self, expr: &Expr) -> fmt::Result {
        self.out.write_char('(')?;

        match expr {
            Expr::Int(value, _) => write!(self.out, "{value}")?,
            Expr::Ident(var) => self.out.write_str(&var.name)?,
            Expr::Binary(op, lhs, rhs, _) => {
                self.expr(lhs)?;
                write!(self.out, " {op} ")?;
                self.expr(rhs)?;
            }
            Expr::Call(func, args) => {
                write!(self.out, "{}(", func.name)?;

                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.out.write_str(", ")?;
                    }
                    self.expr(arg)?;
                }

                self.out.write_char(')')?;
            }
        }

        self.out.write_char(')')
    }

    fn block(&mut self, block: &Block) -> fmt::Result {
        self.out.write_char('{')?;
        self.indent += 1;

        for stmt in block.stmts.iter() {
            self.line("")?;
            self.stmt(stmt)?;
            self.out.write_char(';')?;
        }

        self.indent -= 1;
        self.line("")?;
        self.out.write_char('}')
    }

    fn stmt(&mut self, stmt: &Stmt) -> fmt::Result {
        match stmt {
            Stmt::Decl(decl) => self.var_decl(decl),
            Stmt::Expr(expr) => self.expr(expr),
            Stmt::Block(block) => self.block(block),
            Stmt::Return(expr) => {
                self.out.write_str("return ")?;

                match expr {
                    Some(expr) => self.expr(expr),
                    None => Ok(()),
                }
            }
            Stmt::If(cond, then, otherwise) => {
                self.out.write_str("if (")?;
                self.expr(cond)?;
                self.line(") {")?;
                self.stmt(then)?;
                self.line(";")?;
                self.out.write_char('}')?;

                if let Some(otherwise) = otherwise {
                    self.line(" else {")?;
                    self.stmt(otherwise)?;
                    self.line(";")?;
                    self.out.write_char('}')?;
                }

                Ok(())
            }
            Stmt::Empty => self.out.write_char(';'),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        compile::{
            ast::BinaryOp,
            semantic::symbols::{Function, Variable},
            types::{TypeRef, TypeRegistry},
        },
        datstructures::scope_stack::ScopeId,
    };

    struct Fixture {
        types: TypeRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                types: TypeRegistry::with_builtins(),
            }
        }

        fn ty(&self, name: &str) -> TypeRef {
            self.types.lookup(name).unwrap()
        }

        fn var(&self, ty: &str, name: &str) -> Variable {
            Variable {
                name: name.to_string(),
                ty: self.ty(ty),
                scope: ScopeId(0),
            }
        }

        fn int(&self, value: i32) -> Expr {
            Expr::Int(value, self.ty("int"))
        }

        fn func(&self, ty: &str, name: &str, params: Vec<Variable>, stmts: Vec<Stmt>) -> Decl {
            Decl::Func(FunctionDecl {
                func: Function {
                    name: name.to_string(),
                    return_type: self.ty(ty),
                    params: params.clone(),
                },
                params: params
                    .into_iter()
                    .map(|var| VarDecl { var, init: None })
                    .collect(),
                body: Block { stmts },
            })
        }
    }

    fn body(program: &Program) -> String {
        generate(program).unwrap()[HEADER.len()..].to_string()
    }

    #[test]
    fn header_comes_first() {
        let out = generate(&Program::default()).unwrap();

        assert_eq!(out, "/* Generated by yfc. */\n\n#include <stdint.h>\n\n");
    }

    #[test]
    fn minimal_main() {
        let f = Fixture::new();
        let program = Program {
            decls: vec![f.func("int", "main", vec![], vec![Stmt::Return(Some(f.int(0)))])],
        };

        assert_eq!(body(&program), "int32_t /* int */ main() {\n\treturn (0);\n}\n");
    }

    #[test]
    fn global_variables_end_with_semicolon() {
        let f = Fixture::new();
        let program = Program {
            decls: vec![
                Decl::Var(VarDecl {
                    var: f.var("long", "x"),
                    init: Some(f.int(5)),
                }),
                Decl::Var(VarDecl {
                    var: f.var("double", "y"),
                    init: None,
                }),
            ],
        };

        assert_eq!(
            body(&program),
            "int64_t /* long */ x = (5);\ndouble /* double */ y;\n"
        );
    }

    #[test]
    fn every_expression_is_parenthesised() {
        let f = Fixture::new();
        let a = f.var("int", "a");
        let b = f.var("int", "b");
        let sum = Expr::Binary(
            BinaryOp::Mul,
            Expr::Binary(
                BinaryOp::Add,
                Expr::Ident(a.clone()).boxed(),
                Expr::Ident(b.clone()).boxed(),
                f.ty("int"),
            )
            .boxed(),
            f.int(2).boxed(),
            f.ty("int"),
        );
        let program = Program {
            decls: vec![f.func(
                "int",
                "calc",
                vec![a, b],
                vec![Stmt::Return(Some(sum))],
            )],
        };

        assert_eq!(
            body(&program),
            "int32_t /* int */ calc(int32_t /* int */ a, int32_t /* int */ b) {\n\treturn (((a) + (b)) * (2));\n}\n"
        );
    }

    #[test]
    fn calls_list_their_arguments() {
        let f = Fixture::new();
        let callee = Function {
            name: "add".to_string(),
            return_type: f.ty("int"),
            params: vec![f.var("int", "a"), f.var("int", "b")],
        };
        let program = Program {
            decls: vec![f.func(
                "void",
                "run",
                vec![],
                vec![
                    Stmt::Expr(Expr::Call(callee.clone(), vec![f.int(1), f.int(2)])),
                    Stmt::Expr(Expr::Call(
                        Function {
                            params: vec![],
                            ..callee
                        },
                        vec![],
                    )),
                ],
            )],
        };

        assert_eq!(
            body(&program),
            "void /* void */ run() {\n\t(add((1), (2)));\n\t(add());\n}\n"
        );
    }

    #[test]
    fn if_else_layout() {
        let f = Fixture::new();
        let c = f.var("int", "c");
        let program = Program {
            decls: vec![f.func(
                "void",
                "f",
                vec![c.clone()],
                vec![Stmt::If(
                    Expr::Ident(c),
                    Stmt::Return(None).boxed(),
                    Some(
                        Stmt::Block(Block {
                            stmts: vec![Stmt::Empty],
                        })
                        .boxed(),
                    ),
                )],
            )],
        };

        assert_eq!(
            body(&program),
            "void /* void */ f(int32_t /* int */ c) {\n\tif ((c)) {\n\treturn ;\n\t} else {\n\t{\n\t\t;;\n\t};\n\t};\n}\n"
        );
    }

    #[test]
    fn empty_block() {
        let f = Fixture::new();
        let program = Program {
            decls: vec![f.func("void", "noop", vec![], vec![])],
        };

        assert_eq!(body(&program), "void /* void */ noop() {\n}\n");
    }

    #[test]
    fn generation_is_repeatable() {
        let f = Fixture::new();
        let program = Program {
            decls: vec![f.func("int", "main", vec![], vec![Stmt::Return(Some(f.int(7)))])],
        };

        assert_eq!(generate(&program).unwrap(), generate(&program).unwrap());
    }

    #[test]
    fn type_spellings() {
        let f = Fixture::new();
        let spelled: Vec<(&str, &str)> = f
            .types
            .iter()
            .map(|ty| (ty.name(), c_type(ty)))
            .collect();

        assert_eq!(
            spelled,
            vec![
                ("char", "int8_t"),
                ("short", "int16_t"),
                ("int", "int32_t"),
                ("long", "int64_t"),
                ("void", "void"),
                ("float", "float"),
                ("double", "double"),
                ("i16", "int16_t"),
                ("i32", "int32_t"),
                ("i64", "int64_t"),
                ("f16", "float"),
                ("f32", "float"),
                ("f64", "double"),
                ("bool", "int8_t"),
            ]
        );
    }
}
