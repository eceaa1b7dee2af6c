//! Build a program in code and print it as source.

use noctern::{BinaryOp, Expr, FnDecl, Program, Statement, StructDecl, Type};

fn main() {
    let real = || Type::named("Real");

    let program = Program::new()
        .item(
            StructDecl::new("Point")
                .field("x", real())
                .field("y", real()),
        )
        .item(
            FnDecl::new("norm2", Type::named("Point").to(real()))
                .param("p")
                .body(Expr::block([
                    Statement::bind(
                        "xx",
                        Expr::binary(
                            BinaryOp::Mul,
                            Expr::ident("p").member("x"),
                            Expr::ident("p").member("x"),
                        ),
                    )
                    .typed(real()),
                    Statement::ret(Expr::binary(
                        BinaryOp::Add,
                        Expr::ident("xx"),
                        Expr::binary(
                            BinaryOp::Mul,
                            Expr::ident("p").member("y"),
                            Expr::ident("p").member("y"),
                        ),
                    )),
                ])),
        )
        .expr(Expr::ident("print").call([
            Expr::ident("norm2").call([Expr::ident("Point").call([Expr::real(3.0), Expr::real(4.0)])]),
        ]));

    print!("{}", noctern::format(&program));
}
