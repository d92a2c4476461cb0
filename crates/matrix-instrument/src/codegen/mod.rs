//! Reference printer for the supported tree subset.
//!
//! Hosts with their own generator can ignore this; tests use it to check the
//! shape of injected code as text.

mod printer;

pub use printer::Printer;

use crate::ast::{Expr, Program, Stmt};

pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::new();
    printer.program(program);
    printer.finish()
}

pub fn print_stmts(stmts: &[Stmt]) -> String {
    let mut printer = Printer::new();
    for stmt in stmts {
        printer.stmt(stmt);
    }
    printer.finish()
}

pub fn print_expr(expr: &Expr) -> String {
    let mut printer = Printer::new();
    printer.expr(expr);
    printer.finish()
}
