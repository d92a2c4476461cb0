//! Tree-building helpers shared by the rewriter tests.

#![allow(dead_code)]

use matrix_instrument::ast::*;
use matrix_instrument::classifier;

pub const BINDING: &str = "matrixLog";

/// `this.<name>`
pub fn this_member(name: &str) -> Expr {
    Expr::member(Expr::ident("this"), name)
}

/// `AppRegistry.registerComponent('app', () => App);`
pub fn entry_call() -> Stmt {
    Expr::call(
        Expr::member(Expr::ident("AppRegistry"), "registerComponent"),
        vec![
            Expr::string("app"),
            Expr::Arrow {
                params: vec![],
                body: ArrowBody::Expr {
                    expression: Box::new(Expr::ident("App")),
                },
            },
        ],
    )
    .into_stmt()
}

pub fn raw(code: &str) -> Stmt {
    Stmt::Raw {
        code: code.to_string(),
    }
}

/// `render() { return <element>; }`
pub fn render_method(tree: &mut TreeBuilder, element: JsxElement) -> ClassMember {
    tree.method(
        "render",
        vec![Stmt::Return {
            argument: Some(Expr::JsxElement(Box::new(element))),
        }],
    )
}

pub fn class_at(program: &Program, index: usize) -> &Class {
    match &program.body[index] {
        Stmt::Class(class) => class,
        Stmt::Export { declaration, .. } => match declaration.as_ref() {
            Stmt::Class(class) => class,
            other => panic!("expected class, got {other:?}"),
        },
        other => panic!("expected class, got {other:?}"),
    }
}

pub fn methods_named<'a>(class: &'a Class, name: &str) -> Vec<&'a ClassMethod> {
    class
        .body
        .iter()
        .filter_map(|m| match m {
            ClassMember::Method(method) if method.name == name => Some(method),
            _ => None,
        })
        .collect()
}

/// Number of injected log statements in `body` that record `action`.
pub fn log_count(body: &[Stmt], action: &str) -> usize {
    body.iter()
        .filter(|s| classifier::logged_action(s, BINDING) == Some(action))
        .count()
}

/// The `(key, value)` pairs of an injected log statement's record literal.
pub fn record_of(stmt: &Stmt) -> Vec<(String, String)> {
    let Stmt::Expr {
        expression: Expr::Call { arguments, .. },
    } = stmt
    else {
        panic!("not a log statement: {stmt:?}");
    };
    let [Expr::Object { properties }] = arguments.as_slice() else {
        panic!("log call without a record literal");
    };
    properties
        .iter()
        .map(|p| match &p.value {
            Expr::Str { value } => (p.key.clone(), value.clone()),
            other => panic!("non-string record value: {other:?}"),
        })
        .collect()
}

/// Finds the first element named `name` anywhere in the program.
pub fn find_element<'a>(program: &'a Program, name: &str) -> &'a JsxElement {
    fn in_expr<'a>(expr: &'a Expr, name: &str) -> Option<&'a JsxElement> {
        match expr {
            Expr::JsxElement(el) => in_element(el, name),
            Expr::JsxFragment { children } => in_children(children, name),
            Expr::Logical { left, right, .. } => {
                in_expr(left, name).or_else(|| in_expr(right, name))
            }
            Expr::Arrow { body, .. } => match body {
                ArrowBody::Expr { expression } => in_expr(expression, name),
                ArrowBody::Block { body } => in_stmts(body, name),
            },
            Expr::Call { callee, arguments, .. } => {
                in_expr(callee, name).or_else(|| arguments.iter().find_map(|a| in_expr(a, name)))
            }
            Expr::Member { object, .. } => in_expr(object, name),
            Expr::Class(class) => in_class(class, name),
            _ => None,
        }
    }
    fn in_element<'a>(el: &'a JsxElement, name: &str) -> Option<&'a JsxElement> {
        if el.name == name {
            return Some(el);
        }
        el.attributes
            .iter()
            .find_map(|item| match item {
                JsxAttrItem::Attribute(JsxAttribute {
                    value: Some(JsxAttrValue::Container(c)),
                    ..
                }) => c.expression.as_ref().and_then(|e| in_expr(e, name)),
                JsxAttrItem::Attribute(JsxAttribute {
                    value: Some(JsxAttrValue::Element(inner)),
                    ..
                }) => in_element(inner, name),
                _ => None,
            })
            .or_else(|| in_children(&el.children, name))
    }
    fn in_children<'a>(children: &'a [JsxChild], name: &str) -> Option<&'a JsxElement> {
        children.iter().find_map(|c| match c {
            JsxChild::Element(el) => in_element(el, name),
            JsxChild::Fragment { children } => in_children(children, name),
            JsxChild::Container(c) => c.expression.as_ref().and_then(|e| in_expr(e, name)),
            JsxChild::Text { .. } => None,
        })
    }
    fn in_class<'a>(class: &'a Class, name: &str) -> Option<&'a JsxElement> {
        class.body.iter().find_map(|m| match m {
            ClassMember::Method(method) => in_stmts(&method.body, name),
            _ => None,
        })
    }
    fn in_stmts<'a>(stmts: &'a [Stmt], name: &str) -> Option<&'a JsxElement> {
        stmts.iter().find_map(|s| match s {
            Stmt::Expr { expression } => in_expr(expression, name),
            Stmt::Return { argument: Some(e) } => in_expr(e, name),
            Stmt::VarDecl { init: Some(e), .. } => in_expr(e, name),
            Stmt::Class(class) => in_class(class, name),
            Stmt::Function(f) => in_stmts(&f.body, name),
            Stmt::Export { declaration, .. } => in_stmts(std::slice::from_ref(declaration.as_ref()), name),
            Stmt::Block { body } => in_stmts(body, name),
            _ => None,
        })
    }
    in_stmts(&program.body, name).unwrap_or_else(|| panic!("no <{name}> in program"))
}

/// The expression held by attribute `name` of `element`.
pub fn attr_expr<'a>(element: &'a JsxElement, name: &str) -> Option<&'a Expr> {
    element.named_attributes().find(|a| a.name == name).and_then(|a| match &a.value {
        Some(JsxAttrValue::Container(c)) => c.expression.as_ref(),
        _ => None,
    })
}

/// Splits a callback wrapper into (bound original, log statement).
pub fn unwrap_wrapper(expr: &Expr) -> (&Expr, &Stmt) {
    let Expr::Arrow {
        body: ArrowBody::Block { body },
        ..
    } = expr
    else {
        panic!("not a wrapper: {expr:?}");
    };
    let Stmt::VarDecl {
        init: Some(original),
        ..
    } = &body[0]
    else {
        panic!("wrapper does not bind the original");
    };
    (original, &body[1])
}
