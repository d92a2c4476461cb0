//! Mutable pre-order traversal.
//!
//! A visitor's hook runs before the walker descends into the node, so any
//! structure the hook installs (a wrapper closure, a new method) is itself
//! walked afterwards.

use super::node_id::NodeIdGen;
use super::types::*;

pub trait VisitMut {
    fn visit_class(&mut self, _class: &mut Class) {}
    fn visit_class_method(&mut self, _method: &mut ClassMethod) {}
    fn visit_jsx_element(&mut self, _element: &mut JsxElement) {}
    fn visit_jsx_attribute(&mut self, _attribute: &mut JsxAttribute) {}
    fn visit_jsx_container(&mut self, _container: &mut JsxContainer) {}
}

pub fn walk_program<V: VisitMut + ?Sized>(v: &mut V, program: &mut Program) {
    walk_stmts(v, &mut program.body);
}

pub fn walk_stmts<V: VisitMut + ?Sized>(v: &mut V, stmts: &mut [Stmt]) {
    for stmt in stmts {
        walk_stmt(v, stmt);
    }
}

pub fn walk_stmt<V: VisitMut + ?Sized>(v: &mut V, stmt: &mut Stmt) {
    match stmt {
        Stmt::Expr { expression } => walk_expr(v, expression),
        Stmt::VarDecl { init, .. } => {
            if let Some(init) = init {
                walk_expr(v, init);
            }
        }
        Stmt::Function(function) => walk_stmts(v, &mut function.body),
        Stmt::Class(class) => walk_class(v, class),
        Stmt::Return { argument } => {
            if let Some(argument) = argument {
                walk_expr(v, argument);
            }
        }
        Stmt::Block { body } => walk_stmts(v, body),
        Stmt::Export { declaration, .. } => walk_stmt(v, declaration),
        Stmt::Import(_) | Stmt::Raw { .. } => {}
    }
}

pub fn walk_class<V: VisitMut + ?Sized>(v: &mut V, class: &mut Class) {
    v.visit_class(class);
    if let Some(super_class) = class.super_class.as_deref_mut() {
        walk_expr(v, super_class);
    }
    for member in &mut class.body {
        match member {
            ClassMember::Method(method) => {
                v.visit_class_method(method);
                walk_stmts(v, &mut method.body);
            }
            ClassMember::Field {
                value: Some(value), ..
            } => walk_expr(v, value),
            ClassMember::Field { value: None, .. } | ClassMember::Raw { .. } => {}
        }
    }
}

pub fn walk_expr<V: VisitMut + ?Sized>(v: &mut V, expr: &mut Expr) {
    match expr {
        Expr::Member { object, .. } => walk_expr(v, object),
        Expr::Call {
            callee, arguments, ..
        } => {
            walk_expr(v, callee);
            for argument in arguments {
                walk_expr(v, argument);
            }
        }
        Expr::Arrow { body, .. } => match body {
            ArrowBody::Expr { expression } => walk_expr(v, expression),
            ArrowBody::Block { body } => walk_stmts(v, body),
        },
        Expr::Function(function) => walk_stmts(v, &mut function.body),
        Expr::Object { properties } => {
            for property in properties {
                walk_expr(v, &mut property.value);
            }
        }
        Expr::Array { elements } => {
            for element in elements {
                walk_expr(v, element);
            }
        }
        Expr::Spread { argument } => walk_expr(v, argument),
        Expr::Logical { left, right, .. } => {
            walk_expr(v, left);
            walk_expr(v, right);
        }
        Expr::Assign { target, value } => {
            walk_expr(v, target);
            walk_expr(v, value);
        }
        Expr::Class(class) => walk_class(v, class),
        Expr::JsxElement(element) => walk_jsx_element(v, element),
        Expr::JsxFragment { children } => walk_jsx_children(v, children),
        Expr::Ident { .. }
        | Expr::Str { .. }
        | Expr::Num { .. }
        | Expr::Bool { .. }
        | Expr::Null
        | Expr::Raw { .. } => {}
    }
}

pub fn walk_jsx_element<V: VisitMut + ?Sized>(v: &mut V, element: &mut JsxElement) {
    v.visit_jsx_element(element);
    for item in &mut element.attributes {
        match item {
            JsxAttrItem::Attribute(attribute) => {
                v.visit_jsx_attribute(attribute);
                match &mut attribute.value {
                    Some(JsxAttrValue::Container(container)) => walk_jsx_container(v, container),
                    Some(JsxAttrValue::Element(inner)) => walk_jsx_element(v, inner),
                    Some(JsxAttrValue::Str { .. }) | None => {}
                }
            }
            JsxAttrItem::Spread { argument } => walk_expr(v, argument),
        }
    }
    walk_jsx_children(v, &mut element.children);
}

fn walk_jsx_container<V: VisitMut + ?Sized>(v: &mut V, container: &mut JsxContainer) {
    v.visit_jsx_container(container);
    if let Some(expression) = &mut container.expression {
        walk_expr(v, expression);
    }
}

fn walk_jsx_children<V: VisitMut + ?Sized>(v: &mut V, children: &mut [JsxChild]) {
    for child in children {
        match child {
            JsxChild::Text { .. } => {}
            JsxChild::Container(container) => walk_jsx_container(v, container),
            JsxChild::Element(element) => walk_jsx_element(v, element),
            JsxChild::Fragment { children } => walk_jsx_children(v, children),
        }
    }
}

/// Assigns fresh ids to every id-bearing node and returns the generator
/// positioned after the last one, for nodes synthesized later in the pass.
pub fn index_nodes(program: &mut Program) -> NodeIdGen {
    struct Indexer(NodeIdGen);

    impl VisitMut for Indexer {
        fn visit_class(&mut self, class: &mut Class) {
            class.id = self.0.next_id();
        }
        fn visit_class_method(&mut self, method: &mut ClassMethod) {
            method.id = self.0.next_id();
        }
        fn visit_jsx_element(&mut self, element: &mut JsxElement) {
            element.id = self.0.next_id();
        }
        fn visit_jsx_attribute(&mut self, attribute: &mut JsxAttribute) {
            attribute.id = self.0.next_id();
        }
        fn visit_jsx_container(&mut self, container: &mut JsxContainer) {
            container.id = self.0.next_id();
        }
    }

    let mut indexer = Indexer(NodeIdGen::new());
    walk_program(&mut indexer, program);
    indexer.0
}

// ---- Read-only text collection ----

/// Concatenates every JSX text node reachable through `children`: nested
/// elements' children, fragments, and JSX inside child expression containers.
pub fn collect_jsx_text(children: &[JsxChild], out: &mut String) {
    for child in children {
        match child {
            JsxChild::Text { value } => out.push_str(value),
            JsxChild::Container(container) => {
                if let Some(expression) = &container.expression {
                    collect_expr_text(expression, out);
                }
            }
            JsxChild::Element(element) => collect_jsx_text(&element.children, out),
            JsxChild::Fragment { children } => collect_jsx_text(children, out),
        }
    }
}

fn collect_expr_text(expr: &Expr, out: &mut String) {
    match expr {
        Expr::JsxElement(element) => collect_jsx_text(&element.children, out),
        Expr::JsxFragment { children } => collect_jsx_text(children, out),
        Expr::Logical { left, right, .. } => {
            collect_expr_text(left, out);
            collect_expr_text(right, out);
        }
        Expr::Call {
            callee, arguments, ..
        } => {
            collect_expr_text(callee, out);
            for argument in arguments {
                collect_expr_text(argument, out);
            }
        }
        Expr::Member { object, .. } => collect_expr_text(object, out),
        Expr::Arrow { body, .. } => match body {
            ArrowBody::Expr { expression } => collect_expr_text(expression, out),
            ArrowBody::Block { body } => collect_stmts_text(body, out),
        },
        Expr::Function(function) => collect_stmts_text(&function.body, out),
        Expr::Array { elements } => {
            for element in elements {
                collect_expr_text(element, out);
            }
        }
        Expr::Object { properties } => {
            for property in properties {
                collect_expr_text(&property.value, out);
            }
        }
        Expr::Spread { argument } => collect_expr_text(argument, out),
        Expr::Assign { value, .. } => collect_expr_text(value, out),
        Expr::Ident { .. }
        | Expr::Str { .. }
        | Expr::Num { .. }
        | Expr::Bool { .. }
        | Expr::Null
        | Expr::Class(_)
        | Expr::Raw { .. } => {}
    }
}

fn collect_stmts_text(stmts: &[Stmt], out: &mut String) {
    for stmt in stmts {
        match stmt {
            Stmt::Expr { expression } => collect_expr_text(expression, out),
            Stmt::Return {
                argument: Some(argument),
            } => collect_expr_text(argument, out),
            Stmt::VarDecl {
                init: Some(init), ..
            } => collect_expr_text(init, out),
            Stmt::Block { body } => collect_stmts_text(body, out),
            _ => {}
        }
    }
}
