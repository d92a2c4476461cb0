use std::fmt::Write as _;

use matrix_core::config::is_identifier;

use crate::ast::*;

const INDENT: &str = "  ";

/// Writes JavaScript text, two-space indented, one statement per line.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.out
    }

    pub fn program(&mut self, program: &Program) {
        for stmt in &program.body {
            self.stmt(stmt);
        }
    }

    fn line_start(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn block(&mut self, body: &[Stmt]) {
        if body.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        self.depth += 1;
        for stmt in body {
            self.stmt(stmt);
        }
        self.depth -= 1;
        self.line_start();
        self.out.push('}');
    }

    // ---- Statements ----

    pub fn stmt(&mut self, stmt: &Stmt) {
        self.line_start();
        self.stmt_inline(stmt);
        self.out.push('\n');
    }

    fn stmt_inline(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr { expression } => {
                if matches!(
                    expression,
                    Expr::Object { .. } | Expr::Function(_) | Expr::Class(_)
                ) {
                    self.out.push('(');
                    self.expr(expression);
                    self.out.push(')');
                } else {
                    self.expr(expression);
                }
                self.out.push(';');
            }
            Stmt::Import(import) => self.import(import),
            Stmt::VarDecl { kind, name, init } => {
                self.out.push_str(kind.keyword());
                self.out.push(' ');
                self.out.push_str(name);
                if let Some(init) = init {
                    self.out.push_str(" = ");
                    self.expr(init);
                }
                self.out.push(';');
            }
            Stmt::Function(function) => self.function(function),
            Stmt::Class(class) => self.class(class),
            Stmt::Return { argument } => {
                self.out.push_str("return");
                if let Some(argument) = argument {
                    self.out.push(' ');
                    self.expr(argument);
                }
                self.out.push(';');
            }
            Stmt::Block { body } => self.block(body),
            Stmt::Export {
                default,
                declaration,
            } => {
                self.out.push_str(if *default { "export default " } else { "export " });
                self.stmt_inline(declaration);
            }
            Stmt::Raw { code } => self.out.push_str(code),
        }
    }

    fn import(&mut self, import: &ImportDecl) {
        self.out.push_str("import ");
        if let Some(default) = &import.default {
            self.out.push_str(default);
            if !import.named.is_empty() {
                self.out.push_str(", ");
            }
        }
        if !import.named.is_empty() {
            self.out.push_str("{ ");
            self.out.push_str(&import.named.join(", "));
            self.out.push_str(" }");
        }
        if import.default.is_some() || !import.named.is_empty() {
            self.out.push_str(" from ");
        }
        self.string(&import.source);
        self.out.push(';');
    }

    fn params(&mut self, params: &[Param]) {
        self.out.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            if param.rest {
                self.out.push_str("...");
            }
            self.out.push_str(&param.name);
        }
        self.out.push(')');
    }

    fn function(&mut self, function: &Function) {
        if function.is_async {
            self.out.push_str("async ");
        }
        self.out.push_str("function");
        if let Some(name) = &function.name {
            self.out.push(' ');
            self.out.push_str(name);
        }
        self.params(&function.params);
        self.out.push(' ');
        self.block(&function.body);
    }

    fn class(&mut self, class: &Class) {
        self.out.push_str("class");
        if let Some(name) = &class.name {
            self.out.push(' ');
            self.out.push_str(name);
        }
        if let Some(super_class) = &class.super_class {
            self.out.push_str(" extends ");
            self.operand(super_class);
        }
        if class.body.is_empty() {
            self.out.push_str(" {}");
            return;
        }
        self.out.push_str(" {\n");
        self.depth += 1;
        for member in &class.body {
            self.line_start();
            self.class_member(member);
            self.out.push('\n');
        }
        self.depth -= 1;
        self.line_start();
        self.out.push('}');
    }

    fn class_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Method(method) => {
                if method.is_static {
                    self.out.push_str("static ");
                }
                if method.is_async {
                    self.out.push_str("async ");
                }
                match method.kind {
                    MethodKind::Get => self.out.push_str("get "),
                    MethodKind::Set => self.out.push_str("set "),
                    MethodKind::Method | MethodKind::Constructor => {}
                }
                self.out.push_str(&method.name);
                self.params(&method.params);
                self.out.push(' ');
                self.block(&method.body);
            }
            ClassMember::Field {
                name,
                value,
                is_static,
            } => {
                if *is_static {
                    self.out.push_str("static ");
                }
                self.out.push_str(name);
                if let Some(value) = value {
                    self.out.push_str(" = ");
                    self.expr(value);
                }
                self.out.push(';');
            }
            ClassMember::Raw { code } => self.out.push_str(code),
        }
    }

    // ---- Expressions ----

    pub fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident { name } => self.out.push_str(name),
            Expr::Str { value } => self.string(value),
            Expr::Num { raw } => self.out.push_str(raw),
            Expr::Bool { value } => self.out.push_str(if *value { "true" } else { "false" }),
            Expr::Null => self.out.push_str("null"),
            Expr::Member {
                object,
                property,
                optional,
            } => {
                self.operand(object);
                self.out.push_str(if *optional { "?." } else { "." });
                self.out.push_str(property);
            }
            Expr::Call {
                callee,
                arguments,
                optional,
            } => {
                self.operand(callee);
                if *optional {
                    self.out.push_str("?.");
                }
                self.out.push('(');
                self.comma_separated(arguments);
                self.out.push(')');
            }
            Expr::Arrow { params, body } => {
                self.params(params);
                self.out.push_str(" => ");
                match body {
                    ArrowBody::Expr { expression } => {
                        if matches!(expression.as_ref(), Expr::Object { .. }) {
                            self.out.push('(');
                            self.expr(expression);
                            self.out.push(')');
                        } else {
                            self.expr(expression);
                        }
                    }
                    ArrowBody::Block { body } => self.block(body),
                }
            }
            Expr::Function(function) => self.function(function),
            Expr::Object { properties } => {
                if properties.is_empty() {
                    self.out.push_str("{}");
                    return;
                }
                self.out.push_str("{ ");
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    if is_identifier(&property.key) {
                        self.out.push_str(&property.key);
                    } else {
                        self.string(&property.key);
                    }
                    self.out.push_str(": ");
                    self.expr(&property.value);
                }
                self.out.push_str(" }");
            }
            Expr::Array { elements } => {
                self.out.push('[');
                self.comma_separated(elements);
                self.out.push(']');
            }
            Expr::Spread { argument } => {
                self.out.push_str("...");
                self.operand(argument);
            }
            Expr::Logical {
                operator,
                left,
                right,
            } => {
                self.logical_side(*operator, left, false);
                self.out.push(' ');
                self.out.push_str(operator.as_str());
                self.out.push(' ');
                self.logical_side(*operator, right, true);
            }
            Expr::Assign { target, value } => {
                self.expr(target);
                self.out.push_str(" = ");
                self.expr(value);
            }
            Expr::Class(class) => self.class(class),
            Expr::JsxElement(element) => self.jsx_element(element),
            Expr::JsxFragment { children } => {
                self.out.push_str("<>");
                self.jsx_children(children);
                self.out.push_str("</>");
            }
            Expr::Raw { code } => self.out.push_str(code),
        }
    }

    fn comma_separated(&mut self, exprs: &[Expr]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(expr);
        }
    }

    /// Callee, member object, or spread argument.
    fn operand(&mut self, expr: &Expr) {
        let wrap = matches!(
            expr,
            Expr::Arrow { .. }
                | Expr::Function(_)
                | Expr::Logical { .. }
                | Expr::Assign { .. }
                | Expr::Class(_)
                | Expr::Object { .. }
        );
        self.maybe_parenthesized(expr, wrap);
    }

    fn logical_side(&mut self, parent: LogicalOp, expr: &Expr, right: bool) {
        let wrap = match expr {
            Expr::Logical { operator, .. } => *operator != parent || right,
            Expr::Arrow { .. } | Expr::Assign { .. } => true,
            _ => false,
        };
        self.maybe_parenthesized(expr, wrap);
    }

    fn maybe_parenthesized(&mut self, expr: &Expr, wrap: bool) {
        if wrap {
            self.out.push('(');
        }
        self.expr(expr);
        if wrap {
            self.out.push(')');
        }
    }

    /// Single-quoted JavaScript string literal.
    fn string(&mut self, value: &str) {
        self.out.push('\'');
        for c in value.chars() {
            match c {
                '\'' => self.out.push_str("\\'"),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                '\u{2028}' => self.out.push_str("\\u2028"),
                '\u{2029}' => self.out.push_str("\\u2029"),
                c if c.is_control() => {
                    let _ = write!(self.out, "\\u{:04x}", c as u32);
                }
                c => self.out.push(c),
            }
        }
        self.out.push('\'');
    }

    // ---- JSX ----

    fn jsx_element(&mut self, element: &JsxElement) {
        self.out.push('<');
        self.out.push_str(&element.name);
        for item in &element.attributes {
            self.out.push(' ');
            match item {
                JsxAttrItem::Attribute(attr) => {
                    self.out.push_str(&attr.name);
                    match &attr.value {
                        None => {}
                        Some(JsxAttrValue::Str { value }) => {
                            self.out.push_str("=\"");
                            self.out.push_str(&value.replace('"', "&quot;"));
                            self.out.push('"');
                        }
                        Some(JsxAttrValue::Container(container)) => {
                            self.out.push('=');
                            self.jsx_container(container);
                        }
                        Some(JsxAttrValue::Element(inner)) => {
                            self.out.push('=');
                            self.jsx_element(inner);
                        }
                    }
                }
                JsxAttrItem::Spread { argument } => {
                    self.out.push_str("{...");
                    self.expr(argument);
                    self.out.push('}');
                }
            }
        }
        if element.children.is_empty() {
            self.out.push_str(" />");
            return;
        }
        self.out.push('>');
        self.jsx_children(&element.children);
        self.out.push_str("</");
        self.out.push_str(&element.name);
        self.out.push('>');
    }

    fn jsx_container(&mut self, container: &JsxContainer) {
        self.out.push('{');
        if let Some(expression) = &container.expression {
            self.expr(expression);
        }
        self.out.push('}');
    }

    fn jsx_children(&mut self, children: &[JsxChild]) {
        for child in children {
            match child {
                JsxChild::Text { value } => self.out.push_str(value),
                JsxChild::Container(container) => self.jsx_container(container),
                JsxChild::Element(element) => self.jsx_element(element),
                JsxChild::Fragment { children } => {
                    self.out.push_str("<>");
                    self.jsx_children(children);
                    self.out.push_str("</>");
                }
            }
        }
    }
}
