//! Event classifier: pure predicates over tree nodes.
//!
//! None of these panic; a node of the wrong shape simply does not match.

use std::sync::LazyLock;

use matrix_core::constants::{COMPONENT_BASE_CLASSES, ENTRY_METHOD, ENTRY_OBJECT};
use regex::Regex;

use crate::ast::{ArrowBody, Class, Expr, Stmt};
use crate::synth::{APPEND_LOG_METHOD, GLOBAL_OBJECT, WRAPPER_ARGS, WRAPPER_CALLBACK};

/// `on` prefix followed, anywhere later, by one of the interaction verbs.
/// Unanchored at the end: `onSubmitEditing` matches, `onLayoutMeasured` does not.
static TRACKABLE_ATTRIBUTE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^on[A-Za-z0-9_$]*?(?:[Pp]ress|[Cc]lick|[Cc]hange|[Ss]elect|[Cc]ancel|[Ss]ubmit)")
        .ok()
});

/// `AppRegistry.registerComponent(...)` as a top-level expression statement.
pub fn is_entry_statement(stmt: &Stmt) -> bool {
    let Stmt::Expr { expression } = stmt else {
        return false;
    };
    let Expr::Call { callee, .. } = expression else {
        return false;
    };
    let Expr::Member {
        object, property, ..
    } = callee.as_ref()
    else {
        return false;
    };
    property == ENTRY_METHOD && object.as_ident() == Some(ENTRY_OBJECT)
}

pub fn is_trackable_attribute_name(name: &str) -> bool {
    TRACKABLE_ATTRIBUTE
        .as_ref()
        .is_some_and(|re| re.is_match(name))
}

/// `Component` for `extends Component`, `Component` for `extends React.Component`.
pub fn component_base_name(class: &Class) -> Option<&str> {
    match class.super_class.as_deref()? {
        Expr::Ident { name } => Some(name),
        Expr::Member { property, .. } => Some(property),
        _ => None,
    }
}

pub fn is_component_class(class: &Class) -> bool {
    component_base_name(class).is_some_and(|base| COMPONENT_BASE_CLASSES.contains(&base))
}

/// If `stmt` is an injected `global.<binding>?.appendLog({...})`, the
/// `nodeName` it records.
pub fn logged_action<'a>(stmt: &'a Stmt, binding: &str) -> Option<&'a str> {
    let Stmt::Expr { expression } = stmt else {
        return None;
    };
    logged_action_of_call(expression, binding)
}

pub fn is_log_statement(stmt: &Stmt, binding: &str) -> bool {
    logged_action(stmt, binding).is_some()
}

fn logged_action_of_call<'a>(expr: &'a Expr, binding: &str) -> Option<&'a str> {
    let Expr::Call {
        callee, arguments, ..
    } = expr
    else {
        return None;
    };
    let Expr::Member {
        object, property, ..
    } = callee.as_ref()
    else {
        return None;
    };
    if property != APPEND_LOG_METHOD || !is_global_binding(object, binding) {
        return None;
    }
    let [Expr::Object { properties }] = arguments.as_slice() else {
        return None;
    };
    properties
        .iter()
        .find(|p| p.key == "nodeName")
        .and_then(|p| match &p.value {
            Expr::Str { value } => Some(value.as_str()),
            _ => None,
        })
}

/// `global.<binding>`
fn is_global_binding(expr: &Expr, binding: &str) -> bool {
    matches!(
        expr,
        Expr::Member { object, property, .. }
            if property == binding && object.as_ident() == Some(GLOBAL_OBJECT)
    )
}

/// Whether `expr` is a callback wrapper this engine produced.
pub fn is_callback_wrapper(expr: &Expr, binding: &str) -> bool {
    let Expr::Arrow { params, body } = expr else {
        return false;
    };
    let [param] = params.as_slice() else {
        return false;
    };
    if !param.rest || param.name != WRAPPER_ARGS {
        return false;
    }
    let ArrowBody::Block { body } = body else {
        return false;
    };
    matches!(
        body.as_slice(),
        [Stmt::VarDecl { name, .. }, log, ..]
            if name == WRAPPER_CALLBACK && is_log_statement(log, binding)
    )
}
