//! Construction of id-bearing nodes.

use super::node_id::{NodeId, NodeIdGen};
use super::types::*;
use super::visit::index_nodes;

/// Hands out node ids while building classes, methods and JSX.
///
/// Tests and hosts use it to assemble input trees; the rewriter uses one per
/// pass (seeded by [`TreeBuilder::for_program`]) for the nodes it synthesizes.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    ids: NodeIdGen,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renumbers `program` and continues after its highest id.
    pub fn for_program(program: &mut Program) -> Self {
        Self {
            ids: index_nodes(program),
        }
    }

    pub fn next_id(&mut self) -> NodeId {
        self.ids.next_id()
    }

    pub fn class(
        &mut self,
        name: Option<&str>,
        super_class: Option<Expr>,
        body: Vec<ClassMember>,
    ) -> Class {
        Class {
            id: self.next_id(),
            name: name.map(str::to_string),
            super_class: super_class.map(Box::new),
            body,
        }
    }

    pub fn method(&mut self, name: &str, body: Vec<Stmt>) -> ClassMember {
        ClassMember::Method(ClassMethod {
            id: self.next_id(),
            kind: MethodKind::Method,
            name: name.to_string(),
            params: Vec::new(),
            body,
            is_static: false,
            is_async: false,
        })
    }

    pub fn element(
        &mut self,
        name: &str,
        attributes: Vec<JsxAttrItem>,
        children: Vec<JsxChild>,
    ) -> JsxElement {
        JsxElement {
            id: self.next_id(),
            name: name.to_string(),
            attributes,
            children,
        }
    }

    /// `name={expression}`
    pub fn attr_expr(&mut self, name: &str, expression: Expr) -> JsxAttrItem {
        let container = self.container(Some(expression));
        JsxAttrItem::Attribute(JsxAttribute {
            id: self.next_id(),
            name: name.to_string(),
            value: Some(JsxAttrValue::Container(container)),
        })
    }

    /// `name={}`
    pub fn attr_empty(&mut self, name: &str) -> JsxAttrItem {
        let container = self.container(None);
        JsxAttrItem::Attribute(JsxAttribute {
            id: self.next_id(),
            name: name.to_string(),
            value: Some(JsxAttrValue::Container(container)),
        })
    }

    /// `name="value"`
    pub fn attr_str(&mut self, name: &str, value: &str) -> JsxAttrItem {
        JsxAttrItem::Attribute(JsxAttribute {
            id: self.next_id(),
            name: name.to_string(),
            value: Some(JsxAttrValue::Str {
                value: value.to_string(),
            }),
        })
    }

    pub fn container(&mut self, expression: Option<Expr>) -> JsxContainer {
        JsxContainer {
            id: self.next_id(),
            expression,
        }
    }

    pub fn text(value: &str) -> JsxChild {
        JsxChild::Text {
            value: value.to_string(),
        }
    }
}
