//! Typed syntax tree for the UI-source subset the rewriter touches.
//!
//! Everything outside that subset survives as `Raw` text so a host can still
//! round-trip the file.

use serde::{Deserialize, Serialize};

use super::node_id::NodeId;

/// One file handed to the build: its path (for event ids) and its tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceUnit {
    pub path: String,
    pub program: Program,
}

impl SourceUnit {
    pub fn new(path: impl Into<String>, program: Program) -> Self {
        Self {
            path: path.into(),
            program,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

// ---- Statements ----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Stmt {
    Expr {
        expression: Expr,
    },
    Import(ImportDecl),
    VarDecl {
        kind: VarKind,
        name: String,
        init: Option<Expr>,
    },
    Function(Function),
    Class(Class),
    Return {
        argument: Option<Expr>,
    },
    Block {
        body: Vec<Stmt>,
    },
    Export {
        #[serde(default)]
        default: bool,
        declaration: Box<Stmt>,
    },
    /// Opaque statement text, printed verbatim.
    Raw {
        code: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VarKind {
    #[default]
    Const,
    Let,
    Var,
}

impl VarKind {
    pub fn keyword(self) -> &'static str {
        match self {
            VarKind::Const => "const",
            VarKind::Let => "let",
            VarKind::Var => "var",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImportDecl {
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub named: Vec<String>,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Function {
    pub name: Option<String>,
    #[serde(default)]
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    #[serde(default)]
    pub is_async: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub rest: bool,
}

impl Param {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rest: false,
        }
    }

    pub fn rest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rest: true,
        }
    }
}

// ---- Classes ----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Class {
    #[serde(default)]
    pub id: NodeId,
    pub name: Option<String>,
    #[serde(default)]
    pub super_class: Option<Box<Expr>>,
    #[serde(default)]
    pub body: Vec<ClassMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ClassMember {
    Method(ClassMethod),
    Field {
        name: String,
        value: Option<Expr>,
        #[serde(default)]
        is_static: bool,
    },
    Raw {
        code: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    #[default]
    Method,
    Constructor,
    Get,
    Set,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassMethod {
    #[serde(default)]
    pub id: NodeId,
    #[serde(default)]
    pub kind: MethodKind,
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub body: Vec<Stmt>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_async: bool,
}

impl ClassMethod {
    /// A plain, non-static instance method (the only shape a lifecycle hook takes).
    pub fn is_instance_method(&self) -> bool {
        self.kind == MethodKind::Method && !self.is_static
    }
}

// ---- Expressions ----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Expr {
    Ident {
        name: String,
    },
    Str {
        value: String,
    },
    Num {
        raw: String,
    },
    Bool {
        value: bool,
    },
    Null,
    Member {
        object: Box<Expr>,
        property: String,
        #[serde(default)]
        optional: bool,
    },
    Call {
        callee: Box<Expr>,
        #[serde(default)]
        arguments: Vec<Expr>,
        #[serde(default)]
        optional: bool,
    },
    Arrow {
        #[serde(default)]
        params: Vec<Param>,
        body: ArrowBody,
    },
    Function(Box<Function>),
    Object {
        #[serde(default)]
        properties: Vec<Property>,
    },
    Array {
        #[serde(default)]
        elements: Vec<Expr>,
    },
    Spread {
        argument: Box<Expr>,
    },
    Logical {
        operator: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Class(Box<Class>),
    JsxElement(Box<JsxElement>),
    JsxFragment {
        #[serde(default)]
        children: Vec<JsxChild>,
    },
    /// Opaque expression text, printed verbatim.
    Raw {
        code: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArrowBody {
    Expr { expression: Box<Expr> },
    Block { body: Vec<Stmt> },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogicalOp {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "??")]
    Nullish,
}

impl LogicalOp {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
            LogicalOp::Nullish => "??",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Expr,
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident { name: name.into() }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Str {
            value: value.into(),
        }
    }

    pub fn member(object: Expr, property: impl Into<String>) -> Self {
        Expr::Member {
            object: Box::new(object),
            property: property.into(),
            optional: false,
        }
    }

    /// `object?.property`
    pub fn optional_member(object: Expr, property: impl Into<String>) -> Self {
        Expr::Member {
            object: Box::new(object),
            property: property.into(),
            optional: true,
        }
    }

    pub fn call(callee: Expr, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            arguments,
            optional: false,
        }
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::Logical {
            operator: LogicalOp::And,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Expr::Ident { name } => Some(name),
            _ => None,
        }
    }

    pub fn into_stmt(self) -> Stmt {
        Stmt::Expr { expression: self }
    }
}

// ---- JSX ----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsxElement {
    #[serde(default)]
    pub id: NodeId,
    /// Tag name as written, e.g. `Button` or `Foo.Bar`.
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<JsxAttrItem>,
    #[serde(default)]
    pub children: Vec<JsxChild>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum JsxAttrItem {
    Attribute(JsxAttribute),
    Spread { argument: Expr },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsxAttribute {
    #[serde(default)]
    pub id: NodeId,
    pub name: String,
    /// `None` for a bare boolean attribute (`<Input disabled />`).
    #[serde(default)]
    pub value: Option<JsxAttrValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum JsxAttrValue {
    Str { value: String },
    Container(JsxContainer),
    Element(Box<JsxElement>),
}

/// `{expression}`; an empty container (`{}`) holds `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsxContainer {
    #[serde(default)]
    pub id: NodeId,
    #[serde(default)]
    pub expression: Option<Expr>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum JsxChild {
    Text { value: String },
    Container(JsxContainer),
    Element(JsxElement),
    Fragment { children: Vec<JsxChild> },
}

impl JsxElement {
    /// Named attributes in source order, skipping spreads.
    pub fn named_attributes(&self) -> impl Iterator<Item = &JsxAttribute> {
        self.attributes.iter().filter_map(|item| match item {
            JsxAttrItem::Attribute(attr) => Some(attr),
            JsxAttrItem::Spread { .. } => None,
        })
    }
}
