use matrix_core::constants::STARTUP_MARKER;

use super::{Synthesizer, APPEND_LOG_METHOD, GLOBAL_OBJECT};
use crate::ast::{Expr, ImportDecl, Stmt};

/// Names the bootstrap imports from the user configuration module.
const CONFIG_IMPORTS: [&str; 3] = ["onBeforeAppStart", "onBeforeMessageSend", "endPointUrl"];

/// Client setter fed by each configuration import, in wiring order.
const SETTERS: [(&str, &str); 3] = [
    ("setEndpointUrl", "endPointUrl"),
    ("setOnBeforeAppStart", "onBeforeAppStart"),
    ("setOnBeforeMessageSend", "onBeforeMessageSend"),
];

impl Synthesizer {
    /// Statements spliced at the top of the entry file.
    pub fn build_entry_bootstrap(&self) -> Vec<Stmt> {
        let mut stmts = Vec::with_capacity(4 + SETTERS.len());
        stmts.push(Stmt::Import(ImportDecl {
            default: Some(self.binding.clone()),
            named: Vec::new(),
            source: self.client_module.clone(),
        }));
        stmts.push(Stmt::Import(ImportDecl {
            default: None,
            named: CONFIG_IMPORTS.iter().map(|s| s.to_string()).collect(),
            source: self.config_module.clone(),
        }));
        stmts.push(self.build_client_install());
        for (setter, value) in SETTERS {
            stmts.push(self.guarded_client_call(setter, Expr::ident(value)));
        }
        stmts.push(self.guarded_client_call(APPEND_LOG_METHOD, Expr::string(STARTUP_MARKER)));
        stmts
    }

    /// `global.<binding> = <binding>;`
    pub(crate) fn build_client_install(&self) -> Stmt {
        Expr::Assign {
            target: Box::new(self.global_client()),
            value: Box::new(Expr::ident(self.binding.as_str())),
        }
        .into_stmt()
    }

    fn global_client(&self) -> Expr {
        Expr::member(Expr::ident(GLOBAL_OBJECT), self.binding.as_str())
    }

    /// `global.<binding> && global.<binding>.<method>(<argument>);`
    fn guarded_client_call(&self, method: &str, argument: Expr) -> Stmt {
        Expr::and(
            self.global_client(),
            Expr::call(Expr::member(self.global_client(), method), vec![argument]),
        )
        .into_stmt()
    }
}
