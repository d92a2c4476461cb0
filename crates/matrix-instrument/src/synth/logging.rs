use matrix_core::InstrumentationRecord;

use super::{Synthesizer, APPEND_LOG_METHOD, GLOBAL_OBJECT, WRAPPER_ARGS, WRAPPER_CALLBACK};
use crate::ast::{ArrowBody, ClassMember, Expr, Param, Property, Stmt, TreeBuilder, VarKind};

impl Synthesizer {
    /// `{ fullFileName: "...", elementType: "...", nodeName: "...", text?: "..." }`
    pub fn record_literal(&self, record: &InstrumentationRecord) -> Expr {
        Expr::Object {
            properties: record
                .fields()
                .into_iter()
                .map(|(key, value)| Property {
                    key: key.to_string(),
                    value: Expr::string(value),
                })
                .collect(),
        }
    }

    /// `global.<binding>?.appendLog({...})`
    pub fn build_log_call(&self, record: &InstrumentationRecord) -> Expr {
        let client = Expr::member(Expr::ident(GLOBAL_OBJECT), self.binding.as_str());
        Expr::call(
            Expr::optional_member(client, APPEND_LOG_METHOD),
            vec![self.record_literal(record)],
        )
    }

    pub fn build_log_statement(&self, record: &InstrumentationRecord) -> Stmt {
        self.build_log_call(record).into_stmt()
    }

    /// A hook method whose whole body is the log statement.
    pub fn build_hook_method(
        &self,
        tree: &mut TreeBuilder,
        record: &InstrumentationRecord,
    ) -> ClassMember {
        tree.method(&record.action_name, vec![self.build_log_statement(record)])
    }

    /// ```text
    /// (...__matrixArgs) => {
    ///   const __matrixCallback = <original>;
    ///   global.<binding>?.appendLog({...});
    ///   return __matrixCallback && __matrixCallback(...__matrixArgs);
    /// }
    /// ```
    /// An absent original binds `undefined`, so the wrapper returns it.
    pub fn build_callback_wrapper(
        &self,
        record: &InstrumentationRecord,
        original: Option<Expr>,
    ) -> Expr {
        let callback = Expr::ident(WRAPPER_CALLBACK);
        let forward = Expr::call(
            callback.clone(),
            vec![Expr::Spread {
                argument: Box::new(Expr::ident(WRAPPER_ARGS)),
            }],
        );
        Expr::Arrow {
            params: vec![Param::rest(WRAPPER_ARGS)],
            body: ArrowBody::Block {
                body: vec![
                    Stmt::VarDecl {
                        kind: VarKind::Const,
                        name: WRAPPER_CALLBACK.to_string(),
                        init: Some(original.unwrap_or_else(|| Expr::ident("undefined"))),
                    },
                    self.build_log_statement(record),
                    Stmt::Return {
                        argument: Some(Expr::and(callback, forward)),
                    },
                ],
            },
        }
    }
}
