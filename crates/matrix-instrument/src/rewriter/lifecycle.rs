//! Lifecycle pass: mount/unmount logging on component classes.

use matrix_core::config::LifecycleConfig;
use matrix_core::constants::LIFECYCLE_HOOKS;
use matrix_core::events::types::HookInstrumentedEvent;
use matrix_core::InstrumentationRecord;

use super::marks::TraversalMarks;
use super::{FileReport, PassContext};
use crate::ast::{walk_program, Class, ClassMember, ClassMethod, Program, TreeBuilder, VisitMut};
use crate::classifier;

struct LifecyclePass<'a, 'p> {
    ctx: &'a PassContext<'p>,
    gate: &'a LifecycleConfig,
    tree: &'a mut TreeBuilder,
    marks: TraversalMarks,
    report: &'a mut FileReport,
}

pub(crate) fn run(
    program: &mut Program,
    ctx: &PassContext<'_>,
    gate: &LifecycleConfig,
    tree: &mut TreeBuilder,
    report: &mut FileReport,
) {
    let mut pass = LifecyclePass {
        ctx,
        gate,
        tree,
        marks: TraversalMarks::new(),
        report,
    };
    walk_program(&mut pass, program);
}

impl VisitMut for LifecyclePass<'_, '_> {
    fn visit_class(&mut self, class: &mut Class) {
        if !self.marks.mark_processed(class.id) {
            return;
        }
        if !classifier::is_component_class(class) || !self.gate.admits(class.name.as_deref()) {
            return;
        }
        for hook in LIFECYCLE_HOOKS {
            self.instrument_hook(class, hook);
        }
    }
}

impl LifecyclePass<'_, '_> {
    fn instrument_hook(&mut self, class: &mut Class, hook: &str) {
        let record = InstrumentationRecord::lifecycle(self.ctx.file, hook);
        let binding = self.ctx.synth.binding();

        let inserted = match find_hook(&mut class.body, hook) {
            Some(method) => {
                if method
                    .body
                    .last()
                    .and_then(|last| classifier::logged_action(last, binding))
                    == Some(hook)
                {
                    return;
                }
                method.body.push(self.ctx.synth.build_log_statement(&record));
                self.report.hooks_appended += 1;
                false
            }
            None => {
                let method = self.ctx.synth.build_hook_method(self.tree, &record);
                class.body.insert(0, method);
                self.report.hooks_inserted += 1;
                true
            }
        };

        tracing::trace!(
            file = self.ctx.file,
            class = class.name.as_deref().unwrap_or("<anonymous>"),
            hook,
            inserted,
            "lifecycle hook instrumented"
        );
        self.ctx.events.emit_hook_instrumented(&HookInstrumentedEvent {
            file: self.ctx.file.to_string(),
            class_name: class.name.clone(),
            hook: hook.to_string(),
            inserted,
        });
    }
}

/// The class's own instance method named `hook`, if any.
fn find_hook<'c>(members: &'c mut [ClassMember], hook: &str) -> Option<&'c mut ClassMethod> {
    members.iter_mut().find_map(|member| match member {
        ClassMember::Method(method) if method.name == hook && method.is_instance_method() => {
            Some(method)
        }
        _ => None,
    })
}
