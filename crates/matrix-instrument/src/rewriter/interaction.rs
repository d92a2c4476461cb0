//! Interaction pass: wrap trackable handler attributes on UI elements.

use matrix_core::events::types::AttributeWrappedEvent;
use matrix_core::InstrumentationRecord;
use smallvec::SmallVec;

use super::marks::TraversalMarks;
use super::{FileReport, PassContext};
use crate::ast::{
    collect_jsx_text, walk_program, JsxAttrItem, JsxAttrValue, JsxElement, Program, VisitMut,
};
use crate::classifier;

struct InteractionPass<'a, 'p> {
    ctx: &'a PassContext<'p>,
    marks: TraversalMarks,
    report: &'a mut FileReport,
}

pub(crate) fn run(program: &mut Program, ctx: &PassContext<'_>, report: &mut FileReport) {
    let mut pass = InteractionPass {
        ctx,
        marks: TraversalMarks::new(),
        report,
    };
    walk_program(&mut pass, program);
}

impl VisitMut for InteractionPass<'_, '_> {
    fn visit_jsx_element(&mut self, element: &mut JsxElement) {
        if !self.marks.mark_processed(element.id) {
            return;
        }

        let trackable: SmallVec<[usize; 4]> = element
            .attributes
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                JsxAttrItem::Attribute(attr)
                    if classifier::is_trackable_attribute_name(&attr.name) =>
                {
                    Some(index)
                }
                _ => None,
            })
            .collect();
        if trackable.is_empty() {
            return;
        }

        let text = element_text(element);
        let binding = self.ctx.synth.binding();

        for index in trackable {
            let JsxAttrItem::Attribute(attr) = &mut element.attributes[index] else {
                continue;
            };
            if self.marks.is_wrapped(attr.id) {
                continue;
            }
            if let Some(JsxAttrValue::Container(container)) = &mut attr.value {
                let already_wrapped = self.marks.is_wrapped(container.id)
                    || container
                        .expression
                        .as_ref()
                        .is_some_and(|expr| classifier::is_callback_wrapper(expr, binding));
                if !already_wrapped {
                    let record = InstrumentationRecord::interaction(
                        self.ctx.file,
                        element.name.as_str(),
                        attr.name.as_str(),
                        text.as_str(),
                    );
                    let original = container.expression.take();
                    container.expression =
                        Some(self.ctx.synth.build_callback_wrapper(&record, original));
                    self.report.attributes_wrapped += 1;

                    tracing::trace!(
                        file = self.ctx.file,
                        element = %element.name,
                        attribute = %attr.name,
                        "handler wrapped"
                    );
                    self.ctx.events.emit_attribute_wrapped(&AttributeWrappedEvent {
                        file: self.ctx.file.to_string(),
                        element: element.name.clone(),
                        attribute: attr.name.clone(),
                    });
                }
                self.marks.mark_wrapped(container.id);
            }
            self.marks.mark_wrapped(attr.id);
        }
    }
}

/// All text under the element's children with every whitespace character removed.
fn element_text(element: &JsxElement) -> String {
    let mut raw = String::new();
    collect_jsx_text(&element.children, &mut raw);
    raw.retain(|c| !c.is_whitespace());
    raw
}
