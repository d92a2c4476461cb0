//! One tracked action, built fresh per injection site.

use serde::{Deserialize, Serialize};

use crate::constants::FUNCTION_ELEMENT_KIND;

/// A structured description of one tracked action.
///
/// Field names on the wire follow the runtime client's record shape
/// (`fullFileName`, `elementType`, `nodeName`, `text`), which is also the
/// shape the build-time engine embeds as an object literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentationRecord {
    /// Path of the originating source file.
    #[serde(rename = "fullFileName", default)]
    pub source_locator: String,
    /// `"function"` for lifecycle hooks, otherwise the UI element tag name.
    #[serde(rename = "elementType", default)]
    pub element_kind: String,
    /// Hook name or attribute name being instrumented.
    #[serde(rename = "nodeName", default)]
    pub action_name: String,
    /// Whitespace-stripped inner text of the element (attributes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl InstrumentationRecord {
    /// Record for a component lifecycle hook.
    pub fn lifecycle(source_locator: impl Into<String>, hook: impl Into<String>) -> Self {
        Self {
            source_locator: source_locator.into(),
            element_kind: FUNCTION_ELEMENT_KIND.to_string(),
            action_name: hook.into(),
            text: None,
        }
    }

    /// Record for an interaction attribute on a UI element.
    pub fn interaction(
        source_locator: impl Into<String>,
        element: impl Into<String>,
        attribute: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            source_locator: source_locator.into(),
            element_kind: element.into(),
            action_name: attribute.into(),
            text: Some(text.into()),
        }
    }

    /// Whether this record describes a lifecycle hook.
    pub fn is_lifecycle(&self) -> bool {
        self.element_kind == FUNCTION_ELEMENT_KIND
    }

    /// Literal fields in embedding order: `(key, value)`.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("fullFileName", self.source_locator.as_str()),
            ("elementType", self.element_kind.as_str()),
            ("nodeName", self.action_name.as_str()),
        ];
        if let Some(ref text) = self.text {
            fields.push(("text", text.as_str()));
        }
        fields
    }
}
