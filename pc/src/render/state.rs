//! Per-view render state
//!
//! A `RenderState` lives as long as the view that opened a template. It owns the
//! current values, remembers whether the example was loaded, and tracks an
//! in-progress custom value for picklist variables.

use tracing::{debug, info};

use super::error::RenderError;
use super::renderer;
use super::syntax::PlaceholderSyntax;
use crate::domain::{FillStatus, PromptTemplate, Values, VariableSpec};

/// Free-text value being typed for a picklist variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomDraft {
    pub name: String,
    pub text: String,
}

/// Current values for one open template
#[derive(Debug, Clone)]
pub struct RenderState<'a> {
    template: &'a PromptTemplate,
    syntax: PlaceholderSyntax,
    values: Values,
    using_example: bool,
    custom: Option<CustomDraft>,
}

impl<'a> RenderState<'a> {
    /// Open a template with every variable empty
    pub fn new(template: &'a PromptTemplate) -> Self {
        debug!(id = %template.id, "RenderState::new: called");
        Self {
            template,
            syntax: template.resolved_syntax(),
            values: renderer::clear(&template.variables),
            using_example: false,
            custom: None,
        }
    }

    /// Force a placeholder convention instead of the template's own
    pub fn with_syntax(mut self, syntax: PlaceholderSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn template(&self) -> &'a PromptTemplate {
        self.template
    }

    pub fn syntax(&self) -> PlaceholderSyntax {
        self.syntax
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Current value of a variable, empty if unset
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn using_example(&self) -> bool {
        self.using_example
    }

    pub fn custom(&self) -> Option<&CustomDraft> {
        self.custom.as_ref()
    }

    fn spec(&self, name: &str) -> Result<&'a VariableSpec, RenderError> {
        self.template
            .variable(name)
            .ok_or_else(|| RenderError::UnknownVariable(name.to_string()))
    }

    /// Set a variable from user input
    ///
    /// Values of picklist, number and url variables are stored trimmed.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), RenderError> {
        let mut value = value.into();
        debug!(%name, value_len = value.len(), "RenderState::set: called");
        let spec = self.spec(name)?;
        if !spec.kind.is_free_text() {
            value = value.trim().to_string();
        }
        if !spec.accepts(&value) {
            debug!(%name, "RenderState::set: value rejected by variable kind");
            return Err(RenderError::InvalidValue {
                name: name.to_string(),
                kind: spec.kind.to_string(),
                value,
            });
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Replace all values with the template's example
    ///
    /// Returns false and changes nothing when the template has no example.
    pub fn load_example(&mut self) -> bool {
        debug!(id = %self.template.id, "RenderState::load_example: called");
        let Some(example) = renderer::load_example(self.template) else {
            return false;
        };
        let mut values = renderer::clear(&self.template.variables);
        for (name, value) in example {
            if let Some(slot) = values.get_mut(&name) {
                *slot = value;
            }
        }
        self.values = values;
        self.using_example = true;
        self.custom = None;
        info!(id = %self.template.id, "Loaded example values");
        true
    }

    /// Empty every variable
    pub fn clear(&mut self) {
        debug!(id = %self.template.id, "RenderState::clear: called");
        self.values = renderer::clear(&self.template.variables);
        self.using_example = false;
        self.custom = None;
    }

    /// Start typing a custom value for a picklist variable
    ///
    /// The draft starts from the current value. Opening a draft for another
    /// variable discards the previous one.
    pub fn begin_custom(&mut self, name: &str) -> Result<(), RenderError> {
        debug!(%name, "RenderState::begin_custom: called");
        let spec = self.spec(name)?;
        if !spec.kind.is_picklist() {
            return Err(RenderError::NotCustomizable(name.to_string()));
        }
        self.custom = Some(CustomDraft {
            name: name.to_string(),
            text: self.value(name).to_string(),
        });
        Ok(())
    }

    pub fn edit_custom(&mut self, text: impl Into<String>) -> Result<(), RenderError> {
        let draft = self.custom.as_mut().ok_or(RenderError::NoCustomPending)?;
        draft.text = text.into();
        Ok(())
    }

    /// Store the draft as the variable's value, bypassing the option list
    ///
    /// Returns the name of the variable that was set.
    pub fn commit_custom(&mut self) -> Result<String, RenderError> {
        let draft = self.custom.take().ok_or(RenderError::NoCustomPending)?;
        debug!(name = %draft.name, "RenderState::commit_custom: called");
        self.values.insert(draft.name.clone(), draft.text);
        Ok(draft.name)
    }

    /// Drop the draft and keep the current value
    pub fn cancel_custom(&mut self) -> Result<(), RenderError> {
        debug!("RenderState::cancel_custom: called");
        self.custom.take().map(|_| ()).ok_or(RenderError::NoCustomPending)
    }

    /// Drop the draft and go back to the preset options with no selection
    pub fn leave_custom(&mut self) -> Result<(), RenderError> {
        let draft = self.custom.take().ok_or(RenderError::NoCustomPending)?;
        debug!(name = %draft.name, "RenderState::leave_custom: called");
        self.values.insert(draft.name, String::new());
        Ok(())
    }

    /// Content with current values substituted
    pub fn rendered(&self) -> String {
        renderer::render(&self.template.content, &self.template.variables, &self.values, self.syntax)
    }

    pub fn fill_status(&self) -> FillStatus {
        renderer::fill_status(&self.template.variables, &self.values)
    }

    /// Unfilled variables in declaration order
    pub fn pending(&self) -> Vec<&'a str> {
        let status = self.fill_status();
        self.template
            .variables
            .iter()
            .filter(|v| !status.get(&v.name).copied().unwrap_or(false))
            .map(|v| v.name.as_str())
            .collect()
    }

    /// Required variables that are still unfilled
    pub fn missing_required(&self) -> Vec<&'a VariableSpec> {
        let status = self.fill_status();
        self.template
            .variables
            .iter()
            .filter(|v| v.required && !status.get(&v.name).copied().unwrap_or(false))
            .collect()
    }
}
