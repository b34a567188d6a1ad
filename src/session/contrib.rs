//! Host-supplied field sources, run when a send starts.

use crate::payload::FormPayload;

/// Capability: add fields to the payload before it is rendered.
pub trait ContributesFields {
    fn contribute(&self, payload: &mut FormPayload);
}

impl<F> ContributesFields for F
where
    F: Fn(&mut FormPayload),
{
    fn contribute(&self, payload: &mut FormPayload) {
        self(payload)
    }
}

/// One input of the host form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub value: String,
    pub input_type: String,
}

impl FormInput {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            input_type: "text".to_string(),
        }
    }

    pub fn with_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }
}

/// Copies the host form's inputs.
///
/// Submit and button inputs are skipped so the server still sees the
/// triggering element it expects, and so is the (always empty) file input.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    inputs: Vec<FormInput>,
    file_input: String,
}

impl FormFields {
    pub fn new(file_input: impl Into<String>, inputs: Vec<FormInput>) -> Self {
        Self {
            inputs,
            file_input: file_input.into(),
        }
    }
}

impl ContributesFields for FormFields {
    fn contribute(&self, payload: &mut FormPayload) {
        for input in &self.inputs {
            let skipped = matches!(input.input_type.as_str(), "submit" | "button")
                || input.name == self.file_input;
            if !skipped {
                payload.append(input.name.as_str(), input.value.as_str());
            }
        }
    }
}

/// The control the server should treat as having triggered the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggeringElement {
    pub name: String,
    pub value: String,
}

impl ContributesFields for TriggeringElement {
    fn contribute(&self, payload: &mut FormPayload) {
        payload.append("_triggering_element_name", self.name.as_str());
        payload.append("_triggering_element_value", self.value.as_str());
    }
}

/// Page bookkeeping the server uses to avoid duplicate ids and to skip
/// assets the page already loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub html_ids: Vec<String>,
    pub theme: String,
    pub theme_token: String,
    pub css: Vec<String>,
    pub js: Vec<String>,
}

impl ContributesFields for PageState {
    fn contribute(&self, payload: &mut FormPayload) {
        payload.append("ajax_html_ids[]", self.html_ids.join(","));
        payload.append("ajax_page_state[theme]", self.theme.as_str());
        payload.append("ajax_page_state[theme_token]", self.theme_token.as_str());
        for key in &self.css {
            payload.append(format!("ajax_page_state[css][{}]", key), "1");
        }
        for key in &self.js {
            payload.append(format!("ajax_page_state[js][{}]", key), "1");
        }
    }
}
