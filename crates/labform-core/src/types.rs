//! Data model for investigation records and their form-layout rules.
//!
//! Rules arrive from the form-rendering side already parsed; records are
//! owned by the caller and only ever annotated, never created or removed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ValidationFault;

/// Wire tag of the one field kind subject to content checks.
pub const FREE_TEXT_TAG: &str = "EditText";

/// Key under which a form response carries its ordered rule sequence.
pub const FORM_LAYOUT_KEY: &str = "formLayout";

/// Values entered for a record, keyed by field id.
pub type EnteredValues = BTreeMap<String, Value>;

/// UI kind of a form field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    /// Free-text entry, the only kind with length/range/content/unit checks
    FreeText,

    /// Any other widget, carried through with its original tag
    Other(String),
}

impl FieldKind {
    pub fn is_free_text(&self) -> bool {
        matches!(self, FieldKind::FreeText)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::FreeText => FREE_TEXT_TAG,
            FieldKind::Other(tag) => tag,
        }
    }
}

impl From<String> for FieldKind {
    fn from(tag: String) -> Self {
        if tag == FREE_TEXT_TAG {
            FieldKind::FreeText
        } else {
            FieldKind::Other(tag)
        }
    }
}

impl From<&str> for FieldKind {
    fn from(tag: &str) -> Self {
        FieldKind::from(tag.to_string())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::FreeText => FREE_TEXT_TAG.to_string(),
            FieldKind::Other(tag) => tag,
        }
    }
}

/// Declarative description of one form field and its constraints.
///
/// Absent constraints mean "not constrained"; a zero is a real bound.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldRule {
    /// Widget kind
    #[serde(rename = "viewType")]
    pub kind: FieldKind,

    /// Key correlating this rule to an entered value
    #[serde(rename = "id")]
    pub field_id: String,

    /// Display label, only used when composing messages
    #[serde(default)]
    pub title: String,

    #[serde(rename = "isMandatory", default)]
    pub mandatory: bool,

    #[serde(rename = "minLength", default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Accepted from schema producers but not consulted by any check
    #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(rename = "minValue", default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    #[serde(rename = "maxValue", default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    /// Exact number of characters the value must render to
    #[serde(rename = "contentLength", default, skip_serializing_if = "Option::is_none")]
    pub content_length: Option<usize>,

    /// Selectable units; when non-empty a `<id>_unit` entry is required
    #[serde(rename = "unitList", default, skip_serializing_if = "Option::is_none")]
    pub unit_list: Option<Vec<Value>>,
}

impl FieldRule {
    /// Create an unconstrained, optional rule.
    pub fn new(kind: impl Into<FieldKind>, field_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            field_id: field_id.into(),
            title: title.into(),
            mandatory: false,
            min_length: None,
            max_length: None,
            min_value: None,
            max_value: None,
            content_length: None,
            unit_list: None,
        }
    }

    /// Shorthand for a free-text rule.
    pub fn free_text(field_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(FieldKind::FreeText, field_id, title)
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_min_value(mut self, min_value: f64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn with_content_length(mut self, content_length: usize) -> Self {
        self.content_length = Some(content_length);
        self
    }

    pub fn with_units(mut self, units: Vec<Value>) -> Self {
        self.unit_list = Some(units);
        self
    }
}

/// Loosely-typed form response attached to a record by the form renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct FormResponse(pub Value);

impl FormResponse {
    /// Build a response exposing the given rules in order.
    pub fn from_rules(rules: Vec<FieldRule>) -> Self {
        // FieldRule has only string keys and plain values, so this cannot fail
        let layout = rules
            .into_iter()
            .map(|rule| serde_json::to_value(rule).expect("field rule serializes to JSON"))
            .collect();
        let mut body = serde_json::Map::new();
        body.insert(FORM_LAYOUT_KEY.to_string(), Value::Array(layout));
        Self(Value::Object(body))
    }

    /// Extract the ordered rule sequence.
    ///
    /// Returns `Ok(None)` when the response carries no layout at all, and a
    /// structural fault when a layout is present but is not a rule list.
    pub fn form_layout(&self) -> Result<Option<Vec<FieldRule>>, ValidationFault> {
        match self.0.get(FORM_LAYOUT_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(layout) => Vec::<FieldRule>::deserialize(layout)
                .map(Some)
                .map_err(|e| ValidationFault::Structure(format!("{}: {}", FORM_LAYOUT_KEY, e))),
        }
    }
}

fn default_error_flag() -> bool {
    true
}

/// One investigation (lab test) entry.
///
/// `error_flag` reads inverted: `true` means no error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationRecord {
    pub test_name: String,

    #[serde(default)]
    pub recommended_by: String,

    #[serde(default)]
    pub recommended_on: String,

    /// `None` means nothing was entered at all
    #[serde(default)]
    pub entered_values: Option<EnteredValues>,

    #[serde(default = "default_error_flag")]
    pub error_flag: bool,

    #[serde(default)]
    pub error_message: Option<String>,

    /// Records without an id skip the per-field pass
    #[serde(rename = "id", default)]
    pub record_id: Option<String>,

    #[serde(default)]
    pub dropdown_expanded: bool,

    #[serde(default)]
    pub form_response: Option<FormResponse>,
}

impl InvestigationRecord {
    pub fn new(
        test_name: impl Into<String>,
        recommended_by: impl Into<String>,
        recommended_on: impl Into<String>,
    ) -> Self {
        Self {
            test_name: test_name.into(),
            recommended_by: recommended_by.into(),
            recommended_on: recommended_on.into(),
            entered_values: None,
            error_flag: true,
            error_message: None,
            record_id: None,
            dropdown_expanded: false,
            form_response: None,
        }
    }

    pub fn with_values(mut self, values: EnteredValues) -> Self {
        self.entered_values = Some(values);
        self
    }

    pub fn with_id(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }

    pub fn with_rules(mut self, rules: Vec<FieldRule>) -> Self {
        self.form_response = Some(FormResponse::from_rules(rules));
        self
    }

    pub fn with_form_response(mut self, response: FormResponse) -> Self {
        self.form_response = Some(response);
        self
    }

    /// True when at least one value was entered.
    pub fn has_entered_results(&self) -> bool {
        self.entered_values
            .as_ref()
            .is_some_and(|values| !values.is_empty())
    }

    /// True when a value map exists but holds nothing.
    pub fn has_empty_values(&self) -> bool {
        self.entered_values
            .as_ref()
            .is_some_and(|values| values.is_empty())
    }

    /// Look up the value entered for a field.
    pub fn value(&self, field_id: &str) -> Option<&Value> {
        self.entered_values.as_ref()?.get(field_id)
    }
}

/// Replacement for a record's error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageUpdate {
    Set(String),
    Clear,
}

/// The mutations one validation step wants applied to a record.
///
/// `None` fields leave the record untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub message: Option<MessageUpdate>,
    pub error_flag: Option<bool>,
    pub toggle_dropdown: bool,
}

impl Annotation {
    /// Error message set, flag cleared.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            message: Some(MessageUpdate::Set(message.into())),
            error_flag: Some(false),
            toggle_dropdown: false,
        }
    }

    /// Message cleared, flag set.
    pub fn accepted() -> Self {
        Self {
            message: Some(MessageUpdate::Clear),
            error_flag: Some(true),
            toggle_dropdown: false,
        }
    }

    /// Only the flag changes.
    pub fn flag(error_flag: bool) -> Self {
        Self {
            error_flag: Some(error_flag),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(MessageUpdate::Set(message.into()));
        self
    }

    pub fn toggled(mut self) -> Self {
        self.toggle_dropdown = !self.toggle_dropdown;
        self
    }

    /// True when applying this would change nothing.
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.error_flag.is_none() && !self.toggle_dropdown
    }

    /// Sequence `later` after `self`, as if both were applied in order.
    pub fn then(self, later: Annotation) -> Annotation {
        Annotation {
            message: later.message.or(self.message),
            error_flag: later.error_flag.or(self.error_flag),
            toggle_dropdown: self.toggle_dropdown != later.toggle_dropdown,
        }
    }

    pub fn apply(self, record: &mut InvestigationRecord) {
        match self.message {
            Some(MessageUpdate::Set(message)) => record.error_message = Some(message),
            Some(MessageUpdate::Clear) => record.error_message = None,
            None => {}
        }
        if let Some(flag) = self.error_flag {
            record.error_flag = flag;
        }
        if self.toggle_dropdown {
            record.dropdown_expanded = !record.dropdown_expanded;
        }
    }
}
