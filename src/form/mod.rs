//! Declarative form helper.
//!
//! A form is an ordered list of [`Field`] descriptors laid out on a 1, 2 or 3
//! column grid. [`FormState`] keeps the edited values, the focused field and
//! validation errors; the shell renders it and feeds it keys.

use std::fmt;

use tracing::debug;

/// Select option: submitted value and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Input,
    /// Masked text input with a reveal toggle.
    Password,
    Select { options: Vec<SelectOption> },
    Textarea,
    Switch,
}

impl FieldKind {
    /// Kinds edited by typing.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FieldKind::Input | FieldKind::Password | FieldKind::Textarea
        )
    }

    /// Kinds that must be filled in on submit.
    pub fn is_required(&self) -> bool {
        matches!(self, FieldKind::Input | FieldKind::Textarea)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Bool(true) => f.write_str("True"),
            FieldValue::Bool(false) => f.write_str("False"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub default: Option<FieldValue>,
    pub disabled: bool,
}

impl Field {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            disabled: false,
        }
    }

    pub fn input(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Input)
    }

    pub fn password(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Password)
    }

    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self::new(name, FieldKind::Select { options })
    }

    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Textarea)
    }

    pub fn switch(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Switch)
    }

    pub fn default_text(mut self, value: impl Into<String>) -> Self {
        self.default = Some(FieldValue::Text(value.into()));
        self
    }

    pub fn default_on(mut self, on: bool) -> Self {
        self.default = Some(FieldValue::Bool(on));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn label(&self) -> String {
        label(&self.name)
    }

    /// Placeholder shown in an empty field, if the kind has one.
    pub fn placeholder(&self) -> Option<String> {
        let slug = slug(&self.name);
        match self.kind {
            FieldKind::Input => Some(format!("input {}", slug)),
            FieldKind::Password => Some("********".to_string()),
            FieldKind::Select { .. } => Some(format!("Choose {}", slug)),
            FieldKind::Textarea => Some(format!("textarea {}", slug)),
            FieldKind::Switch => None,
        }
    }

    /// Help line under the field.
    pub fn description(&self) -> String {
        match self.kind {
            FieldKind::Input => format!("This is input {}.", self.name),
            FieldKind::Password => "This is your password.".to_string(),
            FieldKind::Select { .. } => format!("Select your {}.", slug(&self.name)),
            FieldKind::Textarea => format!("This is your textarea {}.", self.name),
            FieldKind::Switch => format!("Enable {}.", slug(&self.name)),
        }
    }

    fn initial_value(&self) -> FieldValue {
        match (&self.kind, &self.default) {
            (FieldKind::Switch, Some(FieldValue::Bool(b))) => FieldValue::Bool(*b),
            (FieldKind::Switch, _) => FieldValue::Bool(false),
            (_, Some(FieldValue::Text(s))) => FieldValue::Text(s.clone()),
            _ => FieldValue::Text(String::new()),
        }
    }
}

/// `first_name` -> `First name`. Only the first underscore is replaced.
pub fn label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars)
            .collect::<String>()
            .replacen('_', " ", 1),
        None => String::new(),
    }
}

/// `Post Title` -> `post-title`. Only the first space is replaced.
fn slug(name: &str) -> String {
    name.to_lowercase().replacen(' ', "-", 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormLayout {
    #[default]
    Grid1,
    Grid2,
    Grid3,
}

impl FormLayout {
    pub fn columns(&self) -> usize {
        match self {
            FormLayout::Grid1 => 1,
            FormLayout::Grid2 => 2,
            FormLayout::Grid3 => 3,
        }
    }
}

/// Validation failure for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Submitted values in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValues(Vec<(String, FieldValue)>);

impl FormValues {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    title: String,
    fields: Vec<Field>,
    layout: FormLayout,
    values: Vec<FieldValue>,
    focus: usize,
    reveal_password: bool,
    errors: Vec<FieldError>,
}

impl FormState {
    pub fn new(title: impl Into<String>, fields: Vec<Field>, layout: FormLayout) -> Self {
        let values = fields.iter().map(Field::initial_value).collect();
        Self {
            title: title.into(),
            fields,
            layout,
            values,
            focus: 0,
            reveal_password: false,
            errors: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn layout(&self) -> FormLayout {
        self.layout
    }

    pub fn value(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    pub fn value_of(&self, name: &str) -> Option<&FieldValue> {
        let idx = self.fields.iter().position(|f| f.name == name)?;
        self.values.get(idx)
    }

    /// Overwrites a field value, e.g. when prefilling an edit dialog.
    pub fn set_value(&mut self, name: &str, value: FieldValue) {
        if let Some(idx) = self.fields.iter().position(|f| f.name == name) {
            self.values[idx] = value;
        }
    }

    /// Text to show for a field, honoring password masking and select labels.
    pub fn display_value(&self, index: usize) -> String {
        let (Some(field), Some(value)) = (self.fields.get(index), self.values.get(index)) else {
            return String::new();
        };
        match (&field.kind, value) {
            (FieldKind::Password, FieldValue::Text(s)) if !self.reveal_password => {
                "*".repeat(s.chars().count())
            }
            (FieldKind::Select { options }, FieldValue::Text(s)) => options
                .iter()
                .find(|o| &o.value == s)
                .map(|o| o.label.clone())
                .unwrap_or_default(),
            _ => value.to_string(),
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Option<&Field> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn is_password_revealed(&self) -> bool {
        self.reveal_password
    }

    pub fn toggle_reveal(&mut self) {
        self.reveal_password = !self.reveal_password;
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == name)
            .map(|e| e.message.as_str())
    }

    fn editable_focus(&mut self) -> Option<(&Field, &mut FieldValue)> {
        let field = self.fields.get(self.focus)?;
        if field.disabled {
            return None;
        }
        self.values.get_mut(self.focus).map(|v| (field, v))
    }

    /// Types a character into the focused text field.
    pub fn insert_char(&mut self, c: char) -> bool {
        match self.editable_focus() {
            Some((field, FieldValue::Text(s))) if field.kind.is_text() => {
                if c == '\n' && field.kind != FieldKind::Textarea {
                    return false;
                }
                s.push(c);
                true
            }
            _ => false,
        }
    }

    pub fn backspace(&mut self) -> bool {
        match self.editable_focus() {
            Some((field, FieldValue::Text(s))) if field.kind.is_text() => s.pop().is_some(),
            _ => false,
        }
    }

    /// Steps the focused select through its options. An unset select starts
    /// at the first option.
    pub fn cycle_option(&mut self, forward: bool) -> bool {
        let Some((field, FieldValue::Text(current))) = self.editable_focus() else {
            return false;
        };
        let FieldKind::Select { options } = &field.kind else {
            return false;
        };
        if options.is_empty() {
            return false;
        }
        let len = options.len();
        let next = match options.iter().position(|o| o.value == *current) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        *current = options[next].value.clone();
        true
    }

    pub fn toggle_switch(&mut self) -> bool {
        match self.editable_focus() {
            Some((field, FieldValue::Bool(b))) if field.kind == FieldKind::Switch => {
                *b = !*b;
                true
            }
            _ => false,
        }
    }

    /// Validates required fields and returns the values.
    ///
    /// Enabled input and textarea fields must not be blank. Errors are kept
    /// on the state for rendering until the next submit or cancel.
    pub fn submit(&mut self) -> Result<FormValues, Vec<FieldError>> {
        self.errors = self
            .fields
            .iter()
            .zip(&self.values)
            .filter(|(field, value)| {
                field.kind.is_required()
                    && !field.disabled
                    && value.as_text().is_none_or(|s| s.trim().is_empty())
            })
            .map(|(field, _)| FieldError {
                field: field.name.clone(),
                message: format!("{} is required.", field.label()),
            })
            .collect();

        if !self.errors.is_empty() {
            debug!(form = self.title.as_str(), errors = self.errors.len(), "form rejected");
            return Err(self.errors.clone());
        }
        debug!(form = self.title.as_str(), "form submitted");
        Ok(FormValues(
            self.fields
                .iter()
                .zip(&self.values)
                .map(|(f, v)| (f.name.clone(), v.clone()))
                .collect(),
        ))
    }

    /// Restores defaults and clears errors.
    pub fn cancel(&mut self) {
        self.values = self.fields.iter().map(Field::initial_value).collect();
        self.errors.clear();
        self.focus = 0;
        self.reveal_password = false;
    }
}
