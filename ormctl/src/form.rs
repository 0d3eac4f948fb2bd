//! Form runtime implemented by generated form types
//!
//! `ormctl form:generate` writes one `<Model>Type.rs` per table. Each file
//! defines a unit struct implementing [`FormType`]:
//!
//! ```ignore
//! use ormctl::form::{FieldKind, FormBuilder, FormField, FormOptions, FormType};
//!
//! pub struct BookType;
//!
//! impl FormType for BookType {
//!     fn build_form(&self, builder: &mut FormBuilder) {
//!         builder.add(FormField::new("title", FieldKind::Text).required());
//!     }
//!
//!     fn configure_options(&self, options: &mut FormOptions) {
//!         options.data_class = Some("crate::models::Book");
//!     }
//!
//!     fn block_prefix(&self) -> &'static str {
//!         "book"
//!     }
//! }
//! ```

/// Widget kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Textarea,
    Integer,
    Number,
    Checkbox,
    Date,
    DateTime,
    Time,
    /// One of a fixed set of values
    Choice(&'static [&'static str]),
    /// Reference to another model by name
    Model(&'static str),
    File,
}

/// One field of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FormField {
    /// An optional field
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Collects fields in declaration order
#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    fields: Vec<FormField>,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field
    pub fn add(&mut self, field: FormField) -> &mut Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Options a form type sets on its form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormOptions {
    /// Path of the model the form maps to
    pub data_class: Option<&'static str>,
}

/// A form definition for one model
pub trait FormType {
    /// Add the fields of the form
    fn build_form(&self, builder: &mut FormBuilder);

    /// Adjust form options
    fn configure_options(&self, _options: &mut FormOptions) {}

    /// Prefix used for field names when the form is rendered
    fn block_prefix(&self) -> &'static str;

    /// Build the fields and options in one go
    fn build(&self) -> (FormBuilder, FormOptions) {
        let mut builder = FormBuilder::new();
        let mut options = FormOptions::default();
        self.build_form(&mut builder);
        self.configure_options(&mut options);
        (builder, options)
    }
}
