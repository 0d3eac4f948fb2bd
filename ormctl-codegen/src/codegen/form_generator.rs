//! Form type generator - renders a form type source file from table metadata

use tracing::debug;

use crate::parser::TableMetadata;

use super::field_resolver::FieldResolver;
use super::naming::{block_prefix, form_type_name, string_literal, to_field_name};

/// Naming inputs for rendering
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    /// Suffix appended to the canonical table name
    pub type_suffix: &'a str,

    /// Module path holding the model structs
    pub models_module: &'a str,
}

/// Render the form type for a table.
///
/// Output depends only on the table metadata and `options`; rendering the
/// same table twice gives identical text.
pub fn render_form_type(table: &TableMetadata, options: &RenderOptions<'_>) -> String {
    let canonical = table.canonical_name();
    let type_name = form_type_name(&canonical, options.type_suffix);
    debug!("Rendering form type {} for table {}", type_name, table.name);

    let fields = render_fields(table);

    let mut code = String::new();

    code.push_str(&format!("// Form type for table `{}`.\n", table.name));
    code.push_str("// Generated by `ormctl form:generate`; rerun with --force to overwrite.\n\n");

    if fields.is_empty() {
        code.push_str("use ormctl::form::{FormBuilder, FormOptions, FormType};\n\n");
    } else {
        code.push_str(
            "use ormctl::form::{FieldKind, FormBuilder, FormField, FormOptions, FormType};\n\n",
        );
    }

    let data_class = format!(
        "{}::{}",
        options.models_module.trim_end_matches("::"),
        canonical
    );

    code.push_str(&format!("/// Form for `{}`\n", data_class));
    code.push_str("#[derive(Debug, Clone, Copy, Default)]\n");
    code.push_str(&format!("pub struct {};\n\n", type_name));

    code.push_str(&format!("impl FormType for {} {{\n", type_name));

    if fields.is_empty() {
        code.push_str("    fn build_form(&self, _builder: &mut FormBuilder) {}\n");
    } else {
        code.push_str("    fn build_form(&self, builder: &mut FormBuilder) {\n");
        for field in &fields {
            code.push_str(field);
        }
        code.push_str("    }\n");
    }
    code.push('\n');

    code.push_str("    fn configure_options(&self, options: &mut FormOptions) {\n");
    code.push_str(&format!(
        "        options.data_class = Some({});\n",
        string_literal(&data_class)
    ));
    code.push_str("    }\n\n");

    code.push_str("    fn block_prefix(&self) -> &'static str {\n");
    code.push_str(&format!(
        "        {}\n",
        string_literal(&block_prefix(&canonical))
    ));
    code.push_str("    }\n");
    code.push_str("}\n");

    code
}

/// One `builder.add(...)` line per non primary-key column
fn render_fields(table: &TableMetadata) -> Vec<String> {
    table
        .columns
        .iter()
        .filter(|col| !table.is_primary_key_column(&col.name))
        .map(|col| {
            let kind = FieldResolver::resolve(col, table);
            let mut line = String::new();

            if let Some(comment) = col.comment.as_deref().filter(|c| !c.trim().is_empty()) {
                let comment = comment.split_whitespace().collect::<Vec<_>>().join(" ");
                line.push_str(&format!("        // {}\n", comment));
            }

            let required = if col.is_required() { ".required()" } else { "" };
            line.push_str(&format!(
                "        builder.add(FormField::new({}, {}){});\n",
                string_literal(&to_field_name(&col.name)),
                kind.to_code_string(),
                required
            ));
            line
        })
        .collect()
}
