//! Naming utilities for code generation

use heck::{ToPascalCase, ToSnakeCase};

/// Canonical, code-safe name of a table (`book_author` -> `BookAuthor`).
///
/// Names that would start with a digit get a leading underscore.
pub fn canonical_name(table_name: &str) -> String {
    let name = table_name.to_pascal_case();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name
    }
}

/// Name of the form type generated for a table (`Book` + `Type` -> `BookType`)
pub fn form_type_name(canonical: &str, suffix: &str) -> String {
    format!("{}{}", canonical, suffix)
}

/// File name of the artifact holding a form type
pub fn form_type_file_name(canonical: &str, suffix: &str) -> String {
    format!("{}.rs", form_type_name(canonical, suffix))
}

/// Convert a column name to a form field name (snake_case)
pub fn to_field_name(column_name: &str) -> String {
    column_name.to_snake_case()
}

/// Prefix used by a form when rendering field names (`BookAuthor` -> `book_author`)
pub fn block_prefix(canonical: &str) -> String {
    canonical.trim_start_matches('_').to_snake_case()
}

/// Render a string as a Rust string literal
pub fn string_literal(value: &str) -> String {
    format!("{:?}", value)
}

/// Strip quotes around an enum value (`'DRAFT'` -> `DRAFT`)
pub fn clean_enum_value(value: &str) -> &str {
    value.trim_matches('\'').trim_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("book"), "Book");
        assert_eq!(canonical_name("book_author"), "BookAuthor");
        assert_eq!(canonical_name("Book"), "Book");
        assert_eq!(canonical_name("order-items"), "OrderItems");
        assert_eq!(canonical_name("2fa_codes"), "_2faCodes");
    }

    #[test]
    fn test_form_type_names() {
        assert_eq!(form_type_name("Book", "Type"), "BookType");
        assert_eq!(form_type_file_name("BookAuthor", "Type"), "BookAuthorType.rs");
        assert_eq!(form_type_file_name("Book", "Form"), "BookForm.rs");
    }

    #[test]
    fn test_to_field_name() {
        assert_eq!(to_field_name("authorId"), "author_id");
        assert_eq!(to_field_name("first_name"), "first_name");
        assert_eq!(to_field_name("PublishedAt"), "published_at");
    }

    #[test]
    fn test_block_prefix() {
        assert_eq!(block_prefix("BookAuthor"), "book_author");
        assert_eq!(block_prefix("_2faCodes"), "2fa_codes");
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("title"), "\"title\"");
        assert_eq!(string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_clean_enum_value() {
        assert_eq!(clean_enum_value("'DRAFT'"), "DRAFT");
        assert_eq!(clean_enum_value("PUBLISHED"), "PUBLISHED");
    }
}
