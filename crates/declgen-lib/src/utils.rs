//! Identifier-case helpers.

/// Convert PascalCase (or any identifier) to lowerCamelCase.
///
/// Only the first character is folded; the rest of the identifier is kept
/// as written, matching how property names surface in the output.
///
/// # Examples
/// ```
/// use declgen_lib::utils::to_lower_camel;
/// assert_eq!(to_lower_camel("FooBar"), "fooBar");
/// assert_eq!(to_lower_camel("fooBar"), "fooBar");
/// assert_eq!(to_lower_camel("A"), "a");
/// ```
pub fn to_lower_camel(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
