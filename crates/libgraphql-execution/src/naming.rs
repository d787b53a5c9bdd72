/// Converts an internal snake_case name into its GraphQL-facing camelCase
/// form (`max_age` -> `maxAge`). Names that are already camelCase pass
/// through unchanged, apart from their first letter being lowercased.
pub(crate) fn camelize(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut upcase_next = false;
    for c in name.trim().trim_start_matches('@').chars() {
        if c == '_' || c == '-' {
            upcase_next = !result.is_empty();
            continue;
        }
        if upcase_next {
            result.extend(c.to_uppercase());
            upcase_next = false;
        } else if result.is_empty() {
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// The GraphQL-facing name of a directive kind. A trailing `_directive`
/// (or `Directive`) suffix is not part of the name.
pub(crate) fn directive_gql_name(name: &str) -> String {
    let camelized = camelize(name);
    match camelized.strip_suffix("Directive") {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => camelized,
    }
}
