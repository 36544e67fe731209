//! Deferred-binding expressions.
//!
//! Inside a pipeline, a job field can reference a value that only the
//! enclosing pipeline knows, using the `${{ <namespace>.<path> }}` syntax.
//! For example `${{parent.inputs.metric}}` refers to the `metric` input of the
//! parent pipeline.  Such values cannot be validated at configuration time and
//! are carried through verbatim.

/// Namespace that refers to the enclosing pipeline.
pub const PARENT_NAMESPACE: &str = "parent";

const OPEN: &str = "${{";
const CLOSE: &str = "}}";

/// Returns `true` if `value` is a single binding expression whose first path
/// segment is one of `namespaces`.
///
/// An empty `namespaces` slice accepts any namespace.  Surrounding whitespace
/// and whitespace just inside the braces are ignored; the path itself must not
/// contain whitespace or nested braces.
pub fn is_data_binding_expression(value: &str, namespaces: &[&str]) -> bool {
    let Some(inner) = value
        .trim()
        .strip_prefix(OPEN)
        .and_then(|rest| rest.strip_suffix(CLOSE))
    else {
        return false;
    };

    let path = inner.trim();
    if path.is_empty()
        || path.chars().any(char::is_whitespace)
        || path.contains('{')
        || path.contains('}')
    {
        return false;
    }

    if namespaces.is_empty() {
        return true;
    }

    let head = path.split('.').next().unwrap_or_default();
    namespaces.contains(&head)
}

/// Shorthand for [`is_data_binding_expression`] restricted to the
/// [`PARENT_NAMESPACE`].
pub fn is_parent_binding(value: &str) -> bool {
    is_data_binding_expression(value, &[PARENT_NAMESPACE])
}
