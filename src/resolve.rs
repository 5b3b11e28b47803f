use crate::error::RenderError;
use serde_json::Value;

/// Resolve a dotted identifier path against a hierarchical value.
///
/// Each segment is looked up as a named key on the current value; an empty
/// path yields `root` unchanged. There is no numeric indexing and no
/// coercion: a segment that lands on anything without that key (a missing
/// entry, a scalar, a sequence, or null) is a `RenderError::Resolution`
/// pointing at the offending segment.
pub fn resolve<'a>(root: &'a Value, path: &[String]) -> Result<&'a Value, RenderError> {
    let mut current = root;
    for (i, segment) in path.iter().enumerate() {
        let next = match current {
            Value::Object(entries) => entries.get(segment),
            _ => None,
        };
        current = next.ok_or_else(|| RenderError::Resolution {
            path: path.to_vec(),
            failed_at: i,
        })?;
    }
    Ok(current)
}
