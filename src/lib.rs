pub mod ast;
pub mod error;
pub mod from_json;
pub mod interpreter;
pub mod json;
pub mod resolve;
pub mod scope;
pub mod validate;

use serde_json::Value;

pub use ast::Node;
pub use error::{Feature, RenderError};
pub use from_json::from_json;
pub use scope::Scope;
pub use validate::{validate, ValidationError};

// ── Core API ───────────────────────────────────────────────────────

/// Render a pre-parsed template tree against a data context.
///
/// `root` is the tree the host parser produced (`None` for the wire
/// format's `null` tree, which renders as `""`). `data` is the hierarchical
/// value `.field` paths resolve against; `scope` is the innermost range
/// binding, [`Scope::empty()`] at the top level.
///
/// Rendering is read-only over its inputs and aborts on the first error
/// with no partial output. Template constructs outside the supported
/// subset fail with [`RenderError::Unsupported`] naming the construct;
/// use [`validate`] to find all of them in one pass before rendering.
///
/// ```
/// use serde_json::json;
/// use tplwalk::{from_json, render, Scope};
///
/// // {{.Greeting}}, world
/// let tree = from_json(
///     r#"{"type": "ListNode", "nodes": [
///         {"type": "ActionNode", "pipe": {"type": "PipeNode",
///             "isAssign": false, "decl": [],
///             "cmds": [{"type": "CommandNode",
///                 "args": [{"type": "FieldNode", "ident": ["Greeting"]}]}]}},
///         {"type": "TextNode", "text": ", world"}
///     ]}"#,
/// )
/// .unwrap();
///
/// let out = render(tree.as_ref(), &json!({"Greeting": "Hello"}), &Scope::empty()).unwrap();
/// assert_eq!(out, "Hello, world");
/// ```
pub fn render(root: Option<&Node>, data: &Value, scope: &Scope) -> Result<String, RenderError> {
    interpreter::render(root, data, scope)
}
