use crate::ast::Node;
use crate::error::{Feature, RenderError};
use crate::resolve::resolve;
use crate::scope::Scope;
use serde_json::Value;

/// Render a template tree against `data`, with `scope` as the innermost
/// range binding (use `Scope::empty()` at the top level).
///
/// The first error aborts the whole render; nothing accumulated so far is
/// returned. An absent root renders as `""`, matching the wire format's
/// `null` tree.
pub fn render(node: Option<&Node>, data: &Value, scope: &Scope) -> Result<String, RenderError> {
    Ok(stringify(&eval(node, data, scope)?))
}

/// Evaluate a node to the raw value it produces. Text and lists evaluate
/// to strings; fields and variables evaluate to whatever the data holds,
/// so that `if` truthiness and `range` iteration see the value itself
/// rather than its text form.
fn eval(node: Option<&Node>, data: &Value, scope: &Scope) -> Result<Value, RenderError> {
    let node = match node {
        Some(node) => node,
        None => return Ok(Value::String(String::new())),
    };

    match node {
        Node::Text { text } => Ok(Value::String(text.clone())),

        Node::List { nodes } => {
            let mut out = String::new();
            for child in nodes {
                out.push_str(&stringify(&eval(Some(child), data, scope)?));
            }
            Ok(Value::String(out))
        }

        Node::Action { pipe } => eval(Some(pipe), data, scope),

        Node::Pipe {
            is_assign,
            decl,
            cmds,
        } => {
            if *is_assign {
                return Err(RenderError::Unsupported(Feature::Assign));
            }
            if !decl.is_empty() {
                return Err(RenderError::Unsupported(Feature::MultiDecl));
            }
            if cmds.len() != 1 {
                return Err(RenderError::Unsupported(Feature::MultiCmd));
            }
            eval(Some(&cmds[0]), data, scope)
        }

        Node::Command { args } => {
            if args.len() != 1 {
                return Err(RenderError::Unsupported(Feature::MultiArgCommand));
            }
            eval(Some(&args[0]), data, scope)
        }

        Node::Field { ident } => Ok(resolve(data, ident)?.clone()),

        Node::Variable { ident } => Ok(resolve(scope.root(), ident)?.clone()),

        Node::If {
            pipe,
            list,
            else_list,
        } => {
            let cond = eval(Some(pipe), data, scope)?;
            if is_truthy(&cond) {
                eval(Some(list), data, scope)
            } else {
                eval(else_list.as_deref(), data, scope)
            }
        }

        Node::Range {
            pipe,
            list,
            else_list,
        } => eval_range(pipe, list, else_list.as_deref(), data, scope),

        Node::Unknown { kind, raw } => {
            log::error!(
                "unrecognized template node \"{kind}\":\n{}",
                serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string())
            );
            Err(RenderError::UnrecognizedNode { kind: kind.clone() })
        }
    }
}

/// The range loop. Validates the head's shape, evaluates the ranged-over
/// value under the caller's scope, then renders the body once per element
/// under a fresh single-binding scope.
fn eval_range(
    pipe: &Node,
    list: &Node,
    else_list: Option<&Node>,
    data: &Value,
    scope: &Scope,
) -> Result<Value, RenderError> {
    // The parser emits an empty List even when the template has no
    // {{else}}; anything with actual content is a branch we would skip
    // silently, so refuse it.
    match else_list {
        None => {}
        Some(Node::List { nodes }) if nodes.is_empty() => {}
        Some(_) => return Err(RenderError::Unsupported(Feature::RangeElse)),
    }

    // The head pipe is taken apart here rather than dispatched as a Pipe
    // node: a declaring pipe is only legal in this position.
    let (decl, cmds) = match pipe {
        Node::Pipe { decl, cmds, .. } => (decl, cmds),
        _ => return Err(RenderError::Unsupported(Feature::RangeArity)),
    };
    if cmds.len() != 1 || decl.len() != 1 {
        return Err(RenderError::Unsupported(Feature::RangeArity));
    }
    let name = match &decl[0] {
        Node::Variable { ident } if ident.len() == 1 => &ident[0],
        _ => return Err(RenderError::Unsupported(Feature::RangeDeclShape)),
    };

    let range_over = eval(Some(&cmds[0]), data, scope)?;
    let items: &[Value] = match &range_over {
        Value::Array(items) => items,
        // Absent and non-sequence values iterate zero times.
        _ => &[],
    };

    let mut out = String::new();
    for item in items {
        let step = Scope::bind(name.clone(), item.clone());
        out.push_str(&stringify(&eval(Some(list), data, &step)?));
    }
    Ok(Value::String(out))
}

/// Truthiness for `if` conditions: false, numeric zero, the empty string,
/// the empty sequence, and null are falsy; everything else is truthy,
/// including an empty mapping.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Canonical text form of a value reached during concatenation: strings
/// verbatim, numbers in decimal, booleans as "true"/"false", null as the
/// empty string, sequences and mappings as compact JSON.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        composite => composite.to_string(),
    }
}
