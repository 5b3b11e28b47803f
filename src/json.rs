use crate::ast::Node;
use serde_json::{json, Value};

/// Encode a node into the wire JSON shape (the inverse of `from_json`).
///
/// `Unknown` nodes re-emit the raw object they were decoded from, so
/// decode∘encode is identity even across version skew. Absent branch
/// links encode as `null`.
pub fn to_value(node: &Node) -> Value {
    match node {
        Node::Text { text } => json!({"type": "TextNode", "text": text}),
        Node::List { nodes } => json!({"type": "ListNode", "nodes": seq(nodes)}),
        Node::Action { pipe } => json!({"type": "ActionNode", "pipe": to_value(pipe)}),
        Node::Pipe {
            is_assign,
            decl,
            cmds,
        } => json!({
            "type": "PipeNode",
            "isAssign": is_assign,
            "decl": seq(decl),
            "cmds": seq(cmds),
        }),
        Node::Command { args } => json!({"type": "CommandNode", "args": seq(args)}),
        Node::Field { ident } => json!({"type": "FieldNode", "ident": ident}),
        Node::Variable { ident } => json!({"type": "VariableNode", "ident": ident}),
        Node::If {
            pipe,
            list,
            else_list,
        } => json!({
            "type": "IfNode",
            "pipe": to_value(pipe),
            "list": to_value(list),
            "else": opt(else_list),
        }),
        Node::Range {
            pipe,
            list,
            else_list,
        } => json!({
            "type": "RangeNode",
            "pipe": to_value(pipe),
            "list": to_value(list),
            "else": opt(else_list),
        }),
        Node::Unknown { raw, .. } => raw.clone(),
    }
}

/// Serialize to compact JSON.
pub fn to_json(node: &Node) -> String {
    to_value(node).to_string()
}

/// Serialize to pretty-printed JSON (2-space indent).
pub fn to_json_pretty(node: &Node) -> String {
    let value = to_value(node);
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

fn seq(nodes: &[Node]) -> Vec<Value> {
    nodes.iter().map(to_value).collect()
}

fn opt(node: &Option<Box<Node>>) -> Value {
    match node {
        Some(node) => to_value(node),
        None => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_json::from_json;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_encodes_with_type_tag() {
        let node = Node::Text {
            text: "a\"b".to_string(),
        };
        assert_eq!(node.to_json(), r#"{"text":"a\"b","type":"TextNode"}"#);
    }

    #[test]
    fn absent_else_encodes_as_null() {
        let node = Node::If {
            pipe: Box::new(Node::Field { ident: vec![] }),
            list: Box::new(Node::empty_list()),
            else_list: None,
        };
        let wire = to_value(&node);
        assert_eq!(wire["else"], Value::Null);
    }

    #[test]
    fn pretty_form_decodes_back() {
        let node = Node::List {
            nodes: vec![
                Node::Text {
                    text: "x".to_string(),
                },
                Node::Variable {
                    ident: vec!["$v".to_string()],
                },
            ],
        };
        assert_eq!(from_json(&node.to_json_pretty()).unwrap(), Some(node));
    }
}
