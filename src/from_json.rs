use crate::ast::Node;
use serde_json::{Map, Value};

/// Decode a template tree from the wire JSON the host parser emits.
/// This is the inverse of `json::to_json`. A `null` document decodes to
/// `None` (an absent tree).
pub fn from_json(input: &str) -> Result<Option<Node>, String> {
    let value: Value = serde_json::from_str(input).map_err(|e| e.to_string())?;
    node_from_value(&value)
}

/// Decode a single node from an already-parsed JSON value.
///
/// Every node is an object carrying a `type` tag like `"TextNode"`.
/// Unknown tags decode to `Node::Unknown` rather than failing here, so a
/// tree from a newer parser still loads; the evaluator is the loud failure
/// point for version skew.
pub fn node_from_value(value: &Value) -> Result<Option<Node>, String> {
    if value.is_null() {
        return Ok(None);
    }
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => return Err(format!("expected a node object, got {value}")),
    };
    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| "node is missing its \"type\" tag".to_string())?;

    let node = match kind {
        "TextNode" => Node::Text {
            text: string_field(obj, kind, "text")?,
        },
        "ListNode" => Node::List {
            nodes: node_seq(obj, kind, "nodes")?,
        },
        "ActionNode" => Node::Action {
            pipe: required_node(obj, kind, "pipe")?,
        },
        "PipeNode" => Node::Pipe {
            // Older parsers predate the isAssign flag; absent means false.
            is_assign: obj.get("isAssign").and_then(Value::as_bool).unwrap_or(false),
            decl: node_seq(obj, kind, "decl")?,
            cmds: node_seq(obj, kind, "cmds")?,
        },
        "CommandNode" => Node::Command {
            args: node_seq(obj, kind, "args")?,
        },
        "FieldNode" => Node::Field {
            ident: string_seq(obj, kind, "ident")?,
        },
        "VariableNode" => Node::Variable {
            ident: string_seq(obj, kind, "ident")?,
        },
        "IfNode" => Node::If {
            pipe: required_node(obj, kind, "pipe")?,
            list: required_node(obj, kind, "list")?,
            else_list: optional_node(obj, kind, "else")?,
        },
        "RangeNode" => Node::Range {
            pipe: required_node(obj, kind, "pipe")?,
            list: required_node(obj, kind, "list")?,
            else_list: optional_node(obj, kind, "else")?,
        },
        _ => Node::Unknown {
            kind: kind.to_string(),
            raw: value.clone(),
        },
    };
    Ok(Some(node))
}

fn string_field(obj: &Map<String, Value>, kind: &str, key: &str) -> Result<String, String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| format!("{kind} is missing string field \"{key}\""))
}

fn string_seq(obj: &Map<String, Value>, kind: &str, key: &str) -> Result<Vec<String>, String> {
    let items = obj
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| format!("{kind} is missing array field \"{key}\""))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| format!("{kind}.{key} holds a non-string entry: {item}"))
        })
        .collect()
}

fn node_seq(obj: &Map<String, Value>, kind: &str, key: &str) -> Result<Vec<Node>, String> {
    let items = obj
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| format!("{kind} is missing array field \"{key}\""))?;
    items
        .iter()
        .map(|item| {
            node_from_value(item)?
                .ok_or_else(|| format!("{kind}.{key} holds a null entry"))
        })
        .collect()
}

fn required_node(
    obj: &Map<String, Value>,
    kind: &str,
    key: &str,
) -> Result<Box<Node>, String> {
    match optional_node(obj, kind, key)? {
        Some(node) => Ok(node),
        None => Err(format!("{kind} is missing node field \"{key}\"")),
    }
}

fn optional_node(
    obj: &Map<String, Value>,
    kind: &str,
    key: &str,
) -> Result<Option<Box<Node>>, String> {
    match obj.get(key) {
        None => Ok(None),
        Some(value) => node_from_value(value)
            .map(|node| node.map(Box::new))
            .map_err(|e| format!("{kind}.{key}: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn null_decodes_to_absent() {
        assert_eq!(from_json("null").unwrap(), None);
    }

    #[test]
    fn text_node() {
        let node = from_json(r#"{"type": "TextNode", "text": "hi"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            node,
            Node::Text {
                text: "hi".to_string()
            }
        );
    }

    #[test]
    fn field_node_ident_path() {
        let node = from_json(r#"{"type": "FieldNode", "ident": ["Bar", "Foo"]}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            node,
            Node::Field {
                ident: vec!["Bar".to_string(), "Foo".to_string()]
            }
        );
    }

    #[test]
    fn branch_with_null_else() {
        let node = from_json(
            r#"{
                "type": "IfNode",
                "pipe": {"type": "PipeNode", "isAssign": false, "decl": [], "cmds": []},
                "list": {"type": "ListNode", "nodes": []},
                "else": null
            }"#,
        )
        .unwrap()
        .unwrap();
        match node {
            Node::If { else_list, .. } => assert_eq!(else_list, None),
            other => panic!("expected IfNode, got {other:?}"),
        }
    }

    #[test]
    fn pipe_without_is_assign_defaults_false() {
        let node = from_json(r#"{"type": "PipeNode", "decl": [], "cmds": []}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            node,
            Node::Pipe {
                is_assign: false,
                decl: vec![],
                cmds: vec![],
            }
        );
    }

    #[test]
    fn unknown_kind_decodes_leniently() {
        let wire = json!({"type": "TemplateNode", "name": "t"});
        let node = node_from_value(&wire).unwrap().unwrap();
        assert_eq!(
            node,
            Node::Unknown {
                kind: "TemplateNode".to_string(),
                raw: wire,
            }
        );
    }

    #[test]
    fn missing_type_tag_is_an_error() {
        let err = from_json(r#"{"text": "hi"}"#).unwrap_err();
        assert!(err.contains("type"), "{err}");
    }

    #[test]
    fn non_object_node_is_an_error() {
        assert!(from_json("[1, 2]").is_err());
        assert!(from_json("\"TextNode\"").is_err());
    }

    #[test]
    fn missing_required_field_names_the_key() {
        let err = from_json(r#"{"type": "TextNode"}"#).unwrap_err();
        assert!(err.contains("\"text\""), "{err}");

        let err = from_json(r#"{"type": "ActionNode", "pipe": null}"#).unwrap_err();
        assert!(err.contains("\"pipe\""), "{err}");
    }

    #[test]
    fn null_in_node_sequence_is_an_error() {
        let err = from_json(r#"{"type": "ListNode", "nodes": [null]}"#).unwrap_err();
        assert!(err.contains("null entry"), "{err}");
    }

    #[test]
    fn non_string_ident_entry_is_an_error() {
        let err = from_json(r#"{"type": "FieldNode", "ident": ["a", 3]}"#).unwrap_err();
        assert!(err.contains("ident"), "{err}");
    }

    #[test]
    fn round_trip_whole_tree() {
        // The tree for: Hello {{.Name}}! {{range $it := .Items}}{{$it}} {{end}}
        let wire = json!({
            "type": "ListNode",
            "nodes": [
                {"type": "TextNode", "text": "Hello "},
                {
                    "type": "ActionNode",
                    "pipe": {
                        "type": "PipeNode",
                        "isAssign": false,
                        "decl": [],
                        "cmds": [{
                            "type": "CommandNode",
                            "args": [{"type": "FieldNode", "ident": ["Name"]}]
                        }]
                    }
                },
                {"type": "TextNode", "text": "! "},
                {
                    "type": "RangeNode",
                    "pipe": {
                        "type": "PipeNode",
                        "isAssign": false,
                        "decl": [{"type": "VariableNode", "ident": ["$it"]}],
                        "cmds": [{
                            "type": "CommandNode",
                            "args": [{"type": "FieldNode", "ident": ["Items"]}]
                        }]
                    },
                    "list": {
                        "type": "ListNode",
                        "nodes": [
                            {
                                "type": "ActionNode",
                                "pipe": {
                                    "type": "PipeNode",
                                    "isAssign": false,
                                    "decl": [],
                                    "cmds": [{
                                        "type": "CommandNode",
                                        "args": [{"type": "VariableNode", "ident": ["$it"]}]
                                    }]
                                }
                            },
                            {"type": "TextNode", "text": " "}
                        ]
                    },
                    "else": {"type": "ListNode", "nodes": []}
                }
            ]
        });
        let node = node_from_value(&wire).unwrap().unwrap();
        assert_eq!(crate::json::to_value(&node), wire);
    }

    #[test]
    fn unknown_round_trips_byte_identically() {
        let wire = json!({"type": "WithNode", "pipe": null, "extra": [1, 2]});
        let node = node_from_value(&wire).unwrap().unwrap();
        assert_eq!(crate::json::to_value(&node), wire);
    }
}
