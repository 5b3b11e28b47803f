use crate::ast::Node;
use crate::error::{Feature, RenderError};
use std::fmt;

// ── Error type ──────────────────────────────────────────────────────

/// A construct the evaluator would refuse, located by a breadcrumb path.
///
/// The tree carries no source positions, so the path is built from field
/// steps instead (e.g. `nodes[2].pipe.cmds[0]`).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The error a render reaching this node would fail with.
    pub error: RenderError,
    /// Field steps from the root to the offending node.
    pub path: Vec<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "at template root: {}", self.error)
        } else {
            write!(f, "at {}: {}", self.path.join("."), self.error)
        }
    }
}

// ── Static validation ───────────────────────────────────────────────

/// Walk a template tree and collect every construct the evaluator would
/// refuse, in walk order, without touching any data.
///
/// The evaluator aborts on the first error and only visits the branches a
/// particular data context steers it into; this pass visits everything, so
/// a caller can learn about all structural problems up front. Failures that
/// depend on the data (path resolution) are out of its reach.
///
/// Returns an empty vec when the tree is clean.
pub fn validate(root: &Node) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut path: Vec<String> = Vec::new();
    walk(root, &mut path, &mut errors);
    errors
}

fn record(errors: &mut Vec<ValidationError>, path: &[String], error: RenderError) {
    errors.push(ValidationError {
        error,
        path: path.to_vec(),
    });
}

fn walk(node: &Node, path: &mut Vec<String>, errors: &mut Vec<ValidationError>) {
    match node {
        Node::Text { .. } | Node::Field { .. } | Node::Variable { .. } => {}

        Node::List { nodes } => walk_seq(nodes, "nodes", path, errors),

        Node::Action { pipe } => walk_child(pipe, "pipe", path, errors),

        Node::Pipe {
            is_assign,
            decl,
            cmds,
        } => {
            if *is_assign {
                record(errors, path, RenderError::Unsupported(Feature::Assign));
            }
            if !decl.is_empty() {
                record(errors, path, RenderError::Unsupported(Feature::MultiDecl));
            }
            if cmds.len() != 1 {
                record(errors, path, RenderError::Unsupported(Feature::MultiCmd));
            }
            walk_seq(decl, "decl", path, errors);
            walk_seq(cmds, "cmds", path, errors);
        }

        Node::Command { args } => {
            if args.len() != 1 {
                record(
                    errors,
                    path,
                    RenderError::Unsupported(Feature::MultiArgCommand),
                );
            }
            walk_seq(args, "args", path, errors);
        }

        Node::If {
            pipe,
            list,
            else_list,
        } => {
            walk_child(pipe, "pipe", path, errors);
            walk_child(list, "list", path, errors);
            if let Some(else_list) = else_list {
                walk_child(else_list, "else", path, errors);
            }
        }

        Node::Range {
            pipe,
            list,
            else_list,
        } => {
            match else_list.as_deref() {
                None => {}
                Some(Node::List { nodes }) if nodes.is_empty() => {}
                Some(_) => {
                    path.push("else".to_string());
                    record(errors, path, RenderError::Unsupported(Feature::RangeElse));
                    path.pop();
                }
            }

            // The evaluator takes a range head apart instead of
            // dispatching it as a Pipe, so the range rules apply here in
            // place of the generic pipe rules.
            path.push("pipe".to_string());
            match pipe.as_ref() {
                Node::Pipe { decl, cmds, .. } => {
                    if cmds.len() != 1 || decl.len() != 1 {
                        record(errors, path, RenderError::Unsupported(Feature::RangeArity));
                    } else if !matches!(&decl[0], Node::Variable { ident } if ident.len() == 1) {
                        record(
                            errors,
                            path,
                            RenderError::Unsupported(Feature::RangeDeclShape),
                        );
                    }
                    walk_seq(decl, "decl", path, errors);
                    walk_seq(cmds, "cmds", path, errors);
                }
                other => {
                    record(errors, path, RenderError::Unsupported(Feature::RangeArity));
                    walk(other, path, errors);
                }
            }
            path.pop();

            walk_child(list, "list", path, errors);
            if let Some(else_list) = else_list {
                walk_child(else_list, "else", path, errors);
            }
        }

        Node::Unknown { kind, .. } => {
            record(
                errors,
                path,
                RenderError::UnrecognizedNode { kind: kind.clone() },
            );
        }
    }
}

fn walk_child(node: &Node, step: &str, path: &mut Vec<String>, errors: &mut Vec<ValidationError>) {
    path.push(step.to_string());
    walk(node, path, errors);
    path.pop();
}

fn walk_seq(nodes: &[Node], field: &str, path: &mut Vec<String>, errors: &mut Vec<ValidationError>) {
    for (i, node) in nodes.iter().enumerate() {
        path.push(format!("{field}[{i}]"));
        walk(node, path, errors);
        path.pop();
    }
}
