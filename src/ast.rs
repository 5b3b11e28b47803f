/// Template tree nodes, as handed over by the host parser.
/// Variant and field names mirror the wire format (see `from_json`).

/// A node in a parsed template tree.
///
/// The tree is immutable once built. `else` links are optional because the
/// wire format spells an absent branch as `null`; the host parser usually
/// emits an empty `List` there instead, and the evaluator accepts both.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal template text, rendered verbatim.
    Text { text: String },
    /// An ordered sequence of children, rendered as their concatenation.
    List { nodes: Vec<Node> },
    /// A `{{ ... }}` action wrapping a pipe.
    Action { pipe: Box<Node> },
    /// A pipeline: optional variable declarations feeding a command chain.
    /// Only the single-command, non-declaring, non-assigning form is
    /// renderable (plus the one-declaration form inside `Range`).
    Pipe {
        is_assign: bool,
        decl: Vec<Node>,
        cmds: Vec<Node>,
    },
    /// One command of a pipe. Only the single-argument form is renderable.
    Command { args: Vec<Node> },
    /// A dotted field path (`.a.b`), resolved against the data context.
    /// An empty path is the data context itself.
    Field { ident: Vec<String> },
    /// A variable path (`$x.b`), resolved against the current scope.
    Variable { ident: Vec<String> },
    /// `{{if pipe}}list{{else}}else{{end}}`
    If {
        pipe: Box<Node>,
        list: Box<Node>,
        else_list: Option<Box<Node>>,
    },
    /// `{{range $x := pipe}}list{{end}}`. The declared variable is bound
    /// afresh for every element of the value the pipe yields.
    Range {
        pipe: Box<Node>,
        list: Box<Node>,
        else_list: Option<Box<Node>>,
    },
    /// A node kind this crate does not know. The decoder produces these
    /// instead of failing so a tree from a newer parser still loads;
    /// rendering one is a fatal `RenderError::UnrecognizedNode`.
    Unknown {
        kind: String,
        /// The wire object as received, kept for the diagnostic dump.
        raw: serde_json::Value,
    },
}

impl Node {
    /// The wire-format type tag for this node.
    pub fn kind(&self) -> &str {
        match self {
            Node::Text { .. } => "TextNode",
            Node::List { .. } => "ListNode",
            Node::Action { .. } => "ActionNode",
            Node::Pipe { .. } => "PipeNode",
            Node::Command { .. } => "CommandNode",
            Node::Field { .. } => "FieldNode",
            Node::Variable { .. } => "VariableNode",
            Node::If { .. } => "IfNode",
            Node::Range { .. } => "RangeNode",
            Node::Unknown { kind, .. } => kind,
        }
    }

    /// An empty `List`, what the host parser emits for a missing branch.
    pub fn empty_list() -> Self {
        Node::List { nodes: Vec::new() }
    }

    /// Serialize to compact wire-format JSON.
    pub fn to_json(&self) -> String {
        crate::json::to_json(self)
    }

    /// Serialize to pretty-printed wire-format JSON (2-space indent).
    pub fn to_json_pretty(&self) -> String {
        crate::json::to_json_pretty(self)
    }
}
