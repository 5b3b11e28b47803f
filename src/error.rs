use std::fmt;
use thiserror::Error;

/// A template construct the renderer recognizes but does not implement.
///
/// The canonical names are stable and intended for programmatic matching;
/// `Display` prints them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// An assignment pipe (`{{$x = ...}}`).
    Assign,
    /// A pipe declaring variables outside a range head.
    MultiDecl,
    /// A pipe of more than one command (`{{.x | f}}`).
    MultiCmd,
    /// A command with arguments (`{{f .x}}`).
    MultiArgCommand,
    /// A range with a non-empty `{{else}}` branch.
    RangeElse,
    /// A range head without exactly one command and one declaration.
    RangeArity,
    /// A range declaration that is not a single-segment variable.
    RangeDeclShape,
}

impl Feature {
    /// Look up a feature by its canonical name.
    pub fn from_name(name: &str) -> Option<Feature> {
        [
            Feature::Assign,
            Feature::MultiDecl,
            Feature::MultiCmd,
            Feature::MultiArgCommand,
            Feature::RangeElse,
            Feature::RangeArity,
            Feature::RangeDeclShape,
        ]
        .into_iter()
        .find(|feature| feature.name() == name)
    }

    /// Machine-readable feature name.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Assign => "assign",
            Feature::MultiDecl => "multi-decl",
            Feature::MultiCmd => "multi-cmd",
            Feature::MultiArgCommand => "multi-arg-command",
            Feature::RangeElse => "range-else",
            Feature::RangeArity => "range-arity",
            Feature::RangeDeclShape => "range-decl-shape",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a render call failed.
///
/// The first error aborts the render; no partial output is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The template uses a construct this renderer refuses to guess at.
    #[error("unsupported template feature \"{0}\"")]
    Unsupported(Feature),

    /// A node kind outside the known set, typically a tree produced by a
    /// newer host parser.
    #[error("unrecognized node kind \"{kind}\"")]
    UnrecognizedNode { kind: String },

    /// A field or variable path hit a value with no such key.
    /// `failed_at` indexes the segment of `path` that did not resolve.
    #[error("cannot resolve \"{}\": lookup failed at segment {failed_at}", .path.join("."))]
    Resolution { path: Vec<String>, failed_at: usize },
}

impl RenderError {
    /// The segment name a `Resolution` error stopped on, if that is the
    /// kind of error this is.
    pub fn failed_segment(&self) -> Option<&str> {
        match self {
            RenderError::Resolution { path, failed_at } => {
                path.get(*failed_at).map(String::as_str)
            }
            _ => None,
        }
    }
}
