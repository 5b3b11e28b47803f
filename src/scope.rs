use serde_json::{Map, Value};

/// The variable binding introduced by the innermost enclosing range step.
///
/// A scope holds at most one binding and is never mutated after
/// construction; every range iteration builds a fresh one. It does not
/// chain to the scope of an enclosing range: inside a nested range body,
/// the outer range's variable is unreachable. Callers migrating templates
/// that rely on outer-loop variables should flatten the data instead.
#[derive(Debug, Clone)]
pub struct Scope {
    /// Always an object with zero or one entry, so variable paths resolve
    /// against a scope exactly like field paths resolve against data.
    vars: Value,
}

impl Scope {
    /// A scope with no binding, for a top-level render.
    pub fn empty() -> Self {
        Scope {
            vars: Value::Object(Map::new()),
        }
    }

    /// A scope holding the single binding `name = value`.
    pub fn bind(name: impl Into<String>, value: Value) -> Self {
        let mut vars = Map::new();
        vars.insert(name.into(), value);
        Scope {
            vars: Value::Object(vars),
        }
    }

    /// The name of the bound variable, if any.
    pub fn name(&self) -> Option<&str> {
        match &self.vars {
            Value::Object(vars) => vars.keys().next().map(String::as_str),
            _ => None,
        }
    }

    /// The binding viewed as a resolvable root value.
    pub(crate) fn root(&self) -> &Value {
        &self.vars
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::empty()
    }
}
