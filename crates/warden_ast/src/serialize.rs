//! Projection of the tree to a generic ordered-key mapping.
//!
//! Every node becomes a [`serde_json::Value::Object`] carrying at least
//! `type` (the variant's tag name) and `line`, plus the variant's own
//! fields; child nodes are projected recursively. The projection is total
//! and pure: it validates nothing, never fails, and structurally identical
//! trees always produce identical maps. Encoding the result to an
//! interchange format is the caller's concern (`serde_json::to_string_pretty`
//! works directly on the returned value).
//!
//! Key order is insertion order (`serde_json`'s `preserve_order` feature),
//! so `type` and `line` always lead.

use crate::node::{ActionSet, Condition, Decl, Expr, Program};
use serde_json::{Map, Value};

/// Starts a node mapping with the two keys every variant carries.
fn base(type_name: &str, line: usize) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("type".to_string(), Value::from(type_name));
    map.insert("line".to_string(), Value::from(line));
    map
}

/// Projects an optional condition root; an absent condition becomes an
/// explicit `Value::Null`.
#[must_use]
pub fn condition_to_value(condition: Option<&Condition>) -> Value {
    condition.map_or(Value::Null, Condition::to_value)
}

impl ActionSet {
    /// Projects the action set: the wildcard marker renders as the
    /// one-element list `["*"]`, named actions as a list of strings.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Wildcard => Value::Array(vec![Value::from("*")]),
            Self::Named(names) => {
                Value::Array(names.iter().map(|name| Value::from(name.as_str())).collect())
            }
        }
    }
}

impl Program {
    /// Projects the whole tree to an ordered-key mapping.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = base("Program", self.line);
        map.insert(
            "declarations".to_string(),
            Value::Array(self.declarations.iter().map(Decl::to_value).collect()),
        );
        Value::Object(map)
    }
}

impl Decl {
    /// Projects one declaration.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Role(role) => {
                let mut map = base("RoleDef", role.line);
                map.insert("name".to_string(), Value::from(role.name.as_str()));
                map.insert("actions".to_string(), role.actions.to_value());
                Value::Object(map)
            }
            Self::User(user) => {
                let mut map = base("UserDef", user.line);
                map.insert("name".to_string(), Value::from(user.name.as_str()));
                map.insert("role".to_string(), Value::from(user.role.as_str()));
                Value::Object(map)
            }
            Self::Resource(resource) => {
                let mut map = base("ResourceDef", resource.line);
                map.insert("name".to_string(), Value::from(resource.name.as_str()));
                map.insert("path".to_string(), Value::from(resource.path.as_str()));
                Value::Object(map)
            }
            Self::Policy(policy) => {
                let mut map = base("Policy", policy.line);
                map.insert(
                    "policy_type".to_string(),
                    Value::from(policy.effect.keyword()),
                );
                map.insert("actions".to_string(), policy.actions.to_value());
                map.insert(
                    "resources".to_string(),
                    Value::from(policy.resources.as_str()),
                );
                if let Some(condition) = &policy.condition {
                    map.insert("condition".to_string(), condition.to_value());
                }
                Value::Object(map)
            }
        }
    }
}

impl Condition {
    /// Projects one condition subtree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Logical {
                op,
                left,
                right,
                line,
            } => {
                let mut map = base("Condition", *line);
                map.insert("operator".to_string(), Value::from(op.keyword()));
                map.insert("left".to_string(), left.to_value());
                map.insert("right".to_string(), right.to_value());
                Value::Object(map)
            }
            Self::Comparison {
                op,
                left,
                right,
                line,
            } => {
                let mut map = base("Comparison", *line);
                map.insert("operator".to_string(), Value::from(op.symbol()));
                map.insert("left".to_string(), left.to_value());
                map.insert("right".to_string(), right.to_value());
                Value::Object(map)
            }
        }
    }
}

impl Expr {
    /// Projects one expression subtree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Arithmetic {
                op,
                left,
                right,
                line,
            } => {
                let mut map = base("ArithmeticExpr", *line);
                map.insert("operator".to_string(), Value::from(op.symbol()));
                map.insert("left".to_string(), left.to_value());
                map.insert("right".to_string(), right.to_value());
                Value::Object(map)
            }
            Self::Unary { op, operand, line } => {
                let mut map = base("UnaryExpr", *line);
                map.insert("operator".to_string(), Value::from(op.symbol()));
                map.insert("operand".to_string(), operand.to_value());
                Value::Object(map)
            }
            Self::Attribute {
                object,
                attribute,
                line,
            } => {
                let mut map = base("AttributeAccess", *line);
                map.insert("object".to_string(), Value::from(object.as_str()));
                map.insert("attribute".to_string(), Value::from(attribute.as_str()));
                Value::Object(map)
            }
            Self::Identifier { value, line } => {
                let mut map = base("Identifier", *line);
                map.insert("value".to_string(), Value::from(value.as_str()));
                Value::Object(map)
            }
            Self::Number { value, line } => {
                let mut map = base("Number", *line);
                map.insert("value".to_string(), Value::from(*value));
                Value::Object(map)
            }
            Self::Str { value, line } => {
                let mut map = base("StringLiteral", *line);
                map.insert("value".to_string(), Value::from(value.as_str()));
                Value::Object(map)
            }
            Self::Wildcard { line } => {
                let mut map = base("Wildcard", *line);
                map.insert("value".to_string(), Value::from("*"));
                Value::Object(map)
            }
        }
    }
}
