//! The syntax tree node model.
//!
//! These types represent a parsed Warden program. The variant set is closed:
//! the printer and the serializer both match on it exhaustively, so adding a
//! variant forces both traversals to be updated at compile time.
//!
//! Every node records the 1-based source line on which its construct began.
//! The line is diagnostic metadata only; it never participates in tree
//! semantics. Nodes are immutable after construction and ownership is
//! tree-shaped: each child belongs to exactly one parent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean connective of a compound condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicalOp {
    /// Both sides must hold.
    And,
    /// Either side may hold.
    Or,
}

impl LogicalOp {
    /// Source spelling of the connective.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
}

impl CompareOp {
    /// Source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
        }
    }
}

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl ArithOp {
    /// Source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

/// Unary sign operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    /// `+`
    Plus,
    /// `-`
    Minus,
}

impl UnaryOp {
    /// Source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

/// Whether a policy grants or refuses the matched actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    /// `ALLOW` policy.
    Allow,
    /// `DENY` policy.
    Deny,
}

impl Effect {
    /// Source spelling of the policy keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Deny => "DENY",
        }
    }
}

/// The actions a role grants or a policy matches.
///
/// The wildcard is a sentinel variant, deliberately distinct from any
/// literal string: a list containing the name `"*"` and the wildcard marker
/// are different things. By construction the set is either the wildcard
/// alone or a list of plain names. The surface syntax does allow writing
/// names and a `*` in one list, and it is the parser's job to decide how to
/// fold that into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSet {
    /// Every action.
    Wildcard,
    /// Specific action names, in source order.
    Named(Vec<String>),
}

impl ActionSet {
    /// Builds a named action set.
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Named(names.into_iter().map(Into::into).collect())
    }

    /// Returns true for the wildcard marker.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::Named(names) => f.write_str(&names.join(", ")),
        }
    }
}

/// Root node: an entire program, declarations in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level declarations in source order.
    pub declarations: Vec<Decl>,
    /// 1-based line on which the program began.
    pub line: usize,
}

impl Program {
    /// Creates a program node.
    #[must_use]
    pub const fn new(declarations: Vec<Decl>, line: usize) -> Self {
        Self { declarations, line }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Program({} declarations)", self.declarations.len())
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// Role definition.
    Role(RoleDef),
    /// User definition.
    User(UserDef),
    /// Resource definition.
    Resource(ResourceDef),
    /// Allow/deny policy.
    Policy(Policy),
}

impl Decl {
    /// 1-based line on which the declaration began.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Role(role) => role.line,
            Self::User(user) => user.line,
            Self::Resource(resource) => resource.line,
            Self::Policy(policy) => policy.line,
        }
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Role(role) => role.fmt(f),
            Self::User(user) => user.fmt(f),
            Self::Resource(resource) => resource.fmt(f),
            Self::Policy(policy) => policy.fmt(f),
        }
    }
}

/// `ROLE <name> {can: <actions>}`
#[derive(Debug, Clone, PartialEq)]
pub struct RoleDef {
    /// Role name.
    pub name: String,
    /// Actions the role grants.
    pub actions: ActionSet,
    /// 1-based source line.
    pub line: usize,
}

impl RoleDef {
    /// Creates a role definition.
    pub fn new(name: impl Into<String>, actions: ActionSet, line: usize) -> Self {
        Self {
            name: name.into(),
            actions,
            line,
        }
    }
}

impl fmt::Display for RoleDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoleDef(name=\"{}\", actions=[{}])", self.name, self.actions)
    }
}

/// `USER <name> {role: <role>}`
#[derive(Debug, Clone, PartialEq)]
pub struct UserDef {
    /// User name.
    pub name: String,
    /// Named role; a reference by name, not resolved here.
    pub role: String,
    /// 1-based source line.
    pub line: usize,
}

impl UserDef {
    /// Creates a user definition.
    pub fn new(name: impl Into<String>, role: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            line,
        }
    }
}

impl fmt::Display for UserDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserDef(name=\"{}\", role=\"{}\")", self.name, self.role)
    }
}

/// `RESOURCE <name> {path: "<path>"}`
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDef {
    /// Resource name.
    pub name: String,
    /// Filesystem-style path the resource covers.
    pub path: String,
    /// 1-based source line.
    pub line: usize,
}

impl ResourceDef {
    /// Creates a resource definition.
    pub fn new(name: impl Into<String>, path: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            line,
        }
    }
}

impl fmt::Display for ResourceDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceDef(name=\"{}\", path=\"{}\")", self.name, self.path)
    }
}

/// `ALLOW|DENY action: <actions> ON resource: <resources> [IF <condition>]`
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    /// Grant or refuse.
    pub effect: Effect,
    /// Actions the policy matches.
    pub actions: ActionSet,
    /// Resource the policy applies to.
    pub resources: String,
    /// Optional guard; its root is a condition by type, never a bare
    /// arithmetic expression.
    pub condition: Option<Condition>,
    /// 1-based source line.
    pub line: usize,
}

impl Policy {
    /// Creates an unconditional policy.
    pub fn new(
        effect: Effect,
        actions: ActionSet,
        resources: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            effect,
            actions,
            resources: resources.into(),
            condition: None,
            line,
        }
    }

    /// Attaches a condition to the policy.
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Policy({}, actions=[{}], resources=\"{}\")",
            self.effect.keyword(),
            self.actions,
            self.resources
        )
    }
}

/// A boolean condition: either a connective over two sub-conditions or a
/// single comparison. `left` and `right` are always present.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `<left> AND|OR <right>`
    Logical {
        /// The connective.
        op: LogicalOp,
        /// Left operand.
        left: Box<Condition>,
        /// Right operand.
        right: Box<Condition>,
        /// 1-based source line.
        line: usize,
    },
    /// `<left> ==|!=|<|>|<=|>= <right>`
    Comparison {
        /// The comparison operator.
        op: CompareOp,
        /// Left operand.
        left: Expr,
        /// Right operand.
        right: Expr,
        /// 1-based source line.
        line: usize,
    },
}

impl Condition {
    /// 1-based line on which the condition began.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Logical { line, .. } | Self::Comparison { line, .. } => *line,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logical { op, .. } => write!(f, "Condition({})", op.keyword()),
            Self::Comparison { op, .. } => write!(f, "Comparison({})", op.symbol()),
        }
    }
}

/// A value expression. `left`/`right`/`operand` children are always present
/// where the variant has them.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `<left> +|-|*|/ <right>`
    Arithmetic {
        /// The operator.
        op: ArithOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
        /// 1-based source line.
        line: usize,
    },
    /// `+<operand>` or `-<operand>`; the sign is a grammar construct, not
    /// part of the number literal.
    Unary {
        /// The sign.
        op: UnaryOp,
        /// The signed expression.
        operand: Box<Expr>,
        /// 1-based source line.
        line: usize,
    },
    /// Dotted reference such as `time.hour`.
    Attribute {
        /// Namespace part.
        object: String,
        /// Field part.
        attribute: String,
        /// 1-based source line.
        line: usize,
    },
    /// A plain name.
    Identifier {
        /// The name.
        value: String,
        /// 1-based source line.
        line: usize,
    },
    /// A non-negative integer literal.
    Number {
        /// The value.
        value: u64,
        /// 1-based source line.
        line: usize,
    },
    /// A string literal, quotes already stripped.
    Str {
        /// The contents.
        value: String,
        /// 1-based source line.
        line: usize,
    },
    /// The `*` wildcard in expression position, kept as its own variant so
    /// it can never be confused with a string literal spelling `"*"`.
    Wildcard {
        /// 1-based source line.
        line: usize,
    },
}

impl Expr {
    /// 1-based line on which the expression began.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Arithmetic { line, .. }
            | Self::Unary { line, .. }
            | Self::Attribute { line, .. }
            | Self::Identifier { line, .. }
            | Self::Number { line, .. }
            | Self::Str { line, .. }
            | Self::Wildcard { line } => *line,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arithmetic { op, .. } => write!(f, "ArithmeticExpr({})", op.symbol()),
            Self::Unary { op, .. } => write!(f, "UnaryExpr({})", op.symbol()),
            Self::Attribute {
                object, attribute, ..
            } => write!(f, "AttributeAccess({object}.{attribute})"),
            Self::Identifier { value, .. } => write!(f, "Identifier({value})"),
            Self::Number { value, .. } => write!(f, "Number({value})"),
            Self::Str { value, .. } => write!(f, "StringLiteral(\"{value}\")"),
            Self::Wildcard { .. } => f.write_str("Wildcard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_set_display_folds_the_list() {
        assert_eq!(ActionSet::Wildcard.to_string(), "*");
        assert_eq!(
            ActionSet::named(["read", "write"]).to_string(),
            "read, write"
        );
    }

    #[test]
    fn one_line_summaries() {
        let role = RoleDef::new("Admin", ActionSet::Wildcard, 1);
        assert_eq!(role.to_string(), "RoleDef(name=\"Admin\", actions=[*])");

        let user = UserDef::new("JaneDoe", "Developer", 2);
        assert_eq!(
            user.to_string(),
            "UserDef(name=\"JaneDoe\", role=\"Developer\")"
        );

        let policy = Policy::new(
            Effect::Allow,
            ActionSet::named(["read", "write"]),
            "DB_Finance",
            4,
        );
        assert_eq!(
            policy.to_string(),
            "Policy(ALLOW, actions=[read, write], resources=\"DB_Finance\")"
        );

        let comparison = Condition::Comparison {
            op: CompareOp::Gt,
            left: Expr::Attribute {
                object: "time".to_string(),
                attribute: "hour".to_string(),
                line: 5,
            },
            right: Expr::Number { value: 9, line: 5 },
            line: 5,
        };
        assert_eq!(comparison.to_string(), "Comparison(>)");
    }

    #[test]
    fn line_accessors_reach_every_variant() {
        let decl = Decl::Resource(ResourceDef::new("DB", "/data", 3));
        assert_eq!(decl.line(), 3);

        let expr = Expr::Unary {
            op: UnaryOp::Minus,
            operand: Box::new(Expr::Number { value: 5, line: 7 }),
            line: 7,
        };
        assert_eq!(expr.line(), 7);

        let condition = Condition::Logical {
            op: LogicalOp::And,
            left: Box::new(Condition::Comparison {
                op: CompareOp::Eq,
                left: Expr::Identifier {
                    value: "a".to_string(),
                    line: 2,
                },
                right: Expr::Number { value: 1, line: 2 },
                line: 2,
            }),
            right: Box::new(Condition::Comparison {
                op: CompareOp::Ne,
                left: Expr::Identifier {
                    value: "b".to_string(),
                    line: 2,
                },
                right: Expr::Number { value: 2, line: 2 },
                line: 2,
            }),
            line: 2,
        };
        assert_eq!(condition.line(), 2);
    }

    #[test]
    fn wildcard_marker_is_not_a_name() {
        assert!(ActionSet::Wildcard.is_wildcard());
        assert!(!ActionSet::named(["*"]).is_wildcard());
        assert_ne!(ActionSet::Wildcard, ActionSet::named(["*"]));
    }
}
