// AST (Abstract Syntax Tree) definitions for MicroML

use serde::{Deserialize, Serialize};
use std::fmt;

/// The variant name of a [`Node`], as written in its `nodeType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Number,
    Variable,
    BinaryOp,
    Function,
    Application,
    Let,
    If,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Number => "Number",
            NodeType::Variable => "Variable",
            NodeType::BinaryOp => "BinaryOp",
            NodeType::Function => "Function",
            NodeType::Application => "Application",
            NodeType::Let => "Let",
            NodeType::If => "If",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A MicroML expression.
///
/// The variant set is closed: the serialized form tags every node with a
/// `nodeType` field naming the variant, and the remaining fields are the
/// variant's own fields in camelCase, children embedded as nested objects.
///
/// Every operation on a tree recurses once per level. Trees returned by the
/// parser are at most [`MAX_DEPTH`](crate::parser::parse::MAX_DEPTH) levels
/// deep; trees built by hand should stay within the same bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all_fields = "camelCase")]
pub enum Node {
    Number {
        value: f64,
    },
    Variable {
        name: String,
    },
    BinaryOp {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Single-parameter lambda
    Function {
        parameter_name: String,
        body: Box<Node>,
    },
    Application {
        function: Box<Node>,
        argument: Box<Node>,
    },
    Let {
        variable_name: String,
        value: Box<Node>,
        in_expression: Box<Node>,
    },
    If {
        condition: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Box<Node>,
    },
}

impl Node {
    pub fn number(value: f64) -> Self {
        Node::Number { value }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Node::Variable { name: name.into() }
    }

    pub fn binary(operator: impl Into<String>, left: Node, right: Node) -> Self {
        Node::BinaryOp {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn function(parameter_name: impl Into<String>, body: Node) -> Self {
        Node::Function {
            parameter_name: parameter_name.into(),
            body: Box::new(body),
        }
    }

    pub fn apply(function: Node, argument: Node) -> Self {
        Node::Application {
            function: Box::new(function),
            argument: Box::new(argument),
        }
    }

    pub fn let_in(variable_name: impl Into<String>, value: Node, in_expression: Node) -> Self {
        Node::Let {
            variable_name: variable_name.into(),
            value: Box::new(value),
            in_expression: Box::new(in_expression),
        }
    }

    pub fn if_then_else(condition: Node, then_branch: Node, else_branch: Node) -> Self {
        Node::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    /// The `nodeType` tag used in the serialized form.
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Number { .. } => NodeType::Number,
            Node::Variable { .. } => NodeType::Variable,
            Node::BinaryOp { .. } => NodeType::BinaryOp,
            Node::Function { .. } => NodeType::Function,
            Node::Application { .. } => NodeType::Application,
            Node::Let { .. } => NodeType::Let,
            Node::If { .. } => NodeType::If,
        }
    }

    /// Direct children, left to right.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Number { .. } | Node::Variable { .. } => Vec::new(),
            Node::BinaryOp { left, right, .. } => vec![left, right],
            Node::Function { body, .. } => vec![body],
            Node::Application { function, argument } => vec![function, argument],
            Node::Let {
                value,
                in_expression,
                ..
            } => vec![value, in_expression],
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => vec![condition, then_branch, else_branch],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Number { .. } | Node::Variable { .. })
    }

    /// Short human label, e.g. `BinaryOp (+)` or `Let (x)`.
    pub fn label(&self) -> String {
        match self {
            Node::Number { value } => format!("Number ({})", value),
            Node::Variable { name } => format!("Variable ({})", name),
            Node::BinaryOp { operator, .. } => format!("BinaryOp ({})", operator),
            Node::Function { parameter_name, .. } => format!("Function ({})", parameter_name),
            Node::Let { variable_name, .. } => format!("Let ({})", variable_name),
            Node::Application { .. } | Node::If { .. } => self.node_type().to_string(),
        }
    }

    /// Follow a path of child indices from this node.
    pub fn at_path(&self, path: &[usize]) -> Option<&Node> {
        let mut node = self;
        for &index in path {
            node = *node.children().get(index)?;
        }
        Some(node)
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(|c| c.size()).sum::<usize>()
    }

    /// Height of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(|c| c.depth()).max().unwrap_or(0)
    }
}

/// Prints fully parenthesized MicroML source. For a tree returned by
/// [`crate::parse`], parsing the output yields an equal tree. Hand-built trees
/// with negative numbers or keyword names print text that does not.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number { value } => write!(f, "{}", value),
            Node::Variable { name } => write!(f, "{}", name),
            Node::BinaryOp {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Node::Function {
                parameter_name,
                body,
            } => write!(f, "(fun {} -> {})", parameter_name, body),
            Node::Application { function, argument } => write!(f, "({} {})", function, argument),
            Node::Let {
                variable_name,
                value,
                in_expression,
            } => write!(f, "(let {} = {} in {})", variable_name, value, in_expression),
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => write!(
                f,
                "(if {} then {} else {})",
                condition, then_branch, else_branch
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::let_in(
            "x",
            Node::number(5.0),
            Node::binary("+", Node::var("x"), Node::number(3.0)),
        )
    }

    #[test]
    fn test_children_order() {
        let node = Node::if_then_else(Node::var("c"), Node::number(1.0), Node::number(2.0));
        let children = node.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], &Node::var("c"));
        assert_eq!(children[2], &Node::number(2.0));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Node::number(5.0).label(), "Number (5)");
        assert_eq!(Node::number(2.5).label(), "Number (2.5)");
        assert_eq!(sample().label(), "Let (x)");
        assert_eq!(
            Node::apply(Node::var("f"), Node::var("x")).label(),
            "Application"
        );
    }

    #[test]
    fn test_size_and_depth() {
        let tree = sample();
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.depth(), 3);
        assert_eq!(Node::var("x").depth(), 1);
    }

    #[test]
    fn test_at_path() {
        let tree = sample();
        assert_eq!(tree.at_path(&[]), Some(&tree));
        assert_eq!(tree.at_path(&[1, 0]), Some(&Node::var("x")));
        assert_eq!(tree.at_path(&[0, 0]), None);
        assert_eq!(tree.at_path(&[2]), None);
    }

    #[test]
    fn test_display_is_parenthesized_source() {
        assert_eq!(sample().to_string(), "(let x = 5 in (x + 3))");
        let f = Node::function("x", Node::apply(Node::var("f"), Node::var("x")));
        assert_eq!(f.to_string(), "(fun x -> (f x))");
    }

    #[test]
    fn test_node_type_matches_serialized_tag() {
        let tree = sample();
        assert_eq!(tree.node_type(), NodeType::Let);
        assert_eq!(tree.node_type().to_string(), "Let");
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(value["nodeType"], tree.node_type().as_str());
        assert_eq!(value["inExpression"]["nodeType"], NodeType::BinaryOp.as_str());
    }

    #[test]
    fn test_leaves() {
        assert!(Node::number(1.0).is_leaf());
        assert!(!sample().is_leaf());
    }
}
