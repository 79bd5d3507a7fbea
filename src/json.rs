//! JSON form of the AST
//!
//! A successful parse serializes to the bare tree:
//!
//! ```json
//! {"nodeType":"Let","variableName":"x","value":{"nodeType":"Number","value":5.0},
//!  "inExpression":{"nodeType":"Variable","name":"x"}}
//! ```
//!
//! A failed one to `{"error": "<message>"}`. Consumers walk the tree by
//! `nodeType`, so the field names per variant are part of the contract.

use crate::config::ParseOptions;
use crate::parser::ast::Node;
use serde::{Deserialize, Serialize};

pub fn to_json(node: &Node) -> serde_json::Result<String> {
    serde_json::to_string(node)
}

pub fn to_json_pretty(node: &Node) -> serde_json::Result<String> {
    serde_json::to_string_pretty(node)
}

pub fn to_value(node: &Node) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(node)
}

pub fn from_json(text: &str) -> serde_json::Result<Node> {
    serde_json::from_str(text)
}

/// Outcome of parsing one request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Failure { error: String },
    Ast(Node),
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Ast(_))
    }
}

/// Parse `source` and wrap the result for transport.
pub fn respond(source: &str, options: &ParseOptions) -> Response {
    match crate::parse_with(source, options) {
        Ok(node) => Response::Ast(node),
        Err(e) => {
            log::info!("rejecting source: {}", e);
            Response::Failure {
                error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_and_variable_shape() {
        assert_eq!(
            to_value(&Node::number(5.0)).unwrap(),
            json!({"nodeType": "Number", "value": 5.0})
        );
        assert_eq!(
            to_value(&Node::var("x")).unwrap(),
            json!({"nodeType": "Variable", "name": "x"})
        );
    }

    #[test]
    fn test_camel_case_fields() {
        let tree = Node::let_in(
            "f",
            Node::function("y", Node::var("y")),
            Node::if_then_else(
                Node::var("c"),
                Node::apply(Node::var("f"), Node::number(1.0)),
                Node::number(0.0),
            ),
        );
        assert_eq!(
            to_value(&tree).unwrap(),
            json!({
                "nodeType": "Let",
                "variableName": "f",
                "value": {
                    "nodeType": "Function",
                    "parameterName": "y",
                    "body": {"nodeType": "Variable", "name": "y"}
                },
                "inExpression": {
                    "nodeType": "If",
                    "condition": {"nodeType": "Variable", "name": "c"},
                    "thenBranch": {
                        "nodeType": "Application",
                        "function": {"nodeType": "Variable", "name": "f"},
                        "argument": {"nodeType": "Number", "value": 1.0}
                    },
                    "elseBranch": {"nodeType": "Number", "value": 0.0}
                }
            })
        );
    }

    #[test]
    fn test_from_json_accepts_integer_values() {
        let node = from_json(
            r#"{"nodeType":"BinaryOp","operator":"+","left":{"nodeType":"Number","value":1},
                "right":{"nodeType":"Variable","name":"x"}}"#,
        )
        .unwrap();
        assert_eq!(node, Node::binary("+", Node::number(1.0), Node::var("x")));
    }

    #[test]
    fn test_from_json_rejects_unknown_node_type() {
        assert!(from_json(r#"{"nodeType":"While","body":{}}"#).is_err());
    }

    #[test]
    fn test_respond_success_is_bare_tree() {
        let response = respond("1 + 2", &ParseOptions::default());
        assert!(response.is_success());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["nodeType"], "BinaryOp");
        assert_eq!(value["operator"], "+");
    }

    #[test]
    fn test_respond_failure_envelope() {
        let response = respond("let x = 5", &ParseOptions::default());
        assert!(!response.is_success());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": "Parse error at token 4: expected IN, found end of input"})
        );
    }
}
