use thiserror::Error;

/// Errors raised by diagram operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
	/// An operation referenced a node ID that is not in the diagram.
	#[error("unknown node: {0}")]
	UnknownNode(String),
	/// Two input nodes share an ID.
	#[error("duplicate node id: {0}")]
	DuplicateNode(String),
	/// An input edge points at a node that does not exist.
	#[error("edge {edge} references unknown node {node}")]
	DanglingEdge {
		/// ID of the offending edge.
		edge: String,
		/// Endpoint that is missing from the node list.
		node: String,
	},
}
