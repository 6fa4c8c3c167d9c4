//! Built-in interaction design topic map.

use crate::components::flow_canvas::{FlowData, FlowEdge, FlowNode, FocusConfig, Position};

const TOPICS: &[(&str, &str, Option<&str>, f64, f64)] = &[
	(
		"1",
		"Unveiling the Mysteries of Interaction Design",
		Some("Main Topic"),
		300.0,
		100.0,
	),
	("2", "Interaction Metaphors", None, 50.0, 50.0),
	("3", "Frequency & Novelty", None, 600.0, 50.0),
	("4", "Kinetic Physics", None, 50.0, 300.0),
	("5", "Fitts's Law", None, 600.0, 300.0),
	("6", "Swipe Gestures", None, 300.0, 500.0),
];

/// Six topic nodes with the main topic linked to each of the others.
pub fn builtin_topics() -> FlowData {
	let nodes = TOPICS
		.iter()
		.map(|&(id, content, topic, x, y)| FlowNode {
			id: id.into(),
			position: Position::new(x, y),
			content: content.into(),
			topic: topic.map(Into::into),
		})
		.collect();

	let edges = TOPICS[1..]
		.iter()
		.map(|&(id, ..)| FlowEdge {
			id: format!("e1-{}", id),
			source: "1".into(),
			target: id.into(),
			animated: true,
		})
		.collect();

	FlowData {
		nodes,
		edges,
		focus: FocusConfig::default(),
	}
}
