//! JSON file format for export and import.
//!
//! ```json
//! { "nodes": [ { "id", "type": "familyMember", "position": {"x", "y"},
//!                "data": { "name", "relationship", "gender", ... } } ],
//!   "edges": [ { "id", "source", "target", "kind" } ] }
//! ```
//!
//! Unknown keys are ignored. An edge without `kind` takes the relationship
//! label of its target node.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::error::TransferError;
use super::graph::FamilyTree;
use super::types::{Gender, Member, Position, Relation, RelationKind, SocialLinks};

const NODE_TYPE: &str = "familyMember";

/// Suggested file name for downloads.
pub const EXPORT_FILE_NAME: &str = "family-tree.json";

#[derive(Serialize, Deserialize)]
struct TreeFile {
	nodes: Vec<NodeRecord>,
	edges: Vec<EdgeRecord>,
}

#[derive(Serialize, Deserialize)]
struct NodeRecord {
	id: String,
	#[serde(rename = "type", default = "node_type")]
	node_type: String,
	#[serde(default)]
	position: Position,
	data: NodeData,
}

fn node_type() -> String {
	NODE_TYPE.to_string()
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeData {
	name: String,
	relationship: RelationKind,
	#[serde(default)]
	gender: Option<Gender>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	image: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	title: Option<String>,
	#[serde(default)]
	id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	website: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	facebook_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	twitter_handle: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	linkedin_url: Option<String>,
	#[serde(default, skip_serializing_if = "is_false")]
	hidden: bool,
	#[serde(default, skip_serializing_if = "is_false")]
	collapsed: bool,
}

fn is_false(b: &bool) -> bool {
	!*b
}

#[derive(Serialize, Deserialize)]
struct EdgeRecord {
	id: String,
	source: String,
	target: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	kind: Option<RelationKind>,
}

impl From<&Member> for NodeRecord {
	fn from(m: &Member) -> Self {
		Self {
			id: m.id.clone(),
			node_type: node_type(),
			position: m.position,
			data: NodeData {
				name: m.name.clone(),
				relationship: m.relationship,
				gender: Some(m.gender),
				image: m.image.clone(),
				title: m.title.clone(),
				id: Some(m.id.clone()),
				website: m.social.website.clone(),
				facebook_url: m.social.facebook_url.clone(),
				twitter_handle: m.social.twitter_handle.clone(),
				linkedin_url: m.social.linkedin_url.clone(),
				hidden: m.hidden,
				collapsed: m.collapsed,
			},
		}
	}
}

impl From<NodeRecord> for Member {
	fn from(node: NodeRecord) -> Self {
		let d = node.data;
		Self {
			id: node.id,
			name: d.name,
			gender: d.gender.unwrap_or_default(),
			image: non_empty(d.image),
			title: non_empty(d.title),
			relationship: d.relationship,
			social: SocialLinks {
				website: non_empty(d.website),
				facebook_url: non_empty(d.facebook_url),
				twitter_handle: non_empty(d.twitter_handle),
				linkedin_url: non_empty(d.linkedin_url),
			},
			position: node.position,
			hidden: d.hidden,
			collapsed: d.collapsed,
		}
	}
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty())
}

/// Serialize the whole tree as pretty-printed JSON.
pub fn export_json(tree: &FamilyTree) -> Result<String, TransferError> {
	let file = TreeFile {
		nodes: tree.members().iter().map(NodeRecord::from).collect(),
		edges: tree
			.relations()
			.iter()
			.map(|r| EdgeRecord {
				id: r.id.clone(),
				source: r.source.clone(),
				target: r.target.clone(),
				kind: Some(r.kind),
			})
			.collect(),
	};
	Ok(serde_json::to_string_pretty(&file)?)
}

/// Parse a tree file. Fails without side effects when the text is not JSON,
/// when `nodes` or `edges` is missing, or when a record is malformed.
pub fn import_json(text: &str) -> Result<FamilyTree, TransferError> {
	let value: serde_json::Value = serde_json::from_str(text)?;
	let object = value.as_object().ok_or(TransferError::NotAnObject)?;
	for key in ["nodes", "edges"] {
		if !object.contains_key(key) {
			return Err(TransferError::MissingKey(key));
		}
	}
	let file: TreeFile = serde_json::from_value(value)?;

	let members: Vec<Member> = file.nodes.into_iter().map(Member::from).collect();
	let relations: Vec<Relation> = file
		.edges
		.into_iter()
		.filter_map(|edge| {
			let kind = edge.kind.or_else(|| {
				members
					.iter()
					.find(|m| m.id == edge.target)
					.map(|m| m.relationship)
					.filter(|k| *k != RelationKind::Root)
			});
			match kind {
				Some(kind) => Some(Relation {
					id: edge.id,
					source: edge.source,
					target: edge.target,
					kind,
				}),
				None => {
					warn!("Dropping edge {} with no usable relation kind", edge.id);
					None
				}
			}
		})
		.collect();

	let tree = FamilyTree::from_parts(members, relations);
	info!(
		"Imported {} member(s) and {} edge(s)",
		tree.len(),
		tree.relations().len()
	);
	Ok(tree)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_keys_are_reported() {
		let err = import_json(r#"{"nodes": []}"#).unwrap_err();
		assert!(matches!(err, TransferError::MissingKey("edges")));
		let err = import_json(r#"{"edges": []}"#).unwrap_err();
		assert!(matches!(err, TransferError::MissingKey("nodes")));
		assert!(matches!(import_json("[1, 2]"), Err(TransferError::NotAnObject)));
		assert!(matches!(import_json("{not json"), Err(TransferError::Json(_))));
	}

	#[test]
	fn kindless_edges_use_target_label() {
		let text = r#"{
			"nodes": [
				{ "id": "a", "type": "familyMember", "position": {"x": 1, "y": 2},
				  "data": { "id": "a", "name": "A", "relationship": "Root", "gender": "male" } },
				{ "id": "b", "position": {"x": 3, "y": 4},
				  "data": { "name": "B", "relationship": "Child", "twitterHandle": "@b" } }
			],
			"edges": [
				{ "id": "e-a-b", "source": "a", "target": "b" },
				{ "id": "e-b-a", "source": "b", "target": "a" },
				{ "id": "e-a-x", "source": "a", "target": "x", "kind": "Spouse" }
			]
		}"#;
		let tree = import_json(text).unwrap();
		assert_eq!(tree.len(), 2);
		assert_eq!(tree.relations().len(), 1);
		assert_eq!(tree.relations()[0].kind, RelationKind::Child);
		let b = tree.member("b").unwrap();
		assert_eq!(b.gender, Gender::Other);
		assert_eq!(b.position, Position::new(3.0, 4.0));
		assert_eq!(b.social.twitter_handle.as_deref(), Some("@b"));
	}

	#[test]
	fn unknown_relationship_label_fails() {
		let text = r#"{ "nodes": [ { "id": "a", "position": {"x": 0, "y": 0},
			"data": { "name": "A", "relationship": "Friend" } } ], "edges": [] }"#;
		assert!(matches!(import_json(text), Err(TransferError::Json(_))));
	}

	#[test]
	fn export_writes_expected_shape() {
		let mut tree = FamilyTree::new();
		let id = tree
			.add_member(crate::tree::NewMember {
				name: "A".into(),
				..Default::default()
			})
			.unwrap();
		let json = export_json(&tree).unwrap();
		let value: serde_json::Value = serde_json::from_str(&json).unwrap();
		let node = &value["nodes"][0];
		assert_eq!(node["type"], "familyMember");
		assert_eq!(node["id"], id.as_str());
		assert_eq!(node["data"]["id"], id.as_str());
		assert_eq!(node["data"]["relationship"], "Root");
		assert_eq!(node["data"]["gender"], "other");
		assert!(node["data"].get("hidden").is_none());
		assert_eq!(value["edges"].as_array().map(Vec::len), Some(0));
		assert!(json.contains('\n'));
	}
}
