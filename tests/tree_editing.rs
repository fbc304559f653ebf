use family_tree_canvas::i18n::Locale;
use family_tree_canvas::tree::transfer::{export_json, import_json};
use family_tree_canvas::tree::{
	FamilyTree, Gender, MemberEdit, NewMember, RelationKind, TransferError, TreeError, relation_context,
	sample_tree,
};

fn member(name: &str) -> NewMember {
	NewMember {
		name: name.to_string(),
		..Default::default()
	}
}

fn related(name: &str, kind: RelationKind, to: &str) -> NewMember {
	NewMember {
		name: name.to_string(),
		relationship: Some(kind),
		related_to: Some(to.to_string()),
		..Default::default()
	}
}

#[test]
fn first_member_is_the_root() {
	let mut tree = FamilyTree::new();
	let id = tree.add_member(member("A")).unwrap();

	assert_eq!(tree.len(), 1);
	assert!(tree.relations().is_empty());
	let root = tree.member(&id).unwrap();
	assert_eq!(root.relationship, RelationKind::Root);
	assert_eq!(root.relationship.label(), "Root");
	assert_eq!(
		relation_context(&tree, &id, Locale::En).as_deref(),
		Some("Root Member")
	);
}

#[test]
fn adding_a_child_links_and_describes_it() {
	let mut tree = FamilyTree::new();
	let a = tree.add_member(member("A")).unwrap();
	let b = tree.add_member(related("B", RelationKind::Child, &a)).unwrap();

	assert_eq!(tree.len(), 2);
	assert_eq!(tree.relations().len(), 1);
	let edge = &tree.relations()[0];
	assert_eq!((edge.source.as_str(), edge.target.as_str()), (a.as_str(), b.as_str()));
	assert_eq!(edge.kind, RelationKind::Child);

	let text = relation_context(&tree, &b, Locale::En).unwrap();
	assert!(text.contains('A'));
	assert!(text.contains("Child"));

	let urdu = relation_context(&tree, &b, Locale::Ur).unwrap();
	assert!(urdu.contains('A'));
	assert!(urdu.contains(Locale::Ur.relation(RelationKind::Child)));
}

#[test]
fn later_members_need_a_relationship_and_an_existing_relative() {
	let mut tree = FamilyTree::new();
	let a = tree.add_member(member("A")).unwrap();

	assert_eq!(
		tree.add_member(member("B")),
		Err(TreeError::RelationshipRequired)
	);
	assert_eq!(
		tree.add_member(related("B", RelationKind::Root, &a)),
		Err(TreeError::RootNotAllowed)
	);
	assert_eq!(
		tree.add_member(related("B", RelationKind::Child, "nobody")),
		Err(TreeError::MemberNotFound("nobody".to_string()))
	);
	assert_eq!(tree.len(), 1);
}

#[test]
fn deleting_removes_only_the_member_and_its_edges() {
	let mut tree = sample_tree();
	let before_members = tree.len();
	let incident = tree
		.relations()
		.iter()
		.filter(|r| r.source == "imran" || r.target == "imran")
		.count();
	let before_edges = tree.relations().len();

	let removed = tree.remove_member("imran").unwrap();
	assert_eq!(removed.name, "Imran");
	assert_eq!(tree.len(), before_members - 1);
	assert_eq!(tree.relations().len(), before_edges - incident);
	assert!(
		tree.relations()
			.iter()
			.all(|r| r.source != "imran" && r.target != "imran")
	);
	assert!(tree.member("omar").is_some());
	assert!(tree.adjacency("omar").unwrap().incoming.iter().all(|l| l.peer != "imran"));
}

#[test]
fn collapse_hides_descendants_and_expand_restores_them() {
	let mut tree = sample_tree();
	let mut expected = tree.descendants("sadia");
	expected.sort();
	assert_eq!(expected, ["zoya"]);

	let mut hidden = tree.set_collapsed("sadia", true).unwrap();
	hidden.sort();
	assert_eq!(hidden, expected);
	for m in tree.members() {
		assert_eq!(m.hidden, expected.contains(&m.id), "{}", m.id);
	}
	assert!(!tree.member("rashid").unwrap().hidden);
	assert!(!tree.member("imran").unwrap().hidden);
	assert!(!tree.member("bilal").unwrap().hidden);
	assert!(tree.member("sadia").unwrap().collapsed);

	tree.set_collapsed("sadia", false).unwrap();
	assert!(tree.members().iter().all(|m| !m.hidden));
	assert!(!tree.member("sadia").unwrap().collapsed);
}

#[test]
fn export_then_import_keeps_nodes_and_edges() {
	let mut tree = sample_tree();
	tree.set_collapsed("imran", true).unwrap();
	let json = export_json(&tree).unwrap();
	let back = import_json(&json).unwrap();

	assert_eq!(back.members(), tree.members());
	assert_eq!(back.relations(), tree.relations());
}

#[test]
fn import_without_nodes_or_edges_is_rejected() {
	let err = import_json(r#"{ "nodes": [] }"#).unwrap_err();
	assert!(matches!(err, TransferError::MissingKey("edges")));

	let err = import_json(r#"{ "edges": [] }"#).unwrap_err();
	assert!(matches!(err, TransferError::MissingKey("nodes")));

	assert!(matches!(import_json("[]"), Err(TransferError::NotAnObject)));
	assert!(matches!(import_json("{ nodes"), Err(TransferError::Json(_))));
}

#[test]
fn import_rejects_unknown_relationship_labels() {
	let json = r#"{
		"nodes": [{
			"id": "x",
			"type": "familyMember",
			"position": { "x": 0, "y": 0 },
			"data": { "id": "x", "name": "X", "relationship": "Step-cousin" }
		}],
		"edges": []
	}"#;
	assert!(matches!(import_json(json), Err(TransferError::Json(_))));
}

#[test]
fn edit_changes_attributes_but_not_edges() {
	let mut tree = sample_tree();
	let edges = tree.relations().to_vec();
	let mut edit = MemberEdit::from(tree.member("omar").unwrap());
	edit.name = "Umar".to_string();
	edit.gender = Gender::Male;
	tree.edit_member("omar", edit).unwrap();

	assert_eq!(tree.member("omar").unwrap().name, "Umar");
	assert_eq!(tree.relations(), edges.as_slice());
}
