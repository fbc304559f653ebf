//! A small three-generation family for trying the editor out.

use super::graph::FamilyTree;
use super::layout::{H_STEP, V_STEP};
use super::types::{Gender, Member, Position, Relation, RelationKind, SocialLinks};

fn person(id: &str, name: &str, gender: Gender, relationship: RelationKind, col: f64, row: f64) -> Member {
	Member {
		id: id.to_string(),
		name: name.to_string(),
		gender,
		image: None,
		title: None,
		relationship,
		social: SocialLinks::default(),
		position: Position::new(col * H_STEP, row * V_STEP),
		hidden: false,
		collapsed: false,
	}
}

/// Build the sample tree. Ids are fixed so the sample is reproducible.
pub fn sample_tree() -> FamilyTree {
	use Gender::*;
	use RelationKind::*;

	let mut rashid = person("rashid", "Rashid", Male, Root, 0.0, 0.0);
	rashid.title = Some("Haji".into());
	let members = vec![
		rashid,
		person("nadia", "Nadia", Female, Spouse, 1.0, 0.0),
		person("kamran", "Kamran", Male, Sibling, -1.0, 0.0),
		person("imran", "Imran", Male, Child, -0.5, 1.0),
		person("sadia", "Sadia", Female, Child, 1.5, 1.0),
		person("hina", "Hina", Female, Spouse, 0.5, 1.0),
		person("bilal", "Bilal", Male, Spouse, 2.5, 1.0),
		person("omar", "Omar", Male, Child, -0.5, 2.0),
		person("alia", "Alia", Female, Child, 0.5, 2.0),
		person("zoya", "Zoya", Female, Child, 2.0, 2.0),
	];
	let relations = [
		("rashid", "nadia", Spouse),
		("rashid", "kamran", Sibling),
		("rashid", "imran", Child),
		("nadia", "imran", Child),
		("rashid", "sadia", Child),
		("nadia", "sadia", Child),
		("imran", "hina", Spouse),
		("sadia", "bilal", Spouse),
		("imran", "omar", Child),
		("hina", "omar", Child),
		("imran", "alia", Child),
		("hina", "alia", Child),
		("sadia", "zoya", Child),
		("bilal", "zoya", Child),
	]
	.into_iter()
	.map(|(source, target, kind)| Relation::new(source, target, kind))
	.collect();

	FamilyTree::from_parts(members, relations)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::i18n::Locale;
	use crate::tree::relation_context;

	#[test]
	fn sample_is_fully_linked() {
		let tree = sample_tree();
		assert_eq!(tree.len(), 10);
		assert_eq!(tree.relations().len(), 14);
		let mut all = tree.descendants("rashid");
		all.sort();
		assert_eq!(all, ["alia", "imran", "omar", "sadia", "zoya"]);
		assert_eq!(
			relation_context(&tree, "omar", Locale::En).as_deref(),
			Some("Child of Imran & Hina · Grandchild of Rashid & Nadia")
		);
	}
}
