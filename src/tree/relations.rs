//! Relation text for a member card, e.g. "Child of A & B · Spouse of C".

use std::collections::{BTreeMap, HashSet};

use super::graph::FamilyTree;
use super::types::RelationKind;
use crate::i18n::{Key, Locale};

const PHRASE_SEPARATOR: &str = " · ";

/// Describe how `id` relates to the members around it, in `locale`.
///
/// Direct links come from the adjacency index. Grandparents and
/// grandchildren two generations away are added when they are not already
/// linked directly. Returns `None` for an unknown id.
pub fn relation_context(tree: &FamilyTree, id: &str, locale: Locale) -> Option<String> {
	let member = tree.member(id)?;
	let adj = tree.adjacency(id)?;

	// names keyed by insertion order so link direction does not matter
	let mut groups: BTreeMap<RelationKind, BTreeMap<usize, &str>> = BTreeMap::new();
	let mut push = |kind: RelationKind, peer: &str| {
		if let (Some(m), Some(slot)) = (tree.member(peer), tree.slot(peer)) {
			groups.entry(kind).or_default().insert(slot, m.name.as_str());
		}
	};

	for link in &adj.outgoing {
		push(link.kind.inverse(member.gender), &link.peer);
	}
	for link in &adj.incoming {
		push(link.kind, &link.peer);
	}

	let direct: HashSet<&str> = adj
		.incoming
		.iter()
		.chain(&adj.outgoing)
		.map(|l| l.peer.as_str())
		.collect();
	for parent in tree.parents(id) {
		for grandparent in tree.parents(parent) {
			if grandparent != id && !direct.contains(grandparent.as_str()) {
				push(RelationKind::Grandchild, grandparent);
			}
		}
	}
	let as_grandparent = RelationKind::grandparent_for(member.gender);
	for child in tree.children(id) {
		for grandchild in tree.children(child) {
			if grandchild != id && !direct.contains(grandchild.as_str()) {
				push(as_grandparent, grandchild);
			}
		}
	}

	if groups.is_empty() {
		return Some(match member.relationship {
			RelationKind::Root => locale.text(Key::RootMember).to_string(),
			kind => locale.relation(kind).to_string(),
		});
	}

	let phrases: Vec<String> = groups
		.iter()
		.map(|(kind, names)| {
			let mut ordered: Vec<&str> = Vec::new();
			for name in names.values() {
				if !ordered.contains(name) {
					ordered.push(*name);
				}
			}
			locale.relation_phrase(locale.relation(*kind), &ordered)
		})
		.collect();
	Some(phrases.join(PHRASE_SEPARATOR))
}
