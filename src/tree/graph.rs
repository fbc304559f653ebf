//! The in-memory family tree and its adjacency index.
//!
//! Every mutation keeps the index in step with the edge list, so relation
//! text, has-children flags and descendant sets are answered from a member's
//! own links instead of re-scanning every edge.

use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, info, warn};

use super::error::{Result, TreeError};
use super::layout;
use super::types::{Member, MemberEdit, MemberId, NewMember, Position, Relation, RelationKind};

/// One end of a relation as seen from a member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
	/// Edge id.
	pub edge: String,
	/// The member at the other end.
	pub peer: MemberId,
	/// The edge's kind, always read as "target is `kind` to source".
	pub kind: RelationKind,
}

/// Incoming and outgoing links of one member.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Adjacency {
	/// Edges where this member is the target.
	pub incoming: Vec<Link>,
	/// Edges where this member is the source.
	pub outgoing: Vec<Link>,
}

impl Adjacency {
	fn drop_edge(&mut self, edge: &str) {
		self.incoming.retain(|l| l.edge != edge);
		self.outgoing.retain(|l| l.edge != edge);
	}

	/// Peers on the younger side of a straight line of descent.
	fn descendant_peers(&self) -> impl Iterator<Item = &MemberId> {
		let down = self
			.outgoing
			.iter()
			.filter(|l| l.kind.generation_step().is_some_and(|g| g > 0));
		let up = self
			.incoming
			.iter()
			.filter(|l| l.kind.generation_step().is_some_and(|g| g < 0));
		down.chain(up).map(|l| &l.peer)
	}

	/// Peers exactly one generation from this member; `step` is +1 for
	/// children and -1 for parents.
	fn peers_at(&self, step: i8) -> impl Iterator<Item = &MemberId> {
		let out = self
			.outgoing
			.iter()
			.filter(move |l| l.kind.generation_step() == Some(step));
		let inc = self
			.incoming
			.iter()
			.filter(move |l| l.kind.generation_step() == Some(-step));
		out.chain(inc).map(|l| &l.peer)
	}
}

/// Members, relation edges and the adjacency index over them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FamilyTree {
	members: Vec<Member>,
	relations: Vec<Relation>,
	slots: HashMap<MemberId, usize>,
	index: HashMap<MemberId, Adjacency>,
}

impl FamilyTree {
	/// An empty tree.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a tree from loaded parts. Members with a duplicate id and edges
	/// whose endpoints are missing are dropped and logged.
	pub fn from_parts(members: Vec<Member>, relations: Vec<Relation>) -> Self {
		let mut tree = Self::new();
		for member in members {
			if tree.slots.contains_key(&member.id) {
				warn!("Dropping duplicate member id {}", member.id);
				continue;
			}
			tree.insert_member(member);
		}
		for relation in relations {
			if !tree.contains(&relation.source) || !tree.contains(&relation.target) {
				warn!(
					"Dropping edge {} with missing endpoint ({} -> {})",
					relation.id, relation.source, relation.target
				);
				continue;
			}
			if tree.relations.iter().any(|r| r.id == relation.id) {
				warn!("Dropping duplicate edge id {}", relation.id);
				continue;
			}
			tree.insert_relation(relation);
		}
		tree
	}

	/// True when the tree has no members.
	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	/// Number of members.
	pub fn len(&self) -> usize {
		self.members.len()
	}

	/// Members in insertion order.
	pub fn members(&self) -> &[Member] {
		&self.members
	}

	/// Edges in insertion order.
	pub fn relations(&self) -> &[Relation] {
		&self.relations
	}

	/// True when a member with `id` exists.
	pub fn contains(&self, id: &str) -> bool {
		self.slots.contains_key(id)
	}

	/// Look a member up by id.
	pub fn member(&self, id: &str) -> Option<&Member> {
		self.slots.get(id).map(|&i| &self.members[i])
	}

	/// Insertion order of a member, stable across edits.
	pub(super) fn slot(&self, id: &str) -> Option<usize> {
		self.slots.get(id).copied()
	}

	fn member_mut(&mut self, id: &str) -> Result<&mut Member> {
		match self.slots.get(id) {
			Some(&i) => Ok(&mut self.members[i]),
			None => Err(TreeError::MemberNotFound(id.to_string())),
		}
	}

	/// Links of a member, if it exists.
	pub fn adjacency(&self, id: &str) -> Option<&Adjacency> {
		self.index.get(id)
	}

	fn insert_member(&mut self, member: Member) {
		self.slots.insert(member.id.clone(), self.members.len());
		self.index.insert(member.id.clone(), Adjacency::default());
		self.members.push(member);
	}

	fn insert_relation(&mut self, relation: Relation) {
		if let Some(adj) = self.index.get_mut(&relation.source) {
			adj.outgoing.push(Link {
				edge: relation.id.clone(),
				peer: relation.target.clone(),
				kind: relation.kind,
			});
		}
		if let Some(adj) = self.index.get_mut(&relation.target) {
			adj.incoming.push(Link {
				edge: relation.id.clone(),
				peer: relation.source.clone(),
				kind: relation.kind,
			});
		}
		self.relations.push(relation);
	}

	/// Add a member. The first member becomes the root at the origin and
	/// any relationship or related member on `new` is ignored; every later
	/// member needs both and is placed next to the related member.
	pub fn add_member(&mut self, new: NewMember) -> Result<MemberId> {
		let name = new.name.trim();
		if name.is_empty() {
			return Err(TreeError::EmptyName);
		}
		let id = uuid::Uuid::new_v4().to_string();

		if self.is_empty() {
			self.insert_member(Member {
				id: id.clone(),
				name: name.to_string(),
				gender: new.gender,
				image: new.image,
				title: new.title,
				relationship: RelationKind::Root,
				social: new.social,
				position: Position::ORIGIN,
				hidden: false,
				collapsed: false,
			});
			info!("Added root member {name} ({id})");
			return Ok(id);
		}

		let kind = new.relationship.ok_or(TreeError::RelationshipRequired)?;
		if kind == RelationKind::Root {
			return Err(TreeError::RootNotAllowed);
		}
		let related_id = new.related_to.ok_or(TreeError::RelatedMemberRequired)?;
		let related = self
			.member(&related_id)
			.ok_or_else(|| TreeError::MemberNotFound(related_id.clone()))?;

		let existing = self
			.index
			.get(&related_id)
			.map_or(0, |adj| adj.outgoing.iter().filter(|l| l.kind == kind).count());
		let position = layout::place(related.position, kind, existing);
		// a descendant of a collapsed or hidden member starts hidden
		let hidden = kind.generation_step().is_some_and(|g| g > 0) && (related.collapsed || related.hidden);

		self.insert_member(Member {
			id: id.clone(),
			name: name.to_string(),
			gender: new.gender,
			image: new.image,
			title: new.title,
			relationship: kind,
			social: new.social,
			position,
			hidden,
			collapsed: false,
		});
		self.insert_relation(Relation::new(related_id.clone(), id.clone(), kind));
		info!("Added member {name} ({id}) as {} of {related_id}", kind.label());
		Ok(id)
	}

	/// Overwrite a member's editable attributes.
	pub fn edit_member(&mut self, id: &str, edit: MemberEdit) -> Result<()> {
		let name = edit.name.trim();
		if name.is_empty() {
			return Err(TreeError::EmptyName);
		}
		let name = name.to_string();
		let member = self.member_mut(id)?;
		member.name = name;
		member.gender = edit.gender;
		member.image = edit.image;
		member.title = edit.title;
		member.social = edit.social;
		debug!("Edited member {id}");
		Ok(())
	}

	/// Remove a member and every edge where it is source or target.
	pub fn remove_member(&mut self, id: &str) -> Result<Member> {
		let slot = *self
			.slots
			.get(id)
			.ok_or_else(|| TreeError::MemberNotFound(id.to_string()))?;

		let adj = self.index.remove(id).unwrap_or_default();
		let incident: HashSet<&str> = adj
			.incoming
			.iter()
			.chain(&adj.outgoing)
			.map(|l| l.edge.as_str())
			.collect();
		for link in adj.incoming.iter().chain(&adj.outgoing) {
			if let Some(peer) = self.index.get_mut(&link.peer) {
				peer.drop_edge(&link.edge);
			}
		}
		self.relations.retain(|r| !incident.contains(r.id.as_str()));

		let member = self.members.remove(slot);
		self.slots.remove(id);
		for (i, m) in self.members.iter().enumerate().skip(slot) {
			self.slots.insert(m.id.clone(), i);
		}
		info!(
			"Removed member {} ({id}) and {} edge(s)",
			member.name,
			incident.len()
		);
		Ok(member)
	}

	/// Store a new canvas position, e.g. after a drag.
	pub fn move_member(&mut self, id: &str, position: Position) -> Result<()> {
		self.member_mut(id)?.position = position;
		Ok(())
	}

	/// Drop every member and edge.
	pub fn clear(&mut self) {
		*self = Self::new();
		info!("Family tree reset");
	}

	/// Members one generation above `id`.
	pub fn parents(&self, id: &str) -> Vec<&MemberId> {
		self.index
			.get(id)
			.map(|adj| dedup(adj.peers_at(-1)))
			.unwrap_or_default()
	}

	/// Members one generation below `id`.
	pub fn children(&self, id: &str) -> Vec<&MemberId> {
		self.index
			.get(id)
			.map(|adj| dedup(adj.peers_at(1)))
			.unwrap_or_default()
	}

	/// True when `id` has at least one descendant link.
	pub fn has_children(&self, id: &str) -> bool {
		self.index
			.get(id)
			.is_some_and(|adj| adj.descendant_peers().next().is_some())
	}

	/// Every member reachable downward from `id` along lines of descent,
	/// in breadth-first order, excluding `id` itself.
	pub fn descendants(&self, id: &str) -> Vec<MemberId> {
		let mut seen: HashSet<&str> = HashSet::from([id]);
		let mut queue: VecDeque<&str> = VecDeque::from([id]);
		let mut out = Vec::new();
		while let Some(current) = queue.pop_front() {
			let Some(adj) = self.index.get(current) else {
				continue;
			};
			for peer in adj.descendant_peers() {
				if seen.insert(peer.as_str()) {
					out.push(peer.clone());
					queue.push_back(peer.as_str());
				}
			}
		}
		out
	}

	/// Hide (or show) the descendants of `id` and remember the choice on
	/// `id`. Returns the descendants of `id`.
	///
	/// Expanding only reveals a descendant that no other collapsed member
	/// still covers, so a nested collapse or a co-parent's collapse keeps
	/// its subtree hidden.
	pub fn set_collapsed(&mut self, id: &str, collapsed: bool) -> Result<Vec<MemberId>> {
		self.member_mut(id)?.collapsed = collapsed;
		let affected = self.descendants(id);
		let covered: HashSet<MemberId> = if collapsed {
			affected.iter().cloned().collect()
		} else {
			self.members
				.iter()
				.filter(|m| m.collapsed)
				.flat_map(|m| self.descendants(&m.id))
				.collect()
		};
		for member_id in &affected {
			if let Some(&i) = self.slots.get(member_id) {
				self.members[i].hidden = covered.contains(member_id);
			}
		}
		debug!(
			"{} {} descendant(s) of {id}",
			if collapsed { "Collapsed" } else { "Expanded" },
			affected.len()
		);
		Ok(affected)
	}
}

fn dedup<'a>(ids: impl Iterator<Item = &'a MemberId>) -> Vec<&'a MemberId> {
	let mut seen = HashSet::new();
	ids.filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tree::Gender;

	fn named(name: &str) -> NewMember {
		NewMember {
			name: name.into(),
			..Default::default()
		}
	}

	fn related(name: &str, kind: RelationKind, to: &str) -> NewMember {
		NewMember {
			name: name.into(),
			relationship: Some(kind),
			related_to: Some(to.into()),
			..Default::default()
		}
	}

	#[test]
	fn first_member_is_root_without_edges() {
		let mut tree = FamilyTree::new();
		let id = tree
			.add_member(NewMember {
				relationship: Some(RelationKind::Child),
				related_to: Some("nobody".into()),
				..named("A")
			})
			.unwrap();
		assert_eq!(tree.len(), 1);
		assert!(tree.relations().is_empty());
		let root = tree.member(&id).unwrap();
		assert_eq!(root.relationship, RelationKind::Root);
		assert_eq!(root.relationship.label(), "Root");
		assert_eq!(root.position, Position::ORIGIN);
	}

	#[test]
	fn later_members_need_relationship_and_anchor() {
		let mut tree = FamilyTree::new();
		let a = tree.add_member(named("A")).unwrap();
		assert_eq!(tree.add_member(named("B")), Err(TreeError::RelationshipRequired));
		assert_eq!(
			tree.add_member(NewMember {
				relationship: Some(RelationKind::Child),
				..named("B")
			}),
			Err(TreeError::RelatedMemberRequired)
		);
		assert_eq!(
			tree.add_member(related("B", RelationKind::Root, &a)),
			Err(TreeError::RootNotAllowed)
		);
		assert_eq!(
			tree.add_member(related("B", RelationKind::Child, "ghost")),
			Err(TreeError::MemberNotFound("ghost".into()))
		);
		assert_eq!(tree.add_member(named("  ")), Err(TreeError::EmptyName));
		assert_eq!(tree.len(), 1);
	}

	#[test]
	fn child_edge_points_from_anchor() {
		let mut tree = FamilyTree::new();
		let a = tree.add_member(named("A")).unwrap();
		let b = tree.add_member(related("B", RelationKind::Child, &a)).unwrap();
		assert_eq!(tree.relations().len(), 1);
		let edge = &tree.relations()[0];
		assert_eq!((edge.source.as_str(), edge.target.as_str()), (a.as_str(), b.as_str()));
		assert_eq!(edge.kind, RelationKind::Child);
		assert_eq!(tree.children(&a), vec![&b]);
		assert_eq!(tree.parents(&b), vec![&a]);
		assert!(tree.has_children(&a));
		assert!(!tree.has_children(&b));
	}

	#[test]
	fn parent_edge_counts_as_descent_the_other_way() {
		let mut tree = FamilyTree::new();
		let a = tree.add_member(named("A")).unwrap();
		let p = tree.add_member(related("P", RelationKind::Parent, &a)).unwrap();
		assert_eq!(tree.children(&p), vec![&a]);
		assert!(tree.has_children(&p));
		assert_eq!(tree.descendants(&p), vec![a]);
	}

	#[test]
	fn remove_drops_only_incident_edges() {
		let mut tree = FamilyTree::new();
		let a = tree.add_member(named("A")).unwrap();
		let b = tree.add_member(related("B", RelationKind::Child, &a)).unwrap();
		let c = tree.add_member(related("C", RelationKind::Spouse, &a)).unwrap();
		let d = tree.add_member(related("D", RelationKind::Child, &b)).unwrap();

		let removed = tree.remove_member(&b).unwrap();
		assert_eq!(removed.name, "B");
		assert_eq!(tree.len(), 3);
		assert_eq!(tree.relations().len(), 1);
		assert_eq!(tree.relations()[0].target, c);
		assert!(tree.member(&d).is_some());
		assert!(tree.adjacency(&d).unwrap().incoming.is_empty());
		assert_eq!(tree.adjacency(&a).unwrap().outgoing.len(), 1);
		// slots stay valid after the shift
		assert_eq!(tree.member(&d).unwrap().name, "D");
		assert_eq!(tree.remove_member(&b), Err(TreeError::MemberNotFound(b)));
	}

	#[test]
	fn collapse_hides_descendants_only() {
		let mut tree = FamilyTree::new();
		let a = tree.add_member(named("A")).unwrap();
		let b = tree.add_member(related("B", RelationKind::Child, &a)).unwrap();
		let s = tree.add_member(related("S", RelationKind::Sibling, &b)).unwrap();
		let c = tree.add_member(related("C", RelationKind::Child, &b)).unwrap();
		let g = tree.add_member(related("G", RelationKind::Grandchild, &b)).unwrap();

		let mut hidden = tree.set_collapsed(&b, true).unwrap();
		hidden.sort();
		let mut expected = vec![c.clone(), g.clone()];
		expected.sort();
		assert_eq!(hidden, expected);
		for id in [&a, &b, &s] {
			assert!(!tree.member(id).unwrap().hidden);
		}
		assert!(tree.member(&c).unwrap().hidden);
		assert!(tree.member(&b).unwrap().collapsed);

		// new children of a collapsed member start hidden
		let late = tree.add_member(related("L", RelationKind::Child, &b)).unwrap();
		assert!(tree.member(&late).unwrap().hidden);

		tree.set_collapsed(&b, false).unwrap();
		assert!(tree.members().iter().all(|m| !m.hidden));
	}

	#[test]
	fn expand_keeps_subtrees_other_collapses_cover() {
		let mut tree = crate::tree::sample_tree();

		// co-parent still collapsed
		tree.set_collapsed("hina", true).unwrap();
		tree.set_collapsed("imran", true).unwrap();
		tree.set_collapsed("imran", false).unwrap();
		assert!(tree.member("hina").unwrap().collapsed);
		assert!(tree.member("omar").unwrap().hidden);
		assert!(tree.member("alia").unwrap().hidden);
		tree.set_collapsed("hina", false).unwrap();
		assert!(tree.members().iter().all(|m| !m.hidden));

		// nested collapse survives expanding an ancestor
		tree.set_collapsed("imran", true).unwrap();
		tree.set_collapsed("rashid", true).unwrap();
		assert!(tree.member("imran").unwrap().hidden);
		tree.set_collapsed("rashid", false).unwrap();
		for id in ["imran", "sadia", "zoya", "hina"] {
			assert!(!tree.member(id).unwrap().hidden, "{id}");
		}
		assert!(tree.member("imran").unwrap().collapsed);
		assert!(tree.member("omar").unwrap().hidden);
		assert!(tree.member("alia").unwrap().hidden);
	}

	#[test]
	fn descendants_survive_cycles() {
		let a = Member {
			id: "a".into(),
			name: "A".into(),
			gender: Gender::Other,
			image: None,
			title: None,
			relationship: RelationKind::Root,
			social: Default::default(),
			position: Position::ORIGIN,
			hidden: false,
			collapsed: false,
		};
		let b = Member {
			id: "b".into(),
			name: "B".into(),
			relationship: RelationKind::Child,
			..a.clone()
		};
		let tree = FamilyTree::from_parts(
			vec![a, b],
			vec![
				Relation::new("a", "b", RelationKind::Child),
				Relation::new("b", "a", RelationKind::Child),
				Relation::new("a", "ghost", RelationKind::Child),
			],
		);
		assert_eq!(tree.relations().len(), 2);
		assert_eq!(tree.descendants("a"), vec!["b".to_string()]);
	}

	#[test]
	fn edit_keeps_relationship() {
		let mut tree = FamilyTree::new();
		let a = tree.add_member(named("A")).unwrap();
		tree.edit_member(
			&a,
			MemberEdit {
				name: " Amina ".into(),
				gender: Gender::Female,
				title: Some("Dr.".into()),
				..Default::default()
			},
		)
		.unwrap();
		let m = tree.member(&a).unwrap();
		assert_eq!(m.name, "Amina");
		assert_eq!(m.gender, Gender::Female);
		assert_eq!(m.relationship, RelationKind::Root);
		assert_eq!(
			tree.edit_member("stale", MemberEdit::default()),
			Err(TreeError::EmptyName)
		);
		assert_eq!(
			tree.edit_member("stale", MemberEdit { name: "X".into(), ..Default::default() }),
			Err(TreeError::MemberNotFound("stale".into()))
		);
	}
}
