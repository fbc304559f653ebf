use crate::i18n::Locale;
use crate::tree::{FamilyTree, Gender, MemberId, Position, RelationKind, relation_context};

/// Everything the canvas draws for one member card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardNode {
	pub id: MemberId,
	pub name: String,
	pub title: Option<String>,
	pub relation: String,
	pub gender: Gender,
	pub position: Position,
	pub has_children: bool,
	pub collapsed: bool,
	pub selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardLink {
	pub source: MemberId,
	pub target: MemberId,
	pub kind: RelationKind,
}

/// Visible part of the tree, ready to draw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeScene {
	pub cards: Vec<CardNode>,
	pub links: Vec<CardLink>,
}

impl TreeScene {
	/// Project the visible members and the edges between them.
	pub fn from_tree(tree: &FamilyTree, locale: Locale, selected: Option<&str>) -> Self {
		let cards = tree
			.members()
			.iter()
			.filter(|m| !m.hidden)
			.map(|m| CardNode {
				id: m.id.clone(),
				name: m.name.clone(),
				title: m.title.clone(),
				relation: relation_context(tree, &m.id, locale).unwrap_or_default(),
				gender: m.gender,
				position: m.position,
				has_children: tree.has_children(&m.id),
				collapsed: m.collapsed,
				selected: selected == Some(m.id.as_str()),
			})
			.collect();
		let visible = |id: &str| tree.member(id).is_some_and(|m| !m.hidden);
		let links = tree
			.relations()
			.iter()
			.filter(|r| visible(&r.source) && visible(&r.target))
			.map(|r| CardLink {
				source: r.source.clone(),
				target: r.target.clone(),
				kind: r.kind,
			})
			.collect();
		Self { cards, links }
	}
}

/// Camera commands issued from outside the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewCommand {
	ZoomIn,
	ZoomOut,
	FitView,
}

/// Latest camera command. `seq` increases with every request so a repeated
/// command still reads as new.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewRequest {
	pub seq: u64,
	pub command: Option<ViewCommand>,
}

impl ViewRequest {
	pub fn next(self, command: ViewCommand) -> Self {
		Self {
			seq: self.seq + 1,
			command: Some(command),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tree::sample_tree;

	#[test]
	fn collapsed_subtree_leaves_the_scene() {
		let mut tree = sample_tree();
		let full = TreeScene::from_tree(&tree, Locale::En, Some("imran"));
		assert_eq!(full.cards.len(), 10);
		assert_eq!(full.links.len(), 14);
		assert!(full.cards.iter().any(|c| c.id == "imran" && c.selected && c.has_children));

		tree.set_collapsed("imran", true).unwrap();
		let scene = TreeScene::from_tree(&tree, Locale::En, None);
		assert_eq!(scene.cards.len(), 8);
		assert!(scene.cards.iter().all(|c| c.id != "omar" && c.id != "alia"));
		assert!(scene.links.iter().all(|l| l.target != "omar" && l.target != "alia"));
		assert!(scene.cards.iter().any(|c| c.id == "imran" && c.collapsed));
	}

	#[test]
	fn requests_are_sequenced() {
		let r = ViewRequest::default().next(ViewCommand::FitView).next(ViewCommand::FitView);
		assert_eq!(r.seq, 2);
		assert_eq!(r.command, Some(ViewCommand::FitView));
	}
}
