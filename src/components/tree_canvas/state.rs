use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::{TreeScene, ViewCommand};
use crate::tree::{Gender, MemberId, Position, RelationKind};

pub const CARD_WIDTH: f64 = 180.0;
pub const CARD_HEIGHT: f64 = 64.0;
pub const TOGGLE_RADIUS: f64 = 9.0;
/// Pointer travel (screen px) below which a press counts as a click.
pub const CLICK_SLOP: f64 = 4.0;
const ZOOM_STEP: f64 = 1.2;
const FIT_PADDING: f64 = 60.0;
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct CardInfo {
	pub id: MemberId,
	pub name: String,
	pub title: Option<String>,
	pub relation: String,
	pub gender: Gender,
	pub has_children: bool,
	pub collapsed: bool,
	pub selected: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
}

/// What a finished press on the canvas amounted to.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerOutcome {
	Select(Option<MemberId>),
	Toggle(MemberId),
	Moved(MemberId, Position),
	Panned,
}

pub struct TreeCanvasState {
	pub graph: ForceGraph<CardInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	links: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	link_kinds: HashMap<(DefaultNodeIdx, DefaultNodeIdx), RelationKind>,
}

fn build_graph(
	scene: &TreeScene,
) -> (
	ForceGraph<CardInfo, ()>,
	Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	HashMap<(DefaultNodeIdx, DefaultNodeIdx), RelationKind>,
) {
	// Cards are anchored at their laid-out positions; the simulation only
	// drives the flow animation clock.
	let mut graph = ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	});
	let mut id_to_idx = HashMap::new();
	let (mut links, mut link_kinds) = (Vec::new(), HashMap::new());

	for card in &scene.cards {
		let idx = graph.add_node(NodeData {
			x: card.position.x as f32,
			y: card.position.y as f32,
			mass: 10.0,
			is_anchor: true,
			user_data: CardInfo {
				id: card.id.clone(),
				name: card.name.clone(),
				title: card.title.clone(),
				relation: card.relation.clone(),
				gender: card.gender,
				has_children: card.has_children,
				collapsed: card.collapsed,
				selected: card.selected,
			},
		});
		id_to_idx.insert(card.id.clone(), idx);
	}

	for link in &scene.links {
		if let (Some(&src), Some(&tgt)) =
			(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
		{
			graph.add_edge(src, tgt, EdgeData::default());
			links.push((src, tgt));
			link_kinds.insert((src, tgt), link.kind);
		}
	}
	(graph, links, link_kinds)
}

impl TreeCanvasState {
	pub fn new(scene: &TreeScene, width: f64, height: f64) -> Self {
		let (graph, links, link_kinds) = build_graph(scene);
		Self {
			graph,
			links,
			link_kinds,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
		}
	}

	/// Swap in a new scene, keeping the camera where it is.
	pub fn rebuild(&mut self, scene: &TreeScene) {
		let (graph, links, link_kinds) = build_graph(scene);
		self.graph = graph;
		self.links = links;
		self.link_kinds = link_kinds;
		self.drag = DragState::default();
		self.hover = HoverState::default();
	}

	pub fn link_kind(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> Option<RelationKind> {
		self.link_kinds
			.get(&(a, b))
			.or_else(|| self.link_kinds.get(&(b, a)))
			.copied()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn card_at(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if dx.abs() <= CARD_WIDTH / 2.0 && dy.abs() <= CARD_HEIGHT / 2.0 {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn toggle_at(&self, sx: f64, sy: f64) -> Option<MemberId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			if !info.has_children {
				return;
			}
			let (dx, dy) = (
				node.x() as f64 - gx,
				node.y() as f64 + CARD_HEIGHT / 2.0 - gy,
			);
			if (dx * dx + dy * dy).sqrt() <= TOGGLE_RADIUS + 2.0 {
				found = Some(info.id.clone());
			}
		});
		found
	}

	fn member_at(&self, idx: DefaultNodeIdx) -> Option<(MemberId, Position)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((
					node.data.user_data.id.clone(),
					Position::new(node.x() as f64, node.y() as f64),
				));
			}
		});
		found
	}

	pub fn press(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.card_at(x, y) {
			self.drag = DragState {
				active: true,
				moved: false,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				..DragState::default()
			};
			let drag = &mut self.drag;
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					drag.node_start_x = node.x();
					drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan = PanState {
				active: true,
				moved: false,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.card_at(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			if (x - self.drag.start_x).hypot(y - self.drag.start_y) < CLICK_SLOP && !self.drag.moved {
				return;
			}
			self.drag.moved = true;
			if let Some(idx) = self.drag.node_idx {
				let (dx, dy) = (
					(x - self.drag.start_x) / self.transform.k,
					(y - self.drag.start_y) / self.transform.k,
				);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
					}
				});
			}
		} else if self.pan.active {
			if (x - self.pan.start_x).hypot(y - self.pan.start_y) >= CLICK_SLOP {
				self.pan.moved = true;
			}
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// End a press at (`x`, `y`) and report what it was.
	pub fn release(&mut self, x: f64, y: f64) -> Option<PointerOutcome> {
		let outcome = if self.drag.active {
			let idx = self.drag.node_idx;
			match (self.drag.moved, idx.and_then(|i| self.member_at(i))) {
				(true, Some((id, pos))) => Some(PointerOutcome::Moved(id, pos)),
				(false, Some((id, _))) => Some(match self.toggle_at(x, y) {
					Some(toggle) => PointerOutcome::Toggle(toggle),
					None => PointerOutcome::Select(Some(id)),
				}),
				_ => None,
			}
		} else if self.pan.active {
			Some(match (self.pan.moved, self.toggle_at(x, y)) {
				(true, _) => PointerOutcome::Panned,
				(false, Some(toggle)) => PointerOutcome::Toggle(toggle),
				(false, None) => PointerOutcome::Select(None),
			})
		} else {
			None
		};
		self.drag = DragState::default();
		self.pan = PanState::default();
		outcome
	}

	pub fn cancel(&mut self) {
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.set_hover(None);
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors.clear();
		self.hover.highlight_t = 0.0;
		if let Some(idx) = node {
			for &(src, tgt) in &self.links {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.neighbors.contains(&idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * 6.0 * dt as f64;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Zoom by `factor` keeping the graph point under (`sx`, `sy`) fixed.
	pub fn zoom_at(&mut self, factor: f64, sx: f64, sy: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Frame every card in the viewport.
	pub fn fit_view(&mut self) {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			let (x0, y0, x1, y1) = bounds.unwrap_or((x, y, x, y));
			bounds = Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y)));
		});
		let Some((x0, y0, x1, y1)) = bounds else {
			return;
		};
		let (w, h) = (
			x1 - x0 + CARD_WIDTH + 2.0 * FIT_PADDING,
			y1 - y0 + CARD_HEIGHT + 2.0 * FIT_PADDING,
		);
		let k = (self.width / w).min(self.height / h).clamp(MIN_ZOOM, 1.5);
		self.transform = ViewTransform {
			x: self.width / 2.0 - (x0 + x1) / 2.0 * k,
			y: self.height / 2.0 - (y0 + y1) / 2.0 * k,
			k,
		};
	}

	pub fn apply(&mut self, command: ViewCommand) {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		match command {
			ViewCommand::ZoomIn => self.zoom_at(ZOOM_STEP, cx, cy),
			ViewCommand::ZoomOut => self.zoom_at(1.0 / ZOOM_STEP, cx, cy),
			ViewCommand::FitView => self.fit_view(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::tree_canvas::types::{CardLink, CardNode};

	fn card(id: &str, x: f64, y: f64, has_children: bool) -> CardNode {
		CardNode {
			id: id.into(),
			name: id.to_uppercase(),
			title: None,
			relation: String::new(),
			gender: Gender::Other,
			position: Position::new(x, y),
			has_children,
			collapsed: false,
			selected: false,
		}
	}

	fn state() -> TreeCanvasState {
		let scene = TreeScene {
			cards: vec![card("a", 0.0, 0.0, true), card("b", 0.0, 150.0, false)],
			links: vec![CardLink {
				source: "a".into(),
				target: "b".into(),
				kind: RelationKind::Child,
			}],
		};
		// camera at origin so screen == graph coordinates
		let mut s = TreeCanvasState::new(&scene, 800.0, 600.0);
		s.transform = ViewTransform { x: 0.0, y: 0.0, k: 1.0 };
		s
	}

	#[test]
	fn click_on_card_selects_it() {
		let mut s = state();
		s.press(10.0, 5.0);
		assert_eq!(s.release(10.0, 5.0), Some(PointerOutcome::Select(Some("a".into()))));
		s.press(500.0, 500.0);
		assert_eq!(s.release(500.0, 500.0), Some(PointerOutcome::Select(None)));
	}

	#[test]
	fn click_on_toggle_beats_card() {
		let mut s = state();
		let (x, y) = (0.0, CARD_HEIGHT / 2.0 + 1.0);
		s.press(x, y);
		assert_eq!(s.release(x, y), Some(PointerOutcome::Toggle("a".into())));
		assert_eq!(s.toggle_at(0.0, 150.0 + CARD_HEIGHT / 2.0), None);
	}

	#[test]
	fn drag_reports_new_position() {
		let mut s = state();
		s.press(0.0, 150.0);
		s.pointer_move(40.0, 170.0);
		assert_eq!(
			s.release(40.0, 170.0),
			Some(PointerOutcome::Moved("b".into(), Position::new(40.0, 170.0)))
		);
	}

	#[test]
	fn fit_view_frames_cards() {
		let mut s = state();
		s.fit_view();
		assert!(s.transform.k > 0.0 && s.transform.k <= 1.5);
		let (gx, gy) = s.screen_to_graph(400.0, 300.0);
		assert!((gx - 0.0).abs() < 1e-6);
		assert!((gy - 75.0).abs() < 1e-6);
	}

	#[test]
	fn hover_highlights_neighbours() {
		let mut s = state();
		s.pointer_move(0.0, 0.0);
		assert!(s.has_active_highlight());
		let b = s.card_at(0.0, 150.0).unwrap();
		assert!(s.is_highlighted(b));
		assert_eq!(s.link_kind(s.hover.node.unwrap(), b), Some(RelationKind::Child));
	}
}
