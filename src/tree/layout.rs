//! Deterministic placement of a new member next to the member it relates to.
//!
//! Each relation kind gets a fixed offset in grid steps; every further
//! relation of the same kind from the same anchor moves one horizontal step
//! further out. Overlaps with unrelated members are not resolved.

use super::types::{Position, RelationKind};

/// Horizontal grid step in graph units.
pub const H_STEP: f64 = 220.0;
/// Vertical grid step (one generation) in graph units.
pub const V_STEP: f64 = 150.0;

/// Offset of `kind` from its anchor in grid steps, plus the direction in
/// which repeated relations of that kind fan out.
fn offset(kind: RelationKind) -> (f64, f64, f64) {
	use RelationKind::*;
	match kind {
		Root => (0.0, 0.0, 1.0),
		Parent => (0.0, -1.0, 1.0),
		Grandparent | Grandfather | Grandmother => (0.0, -2.0, 1.0),
		Child => (0.0, 1.0, 1.0),
		Grandchild => (0.0, 2.0, 1.0),
		Spouse => (1.0, 0.0, 1.0),
		Sibling => (-1.0, 0.0, -1.0),
		Cousin => (-2.0, 0.0, -1.0),
		ParentSibling | Uncle | Aunt => (-1.0, -1.0, -1.0),
		Nibling | Nephew | Niece => (1.0, 1.0, 1.0),
	}
}

/// Position for a new member that is `kind` to the member at `anchor`,
/// where `existing` relations of that kind already hang off the anchor.
pub fn place(anchor: Position, kind: RelationKind, existing: usize) -> Position {
	let (dx, dy, fan) = offset(kind);
	Position {
		x: anchor.x + (dx + fan * existing as f64) * H_STEP,
		y: anchor.y + dy * V_STEP,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn children_go_below_and_fan_right() {
		let anchor = Position::new(100.0, 50.0);
		assert_eq!(place(anchor, RelationKind::Child, 0), Position::new(100.0, 200.0));
		assert_eq!(place(anchor, RelationKind::Child, 2), Position::new(540.0, 200.0));
	}

	#[test]
	fn elders_go_above() {
		let p = place(Position::ORIGIN, RelationKind::Parent, 0);
		assert_eq!(p, Position::new(0.0, -V_STEP));
		let g = place(Position::ORIGIN, RelationKind::Grandmother, 0);
		assert_eq!(g, Position::new(0.0, -2.0 * V_STEP));
	}

	#[test]
	fn siblings_fan_left_spouses_right() {
		let s = place(Position::ORIGIN, RelationKind::Sibling, 1);
		assert_eq!(s, Position::new(-2.0 * H_STEP, 0.0));
		let sp = place(Position::ORIGIN, RelationKind::Spouse, 0);
		assert_eq!(sp, Position::new(H_STEP, 0.0));
	}
}
