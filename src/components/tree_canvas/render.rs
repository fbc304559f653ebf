use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CARD_HEIGHT, CARD_WIDTH, CardInfo, TOGGLE_RADIUS, TreeCanvasState};
use crate::tree::{Gender, RelationKind};

const CARD_RADIUS: f64 = 10.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

fn gender_color(gender: Gender) -> &'static str {
	match gender {
		Gender::Male => "#3b82f6",
		Gender::Female => "#ec4899",
		Gender::Other => "#a855f7",
	}
}

/// Stroke color and whether the line is dashed, per relation family.
fn link_style(kind: Option<RelationKind>) -> ((u8, u8, u8), bool) {
	match kind.and_then(RelationKind::generation_step) {
		Some(_) => ((99, 102, 241), false),
		None if kind == Some(RelationKind::Spouse) => ((236, 72, 153), true),
		None => ((148, 163, 184), true),
	}
}

pub fn render(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_cards(state, ctx);
	ctx.restore();
}

fn draw_links(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap) = (2.0 / k.max(0.5), 8.0, 5.0);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);
	let has_highlight = state.has_active_highlight();

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let ((r, g, b), dashed) = link_style(state.link_kind(n1.index(), n2.index()));

		let alpha = match (has_highlight, state.is_highlighted(n1.index()) && state.is_highlighted(n2.index())) {
			(false, _) => 0.7,
			(true, true) => 0.7 + 0.3 * t,
			(true, false) => 0.7 - 0.5 * t,
		};
		ctx.set_stroke_style_str(&format!("rgba({r}, {g}, {b}, {alpha})"));
		ctx.set_line_width(line_width);
		if dashed {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		// lines of descent leave the bottom of the elder card and enter the top of the younger one
		ctx.begin_path();
		if !dashed && (y2 - y1).abs() > CARD_HEIGHT {
			let (top, bottom) = if y1 < y2 { ((x1, y1), (x2, y2)) } else { ((x2, y2), (x1, y1)) };
			let (sy, ey) = (top.1 + CARD_HEIGHT / 2.0, bottom.1 - CARD_HEIGHT / 2.0);
			let mid = (sy + ey) / 2.0;
			ctx.move_to(top.0, sy);
			ctx.bezier_curve_to(top.0, mid, bottom.0, mid, bottom.0, ey);
		} else {
			ctx.move_to(x1, y1);
			ctx.line_to(x2, y2);
		}
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	});
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

/// Shorten `text` with an ellipsis until it fits in `max_width`.
fn fit_text(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> String {
	let width = |s: &str| ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0);
	if width(text) <= max_width {
		return text.to_string();
	}
	let mut chars: Vec<char> = text.chars().collect();
	while !chars.is_empty() {
		chars.pop();
		let candidate: String = chars.iter().collect::<String>() + "…";
		if width(&candidate) <= max_width {
			return candidate;
		}
	}
	String::new()
}

fn draw_card(ctx: &CanvasRenderingContext2d, info: &CardInfo, x: f64, y: f64, alpha: f64, k: f64) {
	let (left, top) = (x - CARD_WIDTH / 2.0, y - CARD_HEIGHT / 2.0);
	let accent = gender_color(info.gender);
	ctx.set_global_alpha(alpha);

	rounded_rect(ctx, left, top, CARD_WIDTH, CARD_HEIGHT, CARD_RADIUS);
	ctx.set_fill_style_str("#25253f");
	ctx.fill();
	let border = if info.selected { 2.5 } else { 1.0 };
	ctx.set_line_width(border / k.max(0.5));
	ctx.set_stroke_style_str(if info.selected { "#ffffff" } else { accent });
	ctx.stroke();

	// avatar initial
	let (ax, ay, ar) = (left + 24.0, y, 15.0);
	ctx.begin_path();
	let _ = ctx.arc(ax, ay, ar, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(accent);
	ctx.fill();
	ctx.set_fill_style_str("white");
	ctx.set_font("bold 14px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let initial: String = info.name.chars().take(1).collect();
	let _ = ctx.fill_text(&initial.to_uppercase(), ax, ay + 1.0);

	ctx.set_text_align("left");
	let text_x = left + 46.0;
	let text_w = CARD_WIDTH - 54.0;
	let mut line_y = top + 14.0;
	if let Some(title) = &info.title {
		ctx.set_font("10px sans-serif");
		ctx.set_fill_style_str("#fbbf24");
		let _ = ctx.fill_text(&fit_text(ctx, title, text_w), text_x, line_y);
		line_y += 14.0;
	} else {
		line_y += 6.0;
	}
	ctx.set_font("bold 13px sans-serif");
	ctx.set_fill_style_str("white");
	let _ = ctx.fill_text(&fit_text(ctx, &info.name, text_w), text_x, line_y);
	ctx.set_font("10px sans-serif");
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.65)");
	let _ = ctx.fill_text(&fit_text(ctx, &info.relation, text_w), text_x, line_y + 16.0);

	if info.has_children {
		let ty = top + CARD_HEIGHT;
		ctx.begin_path();
		let _ = ctx.arc(x, ty, TOGGLE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("#1a1a2e");
		ctx.fill();
		ctx.set_stroke_style_str(accent);
		ctx.set_line_width(1.5 / k.max(0.5));
		ctx.stroke();
		ctx.set_fill_style_str("white");
		ctx.set_font("bold 12px sans-serif");
		ctx.set_text_align("center");
		let _ = ctx.fill_text(if info.collapsed { "+" } else { "−" }, x, ty + 1.0);
	}
	ctx.set_global_alpha(1.0);
	ctx.set_text_baseline("alphabetic");
	ctx.set_text_align("start");
}

fn draw_cards(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	// dimmed cards first so highlighted ones paint on top
	state.graph.visit_nodes(|node| {
		if has_highlight && state.is_highlighted(node.index()) {
			return;
		}
		let alpha = if has_highlight { 1.0 - 0.6 * t } else { 1.0 };
		draw_card(ctx, &node.data.user_data, node.x() as f64, node.y() as f64, alpha, k);
	});

	if !has_highlight {
		return;
	}
	state.graph.visit_nodes(|node| {
		if state.is_highlighted(node.index()) {
			draw_card(ctx, &node.data.user_data, node.x() as f64, node.y() as f64, 1.0, k);
		}
	});
}
