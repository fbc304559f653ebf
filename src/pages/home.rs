use std::time::Duration;

use leptos::prelude::*;
use log::{error, info, warn};
use web_sys::HtmlInputElement;

use crate::browser::{ReadAs, confirm, download_json, read_file};
use crate::components::language_selector::LanguageSelector;
use crate::components::member_form::{AddMemberDialog, EditMemberDialog};
use crate::components::member_panel::MemberPanel;
use crate::components::tree_canvas::{TreeCanvas, TreeScene, ViewCommand, ViewRequest};
use crate::i18n::{Key, Locale};
use crate::tree::transfer::{EXPORT_FILE_NAME, export_json, import_json};
use crate::tree::{
	self, FamilyTree, MemberEdit, MemberId, NewMember, Position, relation_context, sample_tree,
};

/// Delay before refitting, so the canvas has picked up the new scene.
const REFIT_DELAY: Duration = Duration::from_millis(100);

#[derive(Clone, Debug, PartialEq)]
enum Dialog {
	Closed,
	Add,
	Edit(MemberId),
}

/// Inline status line under the toolbar.
#[derive(Clone, Debug, PartialEq)]
enum Notice {
	Info(Key),
	Error(String),
}

/// Apply `change` to a copy of the tree and publish it only if it succeeds,
/// so a failed edit leaves the current tree untouched.
fn commit<T>(
	tree: RwSignal<FamilyTree>,
	change: impl FnOnce(&mut FamilyTree) -> tree::Result<T>,
) -> tree::Result<T> {
	let mut next = tree.get_untracked();
	let out = change(&mut next)?;
	tree.set(next);
	Ok(out)
}

/// Ask before throwing away a non-empty tree; an empty one is replaced
/// without a prompt.
fn approve_discard(tree: &FamilyTree, ask: impl FnOnce() -> bool) -> bool {
	tree.is_empty() || ask()
}

/// The tree editor: canvas, toolbar, detail panel and dialogs.
#[component]
pub fn Home(locale: RwSignal<Locale>) -> impl IntoView {
	let text: Signal<Locale> = locale.into();
	let tree = RwSignal::new(FamilyTree::new());
	let selected = RwSignal::new(None::<MemberId>);
	let dialog = RwSignal::new(Dialog::Closed);
	let notice = RwSignal::new(None::<Notice>);
	let camera = RwSignal::new(ViewRequest::default());
	let import_ref = NodeRef::<leptos::html::Input>::new();

	let request = move |command: ViewCommand| camera.update(|v| *v = v.next(command));
	let refit = move || set_timeout(move || request(ViewCommand::FitView), REFIT_DELAY);
	let fail = move |err: String| {
		warn!("{err}");
		notice.set(Some(Notice::Error(err)));
	};

	let scene = Signal::derive(move || {
		let locale = locale.get();
		selected.with(|sel| tree.with(|t| TreeScene::from_tree(t, locale, sel.as_deref())))
	});
	let members = Signal::derive(move || {
		tree.with(|t| {
			t.members()
				.iter()
				.map(|m| (m.id.clone(), m.name.clone()))
				.collect::<Vec<_>>()
		})
	});
	let selected_member =
		Signal::derive(move || selected.get().and_then(|id| tree.with(|t| t.member(&id).cloned())));
	let selected_relation = Signal::derive(move || {
		let locale = locale.get();
		selected
			.get()
			.and_then(|id| tree.with(|t| relation_context(t, &id, locale)))
			.unwrap_or_default()
	});
	let selected_has_children =
		Signal::derive(move || selected.get().is_some_and(|id| tree.with(|t| t.has_children(&id))));

	let add = Callback::new(move |new: NewMember| match commit(tree, |t| t.add_member(new)) {
		Ok(id) => {
			dialog.set(Dialog::Closed);
			selected.set(Some(id));
			refit();
		}
		Err(err) => fail(err.to_string()),
	});

	let edit = Callback::new(move |(id, edit): (MemberId, MemberEdit)| {
		match commit(tree, |t| t.edit_member(&id, edit)) {
			Ok(()) => dialog.set(Dialog::Closed),
			Err(err) => fail(err.to_string()),
		}
	});

	let delete = Callback::new(move |()| {
		let Some(id) = selected.get_untracked() else {
			return;
		};
		if !confirm(locale.get_untracked().text(Key::ConfirmDelete)) {
			return;
		}
		match commit(tree, |t| t.remove_member(&id)) {
			Ok(_) => selected.set(None),
			Err(err) => fail(err.to_string()),
		}
	});

	let toggle = Callback::new(move |id: MemberId| {
		let collapse = !tree.with_untracked(|t| t.member(&id).is_some_and(|m| m.collapsed));
		match commit(tree, |t| t.set_collapsed(&id, collapse)) {
			Ok(_) => refit(),
			Err(err) => fail(err.to_string()),
		}
	});

	let on_move = move |(id, position): (MemberId, Position)| {
		if let Err(err) = commit(tree, |t| t.move_member(&id, position)) {
			fail(err.to_string());
		}
	};

	let replace_tree = move |next: FamilyTree| {
		let keep = tree.with_untracked(|t| {
			approve_discard(t, || confirm(locale.get_untracked().text(Key::ConfirmReplace)))
		});
		if keep {
			info!("Replacing tree with {} members", next.len());
			tree.set(next);
			selected.set(None);
			dialog.set(Dialog::Closed);
			refit();
		}
		keep
	};

	let on_import = move |ev: leptos::ev::Event| {
		let input: HtmlInputElement = event_target(&ev);
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		input.set_value("");
		let started = read_file(&file, ReadAs::Text, move |result| {
			match result.and_then(|text| import_json(&text).map_err(|e| e.to_string())) {
				Ok(next) => {
					if replace_tree(next) {
						notice.set(Some(Notice::Info(Key::Imported)));
					}
				}
				Err(err) => fail(err),
			}
		});
		if let Err(err) = started {
			error!("Could not start reading import file: {err:?}");
		}
	};

	let on_export = move |_| {
		if tree.with_untracked(FamilyTree::is_empty) {
			notice.set(Some(Notice::Info(Key::NothingToExport)));
			return;
		}
		let json = match tree.with_untracked(export_json) {
			Ok(json) => json,
			Err(err) => return fail(err.to_string()),
		};
		match download_json(EXPORT_FILE_NAME, &json) {
			Ok(()) => notice.set(Some(Notice::Info(Key::Exported))),
			Err(err) => {
				error!("Export download failed: {err:?}");
				fail("Export failed".to_string());
			}
		}
	};

	let on_reset = move |_| {
		let approved = tree.with_untracked(|t| {
			approve_discard(t, || confirm(locale.get_untracked().text(Key::ConfirmReset)))
		});
		if approved {
			tree.update(FamilyTree::clear);
			selected.set(None);
			notice.set(None);
		}
	};

	let on_sample = move |_| {
		replace_tree(sample_tree());
	};

	let on_select = move |id: Option<MemberId>| selected.set(id);

	let dialog_view = move || match dialog.get() {
		Dialog::Closed => None,
		Dialog::Add => Some(
			view! {
				<AddMemberDialog
					locale=text
					members=members
					related_to=selected.get_untracked().unwrap_or_default()
					on_submit=add
					on_close=move |()| dialog.set(Dialog::Closed)
				/>
			}
			.into_any(),
		),
		Dialog::Edit(id) => {
			let member = tree.with_untracked(|t| t.member(&id).cloned());
			if member.is_none() {
				warn!("Edit requested for missing member {id}");
			}
			Some(
				view! {
					<EditMemberDialog
						locale=text
						member=member
						on_submit=edit
						on_close=move |()| dialog.set(Dialog::Closed)
					/>
				}
				.into_any(),
			)
		}
	};

	view! {
		<div class="fullscreen-graph">
			<TreeCanvas
				scene=scene
				view=camera
				on_select=on_select
				on_move=on_move
				on_toggle=toggle
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>{move || locale.get().text(Key::AppTitle)}</h1>
				<div class="toolbar">
					<button type="button" class="primary" on:click=move |_| dialog.set(Dialog::Add)>
						{move || locale.get().text(Key::AddMember)}
					</button>
					<button
						type="button"
						on:click=move |_| {
							if let Some(input) = import_ref.get_untracked() {
								input.click();
							}
						}
					>
						{move || locale.get().text(Key::Import)}
					</button>
					<button type="button" on:click=on_export>
						{move || locale.get().text(Key::Export)}
					</button>
					<button type="button" on:click=on_reset>
						{move || locale.get().text(Key::Reset)}
					</button>
					<button type="button" on:click=on_sample>
						{move || locale.get().text(Key::Sample)}
					</button>
					<button type="button" on:click=move |_| request(ViewCommand::ZoomIn)>
						{move || locale.get().text(Key::ZoomIn)}
					</button>
					<button type="button" on:click=move |_| request(ViewCommand::ZoomOut)>
						{move || locale.get().text(Key::ZoomOut)}
					</button>
					<button type="button" on:click=move |_| request(ViewCommand::FitView)>
						{move || locale.get().text(Key::FitView)}
					</button>
					<LanguageSelector locale=locale />
				</div>
				<input
					type="file"
					accept="application/json,.json"
					class="hidden"
					node_ref=import_ref
					on:change=on_import
				/>
				{move || {
					notice
						.get()
						.map(|n| {
							let (class, message) = match n {
								Notice::Info(key) => ("notice", locale.get().text(key).to_string()),
								Notice::Error(msg) => ("notice error", msg),
							};
							view! {
								<p class=class>
									{message}
									<button type="button" class="link-button" on:click=move |_| notice.set(None)>
										"×"
									</button>
								</p>
							}
						})
				}}
				<Show when=move || tree.with(FamilyTree::is_empty)>
					<p class="subtitle">{move || locale.get().text(Key::EmptyTree)}</p>
				</Show>
			</div>
			<MemberPanel
				locale=text
				member=selected_member
				relation=selected_relation
				has_children=selected_has_children
				on_edit=move |()| {
					if let Some(id) = selected.get_untracked() {
						dialog.set(Dialog::Edit(id));
					}
				}
				on_delete=delete
				on_toggle=move |()| {
					if let Some(id) = selected.get_untracked() {
						toggle.run(id);
					}
				}
				on_close=move |()| selected.set(None)
			/>
			{dialog_view}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_tree_is_discarded_without_asking() {
		let asked = std::cell::Cell::new(false);
		assert!(approve_discard(&FamilyTree::new(), || {
			asked.set(true);
			false
		}));
		assert!(!asked.get());

		let tree = sample_tree();
		assert!(!approve_discard(&tree, || false));
		assert!(approve_discard(&tree, || true));
	}

	#[test]
	fn failed_change_leaves_tree_untouched() {
		let tree = RwSignal::new(sample_tree());
		let before = tree.get_untracked();

		let result = commit(tree, |t| {
			t.clear();
			t.remove_member("nobody")
		});
		assert!(result.is_err());
		assert_eq!(tree.get_untracked(), before);

		commit(tree, |t| t.remove_member("omar")).unwrap();
		assert_eq!(tree.get_untracked().len(), before.len() - 1);
	}
}
