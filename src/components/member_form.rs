//! Add and edit dialogs.
//!
//! Both dialogs keep the raw [`MemberForm`] in a signal and only hand a
//! validated value to their `on_submit` callback.

use leptos::prelude::*;
use log::{error, warn};
use web_sys::HtmlInputElement;

use crate::browser::{ReadAs, read_file};
use crate::i18n::{Key, Locale};
use crate::tree::form::{Field, FormErrors, IMAGE_TYPES, MemberForm, check_image};
use crate::tree::{Gender, Member, MemberEdit, MemberId, NewMember, RelationKind};

fn field_error(errors: RwSignal<FormErrors>, field: Field) -> impl IntoView {
	move || {
		errors.with(|e| {
			e.get(field)
				.map(|err| view! { <small class="field-error">{err.to_string()}</small> })
		})
	}
}

#[component]
fn TextField(
	locale: Signal<Locale>,
	label: Key,
	form: RwSignal<MemberForm>,
	errors: RwSignal<FormErrors>,
	read: fn(&MemberForm) -> &String,
	write: fn(&mut MemberForm, String),
	#[prop(optional)] field: Option<Field>,
	#[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
	view! {
		<label class="field">
			<span>{move || locale.get().text(label)}</span>
			<input
				type=input_type
				prop:value=move || form.with(|f| read(f).clone())
				on:input=move |ev| form.update(|f| write(f, event_target_value(&ev)))
			/>
			{field.map(|field| field_error(errors, field))}
		</label>
	}
}

/// Fields shared by both dialogs: name, gender, title, image and links.
#[component]
fn CommonFields(
	locale: Signal<Locale>,
	form: RwSignal<MemberForm>,
	errors: RwSignal<FormErrors>,
) -> impl IntoView {
	let image_error = RwSignal::new(None::<String>);

	let on_image = move |ev: leptos::ev::Event| {
		let input: HtmlInputElement = event_target(&ev);
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		input.set_value("");
		if let Err(err) = check_image(&file.type_(), file.size() as u64) {
			warn!("Rejected image upload: {err}");
			image_error.set(Some(err.to_string()));
			return;
		}
		image_error.set(None);
		let started = read_file(&file, ReadAs::DataUrl, move |result| match result {
			Ok(url) => form.update(|f| f.image = Some(url)),
			Err(msg) => image_error.set(Some(msg)),
		});
		if let Err(err) = started {
			error!("Could not start reading image: {err:?}");
		}
	};

	view! {
		<TextField
			locale=locale
			label=Key::Name
			form=form
			errors=errors
			read=|f| &f.name
			write=|f, v| f.name = v
			field=Field::Name
		/>
		<label class="field">
			<span>{move || locale.get().text(Key::Gender)}</span>
			<select on:change=move |ev| {
				form.update(|f| f.gender = Gender::from_code(&event_target_value(&ev)))
			}>
				{Gender::ALL
					.into_iter()
					.map(|gender| {
						view! {
							<option
								value=gender.code()
								prop:selected=move || form.with(|f| f.gender == gender)
							>
								{move || locale.get().gender(gender)}
							</option>
						}
					})
					.collect_view()}
			</select>
		</label>
		<TextField
			locale=locale
			label=Key::Title
			form=form
			errors=errors
			read=|f| &f.title
			write=|f, v| f.title = v
		/>
		<div class="field">
			<span>{move || locale.get().text(Key::Image)}</span>
			{move || {
				form.with(|f| f.image.clone())
					.map(|src| {
						view! {
							<div class="image-preview">
								<img src=src alt="" />
								<button
									type="button"
									class="link-button"
									on:click=move |_| form.update(|f| f.image = None)
								>
									"×"
								</button>
							</div>
						}
					})
			}}
			<input type="file" accept=IMAGE_TYPES.join(",") on:change=on_image />
			{move || image_error.get().map(|msg| view! { <small class="field-error">{msg}</small> })}
		</div>
		<TextField
			locale=locale
			label=Key::Website
			form=form
			errors=errors
			read=|f| &f.website
			write=|f, v| f.website = v
			field=Field::Website
			input_type="url"
		/>
		<TextField
			locale=locale
			label=Key::Facebook
			form=form
			errors=errors
			read=|f| &f.facebook_url
			write=|f, v| f.facebook_url = v
			field=Field::Facebook
			input_type="url"
		/>
		<TextField
			locale=locale
			label=Key::Twitter
			form=form
			errors=errors
			read=|f| &f.twitter_handle
			write=|f, v| f.twitter_handle = v
			field=Field::Twitter
		/>
		<TextField
			locale=locale
			label=Key::Linkedin
			form=form
			errors=errors
			read=|f| &f.linkedin_url
			write=|f, v| f.linkedin_url = v
			field=Field::Linkedin
			input_type="url"
		/>
	}
}

/// Dialog for adding a member. With no `members` to relate to, the
/// relationship fields are skipped and the new member becomes the root.
#[component]
pub fn AddMemberDialog(
	#[prop(into)] locale: Signal<Locale>,
	/// `(id, name)` of every member that can be related to.
	#[prop(into)]
	members: Signal<Vec<(MemberId, String)>>,
	/// Pre-selected related member, empty for none.
	#[prop(optional)]
	related_to: MemberId,
	#[prop(into)] on_submit: Callback<NewMember>,
	#[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
	let form = RwSignal::new(MemberForm {
		related_to,
		..Default::default()
	});
	let errors = RwSignal::new(FormErrors::default());
	let first = move || members.with(Vec::is_empty);

	let submit = move |_| {
		let result = form.with(|f| f.validate_new(first()));
		match result {
			Ok(new) => {
				errors.set(FormErrors::default());
				on_submit.run(new);
			}
			Err(found) => errors.set(found),
		}
	};

	view! {
		<div class="dialog-backdrop">
			<div class="dialog" role="dialog">
				<h2>{move || locale.get().text(Key::AddTitle)}</h2>
				<Show
					when=move || !first()
					fallback=move || view! { <p class="hint">{move || locale.get().text(Key::AddFirstHint)}</p> }
				>
					<p class="hint">{move || locale.get().text(Key::AddHint)}</p>
					<label class="field">
						<span>{move || locale.get().text(Key::Relationship)}</span>
						<select on:change=move |ev| {
							form.update(|f| f.relationship = event_target_value(&ev))
						}>
							<option value="" prop:selected=move || form.with(|f| f.relationship.is_empty())>
								{move || locale.get().text(Key::SelectRelationship)}
							</option>
							{RelationKind::ADDABLE
								.into_iter()
								.map(|kind| {
									view! {
										<option
											value=kind.label()
											prop:selected=move || form.with(|f| f.relationship == kind.label())
										>
											{move || locale.get().relation(kind)}
										</option>
									}
								})
								.collect_view()}
						</select>
						{field_error(errors, Field::Relationship)}
					</label>
					<label class="field">
						<span>{move || locale.get().text(Key::RelatedTo)}</span>
						<select on:change=move |ev| {
							form.update(|f| f.related_to = event_target_value(&ev))
						}>
							<option value="" prop:selected=move || form.with(|f| f.related_to.is_empty())>
								{move || locale.get().text(Key::SelectMember)}
							</option>
							{move || {
								members
									.get()
									.into_iter()
									.map(|(id, name)| {
										let current = id.clone();
										view! {
											<option
												value=id
												prop:selected=move || form.with(|f| f.related_to == current)
											>
												{name}
											</option>
										}
									})
									.collect_view()
							}}
						</select>
						{field_error(errors, Field::RelatedTo)}
					</label>
				</Show>
				<CommonFields locale=locale form=form errors=errors />
				<div class="dialog-actions">
					<button type="button" on:click=move |_| on_close.run(())>
						{move || locale.get().text(Key::Cancel)}
					</button>
					<button type="button" class="primary" on:click=submit>
						{move || locale.get().text(Key::AddMember)}
					</button>
				</div>
			</div>
		</div>
	}
}

/// Dialog for editing an existing member. `member` is `None` when the id
/// the dialog was opened for no longer exists.
#[component]
pub fn EditMemberDialog(
	#[prop(into)] locale: Signal<Locale>,
	member: Option<Member>,
	#[prop(into)] on_submit: Callback<(MemberId, MemberEdit)>,
	#[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
	let body = match member {
		Some(member) => {
			let id = member.id.clone();
			let form = RwSignal::new(MemberForm::from_edit(&MemberEdit::from(&member)));
			let errors = RwSignal::new(FormErrors::default());
			let submit = move |_| {
				let result = form.with(|f| f.validate_edit());
				match result {
					Ok(edit) => {
						errors.set(FormErrors::default());
						on_submit.run((id.clone(), edit));
					}
					Err(found) => errors.set(found),
				}
			};
			view! {
				<CommonFields locale=locale form=form errors=errors />
				<div class="dialog-actions">
					<button type="button" on:click=move |_| on_close.run(())>
						{move || locale.get().text(Key::Cancel)}
					</button>
					<button type="button" class="primary" on:click=submit>
						{move || locale.get().text(Key::SaveChanges)}
					</button>
				</div>
			}
			.into_any()
		}
		None => view! {
			<p class="field-error">{move || locale.get().text(Key::MemberNotFound)}</p>
			<div class="dialog-actions">
				<button type="button" on:click=move |_| on_close.run(())>
					{move || locale.get().text(Key::Close)}
				</button>
			</div>
		}
		.into_any(),
	};

	view! {
		<div class="dialog-backdrop">
			<div class="dialog" role="dialog">
				<h2>{move || locale.get().text(Key::EditTitle)}</h2>
				{body}
			</div>
		</div>
	}
}
