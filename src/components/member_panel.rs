use leptos::prelude::*;

use crate::i18n::{Key, Locale};
use crate::tree::{Member, SocialLinks};

fn social_links(social: &SocialLinks) -> impl IntoView + use<> {
	let links = [
		("Website", social.website.clone()),
		("Facebook", social.facebook_url.clone()),
		("Twitter", social.twitter_url()),
		("LinkedIn", social.linkedin_url.clone()),
	];
	view! {
		<ul class="social-links">
			{links
				.into_iter()
				.filter_map(|(label, href)| {
					href.map(|href| {
						view! {
							<li>
								<a href=href target="_blank" rel="noopener noreferrer">
									{label}
								</a>
							</li>
						}
					})
				})
				.collect_view()}
		</ul>
	}
}

/// Side panel with the selected member's details and actions.
#[component]
pub fn MemberPanel(
	#[prop(into)] locale: Signal<Locale>,
	#[prop(into)] member: Signal<Option<Member>>,
	/// Localized relation summary of `member`.
	#[prop(into)]
	relation: Signal<String>,
	#[prop(into)] has_children: Signal<bool>,
	#[prop(into)] on_edit: Callback<()>,
	#[prop(into)] on_delete: Callback<()>,
	#[prop(into)] on_toggle: Callback<()>,
	#[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
	move || {
		member.get().map(|m| {
			let initial: String = m.name.chars().take(1).collect::<String>().to_uppercase();
			let avatar = match m.image.clone() {
				Some(src) => view! { <img class="avatar" src=src alt=m.name.clone() /> }.into_any(),
				None => view! { <div class="avatar">{initial}</div> }.into_any(),
			};
			let (gender, collapsed) = (m.gender, m.collapsed);
			view! {
				<aside class="member-panel">
					<button
						type="button"
						class="close"
						title=move || locale.get().text(Key::Close)
						on:click=move |_| on_close.run(())
					>
						"×"
					</button>
					{avatar}
					{m.title.clone().map(|t| view! { <p class="member-title">{t}</p> })}
					<h2>{m.name.clone()}</h2>
					<p class="member-gender">{move || locale.get().gender(gender)}</p>
					<p class="member-relation">{move || relation.get()}</p>
					{(!m.social.is_empty()).then(|| social_links(&m.social))}
					<div class="panel-actions">
						<button type="button" on:click=move |_| on_edit.run(())>
							{move || locale.get().text(Key::Edit)}
						</button>
						<button type="button" class="danger" on:click=move |_| on_delete.run(())>
							{move || locale.get().text(Key::Delete)}
						</button>
						<Show when=move || has_children.get()>
							<button type="button" on:click=move |_| on_toggle.run(())>
								{move || {
									let key = if collapsed { Key::ShowChildren } else { Key::HideChildren };
									locale.get().text(key)
								}}
							</button>
						</Show>
					</div>
				</aside>
			}
		})
	}
}
