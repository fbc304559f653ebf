use leptos::prelude::*;

use crate::i18n::{Key, Locale};

/// Picker listing every locale as "native (English)".
#[component]
pub fn LanguageSelector(locale: RwSignal<Locale>) -> impl IntoView {
	let on_change = move |ev: leptos::ev::Event| {
		let code = event_target_value(&ev);
		if let Some(next) = Locale::from_code(&code) {
			locale.set(next);
		}
	};

	view! {
		<label class="language-selector">
			<span class="sr-only">{move || locale.get().text(Key::Language)}</span>
			<select on:change=on_change>
				{Locale::ALL
					.into_iter()
					.map(|option| {
						view! {
							<option
								value=option.code()
								prop:selected=move || locale.get() == option
							>
								{format!("{} ({})", option.native_name(), option.english_name())}
							</option>
						}
					})
					.collect_view()}
			</select>
		</label>
	}
}
