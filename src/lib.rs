//! Leptos client-side family tree editor: app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod i18n;
pub mod tree;

// Modules
mod browser;
mod components;
mod pages;

// Top-Level pages
use crate::i18n::Key;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the editor and handles 404's.
///
/// Owns the UI language: restored from `localStorage`, saved on change and
/// passed down to every page.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let locale = RwSignal::new(browser::stored_locale().unwrap_or_default());
	Effect::new(move |_| {
		let current = locale.get();
		info!("Language set to {}", current.code());
		browser::store_locale(current);
	});

	view! {
		<Html
			attr:lang=move || locale.get().code()
			attr:dir=move || locale.get().direction()
			attr:data-theme="dark"
		/>

		// sets the document title
		<Title text=move || locale.get().text(Key::AppTitle) />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=move || view! { <Home locale=locale /> } />
			</Routes>
		</Router>
	}
}

