//! Thin wrappers over the browser APIs the editor needs: confirmation
//! prompts, file download and upload, and `localStorage`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::set_timeout;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, File, FileReader, HtmlAnchorElement, Url};

use crate::i18n::{Locale, STORAGE_KEY};

/// How long a download URL stays valid after the click.
const REVOKE_DELAY: Duration = Duration::from_secs(1);

/// Blocking yes/no prompt. Anything but an explicit "OK" is a no.
pub fn confirm(message: &str) -> bool {
	web_sys::window()
		.and_then(|w| w.confirm_with_message(message).ok())
		.unwrap_or(false)
}

/// Offer `json` to the user as a file download.
pub fn download_json(file_name: &str, json: &str) -> Result<(), JsValue> {
	let parts = js_sys::Array::of1(&JsValue::from_str(json));
	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();
	// revoking right away can cancel the download in some browsers
	set_timeout(
		move || {
			if Url::revoke_object_url(&url).is_err() {
				warn!("Could not revoke download URL");
			}
		},
		REVOKE_DELAY,
	);
	Ok(())
}

/// How a [`File`] should be read.
#[derive(Clone, Copy, Debug)]
pub enum ReadAs {
	Text,
	DataUrl,
}

type ReadDone = Box<dyn FnOnce(Result<String, String>)>;

/// Read `file` asynchronously; `on_done` runs exactly once with the contents
/// or a message.
pub fn read_file(
	file: &File,
	read_as: ReadAs,
	on_done: impl FnOnce(Result<String, String>) + 'static,
) -> Result<(), JsValue> {
	let reader = FileReader::new()?;
	let slot: Rc<RefCell<Option<ReadDone>>> = Rc::new(RefCell::new(Some(Box::new(on_done))));

	let (slot_load, reader_load) = (slot.clone(), reader.clone());
	let onload = Closure::once_into_js(move || {
		let result = reader_load
			.result()
			.ok()
			.and_then(|v| v.as_string())
			.ok_or_else(|| "The file could not be read".to_string());
		let done = slot_load.borrow_mut().take();
		if let Some(done) = done {
			done(result);
		}
	});
	let onerror = Closure::once_into_js(move || {
		let done = slot.borrow_mut().take();
		if let Some(done) = done {
			done(Err("The file could not be read".to_string()));
		}
	});
	reader.set_onload(Some(onload.unchecked_ref()));
	reader.set_onerror(Some(onerror.unchecked_ref()));

	match read_as {
		ReadAs::Text => reader.read_as_text(file),
		ReadAs::DataUrl => reader.read_as_data_url(file),
	}
}

/// Language saved by a previous session.
pub fn stored_locale() -> Option<Locale> {
	let storage = web_sys::window()?.local_storage().ok()??;
	let code = storage.get_item(STORAGE_KEY).ok()??;
	Locale::from_code(&code)
}

/// Remember `locale` for the next session. Failures are only logged.
pub fn store_locale(locale: Locale) {
	let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
		return;
	};
	if storage.set_item(STORAGE_KEY, locale.code()).is_err() {
		warn!("Could not persist language {}", locale.code());
	}
}
