//! Add/edit form state and its validation.
//!
//! Forms hold raw strings as typed by the user; validation turns them into
//! [`NewMember`] / [`MemberEdit`] or a list of per-field errors.

use std::fmt;

use url::Url;

use super::error::ImageError;
use super::types::{Gender, MemberEdit, NewMember, RelationKind, SocialLinks};

/// Upload limit for profile images.
pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

/// Accepted image MIME types.
pub const IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Raw field values of the add and edit dialogs.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemberForm {
	pub name: String,
	pub gender: Gender,
	/// Relation label, empty when nothing is selected.
	pub relationship: String,
	/// Id of the related member, empty when nothing is selected.
	pub related_to: String,
	pub image: Option<String>,
	pub title: String,
	pub website: String,
	pub facebook_url: String,
	pub twitter_handle: String,
	pub linkedin_url: String,
}

/// Form fields that can carry an error.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
	Name,
	Relationship,
	RelatedTo,
	Website,
	Facebook,
	Twitter,
	Linkedin,
}

/// Why a field was rejected.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
	Required,
	InvalidUrl,
	InvalidHandle,
}

impl fmt::Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldError::Required => f.write_str("This field is required"),
			FieldError::InvalidUrl => f.write_str("Enter a full http(s) URL"),
			FieldError::InvalidHandle => {
				f.write_str("Use up to 15 letters, digits or underscores")
			}
		}
	}
}

/// All errors of one validation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<(Field, FieldError)>);

impl FormErrors {
	/// The error recorded for `field`, if any.
	pub fn get(&self, field: Field) -> Option<&FieldError> {
		self.0.iter().find(|(f, _)| *f == field).map(|(_, e)| e)
	}

	/// True when validation found nothing.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	fn push(&mut self, field: Field, error: FieldError) {
		self.0.push((field, error));
	}

	fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
		if self.is_empty() { Ok(value()) } else { Err(self) }
	}
}

impl MemberForm {
	/// Pre-filled form for editing.
	pub fn from_edit(edit: &MemberEdit) -> Self {
		let text = |v: &Option<String>| v.clone().unwrap_or_default();
		Self {
			name: edit.name.clone(),
			gender: edit.gender,
			image: edit.image.clone(),
			title: text(&edit.title),
			website: text(&edit.social.website),
			facebook_url: text(&edit.social.facebook_url),
			twitter_handle: text(&edit.social.twitter_handle),
			linkedin_url: text(&edit.social.linkedin_url),
			..Default::default()
		}
	}

	fn check_common(&self, errors: &mut FormErrors) -> SocialLinks {
		if self.name.trim().is_empty() {
			errors.push(Field::Name, FieldError::Required);
		}
		let mut url = |field: Field, raw: &str| -> Option<String> {
			let value = optional(raw)?;
			if is_web_url(&value) {
				Some(value)
			} else {
				errors.push(field, FieldError::InvalidUrl);
				None
			}
		};
		let website = url(Field::Website, &self.website);
		let facebook_url = url(Field::Facebook, &self.facebook_url);
		let linkedin_url = url(Field::Linkedin, &self.linkedin_url);
		let twitter_handle = optional(&self.twitter_handle).filter(|h| {
			let ok = is_twitter_handle(h);
			if !ok {
				errors.push(Field::Twitter, FieldError::InvalidHandle);
			}
			ok
		});
		SocialLinks {
			website,
			facebook_url,
			twitter_handle,
			linkedin_url,
		}
	}

	/// Validate the add dialog. `first` is true when the tree is empty, in
	/// which case relationship and related member are not asked for.
	pub fn validate_new(&self, first: bool) -> Result<NewMember, FormErrors> {
		let mut errors = FormErrors::default();
		let social = self.check_common(&mut errors);

		let (relationship, related_to) = if first {
			(None, None)
		} else {
			let kind = RelationKind::from_label(&self.relationship);
			if kind.is_none() {
				errors.push(Field::Relationship, FieldError::Required);
			}
			let related = optional(&self.related_to);
			if related.is_none() {
				errors.push(Field::RelatedTo, FieldError::Required);
			}
			(kind, related)
		};

		errors.into_result(|| NewMember {
			name: self.name.trim().to_string(),
			gender: self.gender,
			relationship,
			related_to,
			image: self.image.clone(),
			title: optional(&self.title),
			social,
		})
	}

	/// Validate the edit dialog.
	pub fn validate_edit(&self) -> Result<MemberEdit, FormErrors> {
		let mut errors = FormErrors::default();
		let social = self.check_common(&mut errors);
		errors.into_result(|| MemberEdit {
			name: self.name.trim().to_string(),
			gender: self.gender,
			image: self.image.clone(),
			title: optional(&self.title),
			social,
		})
	}
}

/// Check an upload before reading it.
pub fn check_image(mime: &str, size: u64) -> Result<(), ImageError> {
	if !IMAGE_TYPES.contains(&mime) {
		return Err(ImageError::UnsupportedType(mime.to_string()));
	}
	if size > MAX_IMAGE_BYTES {
		return Err(ImageError::TooLarge {
			size,
			limit: MAX_IMAGE_BYTES,
		});
	}
	Ok(())
}

fn optional(raw: &str) -> Option<String> {
	let raw = raw.trim();
	(!raw.is_empty()).then(|| raw.to_string())
}

fn is_web_url(raw: &str) -> bool {
	Url::parse(raw).is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
}

fn is_twitter_handle(raw: &str) -> bool {
	let handle = raw.strip_prefix('@').unwrap_or(raw);
	(1..=15).contains(&handle.len())
		&& handle
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
	use super::*;

	fn filled() -> MemberForm {
		MemberForm {
			name: " Zara ".into(),
			relationship: "child".into(),
			related_to: "abc".into(),
			..Default::default()
		}
	}

	#[test]
	fn first_member_needs_only_a_name() {
		let form = MemberForm {
			name: "Root".into(),
			..Default::default()
		};
		let new = form.validate_new(true).unwrap();
		assert_eq!(new.relationship, None);
		assert_eq!(new.related_to, None);
		assert_eq!(new.gender, Gender::Other);
	}

	#[test]
	fn later_members_need_relation_fields() {
		let errors = MemberForm::default().validate_new(false).unwrap_err();
		assert_eq!(errors.get(Field::Name), Some(&FieldError::Required));
		assert_eq!(errors.get(Field::Relationship), Some(&FieldError::Required));
		assert_eq!(errors.get(Field::RelatedTo), Some(&FieldError::Required));

		let new = filled().validate_new(false).unwrap();
		assert_eq!(new.name, "Zara");
		assert_eq!(new.relationship, Some(RelationKind::Child));
		assert_eq!(new.related_to.as_deref(), Some("abc"));
	}

	#[test]
	fn social_links_are_checked() {
		let form = MemberForm {
			website: "example.com".into(),
			facebook_url: "https://facebook.com/zara".into(),
			twitter_handle: "@not a handle".into(),
			linkedin_url: "ftp://linkedin.com/in/zara".into(),
			..filled()
		};
		let errors = form.validate_new(false).unwrap_err();
		assert_eq!(errors.get(Field::Website), Some(&FieldError::InvalidUrl));
		assert_eq!(errors.get(Field::Facebook), None);
		assert_eq!(errors.get(Field::Twitter), Some(&FieldError::InvalidHandle));
		assert_eq!(errors.get(Field::Linkedin), Some(&FieldError::InvalidUrl));

		let form = MemberForm {
			website: "https://zara.dev".into(),
			twitter_handle: "@zara_k".into(),
			..filled()
		};
		let new = form.validate_new(false).unwrap();
		assert_eq!(new.social.website.as_deref(), Some("https://zara.dev"));
		assert_eq!(new.social.twitter_handle.as_deref(), Some("@zara_k"));
		assert_eq!(new.social.facebook_url, None);
	}

	#[test]
	fn edit_round_trips_through_form() {
		let edit = MemberEdit {
			name: "Zara".into(),
			gender: Gender::Female,
			title: Some("Dr.".into()),
			social: SocialLinks {
				linkedin_url: Some("https://linkedin.com/in/zara".into()),
				..Default::default()
			},
			..Default::default()
		};
		assert_eq!(MemberForm::from_edit(&edit).validate_edit(), Ok(edit));
	}

	#[test]
	fn image_limits() {
		assert_eq!(check_image("image/png", 1024), Ok(()));
		assert_eq!(check_image("image/webp", MAX_IMAGE_BYTES), Ok(()));
		assert_eq!(
			check_image("image/gif", 10),
			Err(ImageError::UnsupportedType("image/gif".into()))
		);
		assert!(matches!(
			check_image("image/jpeg", MAX_IMAGE_BYTES + 1),
			Err(ImageError::TooLarge { .. })
		));
	}
}
