//! Locales and UI string lookup.
//!
//! There is no ambient language context: the app resolves one [`Locale`] at
//! start-up and hands it to every component that renders text.

use crate::tree::{Gender, RelationKind};

/// `localStorage` key holding the selected language code.
pub const STORAGE_KEY: &str = "family-tree-language";

/// A supported UI language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
	/// English.
	#[default]
	En,
	/// Urdu (right-to-left).
	Ur,
	/// Punjabi (Gurmukhi).
	Pa,
}

/// Every string the UI looks up by key.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
	AppTitle,
	Name,
	Gender,
	Relationship,
	RelatedTo,
	Title,
	Image,
	Website,
	Facebook,
	Twitter,
	Linkedin,
	HideChildren,
	ShowChildren,
	Edit,
	Delete,
	AddMember,
	SaveChanges,
	Cancel,
	Import,
	Export,
	Reset,
	Sample,
	ZoomIn,
	ZoomOut,
	FitView,
	Language,
	Male,
	Female,
	Other,
	SelectMember,
	SelectRelationship,
	AddFirstHint,
	AddHint,
	EditTitle,
	AddTitle,
	RootMember,
	EmptyTree,
	ConfirmDelete,
	ConfirmReset,
	ConfirmReplace,
	NothingToExport,
	Imported,
	Exported,
	Close,
	MemberNotFound,
}

impl Locale {
	/// All locales in picker order.
	pub const ALL: [Locale; 3] = [Locale::En, Locale::Ur, Locale::Pa];

	/// BCP-47 style language code, also the persisted value.
	pub fn code(self) -> &'static str {
		match self {
			Locale::En => "en",
			Locale::Ur => "ur",
			Locale::Pa => "pa",
		}
	}

	/// Parse a persisted language code.
	pub fn from_code(code: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|l| l.code() == code.trim())
	}

	/// English name of the language.
	pub fn english_name(self) -> &'static str {
		match self {
			Locale::En => "English",
			Locale::Ur => "Urdu",
			Locale::Pa => "Punjabi",
		}
	}

	/// Name of the language in its own script.
	pub fn native_name(self) -> &'static str {
		match self {
			Locale::En => "English",
			Locale::Ur => "اردو",
			Locale::Pa => "ਪੰਜਾਬੀ",
		}
	}

	/// Text direction for the document root.
	pub fn direction(self) -> &'static str {
		match self {
			Locale::Ur => "rtl",
			_ => "ltr",
		}
	}

	/// Look up a UI string.
	pub fn text(self, key: Key) -> &'static str {
		match self {
			Locale::En => en(key),
			Locale::Ur => ur(key),
			Locale::Pa => pa(key),
		}
	}

	/// Localized gender label.
	pub fn gender(self, gender: Gender) -> &'static str {
		self.text(match gender {
			Gender::Male => Key::Male,
			Gender::Female => Key::Female,
			Gender::Other => Key::Other,
		})
	}

	/// Localized relation label.
	pub fn relation(self, kind: RelationKind) -> &'static str {
		use RelationKind::*;
		match self {
			Locale::En => kind.label(),
			Locale::Ur => match kind {
				Root => "بنیادی رکن",
				Parent => "والدین",
				Child => "اولاد",
				Spouse => "شریک حیات",
				Sibling => "بہن بھائی",
				Grandparent => "دادا دادی",
				Grandfather => "دادا",
				Grandmother => "دادی",
				Grandchild => "پوتا پوتی",
				ParentSibling => "چچا خالہ",
				Uncle => "چچا",
				Aunt => "خالہ",
				Cousin => "کزن",
				Nephew => "بھتیجا",
				Niece => "بھتیجی",
				Nibling => "بھتیجا بھتیجی",
			},
			Locale::Pa => match kind {
				Root => "ਮੂਲ ਮੈਂਬਰ",
				Parent => "ਮਾਪੇ",
				Child => "ਬੱਚਾ",
				Spouse => "ਜੀਵਨ ਸਾਥੀ",
				Sibling => "ਭੈਣ-ਭਰਾ",
				Grandparent => "ਦਾਦਾ-ਦਾਦੀ",
				Grandfather => "ਦਾਦਾ",
				Grandmother => "ਦਾਦੀ",
				Grandchild => "ਪੋਤਾ-ਪੋਤੀ",
				ParentSibling => "ਚਾਚਾ-ਮਾਸੀ",
				Uncle => "ਚਾਚਾ",
				Aunt => "ਮਾਸੀ",
				Cousin => "ਚਚੇਰਾ ਭਰਾ",
				Nephew => "ਭਤੀਜਾ",
				Niece => "ਭਤੀਜੀ",
				Nibling => "ਭਤੀਜਾ-ਭਤੀਜੀ",
			},
		}
	}

	/// Phrase "`relation` of `names`" in this locale's word order.
	pub fn relation_phrase(self, relation: &str, names: &[&str]) -> String {
		if names.is_empty() {
			return relation.to_string();
		}
		let names = names.join(" & ");
		match self {
			Locale::En => format!("{relation} of {names}"),
			Locale::Ur => format!("{names} کا {relation}"),
			Locale::Pa => format!("{names} ਦਾ {relation}"),
		}
	}
}

fn en(key: Key) -> &'static str {
	match key {
		Key::AppTitle => "Family Tree",
		Key::Name => "Name",
		Key::Gender => "Gender",
		Key::Relationship => "Relation",
		Key::RelatedTo => "Related to",
		Key::Title => "Title",
		Key::Image => "Profile image",
		Key::Website => "Website",
		Key::Facebook => "Facebook",
		Key::Twitter => "Twitter",
		Key::Linkedin => "LinkedIn",
		Key::HideChildren => "Hide Children",
		Key::ShowChildren => "Show Children",
		Key::Edit => "Edit",
		Key::Delete => "Delete",
		Key::AddMember => "Add Member",
		Key::SaveChanges => "Save Changes",
		Key::Cancel => "Cancel",
		Key::Import => "Import",
		Key::Export => "Export",
		Key::Reset => "Reset",
		Key::Sample => "Sample",
		Key::ZoomIn => "Zoom In",
		Key::ZoomOut => "Zoom Out",
		Key::FitView => "Fit View",
		Key::Language => "Language",
		Key::Male => "Male",
		Key::Female => "Female",
		Key::Other => "Other",
		Key::SelectMember => "Select existing member",
		Key::SelectRelationship => "Select relationship",
		Key::AddFirstHint => "Add the first member to start your family tree.",
		Key::AddHint => "Add a new member and define their relationship.",
		Key::EditTitle => "Edit Family Member",
		Key::AddTitle => "Add Family Member",
		Key::RootMember => "Root Member",
		Key::EmptyTree => "The tree is empty. Add a member to begin.",
		Key::ConfirmDelete => "Delete this member and all of their connections?",
		Key::ConfirmReset => "Are you sure you want to reset the family tree?",
		Key::ConfirmReplace => "Replace the current family tree?",
		Key::NothingToExport => "No family tree to export",
		Key::Imported => "Family tree imported",
		Key::Exported => "Family tree exported",
		Key::Close => "Close",
		Key::MemberNotFound => "This member no longer exists.",
	}
}

fn ur(key: Key) -> &'static str {
	match key {
		Key::AppTitle => "خاندانی شجرہ",
		Key::Name => "نام",
		Key::Gender => "جنس",
		Key::Relationship => "رشتہ",
		Key::RelatedTo => "کس سے متعلق",
		Key::Title => "لقب",
		Key::Image => "تصویر",
		Key::Website => "ویب سائٹ",
		Key::Facebook => "فیس بک",
		Key::Twitter => "ٹویٹر",
		Key::Linkedin => "لنکڈ اِن",
		Key::HideChildren => "بچوں کو چھپائیں",
		Key::ShowChildren => "بچوں کو دکھائیں",
		Key::Edit => "ترمیم",
		Key::Delete => "حذف",
		Key::AddMember => "رکن شامل کریں",
		Key::SaveChanges => "محفوظ کریں",
		Key::Cancel => "منسوخ",
		Key::Import => "درآمد",
		Key::Export => "برآمد",
		Key::Reset => "دوبارہ ترتیب دیں",
		Key::Sample => "نمونہ",
		Key::ZoomIn => "بڑا کریں",
		Key::ZoomOut => "چھوٹا کریں",
		Key::FitView => "پورا دکھائیں",
		Key::Language => "زبان",
		Key::Male => "مرد",
		Key::Female => "عورت",
		Key::Other => "دیگر",
		Key::SelectMember => "موجودہ رکن منتخب کریں",
		Key::SelectRelationship => "رشتہ منتخب کریں",
		Key::AddFirstHint => "شجرہ شروع کرنے کے لیے پہلا رکن شامل کریں۔",
		Key::AddHint => "نیا رکن شامل کریں اور اس کا رشتہ بتائیں۔",
		Key::EditTitle => "رکن میں ترمیم",
		Key::AddTitle => "خاندان کا رکن شامل کریں",
		Key::RootMember => "بنیادی رکن",
		Key::EmptyTree => "شجرہ خالی ہے۔ شروع کرنے کے لیے رکن شامل کریں۔",
		Key::ConfirmDelete => "کیا یہ رکن اور اس کے تمام رشتے حذف کر دیے جائیں؟",
		Key::ConfirmReset => "کیا آپ واقعی شجرہ دوبارہ ترتیب دینا چاہتے ہیں؟",
		Key::ConfirmReplace => "کیا موجودہ شجرہ تبدیل کر دیا جائے؟",
		Key::NothingToExport => "برآمد کرنے کے لیے کوئی شجرہ نہیں",
		Key::Imported => "شجرہ درآمد ہو گیا",
		Key::Exported => "شجرہ برآمد ہو گیا",
		Key::Close => "بند کریں",
		Key::MemberNotFound => "یہ رکن اب موجود نہیں ہے۔",
	}
}

fn pa(key: Key) -> &'static str {
	match key {
		Key::AppTitle => "ਪਰਿਵਾਰਕ ਰੁੱਖ",
		Key::Name => "ਨਾਂ",
		Key::Gender => "ਲਿੰਗ",
		Key::Relationship => "ਰਿਸ਼ਤਾ",
		Key::RelatedTo => "ਕਿਸ ਨਾਲ ਸਬੰਧਤ",
		Key::Title => "ਉਪਾਧੀ",
		Key::Image => "ਤਸਵੀਰ",
		Key::Website => "ਵੈੱਬਸਾਈਟ",
		Key::Facebook => "ਫੇਸਬੁੱਕ",
		Key::Twitter => "ਟਵਿੱਟਰ",
		Key::Linkedin => "ਲਿੰਕਡਇਨ",
		Key::HideChildren => "ਬੱਚਿਆਂ ਨੂੰ ਛੁਪਾਓ",
		Key::ShowChildren => "ਬੱਚਿਆਂ ਨੂੰ ਦਿਖਾਓ",
		Key::Edit => "ਸੋਧ",
		Key::Delete => "ਮਿਟਾਓ",
		Key::AddMember => "ਮੈਂਬਰ ਸ਼ਾਮਲ ਕਰੋ",
		Key::SaveChanges => "ਸੰਭਾਲੋ",
		Key::Cancel => "ਰੱਦ ਕਰੋ",
		Key::Import => "ਆਯਾਤ",
		Key::Export => "ਨਿਰਯਾਤ",
		Key::Reset => "ਰੀਸੈੱਟ",
		Key::Sample => "ਨਮੂਨਾ",
		Key::ZoomIn => "ਵੱਡਾ ਕਰੋ",
		Key::ZoomOut => "ਛੋਟਾ ਕਰੋ",
		Key::FitView => "ਪੂਰਾ ਦਿਖਾਓ",
		Key::Language => "ਭਾਸ਼ਾ",
		Key::Male => "ਪੁਰਸ਼",
		Key::Female => "ਔਰਤ",
		Key::Other => "ਹੋਰ",
		Key::SelectMember => "ਮੌਜੂਦਾ ਮੈਂਬਰ ਚੁਣੋ",
		Key::SelectRelationship => "ਰਿਸ਼ਤਾ ਚੁਣੋ",
		Key::AddFirstHint => "ਰੁੱਖ ਸ਼ੁਰੂ ਕਰਨ ਲਈ ਪਹਿਲਾ ਮੈਂਬਰ ਸ਼ਾਮਲ ਕਰੋ।",
		Key::AddHint => "ਨਵਾਂ ਮੈਂਬਰ ਸ਼ਾਮਲ ਕਰੋ ਅਤੇ ਰਿਸ਼ਤਾ ਦੱਸੋ।",
		Key::EditTitle => "ਮੈਂਬਰ ਸੋਧੋ",
		Key::AddTitle => "ਪਰਿਵਾਰਕ ਮੈਂਬਰ ਸ਼ਾਮਲ ਕਰੋ",
		Key::RootMember => "ਮੂਲ ਮੈਂਬਰ",
		Key::EmptyTree => "ਰੁੱਖ ਖਾਲੀ ਹੈ। ਸ਼ੁਰੂ ਕਰਨ ਲਈ ਮੈਂਬਰ ਸ਼ਾਮਲ ਕਰੋ।",
		Key::ConfirmDelete => "ਕੀ ਇਹ ਮੈਂਬਰ ਅਤੇ ਇਸਦੇ ਸਾਰੇ ਰਿਸ਼ਤੇ ਮਿਟਾਉਣੇ ਹਨ?",
		Key::ConfirmReset => "ਕੀ ਤੁਸੀਂ ਸੱਚਮੁੱਚ ਰੁੱਖ ਰੀਸੈੱਟ ਕਰਨਾ ਚਾਹੁੰਦੇ ਹੋ?",
		Key::ConfirmReplace => "ਕੀ ਮੌਜੂਦਾ ਰੁੱਖ ਬਦਲਣਾ ਹੈ?",
		Key::NothingToExport => "ਨਿਰਯਾਤ ਕਰਨ ਲਈ ਕੋਈ ਰੁੱਖ ਨਹੀਂ",
		Key::Imported => "ਰੁੱਖ ਆਯਾਤ ਹੋ ਗਿਆ",
		Key::Exported => "ਰੁੱਖ ਨਿਰਯਾਤ ਹੋ ਗਿਆ",
		Key::Close => "ਬੰਦ ਕਰੋ",
		Key::MemberNotFound => "ਇਹ ਮੈਂਬਰ ਹੁਣ ਮੌਜੂਦ ਨਹੀਂ ਹੈ।",
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn codes_round_trip() {
		for locale in Locale::ALL {
			assert_eq!(Locale::from_code(locale.code()), Some(locale));
		}
		assert_eq!(Locale::from_code("de"), None);
	}

	#[test]
	fn phrase_word_order_follows_locale() {
		assert_eq!(Locale::En.relation_phrase("Child", &["A", "B"]), "Child of A & B");
		assert_eq!(Locale::Ur.relation_phrase("اولاد", &["A"]), "A کا اولاد");
		assert_eq!(Locale::Pa.relation_phrase("ਬੱਚਾ", &["A"]), "A ਦਾ ਬੱਚਾ");
		assert_eq!(Locale::En.relation_phrase("Root", &[]), "Root");
	}

	#[test]
	fn every_relation_has_a_label_in_every_locale() {
		use RelationKind::*;
		let all = [
			Root, Parent, Child, Spouse, Sibling, Grandparent, Grandfather, Grandmother,
			Grandchild, ParentSibling, Uncle, Aunt, Cousin, Nibling, Nephew, Niece,
		];
		for locale in Locale::ALL {
			for kind in all {
				assert!(!locale.relation(kind).is_empty(), "{kind:?} in {}", locale.code());
			}
		}
		assert_ne!(Locale::Ur.relation(ParentSibling), Locale::En.relation(ParentSibling));
		assert_ne!(Locale::Pa.relation(ParentSibling), Locale::En.relation(ParentSibling));
	}

	#[test]
	fn only_urdu_is_rtl() {
		assert_eq!(Locale::Ur.direction(), "rtl");
		assert_eq!(Locale::En.direction(), "ltr");
		assert_eq!(Locale::Pa.direction(), "ltr");
	}
}
