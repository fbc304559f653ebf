use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Member identifier. Generated once at creation and never changed.
pub type MemberId = String;

/// Gender of a member. Drives gendered relation labels and the card accent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
	/// Male.
	Male,
	/// Female.
	Female,
	/// Other or unspecified.
	#[default]
	Other,
}

impl Gender {
	/// All genders in form order.
	pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

	/// Wire value, also used as the form option value.
	pub fn code(self) -> &'static str {
		match self {
			Gender::Male => "male",
			Gender::Female => "female",
			Gender::Other => "other",
		}
	}

	/// Parse a form option value; unknown values fall back to [`Gender::Other`].
	pub fn from_code(code: &str) -> Self {
		Self::ALL
			.into_iter()
			.find(|g| g.code() == code)
			.unwrap_or_default()
	}
}

/// What the target of a relation edge is to its source.
///
/// The declaration order is also the order in which relation phrases are
/// listed on a card.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationKind {
	Root,
	Parent,
	Child,
	Spouse,
	Sibling,
	Grandparent,
	Grandfather,
	Grandmother,
	Grandchild,
	ParentSibling,
	Uncle,
	Aunt,
	Cousin,
	Nibling,
	Nephew,
	Niece,
}

impl RelationKind {
	/// Kinds offered when adding a member to a non-empty tree.
	pub const ADDABLE: [RelationKind; 12] = [
		RelationKind::Parent,
		RelationKind::Child,
		RelationKind::Spouse,
		RelationKind::Sibling,
		RelationKind::Grandfather,
		RelationKind::Grandmother,
		RelationKind::Uncle,
		RelationKind::Aunt,
		RelationKind::Cousin,
		RelationKind::Nephew,
		RelationKind::Niece,
		RelationKind::Grandchild,
	];

	const ALL: [RelationKind; 16] = [
		RelationKind::Root,
		RelationKind::Parent,
		RelationKind::Child,
		RelationKind::Spouse,
		RelationKind::Sibling,
		RelationKind::Grandparent,
		RelationKind::Grandfather,
		RelationKind::Grandmother,
		RelationKind::Grandchild,
		RelationKind::ParentSibling,
		RelationKind::Uncle,
		RelationKind::Aunt,
		RelationKind::Cousin,
		RelationKind::Nibling,
		RelationKind::Nephew,
		RelationKind::Niece,
	];

	/// English label. This is what the file format stores.
	pub fn label(self) -> &'static str {
		match self {
			RelationKind::Root => "Root",
			RelationKind::Parent => "Parent",
			RelationKind::Child => "Child",
			RelationKind::Spouse => "Spouse",
			RelationKind::Sibling => "Sibling",
			RelationKind::Grandparent => "Grandparent",
			RelationKind::Grandfather => "Grandfather",
			RelationKind::Grandmother => "Grandmother",
			RelationKind::Grandchild => "Grandchild",
			RelationKind::ParentSibling => "Aunt/Uncle",
			RelationKind::Uncle => "Uncle",
			RelationKind::Aunt => "Aunt",
			RelationKind::Cousin => "Cousin",
			RelationKind::Nibling => "Niece/Nephew",
			RelationKind::Nephew => "Nephew",
			RelationKind::Niece => "Niece",
		}
	}

	/// Case-insensitive parse of a label.
	pub fn from_label(label: &str) -> Option<Self> {
		let label = label.trim();
		Self::ALL
			.into_iter()
			.find(|k| k.label().eq_ignore_ascii_case(label))
	}

	/// Given that the target is `self` to the source, what the source is to
	/// the target. `source_gender` picks between gendered labels.
	pub fn inverse(self, source_gender: Gender) -> Self {
		use RelationKind::*;
		let gendered = |male, female, neutral| match source_gender {
			Gender::Male => male,
			Gender::Female => female,
			Gender::Other => neutral,
		};
		match self {
			Root => Root,
			Parent => Child,
			Child => Parent,
			Spouse => Spouse,
			Sibling => Sibling,
			Cousin => Cousin,
			Grandparent | Grandfather | Grandmother => Grandchild,
			Grandchild => gendered(Grandfather, Grandmother, Grandparent),
			ParentSibling | Uncle | Aunt => gendered(Nephew, Niece, Nibling),
			Nibling | Nephew | Niece => gendered(Uncle, Aunt, ParentSibling),
		}
	}

	/// Generations from source to target: negative is older, positive is
	/// younger. `None` for kinds that are not a straight line of descent.
	pub fn generation_step(self) -> Option<i8> {
		use RelationKind::*;
		match self {
			Parent => Some(-1),
			Child => Some(1),
			Grandparent | Grandfather | Grandmother => Some(-2),
			Grandchild => Some(2),
			_ => None,
		}
	}

	/// Grandparent label for a member of the given gender.
	pub fn grandparent_for(gender: Gender) -> Self {
		RelationKind::Grandchild.inverse(gender)
	}
}

impl Serialize for RelationKind {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.label())
	}
}

impl<'de> Deserialize<'de> for RelationKind {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let label = String::deserialize(deserializer)?;
		RelationKind::from_label(&label).ok_or_else(|| {
			serde::de::Error::custom(format!("unknown relationship label `{label}`"))
		})
	}
}

/// Canvas position in graph space.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	/// Where the first member of a tree goes.
	pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

	#[allow(missing_docs)]
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Optional social-media references shown on a member's panel.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SocialLinks {
	pub website: Option<String>,
	pub facebook_url: Option<String>,
	pub twitter_handle: Option<String>,
	pub linkedin_url: Option<String>,
}

impl SocialLinks {
	/// True when no link is set.
	pub fn is_empty(&self) -> bool {
		self.website.is_none()
			&& self.facebook_url.is_none()
			&& self.twitter_handle.is_none()
			&& self.linkedin_url.is_none()
	}

	/// Profile URL for the Twitter handle, if any.
	pub fn twitter_url(&self) -> Option<String> {
		self.twitter_handle
			.as_deref()
			.map(|h| format!("https://twitter.com/{}", h.trim_start_matches('@')))
	}
}

/// A person in the tree.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
	/// Immutable identity.
	pub id: MemberId,
	pub name: String,
	pub gender: Gender,
	/// Data URL or remote URL.
	pub image: Option<String>,
	/// Honorific shown above the name.
	pub title: Option<String>,
	/// How this member was added. `Root` for the first member.
	pub relationship: RelationKind,
	pub social: SocialLinks,
	pub position: Position,
	/// Hidden because an ancestor was collapsed.
	pub hidden: bool,
	/// This member's descendants were hidden through it.
	pub collapsed: bool,
}

/// Directed relation edge: `target` is `kind` to `source`.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
	pub id: String,
	pub source: MemberId,
	pub target: MemberId,
	pub kind: RelationKind,
}

impl Relation {
	/// Edge ids are derived from their endpoints.
	pub fn edge_id(source: &str, target: &str) -> String {
		format!("e-{source}-{target}")
	}

	#[allow(missing_docs)]
	pub fn new(source: impl Into<MemberId>, target: impl Into<MemberId>, kind: RelationKind) -> Self {
		let (source, target) = (source.into(), target.into());
		Self {
			id: Self::edge_id(&source, &target),
			source,
			target,
			kind,
		}
	}
}

/// Input of the add-member flow, already validated for shape.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewMember {
	pub name: String,
	pub gender: Gender,
	/// Ignored for the first member.
	pub relationship: Option<RelationKind>,
	/// Ignored for the first member.
	pub related_to: Option<MemberId>,
	pub image: Option<String>,
	pub title: Option<String>,
	pub social: SocialLinks,
}

/// Attributes the edit flow may change. Relationship and edges are fixed.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemberEdit {
	pub name: String,
	pub gender: Gender,
	pub image: Option<String>,
	pub title: Option<String>,
	pub social: SocialLinks,
}

impl From<&Member> for MemberEdit {
	fn from(member: &Member) -> Self {
		Self {
			name: member.name.clone(),
			gender: member.gender,
			image: member.image.clone(),
			title: member.title.clone(),
			social: member.social.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn labels_parse_case_insensitively() {
		assert_eq!(RelationKind::from_label("child"), Some(RelationKind::Child));
		assert_eq!(RelationKind::from_label(" ROOT "), Some(RelationKind::Root));
		assert_eq!(RelationKind::from_label("niece/nephew"), Some(RelationKind::Nibling));
		assert_eq!(RelationKind::from_label("godparent"), None);
	}

	#[test]
	fn inverse_respects_gender() {
		assert_eq!(RelationKind::Child.inverse(Gender::Female), RelationKind::Parent);
		assert_eq!(RelationKind::Grandchild.inverse(Gender::Male), RelationKind::Grandfather);
		assert_eq!(RelationKind::Grandchild.inverse(Gender::Other), RelationKind::Grandparent);
		assert_eq!(RelationKind::Niece.inverse(Gender::Female), RelationKind::Aunt);
		assert_eq!(RelationKind::Uncle.inverse(Gender::Other), RelationKind::Nibling);
		assert_eq!(RelationKind::Spouse.inverse(Gender::Male), RelationKind::Spouse);
	}

	#[test]
	fn kind_serializes_as_label() {
		let json = serde_json::to_string(&RelationKind::Grandmother).unwrap();
		assert_eq!(json, "\"Grandmother\"");
		let kind: RelationKind = serde_json::from_str("\"sibling\"").unwrap();
		assert_eq!(kind, RelationKind::Sibling);
		assert!(serde_json::from_str::<RelationKind>("\"friend\"").is_err());
	}

	#[test]
	fn twitter_url_strips_at() {
		let links = SocialLinks {
			twitter_handle: Some("@someone".into()),
			..Default::default()
		};
		assert_eq!(links.twitter_url().as_deref(), Some("https://twitter.com/someone"));
		assert!(!links.is_empty());
		assert!(SocialLinks::default().is_empty());
	}
}
