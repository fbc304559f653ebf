//! Error types for tree editing, file transfer and image upload.

use thiserror::Error;

/// Errors from mutating a [`FamilyTree`](super::FamilyTree).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
	/// No member with this id (usually a stale reference from the UI).
	#[error("Member not found: {0}")]
	MemberNotFound(String),

	/// Name was blank after trimming.
	#[error("Name is required")]
	EmptyName,

	/// A non-first member was added without a relationship.
	#[error("Relationship is required")]
	RelationshipRequired,

	/// A non-first member was added without a related member.
	#[error("Select the member this person is related to")]
	RelatedMemberRequired,

	/// `Root` is reserved for the first member.
	#[error("Only the first member can be the root")]
	RootNotAllowed,
}

/// Errors from reading a tree file.
#[derive(Error, Debug)]
pub enum TransferError {
	/// Malformed JSON, or a field with the wrong shape.
	#[error("Invalid family tree file: {0}")]
	Json(#[from] serde_json::Error),

	/// The document is valid JSON but not an object.
	#[error("Invalid family tree file: expected a JSON object")]
	NotAnObject,

	/// A required top-level key is absent.
	#[error("Invalid family tree file: missing `{0}`")]
	MissingKey(&'static str),
}

/// Errors from validating an uploaded profile image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
	/// MIME type outside JPEG/PNG/WEBP.
	#[error("Unsupported image type `{0}`; use JPEG, PNG or WEBP")]
	UnsupportedType(String),

	/// File larger than the upload limit.
	#[error("Image is {size} bytes; the limit is {limit} bytes")]
	TooLarge {
		/// Actual size in bytes.
		size: u64,
		/// Limit in bytes.
		limit: u64,
	},
}

/// Result type alias for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
