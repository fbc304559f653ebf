//! Family tree model: members, relation edges and everything derived from
//! them. Nothing in here touches the DOM, so it is tested natively.

mod error;
pub mod form;
mod graph;
pub mod layout;
mod relations;
mod sample;
pub mod transfer;
mod types;

pub use error::{ImageError, Result, TransferError, TreeError};
pub use graph::{Adjacency, FamilyTree, Link};
pub use relations::relation_context;
pub use sample::sample_tree;
pub use types::{
	Gender, Member, MemberEdit, MemberId, NewMember, Position, Relation, RelationKind, SocialLinks,
};
