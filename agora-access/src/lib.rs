//! Agora Access - Group Authorization Gate
//!
//! Decides whether a requester may touch a group-restricted forum
//! resource. The decision core is a pure function over the resource's and
//! the requester's group sets; the guards around it resolve entities and
//! group memberships through the read-through cache so repeated checks
//! stay off the authoritative source.

pub mod decision;
pub mod gate;
pub mod requester;

pub use decision::{decide, is_authorized, may_edit_post, AccessDecision, DenyReason};
pub use gate::{AccessConfig, AccessGate, PostTarget};
pub use requester::Requester;
