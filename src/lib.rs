//! Content-scheduling calendar core.
//!
//! - `parser` — bulk text → validated, platform-resolved task drafts
//! - `calendar` — task list → day badges, analytics counts, library filters
//! - `gaps` — upcoming days with no scheduled content
//! - `submit` — strictly sequential submission with a deterministic
//!   partial-failure boundary
//! - `store` — typed PostgREST/RPC client for the hosted task store
//!
//! The parsing/aggregation/gap layers are pure and synchronous; only the
//! store and the submission path are async, and submission is never
//! concurrent with itself.

pub mod calendar;
pub mod config;
pub mod dates;
pub mod gaps;
pub mod parser;
pub mod store;
pub mod submit;
pub mod types;
