//! # sdf-frame — Disclosure Frames
//!
//! Applies a disclosure frame to a JSON payload and returns the redacted
//! payload together with the disclosures that were cut from it:
//!
//! - **Frame** (`frame.rs`): the typed frame tree and its JSON/YAML form.
//!
//! - **Decoy** (`decoy.rs`): digests of bare salts, mixed into `_sd` to hide
//!   how many members a level conceals.
//!
//! - **Walker** (`walker.rs`): the depth-first walk that conceals members and
//!   array elements, recurses into nested objects and builds sorted `_sd`
//!   lists.
//!
//! ## Security Invariant
//!
//! Every digest is computed over the encoded disclosure exactly as it will be
//! transmitted, and every `_sd` list is kept in ascending order so that the
//! position of a digest reveals nothing about the member it replaced.
//!
//! ## Crate Policy
//!
//! - Depends on `sdf-core` internally; salts and hashes come in through the
//!   `SaltGenerator` and `Hasher` contracts.
//! - The walk is sequential. Disclosure order is deterministic for a given
//!   frame.

pub mod decoy;
pub mod frame;
pub mod walker;

pub use decoy::{create_decoys, DecoyCount, MAX_DECOY_COUNT};
pub use frame::{DisclosureFrame, FrameEntry, FrameNode};
pub use walker::{apply_disclosure_frame, apply_disclosure_frame_value, DisclosedPayload};
