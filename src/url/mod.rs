//! URL handling module for Pagevault
//!
//! Origin checks and href resolution for traversal, plus the pure path
//! math that maps live URLs onto the replay namespace.

mod origin;
mod replay;

pub use origin::{extract_host, is_same_origin, resolve_href};
pub use replay::{path_segments, relative_to_base, replay_url};
