//! In-page reference rewriting
//!
//! Two streaming passes over a page's HTML, in a fixed order:
//! assets first (img/script/stylesheet attributes to local `assets/`
//! paths), then anchors (same-origin links into the replay namespace).
//! The order is structural: the asset pass never touches anchors, so the
//! link pass always reads original anchor values.

mod assets;
mod links;

pub use assets::rewrite_assets;
pub use links::rewrite_links;
