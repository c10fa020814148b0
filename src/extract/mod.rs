// src/extract/mod.rs
// =============================================================================
// Everything that turns page text into data, without touching the network.
//
// Submodules:
// - policy: which extensions/prefixes count as false positives
// - email: email candidate extraction
// - html: anchor and mailto: extraction from HTML
// =============================================================================

pub mod email;
pub mod html;
pub mod policy;

pub use email::{extract_emails, EmailSet};
pub use policy::FilterPolicy;
