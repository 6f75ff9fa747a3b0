//! Clip conversion, audio linking and final assembly.

mod assemble;
mod link;

pub use assemble::{RenderSummary, VideoAssembler, MANIFEST_NAME};
pub use link::{link_scene, Pairing};
