//! docbot turns a declarative script of terminal interactions, narration
//! and slides into a single rendered documentation video.
//!
//! The pipeline: content files laid out by the setup stage are ordered by
//! the [`catalog`], recorded through a pty-driven [`session`] under the
//! external terminal recorder, converted to clips, paired with synthesized
//! [`narration`] audio and assembled by the [`media`] stage into one video.

pub mod asciicast;
pub mod cancel;
pub mod catalog;
pub mod config;
pub mod error;
pub mod media;
pub mod narration;
pub mod pipeline;
pub mod project;
pub mod record;
pub mod report;
pub mod session;
pub mod tools;

pub use cancel::CancelToken;
pub use config::Config;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::Pipeline;
