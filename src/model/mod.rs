//! Data model shared by the layout parser, the classifier and the renderer.
//!
//! Parsed pages ([`PageLayout`]) flow in; one [`DocumentResult`] per
//! document flows out.

mod layout;
mod outline;

pub use layout::{LayoutElement, PageLayout, TextContainer};
pub use outline::{DocumentResult, HeadingCandidate, HeadingLevel};
