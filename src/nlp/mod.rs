//! Natural language processing layer: annotation and text normalisation.

pub mod annotator;
pub mod lemma;
pub mod normalize;

use std::sync::Arc;

use tracing::info;

pub use annotator::{RuleAnnotator, TextAnnotator, Token};
pub use normalize::TextNormalizer;

/// Load the bundled rule-based annotator. Construct once and share.
pub fn load_annotator(max_chars: usize) -> Arc<dyn TextAnnotator> {
    info!(max_chars, "loaded rule-based annotator");
    Arc::new(RuleAnnotator::new(max_chars)) as Arc<dyn TextAnnotator>
}
