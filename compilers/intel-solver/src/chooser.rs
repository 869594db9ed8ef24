use intel_protocol::Tokenization;

use crate::ranking::compare_tokenizations;

/// The single best tokenization, or an empty one when there is nothing to choose from.
pub fn choose(tokenizations: &[Tokenization]) -> Tokenization {
    tokenizations
        .iter()
        .max_by(|a, b| compare_tokenizations(a, b))
        .cloned()
        .unwrap_or_default()
}
