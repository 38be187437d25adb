//! Sentence segmentation.
//!
//! Splits raw input into candidate requirement sentences. Noise fragments
//! (anything shorter than [`MIN_SENTENCE_CHARS`] after trimming) never become
//! requirements.

/// Minimum trimmed fragment length, in characters, to qualify as a sentence
pub const MIN_SENTENCE_CHARS: usize = 10;

/// Splits input text into an ordered list of qualifying sentences
///
/// Sentence terminators are `.`, `!`, and `?`; runs of terminators produce
/// empty fragments which are discarded along with everything shorter than
/// [`MIN_SENTENCE_CHARS`]. Empty input yields an empty list.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() >= MIN_SENTENCE_CHARS)
        .map(ToOwned::to_owned)
        .collect()
}
