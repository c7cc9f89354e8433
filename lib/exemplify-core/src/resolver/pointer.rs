//! Decoding of JSON pointer segments used in example references.
//!
//! Segments are unescaped first (`~1` to `/`, `~0` to `~`), then percent-decoded,
//! so `~1pets~1%7Bid%7D` reads as `/pets/{id}`.

use jsonptr::{Pointer, Token};
use percent_encoding::percent_decode_str;

/// Decodes every segment of a pointer such as `/~1pets/get/responses/200`.
///
/// The empty pointer has no segment.
pub(crate) fn decode_segments(pointer: &str) -> Result<Vec<String>, String> {
    let pointer = Pointer::parse(pointer).map_err(|err| err.to_string())?;
    let segments = pointer
        .tokens()
        .map(|token| percent_decode(&token.decoded()))
        .collect();
    Ok(segments)
}

/// Decodes a single pointer segment, `None` when it holds an invalid `~` escape.
pub(crate) fn decode_segment(segment: &str) -> Option<String> {
    let token = Token::from_encoded(segment).ok()?;
    Some(percent_decode(&token.decoded()))
}

fn percent_decode(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
