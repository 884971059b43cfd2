//! Clipboard writes through the OSC 52 terminal escape sequence.
//!
//! The plugin has no direct clipboard access. Instead the sequence
//! `ESC ] 52 ; c ; <base64> BEL` is printed together with the next frame and
//! the terminal emulator places the decoded text on the system clipboard.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Largest encoded payload accepted. Many terminals drop longer sequences.
pub const MAX_ENCODED_LEN: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("Nothing to copy")]
    Empty,

    #[error("Text too large for the clipboard ({len} bytes, max {max})")]
    TooLarge { len: usize, max: usize },
}

/// Builds the OSC 52 sequence that copies `text`.
///
/// # Errors
///
/// - [`ClipboardError::Empty`] for blank text
/// - [`ClipboardError::TooLarge`] if the encoded payload exceeds [`MAX_ENCODED_LEN`]
///
/// # Examples
///
/// ```
/// use rentdesk::infrastructure::osc52_sequence;
///
/// assert_eq!(osc52_sequence("hi").unwrap(), "\x1b]52;c;aGk=\x07");
/// assert!(osc52_sequence("  ").is_err());
/// ```
pub fn osc52_sequence(text: &str) -> Result<String, ClipboardError> {
    if text.trim().is_empty() {
        return Err(ClipboardError::Empty);
    }

    let encoded = STANDARD.encode(text.as_bytes());
    if encoded.len() > MAX_ENCODED_LEN {
        return Err(ClipboardError::TooLarge {
            len: encoded.len(),
            max: MAX_ENCODED_LEN,
        });
    }

    Ok(format!("\x1b]52;c;{encoded}\x07"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_unicode_text() {
        let sequence = osc52_sequence("반납 부탁드립니다").unwrap();
        let payload = sequence
            .strip_prefix("\x1b]52;c;")
            .and_then(|rest| rest.strip_suffix('\x07'))
            .unwrap();
        let decoded = STANDARD.decode(payload).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "반납 부탁드립니다");
    }

    #[test]
    fn rejects_oversized_payload() {
        let text = "x".repeat(MAX_ENCODED_LEN);
        assert!(matches!(
            osc52_sequence(&text),
            Err(ClipboardError::TooLarge { max: MAX_ENCODED_LEN, .. })
        ));
    }

    #[test]
    fn rejects_empty_text() {
        assert_eq!(osc52_sequence(""), Err(ClipboardError::Empty));
    }
}
