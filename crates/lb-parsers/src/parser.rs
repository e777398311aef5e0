//! The `Parser` capability implemented by every supported report format.

use std::io::Read;

use lb_core::entities::Report;

use crate::error::ParserError;

/// Reads one tool's report format into a [`Report`].
///
/// Implementations only produce the issues; the upload flow stamps the
/// tool id, tool name and reference onto the result afterwards.
pub trait Parser: Send + Sync {
    /// Parse the whole stream into a report with issues in file order.
    ///
    /// # Errors
    ///
    /// Returns `ParserError` if the stream cannot be read or is not in the
    /// expected format.
    fn parse(&self, reader: &mut dyn Read) -> Result<Report, ParserError>;
}

/// Builds a fresh parser instance for each upload.
pub type ParserFactory = Box<dyn Fn() -> Box<dyn Parser> + Send + Sync>;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Drop a leading UTF-8 byte-order mark, if any.
#[must_use]
pub fn strip_utf8_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_is_removed_once() {
        assert_eq!(strip_utf8_bom(b"\xEF\xBB\xBF[]"), b"[]");
        assert_eq!(strip_utf8_bom(b"[]"), b"[]");
        assert_eq!(strip_utf8_bom(b""), b"");
        assert_eq!(
            strip_utf8_bom(b"\xEF\xBB\xBF\xEF\xBB\xBF[]"),
            b"\xEF\xBB\xBF[]"
        );
    }
}
