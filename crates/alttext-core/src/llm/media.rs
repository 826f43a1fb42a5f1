//! Media type detection from raw image bytes.

/// Fallback when the byte signature is not recognized.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Sniff the MIME type from the leading bytes of `bytes`.
pub fn sniff_media_type(bytes: &[u8]) -> &'static str {
    match infer::get(bytes) {
        Some(kind) => kind.mime_type(),
        None => {
            tracing::debug!("Unrecognized image signature, using {OCTET_STREAM}");
            OCTET_STREAM
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_jpeg() {
        assert_eq!(sniff_media_type(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0]), "image/jpeg");
    }

    #[test]
    fn test_sniff_png() {
        let header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(sniff_media_type(&header), "image/png");
    }

    #[test]
    fn test_sniff_gif() {
        assert_eq!(sniff_media_type(b"GIF89a\x01\x00\x01\x00"), "image/gif");
    }

    #[test]
    fn test_sniff_webp() {
        assert_eq!(sniff_media_type(b"RIFF\x24\x00\x00\x00WEBPVP8 "), "image/webp");
    }

    #[test]
    fn test_sniff_unknown_falls_back() {
        assert_eq!(sniff_media_type(b"hello"), OCTET_STREAM);
        assert_eq!(sniff_media_type(&[]), OCTET_STREAM);
    }
}
