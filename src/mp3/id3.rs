//! ID3 tag length detection
//!
//! ID3v2 tags sit in front of the first audio frame. The scanner would get
//! past them by resyncing anyway, but a tag can embed bytes that look like a
//! frame header (album art, for instance), so callers that know about tags
//! start the scan after them.
//!
//! ID3v2 header: "ID3" (3) + version (2) + flags (1) + size (4) = 10 bytes.
//! The size is a syncsafe integer (7 bits per byte) and excludes the header
//! and the optional 10-byte footer.
//!
//! ID3v1 is a fixed 128-byte trailer starting with "TAG". Its text fields can
//! hold a sync-looking pattern too, so the scan stops in front of it.

const HEADER_LEN: usize = 10;
const FOOTER_FLAG: u8 = 0x10;
const V1_LEN: usize = 128;

/// Total length of a leading ID3v2 tag, or `None` if `data` doesn't start
/// with one.
pub fn tag_len(data: &[u8]) -> Option<usize> {
    if data.len() < HEADER_LEN || &data[..3] != b"ID3" {
        return None;
    }

    let size_bytes = &data[6..10];
    // Syncsafe bytes never have the top bit set
    if size_bytes.iter().any(|b| b & 0x80 != 0) {
        return None;
    }

    let size = (usize::from(size_bytes[0]) << 21)
        | (usize::from(size_bytes[1]) << 14)
        | (usize::from(size_bytes[2]) << 7)
        | usize::from(size_bytes[3]);

    let footer = if data[5] & FOOTER_FLAG != 0 {
        HEADER_LEN
    } else {
        0
    };

    Some(HEADER_LEN + size + footer)
}

/// Length of a trailing ID3v1 tag, or `None` if `data` doesn't end with one
pub fn v1_tag_len(data: &[u8]) -> Option<usize> {
    let start = data.len().checked_sub(V1_LEN)?;
    (&data[start..start + 3] == b"TAG").then_some(V1_LEN)
}
