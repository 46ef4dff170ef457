use super::*;
use crate::{ConversionError, LegacyEncoding};
use pretty_assertions::assert_eq;
use std::io::Cursor;

/// Hands out at most `step` bytes per read, forcing odd-length chunks.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Rejects every chunk.
struct Rejecting;

impl Converter for Rejecting {
    fn convert(&self, bytes: &[u8], encoding: TextEncoding) -> Result<Vec<u8>, ConversionError> {
        Err(ConversionError {
            encoding: encoding.label(),
            len: bytes.len(),
        })
    }
}

/// Yields its data, then fails every read after that.
struct FailsAfter<'a> {
    data: &'a [u8],
}

impl Read for FailsAfter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::other("device unplugged"));
        }
        let n = buf.len().min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn utf16le(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    bytes
}

fn utf16be(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    bytes
}

/// Drain a filter with `pull(max_bytes)` until end of stream.
fn drain<S: ByteSource, C: Converter>(
    filter: &mut DecodeFilter<S, C>,
    max_bytes: usize,
) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        match filter.pull(max_bytes) {
            Ok(Some(bytes)) => {
                assert!(!bytes.is_empty(), "non-final pull returned nothing");
                assert!(bytes.len() <= max_bytes, "pull returned {} > {max_bytes}", bytes.len());
                out.extend(bytes);
            }
            Ok(None) => return out,
            Err(e) => panic!("unexpected I/O error: {e}"),
        }
    }
}

// === UTF-16 Decoding ===

#[test]
fn utf16le_with_bom() {
    let raw: &[u8] = &[0xFF, 0xFE, 0x41, 0x00, 0x42, 0x00];
    let mut filter = DecodeFilter::new(raw, TextEncoding::Utf16Le);
    assert_eq!(drain(&mut filter, 4096), b"AB");
}

#[test]
fn utf16be_with_bom() {
    let raw = utf16be("Grüß Gott");
    let mut filter = DecodeFilter::new(&raw[..], TextEncoding::Utf16Be);
    assert_eq!(drain(&mut filter, 4096), "Grüß Gott".as_bytes());
}

#[test]
fn only_the_leading_bom_is_removed() {
    let raw = utf16le("a\u{FEFF}b");
    let mut filter = DecodeFilter::new(&raw[..], TextEncoding::Utf16Le);
    assert_eq!(drain(&mut filter, 4096), "a\u{FEFF}b".as_bytes());
}

#[test]
fn utf16_without_bom_keeps_first_character() {
    let mut filter = DecodeFilter::new(&[0x41u8, 0x00, 0x42, 0x00][..], TextEncoding::Utf16Le);
    assert_eq!(drain(&mut filter, 4096), b"AB");
}

#[test]
fn supplementary_characters_within_a_chunk() {
    let raw = utf16le("smile \u{1F600}");
    let mut filter = DecodeFilter::new(&raw[..], TextEncoding::Utf16Le);
    assert_eq!(drain(&mut filter, 4096), "smile \u{1F600}".as_bytes());
}

#[test]
fn surrogate_pair_across_default_chunk_boundary() {
    // BOM + 2046 units puts U+1F600 at bytes 4094..4098, straddling the first read.
    let text = format!("{}\u{1F600}{}", "a".repeat(2046), "b".repeat(3000));
    let raw = utf16le(&text);

    let mut chunked = DecodeFilter::new(&raw[..], TextEncoding::Utf16Le);
    assert_eq!(drain(&mut chunked, 4096), text.as_bytes());

    let mut trickled = DecodeFilter::new(Trickle { data: &raw, step: 1 }, TextEncoding::Utf16Le);
    assert_eq!(drain(&mut trickled, 4096), text.as_bytes());
}

#[test]
fn surrogate_pair_split_big_endian() {
    let text = "x\u{10348}y\u{1F4A9}";
    let raw = utf16be(text);
    for chunk_size in 1..=raw.len() {
        let mut filter =
            DecodeFilter::new(&raw[..], TextEncoding::Utf16Be).with_chunk_size(chunk_size);
        assert_eq!(drain(&mut filter, 4096), text.as_bytes(), "chunk_size = {chunk_size}");
    }
}

#[test]
fn unpaired_high_surrogate_at_end_is_dropped() {
    let raw: &[u8] = &[0xFF, 0xFE, 0x41, 0x00, 0x3D, 0xD8];
    let mut filter = DecodeFilter::new(raw, TextEncoding::Utf16Le).with_chunk_size(2);
    assert_eq!(drain(&mut filter, 4096), b"A");
    assert_eq!(filter.pull(16).ok(), Some(None));
}

#[test]
fn unpaired_high_surrogate_mid_stream_still_fails_its_chunk() {
    // D83D followed by 'B' instead of a low surrogate.
    let raw: &[u8] = &[0xFF, 0xFE, 0x41, 0x00, 0x3D, 0xD8, 0x42, 0x00, 0x43, 0x00];
    let mut filter = DecodeFilter::new(raw, TextEncoding::Utf16Le).with_chunk_size(6);
    // [BOM 'A' D83D] converts as "A" with D83D carried; [D83D 'B' 'C'] is rejected.
    assert_eq!(drain(&mut filter, 4096), b"A?");
}

// === Chunk Boundaries ===

#[test]
fn one_byte_reads_match_single_chunk() {
    let text = "Tōkyō, Zürich, Кострома ✓";
    let raw = utf16le(text);

    let mut whole = DecodeFilter::new(&raw[..], TextEncoding::Utf16Le);
    let mut trickled = DecodeFilter::new(Trickle { data: &raw, step: 1 }, TextEncoding::Utf16Le);

    let expected = drain(&mut whole, 4096);
    assert_eq!(expected, text.as_bytes());
    assert_eq!(drain(&mut trickled, 4096), expected);
}

#[test]
fn odd_chunk_size_carries_trailing_byte() {
    let text = "carry over";
    let raw = utf16be(text);
    let mut filter = DecodeFilter::new(&raw[..], TextEncoding::Utf16Be).with_chunk_size(3);
    assert_eq!(drain(&mut filter, 4096), text.as_bytes());
}

#[test]
fn zero_chunk_size_is_clamped() {
    let raw = utf16le("ok");
    let mut filter = DecodeFilter::new(&raw[..], TextEncoding::Utf16Le).with_chunk_size(0);
    assert_eq!(drain(&mut filter, 4096), b"ok");
}

#[test]
fn orphan_trailing_byte_is_dropped() {
    let raw: &[u8] = &[0xFF, 0xFE, 0x41, 0x00, 0x42];
    let mut filter = DecodeFilter::new(raw, TextEncoding::Utf16Le);
    assert_eq!(drain(&mut filter, 4096), b"A");
    // Stream stays at end.
    assert_eq!(filter.pull(16).ok(), Some(None));
}

#[test]
fn lone_odd_byte_produces_nothing() {
    let mut filter = DecodeFilter::new(&[0x41u8][..], TextEncoding::Utf16Le);
    assert_eq!(filter.pull(16).ok(), Some(None));
}

// === Pull Contract ===

#[test]
fn zero_request_does_not_read() {
    let mut filter = DecodeFilter::new(Cursor::new(b"abc".to_vec()), TextEncoding::SystemLegacy);
    assert_eq!(filter.pull(0).ok(), Some(Some(Vec::new())));
    assert_eq!(filter.get_ref().position(), 0);
}

#[test]
fn pending_bytes_are_served_before_reading() {
    let mut filter = DecodeFilter::new(Cursor::new(b"abcd".to_vec()), TextEncoding::SystemLegacy)
        .with_chunk_size(2);

    assert_eq!(filter.pull(1).ok(), Some(Some(b"a".to_vec())));
    assert_eq!(filter.get_ref().position(), 2);

    assert_eq!(filter.pull(1).ok(), Some(Some(b"b".to_vec())));
    assert_eq!(filter.get_ref().position(), 2, "source touched while bytes were pending");

    assert_eq!(filter.pull(8).ok(), Some(Some(b"cd".to_vec())));
    assert_eq!(filter.get_ref().position(), 4);

    assert_eq!(filter.pull(8).ok(), Some(None));
}

#[test]
fn never_returns_more_than_requested() {
    let text = "多字节字符串"; // three bytes per character in UTF-8
    let raw = utf16le(text);
    for max_bytes in [1, 2, 5, 7] {
        let mut filter = DecodeFilter::new(&raw[..], TextEncoding::Utf16Le);
        assert_eq!(drain(&mut filter, max_bytes), text.as_bytes(), "max_bytes = {max_bytes}");
    }
}

#[test]
fn empty_source_ends_immediately() {
    let mut filter = DecodeFilter::new(io::empty(), TextEncoding::Utf16Be);
    assert_eq!(filter.pull(1).ok(), Some(None));
}

// === Conversion Failures ===

#[test]
fn undecodable_chunk_becomes_single_placeholder() {
    // Lone high surrogate D800 between 'A' and 'B'.
    let raw: [u8; 8] = [0xFF, 0xFE, 0x41, 0x00, 0x00, 0xD8, 0x42, 0x00];
    let mut filter = DecodeFilter::new(&raw[..], TextEncoding::Utf16Le);
    assert_eq!(drain(&mut filter, 4096), b"?");
}

#[test]
fn decoding_continues_after_a_bad_chunk() {
    // Chunks of four bytes: [BOM 'A'] [D800 'B'] ['C' 'D']
    let raw: [u8; 12] = [
        0xFF, 0xFE, 0x41, 0x00, 0x00, 0xD8, 0x42, 0x00, 0x43, 0x00, 0x44, 0x00,
    ];
    let mut filter = DecodeFilter::new(&raw[..], TextEncoding::Utf16Le).with_chunk_size(4);
    assert_eq!(drain(&mut filter, 4096), b"A?CD");
}

#[test]
fn one_placeholder_per_rejected_chunk() {
    let mut filter =
        DecodeFilter::with_converter(&b"abcdef"[..], TextEncoding::SystemLegacy, Rejecting)
            .with_chunk_size(2);
    assert_eq!(drain(&mut filter, 4096), b"???");
}

// === Legacy Encodings ===

#[test]
fn default_legacy_is_windows_1252() {
    let mut filter = DecodeFilter::new(&b"na\xEFve \x93quotes\x94"[..], TextEncoding::SystemLegacy);
    assert_eq!(drain(&mut filter, 4096), "naïve \u{201C}quotes\u{201D}".as_bytes());
}

#[test]
fn configured_legacy_encoding() {
    let Some(legacy) = LegacyEncoding::from_label("iso-8859-5") else {
        panic!("iso-8859-5 is a known label");
    };
    // "Да" in ISO-8859-5
    let mut filter = DecodeFilter::with_converter(
        &[0xB4u8, 0xD0][..],
        TextEncoding::SystemLegacy,
        EncodingRsConverter::new(legacy),
    );
    assert_eq!(drain(&mut filter, 4096), "Да".as_bytes());
}

#[test]
fn multi_byte_legacy_character_split_by_chunk_is_lost() {
    let Some(legacy) = LegacyEncoding::from_label("shift_jis") else {
        panic!("shift_jis is a known label");
    };
    // "日本" in Shift_JIS: 93 FA 96 7B.
    let raw: &[u8] = &[0x93, 0xFA, 0x96, 0x7B];

    let mut whole = DecodeFilter::with_converter(
        raw,
        TextEncoding::SystemLegacy,
        EncodingRsConverter::new(legacy),
    );
    assert_eq!(drain(&mut whole, 4096), "日本".as_bytes());

    // Legacy chunks are converted independently: [93 FA 96] fails, [7B] is '{'.
    let mut split = DecodeFilter::with_converter(
        raw,
        TextEncoding::SystemLegacy,
        EncodingRsConverter::new(legacy),
    )
    .with_chunk_size(3);
    assert_eq!(drain(&mut split, 4096), b"?{");
}

// === I/O Errors and io::Read ===

#[test]
fn source_errors_propagate() {
    let mut filter = DecodeFilter::new(FailsAfter { data: b"ok" }, TextEncoding::SystemLegacy);
    assert_eq!(filter.pull(16).ok(), Some(Some(b"ok".to_vec())));
    let err = filter.pull(16).err().map(|e| e.kind());
    assert_eq!(err, Some(io::ErrorKind::Other));
}

#[test]
fn read_impl_matches_pull() {
    let text = "read via io::Read: 読む";
    let raw = utf16be(text);
    let mut filter = DecodeFilter::new(Trickle { data: &raw, step: 3 }, TextEncoding::Utf16Be);

    let mut out = String::new();
    let read = filter.read_to_string(&mut out);
    assert!(read.is_ok());
    assert_eq!(out, text);
}

#[test]
fn read_into_empty_buffer_returns_zero() {
    let mut filter = DecodeFilter::new(Cursor::new(b"abc".to_vec()), TextEncoding::SystemLegacy);
    assert_eq!(filter.read(&mut []).ok(), Some(0));
    assert_eq!(filter.get_ref().position(), 0);
}

#[test]
fn encoding_accessor() {
    let filter = DecodeFilter::new(io::empty(), TextEncoding::Utf16Be);
    assert_eq!(filter.encoding(), TextEncoding::Utf16Be);
}

// === Property Tests ===

mod proptest_filter {
    use super::{drain, utf16le, Trickle};
    use crate::{DecodeFilter, TextEncoding};
    use proptest::prelude::*;

    fn any_text() -> impl Strategy<Value = String> {
        proptest::collection::vec(any::<char>(), 0..128)
            .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn chunking_does_not_change_output(
            text in any_text(),
            step in 1usize..9,
            chunk_size in 1usize..17,
            max_bytes in 1usize..33,
        ) {
            let raw = utf16le(&text);
            let mut filter = DecodeFilter::new(Trickle { data: &raw, step }, TextEncoding::Utf16Le)
                .with_chunk_size(chunk_size);
            let out = drain(&mut filter, max_bytes);
            prop_assert_eq!(out, text.into_bytes());
        }
    }
}
