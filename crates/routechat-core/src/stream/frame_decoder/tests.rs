//! Tests for the frame decoder

use super::*;

fn decode_all(chunks: &[&[u8]]) -> Vec<String> {
    let mut decoder = FrameDecoder::new();
    let mut lines = Vec::new();
    for chunk in chunks {
        lines.extend(decoder.feed(chunk));
    }
    lines.extend(decoder.flush());
    lines
}

#[test]
fn test_single_line() {
    let mut decoder = FrameDecoder::new();
    let lines = decoder.feed(b"data: {\"type\":\"content\"}\n");

    assert_eq!(lines, vec!["data: {\"type\":\"content\"}"]);
    assert!(!decoder.has_remaining());
}

#[test]
fn test_blank_separator_lines_are_emitted() {
    let mut decoder = FrameDecoder::new();
    let lines = decoder.feed(b"data: first\n\ndata: second\n\n");

    assert_eq!(lines, vec!["data: first", "", "data: second", ""]);
}

#[test]
fn test_partial_line_is_held_back() {
    let mut decoder = FrameDecoder::new();

    let lines1 = decoder.feed(b"data: {\"ty");
    assert!(lines1.is_empty());
    assert_eq!(decoder.remaining(), "data: {\"ty");

    let lines2 = decoder.feed(b"pe\":\"complete\"}\n");
    assert_eq!(lines2, vec!["data: {\"type\":\"complete\"}"]);
    assert!(!decoder.has_remaining());
}

#[test]
fn test_text_after_last_newline_is_retained() {
    let mut decoder = FrameDecoder::new();
    let lines = decoder.feed(b"one\ntwo\nthr");

    assert_eq!(lines, vec!["one", "two"]);
    assert_eq!(decoder.remaining(), "thr");
}

#[test]
fn test_crlf_line_endings() {
    let mut decoder = FrameDecoder::new();
    let lines = decoder.feed(b"data: a\r\n\r\ndata: b\r\n");

    assert_eq!(lines, vec!["data: a", "", "data: b"]);
}

#[test]
fn test_cr_split_from_lf_across_chunks() {
    let mut decoder = FrameDecoder::new();
    assert!(decoder.feed(b"data: a\r").is_empty());
    assert_eq!(decoder.feed(b"\n"), vec!["data: a"]);
}

#[test]
fn test_flush_returns_unterminated_line() {
    let mut decoder = FrameDecoder::new();
    decoder.feed(b"data: {\"type\":\"complete\",\"data\":{}}");

    assert_eq!(
        decoder.flush(),
        Some("data: {\"type\":\"complete\",\"data\":{}}".to_string())
    );
    assert!(!decoder.has_remaining());
}

#[test]
fn test_flush_discards_whitespace_remainder() {
    let mut decoder = FrameDecoder::new();
    decoder.feed(b"data: x\n  \t");
    assert_eq!(decoder.flush(), None);

    let mut empty = FrameDecoder::new();
    assert_eq!(empty.flush(), None);
}

#[test]
fn test_flush_is_idempotent() {
    let mut decoder = FrameDecoder::new();
    decoder.feed(b"tail");
    assert_eq!(decoder.flush(), Some("tail".to_string()));
    assert_eq!(decoder.flush(), None);
}

#[test]
fn test_utf8_3byte_split_at_1() {
    // "中" is E4 B8 AD
    let mut decoder = FrameDecoder::new();

    assert!(decoder.feed(b"data: \xE4").is_empty());
    assert_eq!(decoder.incomplete_utf8_len(), 1);

    let lines = decoder.feed(b"\xB8\xAD\n");
    assert_eq!(lines, vec!["data: 中"]);
    assert_eq!(decoder.incomplete_utf8_len(), 0);
}

#[test]
fn test_utf8_4byte_split_one_byte_per_chunk() {
    // "🎉" is F0 9F 8E 89
    let mut decoder = FrameDecoder::new();

    decoder.feed(b"data: \xF0");
    assert_eq!(decoder.incomplete_utf8_len(), 1);
    decoder.feed(b"\x9F");
    assert_eq!(decoder.incomplete_utf8_len(), 2);
    decoder.feed(b"\x8E");
    assert_eq!(decoder.incomplete_utf8_len(), 3);

    let lines = decoder.feed(b"\x89\n");
    assert_eq!(lines, vec!["data: 🎉"]);
}

#[test]
fn test_invalid_utf8_is_replaced_not_stalled() {
    let mut decoder = FrameDecoder::new();
    let lines = decoder.feed(b"bad \xFF byte\nnext\n");

    assert_eq!(lines, vec!["bad \u{FFFD} byte", "next"]);
    assert_eq!(decoder.incomplete_utf8_len(), 0);
}

#[test]
fn test_flush_with_truncated_utf8_tail() {
    let mut decoder = FrameDecoder::new();
    decoder.feed(b"data: ok\xE4\xB8");

    assert_eq!(decoder.flush(), Some("data: ok\u{FFFD}".to_string()));
}

#[test]
fn test_clear_resets_everything() {
    let mut decoder = FrameDecoder::new();
    decoder.feed(b"data: \xE4\xB8");
    assert!(decoder.has_remaining());

    decoder.clear();
    assert!(!decoder.has_remaining());
    assert_eq!(decoder.incomplete_utf8_len(), 0);
}

#[test]
fn test_every_two_way_split_matches_whole_stream() {
    let stream = "data: {\"type\":\"content\",\"data\":\"Hé\"}\n\n\
                  data: {\"type\":\"content\",\"data\":\"llo 世界 🌍\"}\n\n\
                  data: {\"type\":\"complete\",\"data\":{}}\n\ntrailing"
        .as_bytes();
    let expected = decode_all(&[stream]);

    for split in 0..=stream.len() {
        let (a, b) = stream.split_at(split);
        assert_eq!(decode_all(&[a, b]), expected, "split at byte {}", split);
    }
}

#[test]
fn test_byte_by_byte_matches_whole_stream() {
    let stream = "data: 中文\r\n\r\ndata: ok\n: keep-alive\n\nend".as_bytes();
    let expected = decode_all(&[stream]);
    let singles: Vec<&[u8]> = stream.chunks(1).collect();

    assert_eq!(decode_all(&singles), expected);
    assert_eq!(
        expected,
        vec!["data: 中文", "", "data: ok", ": keep-alive", "", "end"]
    );
}

#[test]
fn test_three_way_splits_match_whole_stream() {
    let stream = "data: ü€😀\n\ndata: x\n".as_bytes();
    let expected = decode_all(&[stream]);

    for i in 0..=stream.len() {
        for j in i..=stream.len() {
            let chunks = [&stream[..i], &stream[i..j], &stream[j..]];
            assert_eq!(decode_all(&chunks), expected, "splits at {} and {}", i, j);
        }
    }
}

#[test]
fn test_long_line_scans_only_new_text() {
    let payload = "x".repeat(10_000);
    let frame = format!("data: {}\r\n", payload);
    let mut decoder = FrameDecoder::new();

    let (body, newline) = frame.as_bytes().split_at(frame.len() - 2);
    for chunk in body.chunks(7) {
        assert!(decoder.feed(chunk).is_empty());
        assert_eq!(decoder.scanned, decoder.remaining().len());
    }

    assert_eq!(decoder.feed(newline), vec![format!("data: {}", payload)]);
    assert_eq!(decoder.scanned, 0);
    assert!(!decoder.has_remaining());
}

#[test]
fn test_lines_after_held_back_text_are_all_found() {
    let mut decoder = FrameDecoder::new();
    assert!(decoder.feed(b"data: a").is_empty());
    assert_eq!(
        decoder.feed(b"b\ndata: c\n\ndata: d"),
        vec!["data: ab", "data: c", ""]
    );
    assert_eq!(decoder.remaining(), "data: d");
    assert_eq!(decoder.scanned, "data: d".len());
}
