//! Incremental line framing for the routing service's response body
//!
//! The body arrives as arbitrary byte chunks. This decoder turns them into
//! complete text lines while handling:
//! - Lines split across network chunks
//! - UTF-8 sequences split across chunk boundaries
//! - Invalid UTF-8 (replaced with U+FFFD instead of stalling the stream)
//!
//! Memory use grows with the longest unterminated line; no limit is enforced
//! here; bounding the producer is the caller's concern.

/// Buffered line decoder that holds back incomplete trailing data
///
/// ```text
/// feed(b"data: {\"a\"")   -> []
/// feed(b":1}\n\ndata: ") -> ["data: {\"a\":1}", ""]
/// flush()                -> Some("data: ")
/// ```
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Decoded text after the last newline seen so far
    buffer: String,
    /// Bytes of a UTF-8 sequence that has not been completed yet
    incomplete_utf8: Vec<u8>,
    /// Length of the `buffer` prefix already known to hold no newline
    scanned: usize,
}

impl FrameDecoder {
    /// Create a new frame decoder
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            incomplete_utf8: Vec::new(),
            scanned: 0,
        }
    }

    /// Feed raw bytes into the decoder and extract complete lines
    ///
    /// Text after the last newline is retained for the next call and never
    /// emitted here. A single trailing `\r` is stripped from each line.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let bytes = if self.incomplete_utf8.is_empty() {
            chunk.to_vec()
        } else {
            let mut combined = std::mem::take(&mut self.incomplete_utf8);
            combined.extend_from_slice(chunk);
            combined
        };

        let remainder = Self::decode_into(&bytes, &mut self.buffer);
        self.incomplete_utf8 = remainder;

        let mut lines = Vec::new();
        let mut start = 0;
        let mut search_from = self.scanned;
        while let Some(offset) = self.buffer[search_from..].find('\n') {
            let end = search_from + offset;
            let line = &self.buffer[start..end];
            lines.push(line.strip_suffix('\r').unwrap_or(line).to_string());
            start = end + 1;
            search_from = start;
        }

        self.buffer.drain(..start);
        self.scanned = self.buffer.len();
        lines
    }

    /// Signal end of stream and return the final unterminated line, if any
    ///
    /// A remainder that is empty or only whitespace is discarded.
    pub fn flush(&mut self) -> Option<String> {
        if !self.incomplete_utf8.is_empty() {
            let tail = std::mem::take(&mut self.incomplete_utf8);
            tracing::debug!(
                "Stream ended inside a UTF-8 sequence, replacing {} byte(s)",
                tail.len()
            );
            self.buffer.push_str(&String::from_utf8_lossy(&tail));
        }

        self.scanned = 0;
        let remainder = std::mem::take(&mut self.buffer);
        if remainder.trim().is_empty() {
            return None;
        }

        let mut line = remainder;
        if line.ends_with('\r') {
            line.pop();
        }
        Some(line)
    }

    /// Decode as much of `bytes` as possible into `out`, returning the
    /// trailing bytes of an incomplete sequence
    fn decode_into(mut bytes: &[u8], out: &mut String) -> Vec<u8> {
        loop {
            match std::str::from_utf8(bytes) {
                Ok(s) => {
                    out.push_str(s);
                    return Vec::new();
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&bytes[..valid_up_to]));

                    match e.error_len() {
                        // Truncated sequence at the end: wait for the next chunk
                        None => return bytes[valid_up_to..].to_vec(),
                        Some(invalid_len) => {
                            tracing::warn!(
                                "Invalid UTF-8 in response body, replaced {} byte(s)",
                                invalid_len
                            );
                            out.push(char::REPLACEMENT_CHARACTER);
                            bytes = &bytes[valid_up_to + invalid_len..];
                        }
                    }
                }
            }
        }
    }

    /// Clear the internal buffers
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.incomplete_utf8.clear();
        self.scanned = 0;
    }

    /// Check if there's remaining data in the buffer
    pub fn has_remaining(&self) -> bool {
        !self.buffer.is_empty() || !self.incomplete_utf8.is_empty()
    }

    /// Get the buffered partial line (for debugging)
    pub fn remaining(&self) -> &str {
        &self.buffer
    }

    /// Get the number of incomplete UTF-8 bytes buffered
    pub fn incomplete_utf8_len(&self) -> usize {
        self.incomplete_utf8.len()
    }
}

#[cfg(test)]
mod tests;
