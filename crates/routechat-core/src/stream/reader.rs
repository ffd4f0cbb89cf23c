//! Byte chunks in, ordered router events out

use super::event::RouterEvent;
use super::frame_decoder::FrameDecoder;
use super::parser::{ParsedLine, SkipReason, parse_line};
use tracing::{debug, warn};

/// Frame decoder and event parser run in lock-step
///
/// Events come out in exactly the order their frames appeared in the byte
/// stream, however the bytes were chunked.
#[derive(Debug, Default)]
pub struct EventReader {
    decoder: FrameDecoder,
    events_read: usize,
    frames_skipped: usize,
}

impl EventReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return the events completed by it
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<RouterEvent> {
        let lines = self.decoder.feed(chunk);
        self.collect(lines)
    }

    /// Flush the decoder at end of stream and return any final event
    pub fn finish(&mut self) -> Vec<RouterEvent> {
        let lines: Vec<String> = self.decoder.flush().into_iter().collect();
        self.collect(lines)
    }

    /// Number of events produced so far
    pub fn events_read(&self) -> usize {
        self.events_read
    }

    /// Number of data lines that were dropped as corrupt or unknown
    pub fn frames_skipped(&self) -> usize {
        self.frames_skipped
    }

    fn collect(&mut self, lines: Vec<String>) -> Vec<RouterEvent> {
        let mut events = Vec::new();
        for line in lines {
            match parse_line(&line) {
                ParsedLine::Event(event) => {
                    self.events_read += 1;
                    events.push(event);
                }
                ParsedLine::Skip(SkipReason::NotData) => {}
                ParsedLine::Skip(reason) => {
                    self.frames_skipped += 1;
                    if reason.is_corruption() {
                        warn!("Skipping frame: {}", reason);
                    } else {
                        debug!("Skipping frame: {}", reason);
                    }
                }
            }
        }
        events
    }
}
