//! Response stream decoding
//!
//! The routing service answers `POST /query` with newline-delimited
//! `data: <json>` frames separated by blank lines:
//!
//! ```text
//! data: {"type":"routing","data":{...}}
//!
//! data: {"type":"content","data":"Hel"}
//!
//! data: {"type":"complete","data":{...}}
//! ```

mod event;
mod frame_decoder;
mod parser;
mod reader;

pub use event::{
    ProviderFailure, ProviderStatus, ProviderUpdate, QueryMetadata, RouterEvent, RoutingInfo,
};
pub use frame_decoder::FrameDecoder;
pub use parser::{DATA_PREFIX, ParsedLine, SkipReason, parse_line};
pub use reader::EventReader;
