//! Event-stream decoding.
//!
//! Handles the data-only subset spoken by streaming completion APIs:
//! - `data: <payload>` - payload line
//! - empty line - ends the event
//! - `data: [DONE]` - ends the stream
//!
//! # Module structure
//! - `events` - [`Event`], framing constants and [`DataLineMode`]
//! - `line_reader` - byte chunks to lines
//! - `decoder` - the framing state machine and its async driver

mod decoder;
mod events;
mod line_reader;

pub use decoder::{decode, DecodeOptions, Dispatch, StreamDecoder};
pub use events::{parse_data_line, DataLineMode, Event, DATA_PREFIX, DONE_SENTINEL};
pub use line_reader::{lines, LineBuffer};
