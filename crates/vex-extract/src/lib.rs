//! vex-extract — runs the extraction engine and streams its output.
//!
//! # Architecture
//!
//! ```text
//! Extractor::spawn(request)
//!   │  <executable> <db> <south> <west> <north> <east> -
//!   ▼    stdin: null, stderr: null, stdout: piped
//! ExtractionProcess::stream()
//!   │
//!   ├── relay task: reserve slot → read chunk → send     (owns the child)
//!   │        │ bounded mpsc (capacity chunks)
//!   │        ▼
//!   └── RelayBody: Stream<Item = io::Result<Bytes>>    (response body)
//! ```
//!
//! # Flow Control
//!
//! The relay task reserves a channel slot *before* reading from the
//! engine's stdout. When the HTTP client stops reading, the channel fills,
//! reservation suspends, and unread output stays in the OS pipe where the
//! engine blocks on its next write. Per request at most
//! [`RelayConfig::max_buffered`](vex_core::RelayConfig::max_buffered) bytes
//! sit in memory.
//!
//! # Completion and Cancellation
//!
//! End of stdout drops the sender, which ends the body. The exit status is
//! reaped afterwards and only logged. Dropping the body (client went away)
//! closes the channel; the relay task then kills and reaps the engine.

mod error;
pub mod process;
pub mod relay;

pub use error::{ExtractError, ExtractResult};
pub use process::{ExtractionProcess, Extractor};
pub use relay::{RelayBody, RelayOutcome, RelaySender};
