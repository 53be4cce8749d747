//! # lzhc
//!
//! LZ77 sliding-window tokenisation followed by a static, per-payload
//! Huffman coder over the token byte alphabet. Round-tripping
//! compress-then-decompress reproduces the original input exactly.
//!
//! ## Buffer Example
//!
//! ```rs
//! use lzhc::*;
//! let test_data = b"abcd abcd abcd";
//! let compressed = compress(test_data, &CompressConfig::default()).expect("compression failed");
//! let expanded = decompress(&compressed).expect("decompression failed");
//! assert_eq!(test_data.to_vec(), expanded);
//! ```

pub mod bitio;
pub mod codec;
pub mod config;
pub mod huffman;
pub mod lz77;
pub mod token;

pub use codec::{compress, decompress};
pub use config::CompressConfig;
pub use token::Token;

/// Errors produced by the codec.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt stream: {0}")]
    CorruptStream(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
