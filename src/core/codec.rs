//! Purpose: Decode and encode the trade-export wire format.
//! Exports: `decode_payload`, `parse_document`, `read_document`, `encode_document`.
//! Role: The full chain is base64 text -> zlib stream -> UTF-8 JSON document.
//! Invariants: `decode_payload` + `parse_document` invert `encode_document`.
//! Invariants: Each stage fails with its own `ErrorKind` (Encoding, Compression, Parse).

use std::io::{Read, Write};
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use flate2::Compression;
use flate2::bufread::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde_json::Value;

use crate::core::error::{Error, ErrorKind};

/// Base64-decode and zlib-inflate one encoded payload.
///
/// ASCII whitespace is stripped first: the producer wraps the base64 text in
/// a plain text file, so a trailing newline (or hand-rewrapped lines) must
/// not fail the decode.
pub fn decode_payload(text: &str) -> Result<Vec<u8>, Error> {
    let compact: String = text.chars().filter(|ch| !ch.is_ascii_whitespace()).collect();
    let compressed = STANDARD.decode(compact.as_bytes()).map_err(|err| {
        Error::new(ErrorKind::Encoding)
            .with_message("payload is not valid base64")
            .with_hint("Expected the base64 text produced by the trade exporter.")
            .with_source(err)
    })?;

    let mut inflated = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_end(&mut inflated)
        .map_err(|err| {
            Error::new(ErrorKind::Compression)
                .with_message("decoded payload is not a zlib stream")
                .with_hint("The base64 text decoded, but its content did not inflate.")
                .with_source(err)
        })?;
    Ok(inflated)
}

/// Parse inflated bytes as a JSON document.
pub fn parse_document(bytes: &[u8]) -> Result<Value, Error> {
    serde_json::from_slice(bytes).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message("inflated payload is not valid JSON")
            .with_source(err)
    })
}

/// Read an export file and run the full decode chain.
pub fn read_document(path: &Path) -> Result<Value, Error> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        let kind = if err.kind() == std::io::ErrorKind::NotFound {
            ErrorKind::NotFound
        } else {
            ErrorKind::Io
        };
        Error::new(kind)
            .with_message("cannot read export file")
            .with_path(path)
            .with_source(err)
    })?;
    let inflated = decode_payload(&text).map_err(|err| err.with_path(path))?;
    parse_document(&inflated).map_err(|err| err.with_path(path))
}

/// Produce the wire encoding of a document: serialize, deflate, base64.
///
/// This is the producer-side chain; the CLI exposes it so fixtures and ad-hoc
/// exports can be built without the game running.
pub fn encode_document(document: &Value) -> Result<String, Error> {
    let serialized = serde_json::to_vec(document).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("cannot serialize document")
            .with_source(err)
    })?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&serialized).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("zlib compression failed")
            .with_source(err)
    })?;
    let compressed = encoder.finish().map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("zlib compression failed")
            .with_source(err)
    })?;
    Ok(STANDARD.encode(compressed))
}
