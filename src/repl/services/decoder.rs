//! # Response Body Decoding
//!
//! Undo `Content-Encoding` compression and turn the bytes into text using the
//! charset from `Content-Type`, defaulting to UTF-8.

use bytes::Bytes;
use encoding_rs::{Encoding, UTF_8};
use flate2::read::{DeflateDecoder, GzDecoder};
use std::io::{self, Read};

pub const ENC_GZIP: &str = "gzip";
pub const ENC_DEFLATE: &str = "deflate";
pub const ENC_ZSTD: &str = "zstd";
pub const ENC_IDENTITY: &str = "identity";

/// Value sent in `Accept-Encoding`
pub const ACCEPTED_ENCODINGS: &str = "gzip, deflate, zstd";

pub fn decode_gzip(data: &[u8]) -> io::Result<Bytes> {
    let mut decoder = GzDecoder::new(data);
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded)?;
    Ok(Bytes::from(decoded))
}

pub fn decode_deflate(data: &[u8]) -> io::Result<Bytes> {
    let mut decoder = DeflateDecoder::new(data);
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded)?;
    Ok(Bytes::from(decoded))
}

pub fn decode_zstd(data: &[u8]) -> io::Result<Bytes> {
    Ok(Bytes::from(zstd::decode_all(data)?))
}

/// Undo every coding listed in `content_encoding`, last applied first.
/// Unknown codings are left alone.
pub fn decompress(data: Bytes, content_encoding: &str) -> io::Result<Bytes> {
    let mut body = data;
    for coding in content_encoding.rsplit(',') {
        let coding = coding.trim().to_ascii_lowercase();
        body = match coding.as_str() {
            ENC_GZIP | "x-gzip" => decode_gzip(&body)?,
            ENC_DEFLATE => decode_deflate(&body)?,
            ENC_ZSTD => decode_zstd(&body)?,
            "" | ENC_IDENTITY => body,
            other => {
                tracing::warn!("Unsupported content encoding '{}', leaving body as-is", other);
                body
            }
        };
    }
    Ok(body)
}

/// `charset` parameter of a `Content-Type` value
pub fn charset_of(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Decode text with the given charset label; malformed sequences become U+FFFD.
/// A byte order mark never overrides the declared charset or the UTF-8 default.
pub fn decode_text(data: &[u8], charset: Option<&str>) -> String {
    let declared = charset.and_then(|label| Encoding::for_label(label.as_bytes()));
    let (encoding, (text, had_errors)) = match declared {
        Some(encoding) => (encoding, encoding.decode_without_bom_handling(data)),
        None => (UTF_8, UTF_8.decode_with_bom_removal(data)),
    };
    if had_errors {
        tracing::debug!("Body had malformed {} sequences", encoding.name());
    }
    text.into_owned()
}
