//! # Deck Encoding
//!
//! Converts a rendered deck (per-slide [`DrawOp`] lists) into the final
//! binary buffer. The [`DocumentEncoder`] trait is the seam: the rest
//! of the pipeline never knows what file format comes out of it, so a
//! real presentation-format writer can be dropped in without touching
//! the renderer or the export pipeline.
//!
//! The default [`DeckEncoder`] writes a self-describing container:
//!
//! ```text
//! ┌───────┬─────────┬────────────┬─────────────┬──────────────────┐
//! │ magic │ version │ page dims  │ slide count │ zlib(JSON ops)   │
//! │ SLDK  │ u16 LE  │ 2 × f64 LE │ u32 LE      │ rest of buffer   │
//! └───────┴─────────┴────────────┴─────────────┴──────────────────┘
//! ```

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::draft::SlideType;
use crate::error::SlidesmithError;
use crate::render::{DrawOp, PageSize};

/// Container magic, "SLDK".
pub const MAGIC: &[u8; 4] = b"SLDK";

/// Container format version.
pub const FORMAT_VERSION: u16 = 1;

/// One slide after rendering: the originating slide plus its draw ops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedSlide {
    pub slide_id: Uuid,
    #[serde(rename = "type")]
    pub slide_type: SlideType,
    pub ops: Vec<DrawOp>,
}

/// A fully rendered deck, ready for encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDeck {
    pub title: String,
    pub page: PageSize,
    pub slides: Vec<RenderedSlide>,
}

impl RenderedDeck {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// Turns a rendered deck into bytes. Implementations decide the file
/// format; callers only see a buffer and an extension.
pub trait DocumentEncoder: Send + Sync {
    fn encode(&self, deck: &RenderedDeck) -> Result<Vec<u8>, SlidesmithError>;

    /// Extension (without dot) for files written by this encoder.
    fn file_extension(&self) -> &'static str;
}

/// Default encoder writing the SLDK container described in the module
/// docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeckEncoder;

impl DocumentEncoder for DeckEncoder {
    fn encode(&self, deck: &RenderedDeck) -> Result<Vec<u8>, SlidesmithError> {
        let mut out = Vec::new();
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        out.extend_from_slice(&deck.page.width.to_le_bytes());
        out.extend_from_slice(&deck.page.height.to_le_bytes());
        out.extend_from_slice(&(deck.slides.len() as u32).to_le_bytes());

        let payload = serde_json::to_vec(&deck.slides)
            .map_err(|e| SlidesmithError::Render(format!("deck serialization failed: {e}")))?;
        let mut encoder = ZlibEncoder::new(out, Compression::default());
        encoder.write_all(&payload)?;
        Ok(encoder.finish()?)
    }

    fn file_extension(&self) -> &'static str {
        "sldk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use pretty_assertions::assert_eq;
    use std::io::Read;

    fn sample_deck(slides: usize) -> RenderedDeck {
        RenderedDeck {
            title: "Quarterly Review".into(),
            page: PageSize::default(),
            slides: (0..slides)
                .map(|i| RenderedSlide {
                    slide_id: Uuid::new_v4(),
                    slide_type: SlideType::Content,
                    ops: vec![DrawOp::Text {
                        text: format!("Slide {i}"),
                        x: 0.5,
                        y: 0.5,
                        w: 9.0,
                        h: 1.0,
                        font: crate::render::ResolvedFont {
                            family: "Open Sans".into(),
                            weight: None,
                        },
                        size: 18.0,
                        bold: false,
                        color: "#1F2937".into(),
                        align: Default::default(),
                        valign: Default::default(),
                    }],
                })
                .collect(),
        }
    }

    #[test]
    fn test_header_layout() {
        let deck = sample_deck(3);
        let bytes = DeckEncoder.encode(&deck).unwrap();

        assert_eq!(&bytes[0..4], MAGIC);
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), FORMAT_VERSION);
        let w = f64::from_le_bytes(bytes[6..14].try_into().unwrap());
        let h = f64::from_le_bytes(bytes[14..22].try_into().unwrap());
        assert_eq!((w, h), (10.0, 5.625));
        let count = u32::from_le_bytes(bytes[22..26].try_into().unwrap());
        assert_eq!(count, 3);
    }

    #[test]
    fn test_payload_roundtrips_through_zlib() {
        let deck = sample_deck(2);
        let bytes = DeckEncoder.encode(&deck).unwrap();

        let mut json = Vec::new();
        ZlibDecoder::new(&bytes[26..]).read_to_end(&mut json).unwrap();
        let slides: Vec<RenderedSlide> = serde_json::from_slice(&json).unwrap();
        assert_eq!(slides, deck.slides);
    }

    #[test]
    fn test_empty_deck_encodes() {
        let bytes = DeckEncoder.encode(&sample_deck(0)).unwrap();
        assert_eq!(u32::from_le_bytes(bytes[22..26].try_into().unwrap()), 0);
    }
}
