//! # Printer Session Tests
//!
//! End-to-end byte checks of [`Printer`] sessions writing into in-memory
//! sinks. Each test drives the public API only and compares the exact bytes
//! a printer would receive.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;

use escpos::params::{self, Params};
use escpos::printer::{CutOptions, FeedOptions, PrinterConfig, TextStyle};
use escpos::protocol::barcode::Symbology;
use escpos::protocol::graphics::{PRINT_BUFFER, RasterImage, RasterMode};
use escpos::render::TextRenderer;
use escpos::{EscPosError, Printer};
use pretty_assertions::assert_eq;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn printer() -> Printer<Vec<u8>> {
    Printer::new(Vec::new())
}

/// Raster whose rows are filled with their row index, so chunk boundaries
/// are visible in the output.
fn striped(width: usize, height: usize) -> RasterImage {
    let bpl = width.div_ceil(8);
    let data = (0..height)
        .flat_map(|row| std::iter::repeat_n((row % 256) as u8, bpl))
        .collect();
    RasterImage::packed(width, height, data).unwrap()
}

/// Sink that can be inspected while a printer owns a clone of it
#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that accepts `budget` bytes and then fails
struct FailingSink {
    budget: usize,
    written: Vec<u8>,
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "printer went away"));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Renders any text as a solid 8x2 block
struct BlockRenderer;

impl TextRenderer for BlockRenderer {
    fn render(&self, _text: &str) -> Result<RasterImage, EscPosError> {
        RasterImage::packed(8, 2, vec![0xFF, 0xFF])
    }
}

// ============================================================================
// RASTER TRANSFER
// ============================================================================

#[test]
fn test_tall_graphics_image_is_chunked() {
    let image = striped(512, 2000);
    let p = printer();
    p.raster(&image, RasterMode::Graphics).unwrap();
    let out = p.into_inner();

    let first_len = 17 + 1662 * 64 + PRINT_BUFFER.len();
    let second_len = 17 + 338 * 64 + PRINT_BUFFER.len();
    assert_eq!(out.len(), first_len + second_len);

    assert_eq!(
        &out[..17],
        &[
            0x1D, 0x38, 0x4C, 0x8A, 0x9F, 0x01, 0x00, 0x30, 0x70, 0x30, 0x01, 0x01, 0x31, 0x00,
            0x02, 0x7E, 0x06
        ]
    );
    assert_eq!(&out[17..17 + 1662 * 64], image.rows(0, 1662).unwrap());
    assert_eq!(&out[first_len - 7..first_len], &PRINT_BUFFER);

    let second = &out[first_len..];
    assert_eq!(
        &second[..17],
        &[
            0x1D, 0x38, 0x4C, 0x8A, 0x54, 0x00, 0x00, 0x30, 0x70, 0x30, 0x01, 0x01, 0x31, 0x00,
            0x02, 0x52, 0x01
        ]
    );
    // first row of the second chunk is row 1662
    assert_eq!(second[17], (1662 % 256) as u8);
    assert_eq!(&second[17..17 + 338 * 64], image.rows(1662, 338).unwrap());
    assert_eq!(&second[second_len - 7..], &PRINT_BUFFER);
}

#[test]
fn test_configured_chunk_size() {
    let config = PrinterConfig {
        max_chunk_lines: 100,
        ..PrinterConfig::default()
    };
    let p = Printer::with_config(Vec::new(), config).unwrap();
    p.raster(&striped(16, 250), RasterMode::Graphics).unwrap();
    let out = p.into_inner();

    let headers = out
        .windows(3)
        .filter(|w| *w == [0x1D, 0x38, 0x4C])
        .count();
    assert_eq!(headers, 3);
    assert_eq!(out.len(), 3 * (17 + 7) + 250 * 2);
}

#[test]
fn test_invalid_chunk_config_rejected() {
    let config = PrinterConfig {
        max_chunk_lines: 1663,
        ..PrinterConfig::default()
    };
    assert!(matches!(
        Printer::with_config(Vec::new(), config),
        Err(EscPosError::ChunkSize(1663))
    ));
}

#[test]
fn test_bit_image_single_frame() {
    let image = RasterImage::packed(16, 3, vec![0xAA; 6]).unwrap();
    let p = printer();
    p.raster(&image, RasterMode::BitImage).unwrap();
    let mut expected = vec![0x1D, 0x76, 0x30, 0x00, 0x02, 0x00, 0x03, 0x00];
    expected.extend([0xAA; 6]);
    assert_eq!(p.into_inner(), expected);
}

#[test]
fn test_print_image_centers_first() {
    let config = PrinterConfig {
        raster_mode: RasterMode::BitImage,
        ..PrinterConfig::default()
    };
    let p = Printer::with_config(Vec::new(), config).unwrap();
    p.print_image(&RasterImage::packed(8, 1, vec![0x81]).unwrap())
        .unwrap();
    assert_eq!(
        p.into_inner(),
        vec![0x1B, 0x61, 0x01, 0x1D, 0x76, 0x30, 0x00, 0x01, 0x00, 0x01, 0x00, 0x81]
    );
}

#[test]
fn test_rejected_image_leaves_sink_empty() {
    let config = PrinterConfig {
        raster_mode: RasterMode::BitImage,
        ..PrinterConfig::default()
    };
    let p = Printer::with_config(Vec::new(), config).unwrap();
    let padded = RasterImage::new(16, 2, 4, vec![0xF0; 8]).unwrap();
    assert!(p.print_image(&padded).is_err());
    assert_eq!(p.into_inner(), Vec::<u8>::new());
}

#[test]
fn test_padded_image_in_graphics_mode() {
    let padded = RasterImage::new(16, 2, 4, vec![0xF0; 8]).unwrap();
    let p = printer();
    p.raster(&padded, RasterMode::Graphics).unwrap();
    let out = p.into_inner();

    // P = 10 + 2 rows × 4 bytes, width declared as the 32-dot stride
    assert_eq!(&out[3..7], &[18, 0, 0, 0]);
    assert_eq!(&out[13..17], &[32, 0, 2, 0]);
    assert_eq!(&out[17..25], padded.data());
}

#[test]
fn test_print_text_image_uses_renderer() {
    let p = printer();
    p.print_text_image(&BlockRenderer, "ignored").unwrap();
    let out = p.into_inner();

    assert_eq!(&out[..3], &[0x1B, 0x61, 0x01]);
    assert_eq!(&out[3..6], &[0x1D, 0x38, 0x4C]);
    // 8 dots wide, 2 rows
    assert_eq!(&out[16..20], &[0x08, 0x00, 0x02, 0x00]);
    assert_eq!(&out[20..22], &[0xFF, 0xFF]);
    assert_eq!(&out[22..], &PRINT_BUFFER);
}

// ============================================================================
// STATE AND TEXT
// ============================================================================

#[test]
fn test_state_refresh_after_resize() {
    let p = printer();
    p.reset();
    p.set_font_size(2, 3).unwrap();
    p.full_state_refresh().unwrap();
    let out = p.into_inner();

    let refresh = &out[3..];
    assert_eq!(
        refresh,
        &[
            0x1B, 0x47, 0x00, // emphasize
            0x1B, 0x52, 0x00, // rotate
            0x1D, 0x62, 0x00, // smooth
            0x1D, 0x42, 0x00, // reverse
            0x1B, 0x2D, 0x00, // underline
            0x1B, 0x7B, 0x00, // upside down
            0x1D, 0x21, 0x12, // size 2x3
        ]
    );
}

#[test]
fn test_rejected_font_size_writes_nothing() {
    let p = printer();
    assert!(matches!(
        p.set_font_size(9, 1),
        Err(EscPosError::FontSize { width: 9, height: 1 })
    ));
    assert_eq!(p.state().font_width(), 1);
    assert!(p.into_inner().is_empty());
}

#[test]
fn test_text_from_params() {
    let mut node = Params::new();
    node.insert("align".into(), "center".into());
    node.insert("em".into(), "true".into());
    node.insert("width".into(), "2".into());
    node.insert("height".into(), "2".into());

    let p = printer();
    p.text(&params::text_style(&node).unwrap(), "Fish &amp; Chips")
        .unwrap();
    let state = p.state();
    let out = p.into_inner();

    let mut expected = vec![
        0x1B, 0x61, 0x01, // center
        0x1B, 0x47, 0x01, // emphasize
        0x1D, 0x21, 0x10, // width 2
        0x1D, 0x21, 0x11, // height 2
    ];
    expected.extend(b"Fish & Chips");
    assert_eq!(out, expected);
    assert!(state.emphasize());
    assert_eq!((state.font_width(), state.font_height()), (2, 2));
}

#[test]
fn test_invalid_text_size_leaves_state() {
    let p = printer();
    p.set_emphasize(true).unwrap();
    let before = p.state();

    let result = p.text(&TextStyle::new().underline().size(0, 2), "x");
    assert!(matches!(result, Err(EscPosError::FontSize { .. })));
    assert_eq!(p.state(), before);
    assert_eq!(p.into_inner(), vec![0x1B, 0x47, 0x01]);
}

// ============================================================================
// PAPER HANDLING
// ============================================================================

#[test]
fn test_feed_sequence() {
    let p = printer();
    p.set_underline(true).unwrap();
    p.feed(&FeedOptions {
        lines: Some(3),
        units: Some(300),
    })
    .unwrap();
    let out = p.into_inner();

    assert_eq!(
        &out[3..],
        &[
            0x1B, 0x64, 0x03, // feed 3 lines
            0x1D, 0x24, 0x2C, 0x01, // vertical position 300
            0x0A, // LF
            0x1B, 0x47, 0x00, 0x1B, 0x52, 0x00, 0x1D, 0x62, 0x00, 0x1D, 0x42, 0x00, 0x1B, 0x2D,
            0x00, 0x1B, 0x7B, 0x00, 0x1D, 0x21, 0x00,
        ]
    );
}

#[test]
fn test_feed_and_cut() {
    let p = printer();
    p.feed_and_cut(&CutOptions { feed: true }).unwrap();
    p.feed_and_cut(&CutOptions::default()).unwrap();
    assert_eq!(
        p.into_inner(),
        vec![0x1B, 0x64, 0x01, 0x1D, 0x56, 0x41, 0x30, 0x1D, 0x56, 0x41, 0x30]
    );
}

// ============================================================================
// BARCODES
// ============================================================================

#[test]
fn test_barcode_short_form() {
    let p = printer();
    p.barcode(Symbology::Ean13, b"400638133393").unwrap();
    let mut expected = vec![0x1B, 0x61, 0x01, 0x1D, 0x6B, 0x02];
    expected.extend(b"400638133393");
    expected.push(0x00);
    assert_eq!(p.into_inner(), expected);
}

#[test]
fn test_barcode_length_prefixed() {
    let p = printer();
    p.set_emphasize(true).unwrap();
    p.barcode(Symbology::Code128, b"{B12345").unwrap();
    assert!(!p.state().emphasize());

    let out = p.into_inner();
    let mut expected = vec![0x1B, 0x47, 0x01, 0x1B, 0x61, 0x01, 0x1D, 0x6B, 73, 7];
    expected.extend(b"{B12345");
    assert_eq!(out, expected);
}

#[test]
fn test_barcode_too_long_writes_nothing() {
    let p = printer();
    let data = vec![b'1'; 256];
    assert!(matches!(
        p.barcode(Symbology::Code93, &data),
        Err(EscPosError::Barcode(_))
    ));
    assert!(p.into_inner().is_empty());
}

// ============================================================================
// SINKS AND CONCURRENCY
// ============================================================================

#[test]
fn test_sink_error_propagates() {
    let p = Printer::new(FailingSink {
        budget: 2,
        written: Vec::new(),
    });
    p.init().unwrap();
    let err = p.cut().unwrap_err();
    assert!(matches!(err, EscPosError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    assert_eq!(p.into_inner().written, vec![0x1B, 0x40]);
}

#[test]
fn test_concurrent_commands_do_not_interleave() {
    let sink = SharedSink::default();
    let p = Arc::new(Printer::new(sink.clone()));
    let image = Arc::new(striped(64, 40));

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let p = Arc::clone(&p);
            let image = Arc::clone(&image);
            thread::spawn(move || {
                for _ in 0..10 {
                    p.raster(&image, RasterMode::BitImage).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let frame = escpos::protocol::graphics::bit_image(&image).unwrap();
    let out = sink.0.lock().unwrap().clone();
    assert_eq!(out.len(), 40 * frame.len());
    for chunk in out.chunks(frame.len()) {
        assert_eq!(chunk, frame.as_slice());
    }
}

#[test]
fn test_full_receipt() {
    let p = printer();
    p.init().unwrap();
    p.text(&TextStyle::new().center().double_height(), "TOTAL\n")
        .unwrap();
    p.feed(&FeedOptions::lines(2)).unwrap();
    p.cash().unwrap();
    p.feed_and_cut(&CutOptions::default()).unwrap();
    p.end().unwrap();
    let out = p.into_inner();

    assert_eq!(&out[..2], &[0x1B, 0x40]);
    assert_eq!(&out[out.len() - 10..], &[0x1B, 0x70, 0x00, 0x0A, 0xFF, 0x1D, 0x56, 0x41, 0x30, 0xFA]);
}
