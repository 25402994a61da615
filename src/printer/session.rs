//! # Printer Session
//!
//! A [`Printer`] pairs a byte sink with the [`PrinterState`] describing what
//! has been sent to it. Both sit behind one mutex: every operation holds the
//! lock from validation until its last byte is written, so commands from
//! concurrent callers never interleave.
//!
//! ## Write Model
//!
//! - No buffering: each frame goes straight to the sink. Wrap the sink in a
//!   [`BufWriter`](std::io::BufWriter) and call [`Printer::flush`] at the end
//!   of a job if fewer system calls are wanted.
//! - Validation runs before the first write. A rejected call leaves both the
//!   state and the output untouched.
//! - Sink errors are returned immediately as [`EscPosError::Io`]; nothing is
//!   retried.
//!
//! ## Example
//!
//! ```
//! use escpos::printer::{FeedOptions, Printer, TextStyle};
//!
//! let printer = Printer::new(Vec::new());
//! printer.init()?;
//! printer.text(&TextStyle::new().center().emphasize(), "RECEIPT")?;
//! printer.feed(&FeedOptions::lines(2))?;
//! printer.cut()?;
//!
//! let bytes = printer.into_inner();
//! assert_eq!(&bytes[..2], &[0x1B, 0x40]);
//! # Ok::<(), escpos::EscPosError>(())
//! ```

use std::borrow::Cow;
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, warn};

use super::config::PrinterConfig;
use super::options::{CutOptions, FeedOptions, TextStyle};
use super::state::PrinterState;
use crate::error::EscPosError;
use crate::protocol::barcode::{self, Symbology};
use crate::protocol::graphics::{self, PRINT_BUFFER, RasterImage, RasterMode};
use crate::protocol::text::{self, Alignment, Font, Language};
use crate::protocol::commands;
use crate::render::TextRenderer;

/// Sink and state guarded together
#[derive(Debug)]
struct Session<W> {
    sink: W,
    state: PrinterState,
}

impl<W: Write> Session<W> {
    fn emit(&mut self, frame: &[u8]) -> Result<(), EscPosError> {
        self.sink.write_all(frame)?;
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), EscPosError> {
        for frame in self.state.frames() {
            self.emit(&frame)?;
        }
        Ok(())
    }
}

/// # ESC/POS Printer Session
///
/// Owns the sink exclusively; independent sessions share nothing.
#[derive(Debug)]
pub struct Printer<W> {
    session: Mutex<Session<W>>,
    config: PrinterConfig,
}

impl<W: Write> Printer<W> {
    /// Start a session with the default configuration.
    pub fn new(sink: W) -> Self {
        Self {
            session: Mutex::new(Session {
                sink,
                state: PrinterState::default(),
            }),
            config: PrinterConfig::default(),
        }
    }

    /// Start a session with an explicit configuration.
    ///
    /// ## Errors
    ///
    /// Whatever [`PrinterConfig::validate`] rejects.
    pub fn with_config(sink: W, config: PrinterConfig) -> Result<Self, EscPosError> {
        config.validate()?;
        let mut printer = Self::new(sink);
        printer.config = config;
        Ok(printer)
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    /// Snapshot of the current style state
    pub fn state(&self) -> PrinterState {
        self.lock().state
    }

    // The state is plain data and stays consistent even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, Session<W>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn send(&self, name: &str, frame: &[u8]) -> Result<(), EscPosError> {
        debug!("{}: {:02X?}", name, frame);
        self.lock().emit(frame)
    }

    /// Write raw bytes with no interpretation.
    pub fn write_raw(&self, bytes: &[u8]) -> Result<(), EscPosError> {
        self.lock().emit(bytes)
    }

    /// Flush the underlying sink.
    pub fn flush(&self) -> Result<(), EscPosError> {
        self.lock().sink.flush()?;
        Ok(())
    }

    /// End the session and return the sink.
    pub fn into_inner(self) -> W {
        self.session
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .sink
    }

    // ========================================================================
    // SESSION LIFECYCLE
    // ========================================================================

    /// Reset the state and send `ESC @`.
    pub fn init(&self) -> Result<(), EscPosError> {
        let mut session = self.lock();
        session.state.reset();
        debug!("init");
        session.emit(&commands::init())
    }

    /// Send the end-of-session byte.
    pub fn end(&self) -> Result<(), EscPosError> {
        self.send("end", &commands::end())
    }

    /// Restore the default state without sending anything.
    pub fn reset(&self) {
        self.lock().state.reset();
    }

    /// Re-send every stateful command from the recorded state.
    pub fn full_state_refresh(&self) -> Result<(), EscPosError> {
        debug!("full state refresh");
        self.lock().refresh()
    }

    // ========================================================================
    // FIXED COMMANDS
    // ========================================================================

    pub fn linefeed(&self) -> Result<(), EscPosError> {
        self.send("linefeed", &commands::linefeed())
    }

    pub fn formfeed(&self) -> Result<(), EscPosError> {
        self.formfeed_n(1)
    }

    pub fn formfeed_n(&self, lines: u8) -> Result<(), EscPosError> {
        self.send("formfeed", &commands::formfeed_n(lines))
    }

    pub fn cut(&self) -> Result<(), EscPosError> {
        self.send("cut", &commands::cut())
    }

    pub fn cash(&self) -> Result<(), EscPosError> {
        self.send("cash", &commands::cash())
    }

    /// Kick the cash drawer.
    pub fn pulse(&self) -> Result<(), EscPosError> {
        self.send("pulse", &commands::pulse())
    }

    pub fn move_x(&self, x: u16) -> Result<(), EscPosError> {
        self.send("move x", &commands::move_x(x))
    }

    pub fn move_y(&self, y: u16) -> Result<(), EscPosError> {
        self.send("move y", &commands::move_y(y))
    }

    // ========================================================================
    // STATELESS SELECTIONS
    // ========================================================================

    pub fn set_align(&self, align: Alignment) -> Result<(), EscPosError> {
        self.send("align", &text::align(align))
    }

    pub fn set_lang(&self, lang: Language) -> Result<(), EscPosError> {
        self.send("lang", &text::language(lang))
    }

    pub fn set_font(&self, font: Font) -> Result<(), EscPosError> {
        self.send("font", &text::font(font))
    }

    // ========================================================================
    // STATEFUL STYLE SETTERS
    // ========================================================================

    /// Set the font magnification and send `GS ! n`.
    ///
    /// ## Errors
    ///
    /// [`EscPosError::FontSize`] unless both values are in `1..=8`; the state
    /// is unchanged and nothing is written.
    pub fn set_font_size(&self, width: u8, height: u8) -> Result<(), EscPosError> {
        let mut session = self.lock();
        if let Err(e) = session.state.set_font_size(width, height) {
            warn!("Invalid font size passed: {} x {}", width, height);
            return Err(e);
        }
        let frame = session.state.font_size_frame();
        session.emit(&frame)
    }

    pub fn set_underline(&self, on: bool) -> Result<(), EscPosError> {
        let mut session = self.lock();
        session.state.underline = on;
        session.emit(&text::underline(on))
    }

    pub fn set_emphasize(&self, on: bool) -> Result<(), EscPosError> {
        let mut session = self.lock();
        session.state.emphasize = on;
        session.emit(&text::emphasize(on))
    }

    pub fn set_upsidedown(&self, on: bool) -> Result<(), EscPosError> {
        let mut session = self.lock();
        session.state.upsidedown = on;
        session.emit(&text::upsidedown(on))
    }

    pub fn set_rotate(&self, on: bool) -> Result<(), EscPosError> {
        let mut session = self.lock();
        session.state.rotate = on;
        session.emit(&text::rotate(on))
    }

    pub fn set_reverse(&self, on: bool) -> Result<(), EscPosError> {
        let mut session = self.lock();
        session.state.reverse = on;
        session.emit(&text::reverse(on))
    }

    pub fn set_smooth(&self, on: bool) -> Result<(), EscPosError> {
        let mut session = self.lock();
        session.state.smooth = on;
        session.emit(&text::smooth(on))
    }

    // ========================================================================
    // COMPOSITE OPERATIONS
    // ========================================================================

    /// Apply `style` and print `content`.
    ///
    /// The style is applied in a fixed order: align, lang, smooth,
    /// emphasize, underline, reverse, rotate, font, double width, double
    /// height, width, height, x, y. XML entities in `content` are decoded
    /// before writing.
    ///
    /// ## Errors
    ///
    /// [`EscPosError::FontSize`] if any magnification step leaves `1..=8`.
    /// Checked before anything is written.
    pub fn text(&self, style: &TextStyle, content: &str) -> Result<(), EscPosError> {
        let mut session = self.lock();

        let mut next = session.state;
        let mut frames: Vec<Vec<u8>> = Vec::new();

        if let Some(align) = style.align {
            frames.push(text::align(align));
        }
        if let Some(lang) = style.lang {
            frames.push(text::language(lang));
        }
        if style.smooth {
            next.smooth = true;
            frames.push(text::smooth(true));
        }
        if style.emphasize {
            next.emphasize = true;
            frames.push(text::emphasize(true));
        }
        if style.underline {
            next.underline = true;
            frames.push(text::underline(true));
        }
        if style.reverse {
            next.reverse = true;
            frames.push(text::reverse(true));
        }
        if style.rotate {
            next.rotate = true;
            frames.push(text::rotate(true));
        }
        if let Some(font) = style.font {
            frames.push(text::font(font));
        }

        let mut sizes = Vec::new();
        if style.double_width {
            sizes.push((Some(2), None));
        }
        if style.double_height {
            sizes.push((None, Some(2)));
        }
        if let Some(width) = style.width {
            sizes.push((Some(width), None));
        }
        if let Some(height) = style.height {
            sizes.push((None, Some(height)));
        }
        for (width, height) in sizes {
            let width = width.unwrap_or(next.font_width());
            let height = height.unwrap_or(next.font_height());
            if let Err(e) = next.set_font_size(width, height) {
                warn!("Invalid font size passed: {} x {}", width, height);
                return Err(e);
            }
            frames.push(next.font_size_frame());
        }

        if let Some(x) = style.x {
            frames.push(commands::move_x(x));
        }
        if let Some(y) = style.y {
            frames.push(commands::move_y(y));
        }

        let decoded = text::decode_entities(content);
        debug!("text: {} frame(s), {:?}", frames.len(), decoded);

        session.state = next;
        for frame in &frames {
            session.emit(frame)?;
        }
        if !decoded.is_empty() {
            session.emit(decoded.as_bytes())?;
        }
        Ok(())
    }

    /// Feed paper, then reset the state and re-send it.
    ///
    /// Sequence: `ESC d n` (if `lines`), `GS $` (if `units`), `LF`, reset,
    /// [`full_state_refresh`](Self::full_state_refresh).
    pub fn feed(&self, options: &FeedOptions) -> Result<(), EscPosError> {
        let mut session = self.lock();
        debug!("feed: {:?}", options);

        if let Some(lines) = options.lines {
            session.emit(&commands::formfeed_n(lines))?;
        }
        if let Some(units) = options.units {
            session.emit(&commands::move_y(units))?;
        }
        session.emit(&commands::linefeed())?;

        session.state.reset();
        session.refresh()
    }

    /// Optionally feed one line, then cut.
    pub fn feed_and_cut(&self, options: &CutOptions) -> Result<(), EscPosError> {
        let mut session = self.lock();
        if options.feed {
            session.emit(&commands::formfeed())?;
        }
        session.emit(&commands::cut())
    }

    /// Print a centered barcode.
    ///
    /// Resets the recorded state and selects center alignment first.
    ///
    /// ## Errors
    ///
    /// [`EscPosError::Barcode`] if `data` cannot be framed for `symbology`.
    pub fn barcode(&self, symbology: Symbology, data: &[u8]) -> Result<(), EscPosError> {
        let frame = barcode::barcode(symbology, data)?;

        let mut session = self.lock();
        debug!("barcode: {} ({} bytes)", symbology, data.len());
        session.state.reset();
        session.emit(&text::align(Alignment::Center))?;
        session.emit(&frame)
    }

    // ========================================================================
    // RASTER IMAGES
    // ========================================================================

    /// Transfer a raster image with the given mode.
    ///
    /// In [`RasterMode::Graphics`] each chunk is written as three frames:
    /// header, rows, print command. Every frame is built before the first
    /// write.
    pub fn raster(&self, image: &RasterImage, mode: RasterMode) -> Result<(), EscPosError> {
        let frames = self.raster_frames(image, mode)?;
        let mut session = self.lock();
        for frame in &frames {
            session.emit(frame)?;
        }
        Ok(())
    }

    /// Center and print an image with the configured raster mode.
    pub fn print_image(&self, image: &RasterImage) -> Result<(), EscPosError> {
        let frames = self.raster_frames(image, self.config.raster_mode)?;
        let mut session = self.lock();
        session.emit(&text::align(Alignment::Center))?;
        for frame in &frames {
            session.emit(frame)?;
        }
        Ok(())
    }

    fn raster_frames<'a>(
        &self,
        image: &'a RasterImage,
        mode: RasterMode,
    ) -> Result<Vec<Cow<'a, [u8]>>, EscPosError> {
        debug!(
            "raster: {}x{} ({} bytes/line), {:?}",
            image.width_dots(),
            image.height(),
            image.bytes_per_line(),
            mode
        );

        match mode {
            RasterMode::BitImage => Ok(vec![Cow::Owned(graphics::bit_image(image)?)]),
            RasterMode::Graphics => {
                let chunks = image.chunks(self.config.max_chunk_lines)?;
                let mut frames = Vec::with_capacity(chunks.len() * 3);
                for chunk in &chunks {
                    debug!(
                        "chunk rows {}..{} payload {}",
                        chunk.start_line,
                        chunk.end_line(),
                        chunk.payload_len()
                    );
                    frames.push(Cow::Owned(chunk.header()?.to_vec()));
                    frames.push(Cow::Borrowed(image.chunk_rows(chunk)?));
                    frames.push(Cow::Borrowed(&PRINT_BUFFER[..]));
                }
                Ok(frames)
            }
        }
    }

    /// Store an image with `GS ( L` function 112 and print it with
    /// function 50, in one frame each.
    pub fn image_graphics_store(&self, image: &RasterImage) -> Result<(), EscPosError> {
        let store = graphics::store_graphics(image)?;
        let mut session = self.lock();
        session.emit(&store)?;
        session.emit(&PRINT_BUFFER)
    }

    /// Render `content` with `renderer` and print the result as an image.
    pub fn print_text_image(
        &self,
        renderer: &dyn TextRenderer,
        content: &str,
    ) -> Result<(), EscPosError> {
        let image = renderer.render(content)?;
        self.print_image(&image)
    }
}

// ============================================================================
// TESTS
// ============================================================================
