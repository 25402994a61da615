//! # escpos CLI
//!
//! Command-line interface for ESC/POS thermal printers.
//!
//! ## Usage
//!
//! ```bash
//! # Styled text on the default USB printer
//! escpos text -p align=center -p em=true -p width=2 "HELLO"
//!
//! # Text rendered through a TTF font and printed as an image
//! escpos text --ttf /usr/share/fonts/truetype/dejavu/DejaVuSans.ttf "Größe"
//!
//! # An image over the network, in bit-image mode
//! escpos --host 192.168.1.50 --mode bit-image image logo.png
//!
//! # Preview the monochrome conversion without printing
//! escpos image --png preview.png photo.jpg
//!
//! # A CODE128 barcode, written to a file instead of a printer
//! escpos --output job.bin barcode --code 73 "{B12345"
//!
//! # Cut and open the cash drawer
//! escpos cut --feed
//! escpos pulse --cash
//! ```
//!
//! Set `RUST_LOG=debug` to trace every frame sent.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use escpos::{
    EscPosError, Printer, PrinterConfig, params,
    printer::{CutOptions, FeedOptions},
    protocol::{barcode::Symbology, graphics::RasterImage, graphics::RasterMode},
    render::{self, Dither, TextRenderConfig, TtfTextRenderer},
    transport::{DeviceTransport, NetworkTransport, device::DEFAULT_DEVICE},
};

/// escpos - ESC/POS thermal printer utility
#[derive(Parser, Debug)]
#[command(name = "escpos")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Printer device path
    #[arg(long, global = true, default_value = DEFAULT_DEVICE)]
    device: PathBuf,

    /// Network printer address (`host[:port]`), overrides --device
    #[arg(long, global = true)]
    host: Option<String>,

    /// Write the job to a file instead of a printer
    #[arg(long, global = true, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Printer configuration (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Raster transfer mode: `graphics` or `bit-image`
    #[arg(long, global = true)]
    mode: Option<RasterMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a line of text
    Text {
        /// Text to print (XML entities are decoded)
        content: String,

        /// Formatting parameter, e.g. `align=center`, `em=true`, `width=2`
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Render with this TTF font and print as an image
        #[arg(long, value_name = "FONT")]
        ttf: Option<PathBuf>,

        /// Glyph height in pixels for --ttf
        #[arg(long, default_value = "30")]
        size: f32,

        /// Lines to feed after the text
        #[arg(long, default_value = "1")]
        feed: u8,
    },

    /// Print an image file
    Image {
        /// PNG, JPEG, GIF or BMP file
        path: PathBuf,

        /// Use Bayer ordered dithering instead of a fixed threshold
        #[arg(long)]
        bayer: bool,

        /// Save the monochrome conversion as PNG instead of printing
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,
    },

    /// Print a centered barcode
    Barcode {
        /// Barcode payload
        data: String,

        /// Symbology code (0-6 short form, 72 CODE93, 73 CODE128)
        #[arg(long, default_value = "73")]
        code: u8,
    },

    /// Cut the paper
    Cut {
        /// Feed one line before cutting
        #[arg(long)]
        feed: bool,
    },

    /// Pulse the cash drawer
    Pulse {
        /// Use the explicit 10 ms / 510 ms pulse timing
        #[arg(long)]
        cash: bool,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), EscPosError> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PrinterConfig::load(path)?,
        None => PrinterConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.raster_mode = mode;
    }

    // Preview needs no printer
    if let Commands::Image {
        path,
        bayer,
        png: Some(png),
    } = &cli.command
    {
        let raster = load_raster(path, &config, *bayer)?;
        save_png(png, &raster)?;
        println!("Saved to {}", png.display());
        return Ok(());
    }

    let printer = Printer::with_config(open_sink(&cli)?, config)?;
    printer.init()?;

    match &cli.command {
        Commands::Text {
            content,
            params: pairs,
            ttf,
            size,
            feed,
        } => {
            if let Some(font_path) = ttf {
                let renderer = TtfTextRenderer::new(TextRenderConfig {
                    font_path: font_path.clone(),
                    size_px: *size,
                    max_width: usize::from(printer.config().width_dots),
                    ..TextRenderConfig::default()
                })?;
                printer.print_text_image(&renderer, content)?;
            } else {
                let style = params::text_style(&parse_params(pairs)?)?;
                printer.text(&style, content)?;
            }
            printer.feed(&FeedOptions::lines(*feed))?;
        }
        Commands::Image { path, bayer, .. } => {
            let raster = load_raster(path, printer.config(), *bayer)?;
            printer.print_image(&raster)?;
            printer.feed(&FeedOptions::lines(1))?;
        }
        Commands::Barcode { data, code } => {
            printer.barcode(Symbology::from_code_or_default(*code), data.as_bytes())?;
            printer.feed(&FeedOptions::lines(1))?;
        }
        Commands::Cut { feed } => {
            printer.feed_and_cut(&CutOptions { feed: *feed })?;
        }
        Commands::Pulse { cash } => {
            if *cash {
                printer.cash()?;
            } else {
                printer.pulse()?;
            }
        }
    }

    printer.end()?;
    printer.flush()?;
    Ok(())
}

/// Pick the output named on the command line
fn open_sink(cli: &Cli) -> Result<Box<dyn Write>, EscPosError> {
    if let Some(path) = &cli.output {
        let file = File::create(path).map_err(|e| {
            EscPosError::Transport(format!("Failed to create {}: {}", path.display(), e))
        })?;
        return Ok(Box::new(BufWriter::new(file)));
    }
    if let Some(host) = &cli.host {
        return Ok(Box::new(NetworkTransport::connect(host)?));
    }
    Ok(Box::new(DeviceTransport::open(&cli.device)?))
}

/// Split `key=value` arguments
fn parse_params(pairs: &[String]) -> Result<params::Params, EscPosError> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .ok_or_else(|| EscPosError::InvalidParameter {
                    name: "param".to_string(),
                    value: pair.clone(),
                })
        })
        .collect()
}

fn load_raster(path: &Path, config: &PrinterConfig, bayer: bool) -> Result<RasterImage, EscPosError> {
    let img = image::open(path)
        .map_err(|e| EscPosError::Image(format!("Failed to load {}: {}", path.display(), e)))?;
    let dither = if bayer {
        Dither::Bayer
    } else {
        Dither::Threshold(config.threshold)
    };
    render::image_to_raster(&img, config.width_dots, dither)
}

/// Save raster data as a PNG image
fn save_png(path: &Path, raster: &RasterImage) -> Result<(), EscPosError> {
    use image::{GrayImage, Luma};

    let width = raster.width_dots();
    let mut img = GrayImage::new(width as u32, raster.height() as u32);

    for (y, row) in raster.data().chunks(raster.bytes_per_line().max(1)).enumerate() {
        for x in 0..width {
            let is_black = (row[x / 8] >> (7 - (x % 8))) & 1 == 1;
            let color = if is_black { 0u8 } else { 255u8 };
            img.put_pixel(x as u32, y as u32, Luma([color]));
        }
    }

    img.save(path)
        .map_err(|e| EscPosError::Image(format!("Failed to save PNG: {}", e)))?;

    Ok(())
}
