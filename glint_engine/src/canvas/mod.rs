use crate::core::colour::Colour;
use crate::core::types::Channel;
use getset::CopyGetters;
use itertools::Itertools;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Hard wrap for PPM data lines, per the plain-PPM convention
const PPM_LINE_MAX_WIDTH: usize = 70;

#[derive(Error, Debug)]
pub enum PpmError {
    #[error("cannot read file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("trying to read an empty file")]
    Empty,
    #[error("unsupported file format (expected P3)")]
    UnsupportedFormat,
    #[error("malformed PPM header")]
    MalformedHeader,
    #[error("invalid pixel value {0:?}")]
    InvalidValue(String),
}

/// A rectangular grid of [Colour] pixels, with plain-PPM (P3) encode/decode.
///
/// Pixel `(0, 0)` is the top-left corner.
#[derive(CopyGetters, Clone, Debug, PartialEq)]
pub struct Canvas {
    #[getset(get_copy = "pub")]
    width: u32,
    #[getset(get_copy = "pub")]
    height: u32,
    pixels: Vec<Colour>,
}

impl Canvas {
    /// A canvas of the given size, all pixels black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Colour::BLACK; (width as usize) * (height as usize)],
        }
    }

    /// Sets one pixel. Writes outside the canvas are silently dropped, so
    /// callers can plot without clipping first.
    pub fn write_pixel(&mut self, x: u32, y: u32, colour: Colour) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[(x + self.width * y) as usize] = colour;
    }

    /// Reads one pixel
    ///
    /// # Panics
    /// `x` and `y` must be inside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Colour {
        assert!(x < self.width, "pixel x {x} outside canvas width {}", self.width);
        assert!(y < self.height, "pixel y {y} outside canvas height {}", self.height);
        self.pixels[(x + self.width * y) as usize]
    }

    pub fn pixels(&self) -> &[Colour] { &self.pixels }
}

// region PPM encoding

/// One colour component as a PPM integer in `0..=255`
fn component_to_ppm(value: Channel) -> String {
    i64::clamp(Channel::round(value * 255.) as i64, 0, 255).to_string()
}

impl Canvas {
    /// Encodes the canvas as a plain-PPM (P3) string.
    ///
    /// Each canvas row starts on a fresh line, and lines wrap at 70
    /// characters; the output always ends with a newline.
    pub fn to_ppm(&self) -> String {
        let mut out = format!("P3\n{} {}\n255\n", self.width, self.height);

        for y in 0..self.height {
            let mut row_width = 0;
            for x in 0..self.width {
                let colour = self.pixel(x, y);
                for component in [colour.red(), colour.green(), colour.blue()] {
                    let value = component_to_ppm(component);

                    if row_width + value.len() + 1 > PPM_LINE_MAX_WIDTH {
                        out.push('\n');
                        row_width = 0;
                    }
                    if row_width > 0 {
                        out.push(' ');
                        row_width += 1;
                    }

                    let _ = write!(out, "{value}");
                    row_width += value.len();
                }
            }
            out.push('\n');
        }

        out
    }

    pub fn write_ppm(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, self.to_ppm())
    }
}

// endregion PPM encoding

// region PPM decoding

impl Canvas {
    /// Decodes a plain-PPM (P3) string.
    ///
    /// Comment lines (leading `#`) may appear anywhere; pixel triples may
    /// span lines. Components are scaled by the header's maximum value.
    pub fn from_ppm_str(source: &str) -> Result<Self, PpmError> {
        if source.is_empty() {
            return Err(PpmError::Empty);
        }

        let mut tokens = source
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(str::split_whitespace);

        if tokens.next() != Some("P3") {
            return Err(PpmError::UnsupportedFormat);
        }

        let mut header = || -> Result<u32, PpmError> {
            tokens
                .next()
                .ok_or(PpmError::MalformedHeader)?
                .parse()
                .map_err(|_| PpmError::MalformedHeader)
        };
        let width = header()?;
        let height = header()?;
        let max_v = header()?;

        let component = |token: &str| -> Result<Channel, PpmError> {
            let value: u32 = token
                .parse()
                .map_err(|_| PpmError::InvalidValue(token.to_owned()))?;
            Ok(value as Channel / max_v as Channel)
        };

        // A trailing incomplete triple never completes a pixel, so it is
        // silently dropped
        let mut canvas = Canvas::new(width, height);
        for (pixel, (r, g, b)) in tokens.tuples().enumerate() {
            let x = (pixel % width as usize) as u32;
            let y = (pixel / width as usize) as u32;
            canvas.write_pixel(x, y, Colour([component(r)?, component(g)?, component(b)?]));
        }

        Ok(canvas)
    }

    pub fn from_ppm_file(path: impl AsRef<Path>) -> Result<Self, PpmError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| PpmError::Io {
            path: path.to_owned(),
            source,
        })?;
        if source.is_empty() {
            return Err(PpmError::Empty);
        }
        Self::from_ppm_str(&source)
    }
}

// endregion PPM decoding
