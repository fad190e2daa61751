//! Rendering primitives.
//!
//! These types are backend-agnostic and are used by render backends (such as the
//! GPUI backend) or any [`Surface`](crate::stream::Surface) implementation to
//! describe how a chart frame should be drawn. Coordinates are logical pixels;
//! backends apply the oversample factor from [`FrameSize`].

use std::fmt;
use std::str::FromStr;

use crate::error::ColorParseError;
use crate::geom::{ScreenPoint, ScreenRect};

/// RGBA color.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red, the default sample color.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Parse a CSS-style hex color (`#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let digits = input
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(input.to_string()))?;
        if !digits.is_ascii() {
            return Err(ColorParseError::InvalidDigit(input.to_string()));
        }
        let nibble = |index: usize| -> Result<u8, ColorParseError> {
            u8::from_str_radix(&digits[index..=index], 16)
                .map(|value| value * 17)
                .map_err(|_| ColorParseError::InvalidDigit(input.to_string()))
        };
        let byte = |index: usize| -> Result<u8, ColorParseError> {
            u8::from_str_radix(&digits[index..index + 2], 16)
                .map_err(|_| ColorParseError::InvalidDigit(input.to_string()))
        };
        match digits.len() {
            3 => Ok(Self::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
            4 => Ok(Self::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Ok(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            len => Err(ColorParseError::InvalidLength {
                input: input.to_string(),
                len,
            }),
        }
    }

    /// Format the color as `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a)
        )
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Font description used for measuring and drawing text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Font {
    /// Font size in pixels.
    pub size: f32,
    /// Font family name.
    pub family: String,
    /// Whether the bold weight is used.
    pub bold: bool,
}

impl Font {
    /// Create a regular-weight font.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            size,
            family: family.into(),
            bold: false,
        }
    }

    /// Switch to the bold weight.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Replace the font size.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("monospace", 12.0)
    }
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Optional border.
    pub stroke: Option<LineStyle>,
}

impl RectStyle {
    /// A filled rectangle without a border.
    pub fn filled(fill: Color) -> Self {
        Self { fill, stroke: None }
    }
}

/// Text styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Fill color.
    pub color: Color,
    /// Font used for the run.
    pub font: Font,
    /// Outline drawn around the glyphs, if any.
    pub outline: Option<LineStyle>,
}

/// Logical size of a frame together with the backing-store oversample factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSize {
    /// Logical width in pixels.
    pub width: f32,
    /// Logical height in pixels.
    pub height: f32,
    /// Backing-store pixels per logical pixel.
    pub over_sample: f32,
}

impl FrameSize {
    /// Backing-store dimensions in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        let scale = |value: f32| (value * self.over_sample).max(0.0) as u32;
        (scale(self.width), scale(self.height))
    }
}

/// Render command list.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Clear the whole surface to a color.
    Clear(Color),
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Stroke an open polyline.
    Polyline {
        /// Vertices in drawing order.
        points: Vec<ScreenPoint>,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Draw text.
    Text {
        /// Top-left corner of the text box.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Aggregated render commands for one frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
