//! Command-line arguments.

use std::{num::ParseIntError, path::PathBuf, str::FromStr};

use anyhow::{Result, bail};
use clap::{ArgAction, Parser};
use read_fonts::types::{Fixed, Tag};
use vfview_core::{
    ViewerConfig,
    config::{
        DEFAULT_DPI, DEFAULT_HEIGHT, DEFAULT_POINT_SIZE, DEFAULT_WIDTH, MAX_AXES, MAX_POINT_SIZE,
    },
};

/// Window size given as `WxH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Dimensions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
        let parse = |v: &str| v.trim().parse::<u32>().map_err(|e| format!("'{v}': {e}"));
        let (width, height) = (parse(width)?, parse(height)?);
        if width == 0 || height == 0 {
            return Err(format!("window size must be non-zero, got '{s}'"));
        }
        Ok(Self { width, height })
    }
}

/// Parse a glyph index as decimal or `0x`-prefixed hex.
fn parse_index(s: &str) -> Result<i64, ParseIntError> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let value = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16)?,
        None => digits.parse()?,
    };
    Ok(if negative { -value } else { value })
}

#[derive(Parser, Debug)]
#[command(name = "vfview", version, disable_version_flag = true)]
#[command(about = "Display the glyphs of variable fonts and step through their design space")]
pub struct Cli {
    /// Window size in pixels
    #[arg(short = 'd', value_name = "WxH")]
    pub dimensions: Option<Dimensions>,

    /// Charmap encoding tag, e.g. `unic`
    #[arg(short = 'e', value_name = "TAG")]
    pub encoding: Option<Tag>,

    /// Resolution in dpi
    #[arg(short = 'r', value_name = "R", default_value_t = DEFAULT_DPI,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub resolution: u32,

    /// Index of the first glyph to show (decimal or 0x hex)
    #[arg(short = 'f', value_name = "N", default_value = "0", value_parser = parse_index,
          allow_hyphen_values = true)]
    pub first_glyph: i64,

    /// Initial design coordinates, comma-separated, by axis index
    #[arg(short = 'a', value_name = "V1,V2,...", value_delimiter = ',', allow_hyphen_values = true)]
    pub axes: Vec<f64>,

    /// Print version
    #[arg(short = 'v', action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Optional point size followed by one or more font files
    #[arg(value_name = "[pt] font", required = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Split the positionals into the point size and the font list.
    ///
    /// The first positional is a point size only when more follow and it
    /// parses as a number.
    fn point_size_and_fonts(&self) -> (u32, &[String]) {
        match self.args.split_first() {
            Some((first, rest)) if !rest.is_empty() => match first.parse::<u32>() {
                Ok(0) => (DEFAULT_POINT_SIZE, rest),
                Ok(size) => (size.min(MAX_POINT_SIZE), rest),
                Err(_) => (DEFAULT_POINT_SIZE, &self.args),
            },
            _ => (DEFAULT_POINT_SIZE, &self.args),
        }
    }

    pub fn into_config(self) -> Result<ViewerConfig> {
        if self.axes.len() > MAX_AXES {
            bail!("at most {MAX_AXES} axis values are supported, got {}", self.axes.len());
        }
        let (point_size, fonts) = self.point_size_and_fonts();
        if fonts.is_empty() {
            bail!("no font files given");
        }
        let dimensions = self
            .dimensions
            .unwrap_or(Dimensions { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT });
        Ok(ViewerConfig {
            width: dimensions.width,
            height: dimensions.height,
            dpi: self.resolution,
            point_size,
            first_glyph: self.first_glyph,
            encoding: self.encoding,
            requested_coords: self.axes.iter().map(|&v| Fixed::from_f64(v)).collect(),
            fonts: fonts.iter().map(PathBuf::from).collect(),
        })
    }
}
