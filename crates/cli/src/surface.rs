//! A text-mode surface: frames are printed as text and keys are read one
//! per input line.
//!
//! Input tokens are key names (`esc`, `tab`, `space`, `up`, `down`, `left`,
//! `right`, `pgup`, `pgdn`, `f1`..`f12`), single characters, `resize WxH`
//! and `close`. End of input closes the window.

use std::{
    collections::BTreeMap,
    io::{BufRead, Write},
};

use log::{debug, warn};
use vfview_core::{
    Event, GlyphRef, Key, LayoutItem, Marker, RenderOptions, RenderSurface, SurfaceError,
};

use crate::cli::Dimensions;

/// Parse one input line into an event.
pub fn parse_event(line: &str) -> Option<Event> {
    let token = line.trim_end_matches(['\r', '\n']);
    if let Some(size) = token.strip_prefix("resize ") {
        let Dimensions { width, height } = size.trim().parse().ok()?;
        return Some(Event::Resize { width, height });
    }
    let key = match token.to_ascii_lowercase().as_str() {
        "close" => return Some(Event::Closed),
        "esc" | "escape" => Key::Escape,
        "tab" => Key::Tab,
        "space" => Key::Char(' '),
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "pgup" | "pageup" => Key::PageUp,
        "pgdn" | "pagedown" => Key::PageDown,
        name => match name.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n @ 1..=12) => Key::F(n),
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        },
    };
    Some(Event::Key(key))
}

/// Glyphs drawn on one baseline.
#[derive(Default)]
struct Row {
    indices: Vec<u32>,
    text: String,
}

/// Prints each frame as its header rows followed by one line per baseline.
pub struct TerminalSurface<R: BufRead, W: Write> {
    input: R,
    output: W,
    width: u32,
    height: u32,
    lines: Vec<(i32, i32, String)>,
    rows: BTreeMap<i32, Row>,
    markers: usize,
    options: Option<RenderOptions>,
    frames: u64,
}

impl<R: BufRead, W: Write> TerminalSurface<R, W> {
    pub fn new(input: R, output: W, width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::Allocation(format!("invalid window size {width}x{height}")));
        }
        debug!("allocated {width}x{height} text surface");
        Ok(Self {
            input,
            output,
            width,
            height,
            lines: Vec::new(),
            rows: BTreeMap::new(),
            markers: 0,
            options: None,
            frames: 0,
        })
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<R: BufRead, W: Write> RenderSurface for TerminalSurface<R, W> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.rows.clear();
        self.markers = 0;
        self.options = None;
    }

    fn write_line(&mut self, x: i32, y: i32, text: &str) {
        self.lines.push((y, x, text.to_string()));
    }

    fn fill_marker(&mut self, _marker: Marker) {
        self.markers += 1;
    }

    fn draw_glyph(&mut self, item: &LayoutItem, options: RenderOptions) {
        let row = self.rows.entry(item.y).or_default();
        match item.glyph {
            GlyphRef::Index(gid) => row.indices.push(gid),
            GlyphRef::Char(ch) => row.text.push(ch),
        }
        self.options = Some(options);
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.frames += 1;
        self.lines.sort_by_key(|(y, x, _)| (*y, *x));

        let out = &mut self.output;
        writeln!(out, "--- frame {} ({}x{}) ---", self.frames, self.width, self.height)?;
        for (_, _, text) in &self.lines {
            writeln!(out, "{text}")?;
        }
        for (y, row) in &self.rows {
            match (row.indices.first(), row.indices.last()) {
                (Some(first), Some(last)) => {
                    writeln!(out, "{y:>5} | glyphs {first}-{last} ({})", row.indices.len())?
                }
                _ => writeln!(out, "{y:>5} | {}", row.text)?,
            }
        }
        if self.markers > 0 {
            writeln!(out, "{} zero-width glyphs", self.markers)?;
        }
        if let Some(options) = self.options {
            let mut flags = vec![if options.antialias { "antialiased" } else { "monochrome" }];
            if options.flip_fill_rule {
                flags.push("fill rule flipped");
            }
            if options.flip_overlap {
                flags.push("overlap flipped");
            }
            writeln!(out, "[{}]", flags.join(", "))?;
        }
        out.flush()?;
        Ok(())
    }

    fn wait_event(&mut self) -> Result<Event, SurfaceError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(Event::Closed);
            }
            if line.trim().is_empty() {
                continue;
            }
            match parse_event(&line) {
                Some(event) => {
                    if let Event::Resize { width, height } = event {
                        self.width = width;
                        self.height = height;
                    }
                    return Ok(event);
                }
                None => warn!("unknown key '{}'", line.trim()),
            }
        }
    }
}

impl<R: BufRead, W: Write> Drop for TerminalSurface<R, W> {
    fn drop(&mut self) {
        if let Err(e) = self.output.flush() {
            warn!("could not flush text surface: {e}");
        }
        debug!("released text surface after {} frames", self.frames);
    }
}
