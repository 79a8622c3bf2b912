//! Line-wrapping glyph layout for a single frame.
//!
//! [`Layout`] is an iterator: placements are computed one at a time as the
//! renderer pulls them, so a frame never allocates per glyph. It is built
//! fresh for every frame and cannot be restarted.

use std::{iter::FusedIterator, ops::Range, str::Chars};

use crate::{
    config::{AXIS_PANEL_WIDTH, HEADER_HEIGHT, PLAIN_MARGIN, RIGHT_MARGIN},
    engine::{AdvanceProvider, GlyphRef, SizeMetrics},
};

/// What a frame shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content<'a> {
    /// Every glyph of the face, by index.
    AllGlyphs { glyph_count: u32 },
    /// The characters of a sample string.
    SampleText(&'a str),
}

/// The drawable area of a frame, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub start_x: i32,
    pub start_y: i32,
    /// Vertical distance between lines.
    pub line_step: i32,
    /// Lines may not start this close to the bottom edge.
    pub bottom_margin: i32,
    /// Width assumed for glyphs with a zero advance.
    pub zero_advance: i32,
}

impl Viewport {
    /// Derive the viewport for a surface of `width` x `height`.
    ///
    /// Glyphs start below the header rows; when `axes_shown` the left side
    /// is kept free for the axis readout.
    pub fn new(width: u32, height: u32, metrics: SizeMetrics, axes_shown: bool) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            start_x: if axes_shown { AXIS_PANEL_WIDTH } else { PLAIN_MARGIN },
            start_y: metrics.y_ppem + HEADER_HEIGHT * 4,
            line_step: metrics.line_height + 1,
            bottom_margin: metrics.y_ppem / 5,
            zero_advance: metrics.x_ppem / 2,
        }
    }
}

/// Square drawn in front of a zero-advance glyph so it stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

/// A glyph placed at its pen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutItem {
    pub glyph: GlyphRef,
    pub x: i32,
    pub y: i32,
    pub marker: Option<Marker>,
}

enum Source<'a> {
    Glyphs(Range<u32>),
    Chars(Chars<'a>),
}

impl Iterator for Source<'_> {
    type Item = GlyphRef;

    fn next(&mut self) -> Option<GlyphRef> {
        match self {
            Source::Glyphs(range) => range.next().map(GlyphRef::Index),
            Source::Chars(chars) => chars.next().map(GlyphRef::Char),
        }
    }
}

/// Iterator over the placements of one frame.
pub struct Layout<'a, P: ?Sized> {
    provider: &'a P,
    source: Source<'a>,
    all_glyphs: bool,
    viewport: Viewport,
    x: i32,
    y: i32,
    advanced: u32,
    placed: u32,
    failures: u32,
    finished: bool,
}

impl<'a, P: AdvanceProvider + ?Sized> Layout<'a, P> {
    /// Lay out `content` from position `start` (glyph index or character
    /// offset) using advances from `provider`.
    pub fn new(content: Content<'a>, start: u32, provider: &'a P, viewport: Viewport) -> Self {
        let (source, all_glyphs) = match content {
            Content::AllGlyphs { glyph_count } => {
                (Source::Glyphs(start.min(glyph_count)..glyph_count), true)
            }
            Content::SampleText(text) => {
                let mut chars = text.chars();
                for _ in 0..start {
                    if chars.next().is_none() {
                        break;
                    }
                }
                (Source::Chars(chars), false)
            }
        };
        Self {
            provider,
            source,
            all_glyphs,
            viewport,
            x: viewport.start_x,
            y: viewport.start_y,
            advanced: 0,
            placed: 0,
            failures: 0,
            finished: false,
        }
    }

    /// Glyph references consumed so far, failed ones included.
    pub fn advanced(&self) -> u32 {
        self.advanced
    }

    /// Items emitted so far.
    pub fn placed(&self) -> u32 {
        self.placed
    }

    /// Glyphs whose advance could not be fetched.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Whether the content or the viewport is exhausted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn width_of(&self, advance: f32) -> i32 {
        if !self.all_glyphs {
            // round to whole pixels plus one pixel of spacing
            (advance + 0.5).floor() as i32 + 1
        } else if advance == 0.0 {
            self.viewport.zero_advance
        } else {
            advance.floor() as i32
        }
    }
}

impl<P: AdvanceProvider + ?Sized> Iterator for Layout<'_, P> {
    type Item = LayoutItem;

    fn next(&mut self) -> Option<LayoutItem> {
        if self.finished {
            return None;
        }
        loop {
            let Some(glyph) = self.source.next() else {
                self.finished = true;
                return None;
            };
            let Some(advance) = self.provider.advance(glyph) else {
                self.failures += 1;
                self.advanced += 1;
                continue;
            };

            let vp = self.viewport;
            let mut w = self.width_of(advance);
            if self.x + w > vp.width - RIGHT_MARGIN {
                self.x = vp.start_x;
                self.y += vp.line_step;
                if self.y >= vp.height - vp.bottom_margin {
                    self.finished = true;
                    return None;
                }
            }

            let mut marker = None;
            if self.all_glyphs && advance == 0.0 {
                w /= 2;
                self.x += w;
                marker = Some(Marker { x: self.x, y: self.y - w, size: w });
            }

            let item = LayoutItem { glyph, x: self.x, y: self.y, marker };
            self.x += if self.all_glyphs { w + 1 } else { w };
            self.advanced += 1;
            self.placed += 1;
            return Some(item);
        }
    }
}

impl<P: AdvanceProvider + ?Sized> FusedIterator for Layout<'_, P> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Advances by glyph index; characters map to their code point.
    struct Table(Vec<Option<f32>>);

    impl AdvanceProvider for Table {
        fn advance(&self, glyph: GlyphRef) -> Option<f32> {
            let index = match glyph {
                GlyphRef::Index(gid) => gid as usize,
                GlyphRef::Char(ch) => ch as usize,
            };
            self.0.get(index).copied().flatten()
        }
    }

    fn viewport(width: i32, height: i32) -> Viewport {
        Viewport {
            width,
            height,
            start_x: 12,
            start_y: 20,
            line_step: 10,
            bottom_margin: 2,
            zero_advance: 8,
        }
    }

    #[test]
    fn viewport_reserves_axis_panel() {
        let metrics = SizeMetrics { x_ppem: 64, y_ppem: 64, line_height: 75 };
        let with_axes = Viewport::new(640, 480, metrics, true);
        assert_eq!(with_axes.start_x, 144);
        assert_eq!(with_axes.start_y, 64 + 48);
        assert_eq!(with_axes.line_step, 76);
        assert_eq!(with_axes.bottom_margin, 12);
        assert_eq!(with_axes.zero_advance, 32);
        assert_eq!(Viewport::new(640, 480, metrics, false).start_x, 12);
    }

    #[test]
    fn wraps_and_never_overflows_right_edge() {
        let table = Table(vec![Some(10.7); 40]);
        let vp = viewport(60, 1000);
        let items: Vec<_> =
            Layout::new(Content::AllGlyphs { glyph_count: 40 }, 0, &table, vp).collect();
        assert_eq!(items.len(), 40);

        let mut previous: Option<LayoutItem> = None;
        for item in &items {
            assert!(item.x + 10 <= vp.width - 4, "{item:?}");
            if let Some(prev) = previous
                && item.y != prev.y
            {
                assert_eq!(item.y, prev.y + vp.line_step);
                assert_eq!(item.x, vp.start_x);
            }
            previous = Some(*item);
        }
        // x advances by floor(10.7) + 1
        assert_eq!(items[1].x - items[0].x, 11);
    }

    #[test]
    fn oversized_glyph_is_placed_after_wrapping() {
        let table = Table(vec![Some(100.0); 2]);
        let vp = viewport(60, 1000);
        let items: Vec<_> =
            Layout::new(Content::AllGlyphs { glyph_count: 2 }, 0, &table, vp).collect();

        // each glyph wraps once, then is drawn past the right edge anyway
        let positions: Vec<_> = items.iter().map(|item| (item.x, item.y)).collect();
        assert_eq!(positions, [(12, 30), (12, 40)]);
        assert!(items.iter().all(|item| item.x + 100 > vp.width - RIGHT_MARGIN));
    }

    #[test]
    fn stops_at_bottom_margin_and_counts_failures() {
        let mut advances = vec![Some(20.0); 100];
        advances[1] = None;
        advances[2] = None;
        let table = Table(advances);
        // two glyphs per line, two lines fit
        let vp = viewport(12 + 42 + 4, 20 + 10 + 2 + 1);
        let mut layout = Layout::new(Content::AllGlyphs { glyph_count: 100 }, 0, &table, vp);
        let items: Vec<_> = layout.by_ref().collect();

        assert_eq!(items.len(), 4);
        assert_eq!(items.last().map(|item| item.y), Some(30));
        assert_eq!(layout.failures(), 2);
        assert_eq!(layout.advanced(), 6);
        assert_eq!(layout.placed(), 4);
        assert!(layout.is_finished());
        assert_eq!(layout.next(), None);
    }

    #[test]
    fn zero_advance_gets_half_width_and_marker() {
        let table = Table(vec![Some(10.0), Some(0.0), Some(10.0)]);
        let vp = viewport(640, 480);
        let items: Vec<_> =
            Layout::new(Content::AllGlyphs { glyph_count: 3 }, 0, &table, vp).collect();

        assert_eq!(items[0].x, 12);
        assert_eq!(items[0].marker, None);
        assert_eq!(items[1].x, 12 + 11 + 4);
        assert_eq!(items[1].marker, Some(Marker { x: 27, y: 16, size: 4 }));
        assert_eq!(items[2].x, 27 + 5);
    }

    #[test]
    fn starts_at_requested_glyph() {
        let table = Table(vec![Some(5.0); 10]);
        let items: Vec<_> =
            Layout::new(Content::AllGlyphs { glyph_count: 10 }, 7, &table, viewport(640, 480))
                .collect();
        let glyphs: Vec<_> = items.iter().map(|item| item.glyph).collect();
        assert_eq!(glyphs, [GlyphRef::Index(7), GlyphRef::Index(8), GlyphRef::Index(9)]);
    }

    #[test]
    fn sample_text_pads_rounded_advances() {
        let mut advances = vec![None; 128];
        advances['a' as usize] = Some(9.5);
        advances['b' as usize] = Some(0.0);
        let table = Table(advances);
        let items: Vec<_> =
            Layout::new(Content::SampleText("xab"), 1, &table, viewport(640, 480)).collect();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].glyph, GlyphRef::Char('a'));
        assert_eq!(items[1].x - items[0].x, 11);
        assert_eq!(items[1].marker, None);
    }

    #[test]
    fn sample_text_start_past_end_is_empty() {
        let table = Table(vec![Some(1.0); 128]);
        let mut layout = Layout::new(Content::SampleText("abc"), 10, &table, viewport(640, 480));
        assert_eq!(layout.next(), None);
        assert_eq!(layout.advanced(), 0);
    }
}
