//! The viewer's event loop and the state it drives.
//!
//! Topology changes are expensive and rare, so the session keeps three
//! levels of work apart:
//!
//! - opening a face rebuilds the [`VariationSpace`] and [`VisibleAxes`];
//! - toggling grouping rebuilds only the [`VisibleAxes`];
//! - stepping an axis runs only the coordinate controller.

use std::path::Path;

use log::{debug, info, warn};

use crate::{
    axis::VariationSpace,
    config::{HEADER_HEIGHT, MAX_POINT_SIZE, SAMPLE_TEXT, ViewerConfig},
    controller::{Increment, adjust},
    engine::{FontEngine, FontFace},
    error::{Result, SurfaceError},
    event::{Command, Direction, Event, Transition},
    instances::NamedInstances,
    layout::{Content, Layout, Viewport},
    status::{HELP_LINES, axes_title, axis_line, engine_line, font_title, load_failure_line},
    surface::{RenderOptions, RenderSurface},
    visibility::VisibleAxes,
};

/// Row height of the help screen.
const HELP_LINE_HEIGHT: i32 = 10;

/// What the frame area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    AllGlyphs,
    SampleText,
}

/// Coarse state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    NoFontLoaded,
    FontLoaded,
    HelpOverlay,
}

/// Which face of the current file to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaceIndex {
    Index(u32),
    /// The last face; resolved once the file's face count is known.
    Last,
}

struct LoadedFont<F> {
    face: F,
    face_index: u32,
    face_count: u32,
    glyph_count: u32,
    space: VariationSpace,
    visible: VisibleAxes,
    instances: NamedInstances,
}

/// Interactive viewer state for a list of font files.
pub struct ViewerSession<E: FontEngine> {
    engine: E,
    config: ViewerConfig,
    file: usize,
    face_index: FaceIndex,
    font: Option<LoadedFont<E::Face>>,
    point_size: u32,
    hinting: bool,
    grouping: bool,
    mode: RenderMode,
    options: RenderOptions,
    increment: Increment,
    glyph_index: u32,
    failures: u64,
    message: Option<String>,
    help: bool,
}

impl<E: FontEngine> ViewerSession<E> {
    /// Create a session; nothing is opened until [`load_current`](Self::load_current)
    /// or [`run`](Self::run).
    pub fn new(engine: E, config: ViewerConfig) -> Self {
        Self {
            engine,
            point_size: config.point_size,
            config,
            file: 0,
            face_index: FaceIndex::Index(0),
            font: None,
            hinting: true,
            grouping: true,
            mode: RenderMode::default(),
            options: RenderOptions::default(),
            increment: Increment::default(),
            glyph_index: 0,
            failures: 0,
            message: None,
            help: false,
        }
    }

    pub fn state(&self) -> ViewState {
        if self.help {
            ViewState::HelpOverlay
        } else if self.font.is_some() {
            ViewState::FontLoaded
        } else {
            ViewState::NoFontLoaded
        }
    }

    pub fn variation_space(&self) -> Option<&VariationSpace> {
        self.font.as_ref().map(|font| &font.space)
    }

    pub fn visible_axes(&self) -> Option<&VisibleAxes> {
        self.font.as_ref().map(|font| &font.visible)
    }

    pub fn named_instances(&self) -> Option<NamedInstances> {
        self.font.as_ref().map(|font| font.instances)
    }

    pub fn face(&self) -> Option<&E::Face> {
        self.font.as_ref().map(|font| &font.face)
    }

    /// Index of the current file in the font list.
    pub fn file_index(&self) -> usize {
        self.file
    }

    /// Face index within the current file, once opened.
    pub fn face_index(&self) -> Option<u32> {
        self.font.as_ref().map(|font| font.face_index)
    }

    pub fn glyph_index(&self) -> u32 {
        self.glyph_index
    }

    pub fn point_size(&self) -> u32 {
        self.point_size
    }

    pub fn increment(&self) -> Increment {
        self.increment
    }

    pub fn grouping(&self) -> bool {
        self.grouping
    }

    pub fn hinting(&self) -> bool {
        self.hinting
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Glyphs that failed to load since the current font was opened.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    fn file_label(&self) -> String {
        self.config
            .fonts
            .get(self.file)
            .map(|path| match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => path.display().to_string(),
            })
            .unwrap_or_default()
    }

    /// (Re)open the current face, resetting the point size and hinting.
    ///
    /// Failures leave the session in [`ViewState::NoFontLoaded`].
    pub fn load_current(&mut self) {
        // release the old face before opening the next one
        self.font = None;
        self.point_size = self.config.point_size;
        self.hinting = true;

        let Some(path) = self.config.fonts.get(self.file).cloned() else {
            return;
        };
        match self.open_face(&path) {
            Ok(font) => {
                info!(
                    "opened {} face {} ({} glyphs, {} axes)",
                    path.display(),
                    font.face_index,
                    font.glyph_count,
                    font.space.len()
                );
                self.glyph_index = match font.glyph_count {
                    0 => 0,
                    count => self.config.first_glyph.rem_euclid(i64::from(count)) as u32,
                };
                self.failures = 0;
                self.font = Some(font);
            }
            Err(e) => warn!("{}: {e}", path.display()),
        }
    }

    fn open_face(&mut self, path: &Path) -> Result<LoadedFont<E::Face>> {
        let encoding = self.config.encoding;
        let (mut face, face_index) = match self.face_index {
            FaceIndex::Index(index) => (self.engine.load_face(path, index, encoding)?, index),
            FaceIndex::Last => {
                let first = self.engine.load_face(path, 0, encoding)?;
                match first.face_count().saturating_sub(1) {
                    0 => (first, 0),
                    last => {
                        drop(first);
                        (self.engine.load_face(path, last, encoding)?, last)
                    }
                }
            }
        };
        self.face_index = FaceIndex::Index(face_index);

        face.set_char_size(self.point_size, self.config.dpi)?;
        face.set_hinting(self.hinting);

        let (space, instances) = match face.axes() {
            Some(axes) => {
                let mut space = VariationSpace::new(axes);
                let instances = if face.is_sfnt() {
                    NamedInstances::new(face.named_instance_count(), face.default_named_instance())
                } else {
                    NamedInstances::new(1, 1)
                };
                space.initialize(&self.config.requested_coords, !face.is_sfnt());
                face.set_variation_coordinates(space.coords())?;
                (space, instances)
            }
            None => {
                self.message = Some("no variation axes".to_string());
                (VariationSpace::default(), NamedInstances::default())
            }
        };
        let visible = VisibleAxes::resolve(space.axes(), self.grouping);

        Ok(LoadedFont {
            face_count: face.face_count(),
            glyph_count: face.glyph_count(),
            face,
            face_index,
            space,
            visible,
            instances,
        })
    }

    /// Move to the previous or next face, crossing file boundaries.
    ///
    /// Stays put at either end of the list. Call
    /// [`load_current`](Self::load_current) afterwards.
    pub fn step_font(&mut self, direction: Direction) {
        let current = match self.face_index {
            FaceIndex::Index(index) => index,
            FaceIndex::Last => 0,
        };
        match direction {
            Direction::Next => {
                let has_next_face =
                    self.font.as_ref().is_some_and(|font| current + 1 < font.face_count);
                if has_next_face {
                    self.face_index = FaceIndex::Index(current + 1);
                } else if self.file + 1 < self.config.fonts.len() {
                    self.file += 1;
                    self.face_index = FaceIndex::Index(0);
                }
            }
            Direction::Previous => {
                if current > 0 {
                    self.face_index = FaceIndex::Index(current - 1);
                } else if self.file > 0 {
                    self.file -= 1;
                    self.face_index = FaceIndex::Last;
                }
            }
        }
    }

    /// Update the state for one input event.
    pub fn handle_event(&mut self, event: Event) -> Transition {
        if self.help {
            return match event {
                Event::Key(_) => {
                    self.help = false;
                    Transition::Continue
                }
                Event::Resize { .. } => Transition::Continue,
                Event::Closed => Transition::Quit,
            };
        }
        match event {
            Event::Key(key) => {
                Command::from_key(key).map_or(Transition::Continue, |c| self.apply(c))
            }
            Event::Resize { .. } => Transition::Continue,
            Event::Closed => Transition::Quit,
        }
    }

    /// Execute one command.
    pub fn apply(&mut self, command: Command) -> Transition {
        match command {
            Command::Quit => return Transition::Quit,
            Command::Help => self.help = true,
            Command::Font(direction) => return Transition::LoadAdjacent(direction),
            Command::ToggleGrouping => {
                self.grouping = !self.grouping;
                let state = if self.grouping { "on" } else { "off" };
                self.message = Some(format!("axis grouping is now {state}"));
                if let Some(font) = self.font.as_mut() {
                    font.visible = VisibleAxes::resolve(font.space.axes(), self.grouping);
                }
            }
            Command::ToggleFillRule => {
                self.options.flip_fill_rule = !self.options.flip_fill_rule;
                self.message = Some(
                    if self.options.flip_fill_rule {
                        "fill rule flags are flipped"
                    } else {
                        "fill rule flags are unchanged"
                    }
                    .to_string(),
                );
            }
            Command::ToggleOverlap => {
                self.options.flip_overlap = !self.options.flip_overlap;
                self.message = Some(
                    if self.options.flip_overlap {
                        "overlap flags are flipped"
                    } else {
                        "overlap flags are unchanged"
                    }
                    .to_string(),
                );
            }
            Command::ToggleHinting => {
                self.hinting = !self.hinting;
                if let Some(font) = self.font.as_mut() {
                    font.face.set_hinting(self.hinting);
                }
            }
            Command::CycleHintingEngine => {
                self.engine.cycle_hinting_engine();
                info!("hinting engine is now {}", self.engine.hinting_engine());
                return Transition::Reload;
            }
            Command::ToggleAntialias => {
                self.options.antialias = !self.options.antialias;
                self.message = Some(
                    if self.options.antialias {
                        "anti-aliasing is now on"
                    } else {
                        "anti-aliasing is now off"
                    }
                    .to_string(),
                );
            }
            Command::ToggleRenderMode => {
                self.mode = match self.mode {
                    RenderMode::AllGlyphs => RenderMode::SampleText,
                    RenderMode::SampleText => RenderMode::AllGlyphs,
                };
                self.message = Some(
                    match self.mode {
                        RenderMode::AllGlyphs => "rendering all glyphs in font",
                        RenderMode::SampleText => "rendering test text string",
                    }
                    .to_string(),
                );
            }
            Command::IncreaseStep => self.increment.double(),
            Command::DecreaseStep => self.increment.halve(),
            Command::NamedInstance(direction) => self.select_named_instance(direction),
            Command::Axis { slot, up } => self.adjust_axis(slot, up),
            Command::PointSize(delta) => self.change_point_size(delta),
            Command::GlyphIndex(delta) => {
                if let Some(font) = self.font.as_ref() {
                    let last = i64::from(font.glyph_count.saturating_sub(1));
                    self.glyph_index = (i64::from(self.glyph_index) + delta).clamp(0, last) as u32;
                }
            }
        }
        Transition::Continue
    }

    fn select_named_instance(&mut self, direction: Direction) {
        let Some(font) = self.font.as_mut() else {
            return;
        };
        let next = match direction {
            Direction::Next => font.instances.next(),
            Direction::Previous => font.instances.previous(),
        };
        let Some(index) = next.current() else {
            return;
        };
        match font.face.select_named_instance(index) {
            Ok(coords) => {
                info!("named instance {index} of {}", next.count());
                font.instances = next;
                font.space.set_coords(&coords);
            }
            Err(e) => warn!("cannot select named instance {index}: {e}"),
        }
    }

    fn adjust_axis(&mut self, slot: usize, up: bool) {
        let step = self.increment.get();
        let delta = if up { step } else { -step };
        let Some(font) = self.font.as_mut() else {
            return;
        };
        let Some(coords) =
            adjust(&font.space, &font.visible, slot, delta, font.face.is_sfnt(), self.grouping)
        else {
            return;
        };
        // the engine gets its own copy; the space keeps the controller's result
        match font.face.set_variation_coordinates(&coords) {
            Ok(()) => font.space.set_coords(&coords),
            Err(e) => warn!("coordinates rejected: {e}"),
        }
    }

    fn change_point_size(&mut self, delta: i32) {
        let size = (i64::from(self.point_size) + i64::from(delta))
            .clamp(1, i64::from(MAX_POINT_SIZE));
        self.point_size = size as u32;
        if let Some(font) = self.font.as_mut()
            && let Err(e) = font.face.set_char_size(self.point_size, self.config.dpi)
        {
            warn!("cannot scale to {}: {e}", self.point_size);
        }
    }

    /// Draw the current frame.
    pub fn render(&mut self, surface: &mut impl RenderSurface) {
        surface.clear();
        if self.help {
            self.render_help(surface);
            return;
        }

        let file = self.file_label();
        let unit = self.config.size_unit();
        let Some(font) = self.font.as_ref() else {
            surface.write_line(0, HEADER_HEIGHT, &load_failure_line(&file, self.point_size, unit));
            return;
        };

        let viewport = Viewport::new(
            surface.width(),
            surface.height(),
            font.face.size_metrics(),
            !font.visible.is_empty(),
        );
        let content = match self.mode {
            RenderMode::AllGlyphs => Content::AllGlyphs { glyph_count: font.glyph_count },
            RenderMode::SampleText => Content::SampleText(SAMPLE_TEXT),
        };
        let advances = font.face.advances();
        let mut layout = Layout::new(content, self.glyph_index, &advances, viewport);
        for item in layout.by_ref() {
            if let Some(marker) = item.marker {
                surface.fill_marker(marker);
            }
            surface.draw_glyph(&item, self.options);
        }
        let count = layout.advanced();
        debug!("placed {} glyphs, {} failures", layout.placed(), layout.failures());
        self.failures += u64::from(layout.failures());

        surface.write_line(
            0,
            0,
            &font_title(
                &font.face.family_name(),
                &font.face.style_name(),
                &file,
                font.face_index,
                font.face_count,
            ),
        );

        let status = self
            .message
            .take()
            .unwrap_or_else(|| format!("PS name: {}", font.face.postscript_name()));
        surface.write_line(0, 2 * HEADER_HEIGHT, &status);

        if !font.visible.is_empty() {
            surface.write_line(0, 4 * HEADER_HEIGHT, &axes_title(self.increment.percent()));
        }
        for (slot, index) in font.visible.iter().enumerate() {
            if let (Some(axis), Some(value)) = (font.space.axis(index), font.space.coord(index)) {
                let y = (slot as i32 + 5) * HEADER_HEIGHT;
                surface.write_line(0, y, &axis_line(slot, axis, value));
            }
        }

        let hinting = if self.hinting {
            format!(" {}", self.engine.hinting_engine())
        } else {
            " unhinted".to_string()
        };
        let range = (count > 0).then(|| (self.glyph_index, self.glyph_index + count - 1));
        surface.write_line(
            0,
            HEADER_HEIGHT,
            &engine_line(font.face.driver_name(), &hinting, self.point_size, unit, range),
        );
    }

    fn render_help(&self, surface: &mut impl RenderSurface) {
        let title = format!(
            "Variable Font Viewer {} - hinting engine: {}",
            env!("CARGO_PKG_VERSION"),
            self.engine.hinting_engine()
        );
        surface.write_line(2, 1, &title);
        for (row, line) in HELP_LINES.iter().enumerate() {
            surface.write_line(2, 1 + (row as i32 + 2) * HELP_LINE_HEIGHT, line);
        }
    }

    /// Open the first face and process events until the operator quits.
    ///
    /// Returns the number of glyphs that failed to load. Only surface
    /// errors abort the loop; font errors are shown and navigated past.
    pub fn run(
        &mut self,
        surface: &mut impl RenderSurface,
    ) -> std::result::Result<u64, SurfaceError> {
        self.load_current();
        loop {
            self.render(surface);
            surface.present()?;
            match self.handle_event(surface.wait_event()?) {
                Transition::Continue => {}
                Transition::Quit => break,
                Transition::LoadAdjacent(direction) => {
                    self.step_font(direction);
                    self.load_current();
                }
                Transition::Reload => self.load_current(),
            }
        }
        Ok(self.failures)
    }
}
