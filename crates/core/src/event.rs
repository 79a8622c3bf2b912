//! Input events and the commands they map to.

/// A key as delivered by the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Tab,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    /// Function key `F1`..=`F12`.
    F(u8),
}

/// What [`RenderSurface::wait_event`](crate::surface::RenderSurface::wait_event)
/// returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Resize { width: u32, height: u32 },
    /// The input side went away; treated like quitting.
    Closed,
}

/// Direction for font and named-instance navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Operator commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Quit,
    Help,
    Font(Direction),
    ToggleGrouping,
    ToggleFillRule,
    ToggleOverlap,
    ToggleHinting,
    CycleHintingEngine,
    ToggleAntialias,
    ToggleRenderMode,
    IncreaseStep,
    DecreaseStep,
    NamedInstance(Direction),
    /// Step visible axis `slot` up (`true`) or down.
    Axis { slot: usize, up: bool },
    PointSize(i32),
    GlyphIndex(i64),
}

impl Command {
    /// The command bound to `key`, if any.
    pub fn from_key(key: Key) -> Option<Self> {
        let command = match key {
            Key::Escape | Key::Char('q') => Command::Quit,
            Key::F(1) | Key::Char('?') => Command::Help,
            Key::Char(',') => Command::Font(Direction::Previous),
            Key::Char('.') => Command::Font(Direction::Next),
            Key::F(2) => Command::ToggleGrouping,
            Key::F(3) => Command::ToggleFillRule,
            Key::F(4) => Command::ToggleOverlap,
            Key::F(5) => Command::ToggleHinting,
            Key::F(6) => Command::CycleHintingEngine,
            Key::Tab => Command::ToggleAntialias,
            Key::Char(' ') => Command::ToggleRenderMode,
            Key::Char('+') => Command::IncreaseStep,
            Key::Char('-') => Command::DecreaseStep,
            Key::Char('[') => Command::NamedInstance(Direction::Previous),
            Key::Char(']') => Command::NamedInstance(Direction::Next),
            Key::Char(c @ 'a'..='p') => {
                Command::Axis { slot: (c as u8 - b'a') as usize, up: false }
            }
            Key::Char(c @ 'A'..='P') => Command::Axis { slot: (c as u8 - b'A') as usize, up: true },
            Key::PageUp => Command::PointSize(10),
            Key::PageDown => Command::PointSize(-10),
            Key::Up => Command::PointSize(1),
            Key::Down => Command::PointSize(-1),
            Key::Left => Command::GlyphIndex(-1),
            Key::Right => Command::GlyphIndex(1),
            Key::F(7) => Command::GlyphIndex(-16),
            Key::F(8) => Command::GlyphIndex(16),
            Key::F(9) => Command::GlyphIndex(-256),
            Key::F(10) => Command::GlyphIndex(256),
            Key::F(11) => Command::GlyphIndex(-4096),
            Key::F(12) => Command::GlyphIndex(4096),
            _ => return None,
        };
        Some(command)
    }
}

/// Outcome of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Quit,
    /// Open the previous or next face.
    LoadAdjacent(Direction),
    /// Reopen the current face.
    Reload,
}
