//! Stepping through a font's named instances.

/// Position within the named instances of a face.
///
/// `current` is 1-based. Zero means either that the face has no named
/// instances or that the coordinates are not at one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamedInstances {
    count: u32,
    current: u32,
}

impl NamedInstances {
    pub fn new(count: u32, current: u32) -> Self {
        Self { count, current: if current > count { 0 } else { current } }
    }

    pub fn count(self) -> u32 {
        self.count
    }

    /// The selected instance, if any.
    pub fn current(self) -> Option<u32> {
        (self.current != 0).then_some(self.current)
    }

    /// The following instance, wrapping from the last to the first.
    #[must_use]
    pub fn next(self) -> Self {
        if self.count == 0 {
            return self;
        }
        let current = if self.current >= self.count { 1 } else { self.current + 1 };
        Self { current, ..self }
    }

    /// The preceding instance, wrapping from the first to the last.
    #[must_use]
    pub fn previous(self) -> Self {
        if self.count == 0 {
            return self;
        }
        let current = if self.current <= 1 { self.count } else { self.current - 1 };
        Self { current, ..self }
    }
}
