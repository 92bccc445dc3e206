use super::{Shape, ShapeId};

/// Source of fresh ids for shapes the engine creates.
///
/// The engine keeps no state between calls, so the caller owns the
/// allocator and passes it to every `execute`.
pub trait IdAllocator {
    /// Returns an id not handed out before by this allocator.
    fn allocate(&mut self) -> ShapeId;
}

/// Counter-based allocator producing `prefix-0`, `prefix-1`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Creates an allocator starting at `prefix-0`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 0)
    }

    /// Creates an allocator whose first id is `prefix-next`.
    #[must_use]
    pub fn starting_at(prefix: impl Into<String>, next: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("shape")
    }
}

impl IdAllocator for SequentialIds {
    fn allocate(&mut self) -> ShapeId {
        let id = ShapeId::new(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Allocates an id that no input shape of the current call carries.
///
/// A colliding id is suffixed until it is unique among the inputs.
pub(crate) fn fresh_id<A: IdAllocator + ?Sized>(ids: &mut A, inputs: &[&Shape]) -> ShapeId {
    let base = ids.allocate();
    let taken = |id: &ShapeId| inputs.iter().any(|s| &s.id == id);
    if !taken(&base) {
        return base;
    }
    let mut attempt = 1u32;
    loop {
        let candidate = ShapeId::new(format!("{base}~{attempt}"));
        if !taken(&candidate) {
            return candidate;
        }
        attempt += 1;
    }
}
