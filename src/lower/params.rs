//! Bind index assignment for dynamic parameters.

/// Hands out bind indices to dynamic parameters in traversal order.
///
/// One indexer belongs to one compilation. The order in which indices are
/// handed out is the order the caller binds values in.
#[derive(Debug, Default, Clone)]
pub struct ParamIndexer {
    next_index: usize,
}

impl ParamIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next bind index and advance
    pub fn next_index(&mut self) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    /// Number of indices handed out so far
    pub fn assigned(&self) -> usize {
        self.next_index
    }

    pub fn reset(&mut self) {
        self.next_index = 0;
    }
}
