//! Results sinks
//!
//! A [`ResultsSink`] stands in for the page's results container. A search
//! that succeeds replaces the sink's content wholesale; a search that fails
//! never touches it.

use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

/// Output container for rendered result blocks
pub trait ResultsSink: Send + Sync {
    /// Remove all content
    fn clear(&self);

    /// Append one rendered block after the existing content
    fn append(&self, block: String);

    /// Clear, then append `blocks` in order
    ///
    /// Implementations should make this atomic with respect to other callers
    /// so two overlapping renders never interleave.
    fn replace(&self, blocks: Vec<String>) {
        self.clear();
        for block in blocks {
            self.append(block);
        }
    }

    /// Replace the content only if `still_current` holds, returning whether it did
    ///
    /// Implementations should evaluate `still_current` under the same lock as
    /// the replace, so no other render can land between the check and the write.
    fn replace_if(&self, blocks: Vec<String>, still_current: &dyn Fn() -> bool) -> bool {
        if !still_current() {
            return false;
        }
        self.replace(blocks);
        true
    }
}

fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory container holding the current blocks
#[derive(Debug, Default)]
pub struct BufferSink {
    blocks: Mutex<Vec<String>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container that already shows `blocks`
    pub fn with_blocks(blocks: Vec<String>) -> Self {
        Self {
            blocks: Mutex::new(blocks),
        }
    }

    /// Copy of the current blocks
    pub fn snapshot(&self) -> Vec<String> {
        lock_ignoring_poison(&self.blocks).clone()
    }

    /// Current content as one string, like reading back `innerHTML`
    pub fn contents(&self) -> String {
        lock_ignoring_poison(&self.blocks).concat()
    }

    pub fn len(&self) -> usize {
        lock_ignoring_poison(&self.blocks).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultsSink for BufferSink {
    fn clear(&self) {
        lock_ignoring_poison(&self.blocks).clear();
    }

    fn append(&self, block: String) {
        lock_ignoring_poison(&self.blocks).push(block);
    }

    fn replace(&self, blocks: Vec<String>) {
        *lock_ignoring_poison(&self.blocks) = blocks;
    }

    fn replace_if(&self, blocks: Vec<String>, still_current: &dyn Fn() -> bool) -> bool {
        let mut current = lock_ignoring_poison(&self.blocks);
        if !still_current() {
            return false;
        }
        *current = blocks;
        true
    }
}

struct WriterState<W> {
    writer: W,
    has_output: bool,
}

/// Append-only sink over an [`std::io::Write`], e.g. stdout
///
/// Written output cannot be retracted, so `clear` starts a new result set by
/// emitting a blank separator line once something has been written.
pub struct WriterSink<W: Write + Send> {
    state: Mutex<WriterState<W>>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            state: Mutex::new(WriterState {
                writer,
                has_output: false,
            }),
        }
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .writer
    }
}

impl<W: Write + Send> WriterState<W> {
    fn separate(&mut self) {
        if self.has_output {
            if let Err(e) = writeln!(self.writer) {
                warn!("Failed to write results separator: {e}");
            }
        }
    }

    fn write_block(&mut self, block: &str) {
        if let Err(e) = writeln!(self.writer, "{block}") {
            warn!("Failed to write result block: {e}");
            return;
        }
        self.has_output = true;
    }

    fn write_set(&mut self, blocks: &[String]) {
        self.separate();
        for block in blocks {
            self.write_block(block);
        }
        self.flush();
    }

    fn flush(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!("Failed to flush results output: {e}");
        }
    }
}

impl<W: Write + Send> ResultsSink for WriterSink<W> {
    fn clear(&self) {
        let mut state = lock_ignoring_poison(&self.state);
        state.separate();
        state.flush();
    }

    fn append(&self, block: String) {
        let mut state = lock_ignoring_poison(&self.state);
        state.write_block(&block);
        state.flush();
    }

    fn replace(&self, blocks: Vec<String>) {
        let mut state = lock_ignoring_poison(&self.state);
        state.write_set(&blocks);
    }

    fn replace_if(&self, blocks: Vec<String>, still_current: &dyn Fn() -> bool) -> bool {
        let mut state = lock_ignoring_poison(&self.state);
        if !still_current() {
            return false;
        }
        state.write_set(&blocks);
        true
    }
}
