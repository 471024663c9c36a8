//! Frame buffer pool: ping-pong routing between the offscreen targets.
//!
//! Pass `i` reads the buffer pass `i - 1` wrote. Even passes read Primary and
//! write Secondary, odd passes the reverse, and the last pass of the chain
//! writes the display instead. The scene is rendered into Primary so that
//! pass 0 reads it.

use pfx_core::{BufferSlot, PassRouting, RenderTarget};

/// Tracks which offscreen buffer currently holds the latest composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBufferPool {
    front: BufferSlot,
    scratch_valid: bool,
}

impl FrameBufferPool {
    /// Buffer the scene is rendered into when at least one pass follows.
    pub const ENTRY: BufferSlot = BufferSlot::Primary;

    pub fn new() -> Self {
        Self {
            front: Self::ENTRY,
            scratch_valid: false,
        }
    }

    /// Resets routing for a new frame.
    pub fn begin_frame(&mut self) {
        self.front = Self::ENTRY;
        self.scratch_valid = false;
    }

    /// Where the scene goes: the display when there are no passes.
    pub fn scene_target(pass_count: usize) -> RenderTarget {
        if pass_count == 0 {
            RenderTarget::Display
        } else {
            RenderTarget::Offscreen(Self::ENTRY)
        }
    }

    /// (read, write) buffers selected by pass parity alone.
    pub fn parity(pass_index: usize) -> (BufferSlot, BufferSlot) {
        if pass_index % 2 == 0 {
            (BufferSlot::Primary, BufferSlot::Secondary)
        } else {
            (BufferSlot::Secondary, BufferSlot::Primary)
        }
    }

    /// Routing for pass `pass_index` of a `pass_count`-long chain.
    ///
    /// # Panics
    ///
    /// Panics if `pass_index` is outside the chain.
    pub fn acquire_routing(&self, pass_index: usize, pass_count: usize) -> PassRouting {
        assert!(
            pass_index < pass_count,
            "pass {} is outside a chain of {} passes",
            pass_index,
            pass_count
        );

        let (read, write) = Self::parity(pass_index);
        debug_assert_eq!(read, self.front, "pass {} out of sequence", pass_index);

        let write = if pass_index + 1 == pass_count {
            RenderTarget::Display
        } else {
            RenderTarget::Offscreen(write)
        };
        assert_ne!(RenderTarget::Offscreen(read), write, "pass reads its own target");

        PassRouting { read, write }
    }

    /// Records that a pass finished; its target becomes the front buffer.
    pub fn complete_pass(&mut self, routing: PassRouting) {
        if let Some(slot) = routing.write.offscreen() {
            self.front = slot;
        }
    }

    /// Copy source and destination for preserving the current front buffer.
    pub fn snapshot_front(&mut self) -> (BufferSlot, BufferSlot) {
        self.scratch_valid = true;
        (self.front, BufferSlot::Scratch)
    }

    /// Buffer holding the latest composite.
    pub fn front(&self) -> BufferSlot {
        self.front
    }

    /// Returns true if the scratch buffer was written this frame.
    pub fn scratch_valid(&self) -> bool {
        self.scratch_valid
    }
}

impl Default for FrameBufferPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_chain(pass_count: usize) -> Vec<PassRouting> {
        let mut pool = FrameBufferPool::new();
        pool.begin_frame();
        (0..pass_count)
            .map(|i| {
                let routing = pool.acquire_routing(i, pass_count);
                pool.complete_pass(routing);
                routing
            })
            .collect()
    }

    #[test]
    fn test_read_never_equals_write() {
        for pass_count in 1..12 {
            for routing in run_chain(pass_count) {
                assert_ne!(RenderTarget::Offscreen(routing.read), routing.write);
            }
        }
    }

    #[test]
    fn test_parity() {
        assert_eq!(
            FrameBufferPool::parity(0),
            (BufferSlot::Primary, BufferSlot::Secondary)
        );
        assert_eq!(
            FrameBufferPool::parity(7),
            (BufferSlot::Secondary, BufferSlot::Primary)
        );
    }

    #[test]
    fn test_each_pass_reads_previous_write() {
        let routings = run_chain(6);
        assert_eq!(routings[0].read, FrameBufferPool::ENTRY);
        for pair in routings.windows(2) {
            assert_eq!(pair[0].write, RenderTarget::Offscreen(pair[1].read));
        }
        assert_eq!(routings[5].write, RenderTarget::Display);
    }

    #[test]
    fn test_single_pass_writes_display() {
        let routings = run_chain(1);
        assert_eq!(routings[0].read, BufferSlot::Primary);
        assert_eq!(routings[0].write, RenderTarget::Display);
    }

    #[test]
    fn test_scene_target() {
        assert_eq!(FrameBufferPool::scene_target(0), RenderTarget::Display);
        assert_eq!(
            FrameBufferPool::scene_target(3),
            RenderTarget::Offscreen(BufferSlot::Primary)
        );
    }

    #[test]
    fn test_snapshot_tracks_front() {
        let mut pool = FrameBufferPool::new();
        let routing = pool.acquire_routing(0, 3);
        pool.complete_pass(routing);
        assert!(!pool.scratch_valid());
        assert_eq!(
            pool.snapshot_front(),
            (BufferSlot::Secondary, BufferSlot::Scratch)
        );
        assert!(pool.scratch_valid());

        pool.begin_frame();
        assert_eq!(pool.front(), BufferSlot::Primary);
        assert!(!pool.scratch_valid());
    }

    #[test]
    #[should_panic(expected = "outside a chain")]
    fn test_out_of_range_pass_panics() {
        FrameBufferPool::new().acquire_routing(2, 2);
    }
}
