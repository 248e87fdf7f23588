//! Boundary sentinels.
//!
//! A sentinel is a zero-content marker mounted at the current start or end
//! edge of the resident page set. While mounted it occupies a fixed block of
//! skeleton placeholder rows; when the viewport comes near it the pager
//! fires the matching load handler. It unmounts when the resident edge is
//! the true document boundary and mounts again, with a fresh skeleton, once
//! pages have been evicted and the edge moves inward.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::models::JsonLine;

/// Skeleton rows shown by the start-edge sentinel.
pub const START_SKELETON_LINES: usize = 20;

/// Skeleton rows shown by the end-edge sentinel.
pub const END_SKELETON_LINES: usize = 10;

/// Deepest indent a skeleton line may fake.
const MAX_SKELETON_LEVEL: u16 = 4;

pub struct Sentinel {
    skeleton: Vec<JsonLine>,
    num_lines: usize,
    mounted: bool,
    rng: SmallRng,
}

impl Sentinel {
    pub fn new(num_lines: usize) -> Self {
        Self::with_rng(num_lines, SmallRng::from_os_rng())
    }

    /// Seeded constructor so tests get deterministic skeletons.
    pub fn with_seed(num_lines: usize, seed: u64) -> Self {
        Self::with_rng(num_lines, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(num_lines: usize, rng: SmallRng) -> Self {
        Self {
            skeleton: Vec::new(),
            num_lines,
            mounted: false,
            rng,
        }
    }

    /// Mount the sentinel, generating a fresh skeleton block. No-op while
    /// already mounted.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.generate_skeleton();
        self.mounted = true;
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.skeleton.clear();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Extent in rows: one per skeleton line while mounted.
    pub fn height(&self) -> usize {
        if self.mounted {
            self.num_lines
        } else {
            0
        }
    }

    pub fn skeleton(&self) -> &[JsonLine] {
        &self.skeleton
    }

    /// Random skeleton block: the level performs a smooth walk so the fake
    /// tree does not jump around, and widths vary between 20% and 80%.
    fn generate_skeleton(&mut self) {
        self.skeleton.clear();
        let mut level = self.rng.random_range(0..=MAX_SKELETON_LEVEL as i32);
        for _ in 0..self.num_lines {
            self.skeleton.push(JsonLine::Placeholder {
                level: level as u16,
                width_pct: self.rng.random_range(20..=80),
            });
            let roll: f32 = self.rng.random();
            if roll < 0.25 {
                level -= 1;
            } else if roll > 0.75 {
                level += 1;
            }
            level = level.clamp(0, MAX_SKELETON_LEVEL as i32);
        }
    }
}
