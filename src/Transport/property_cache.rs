//! Validity bookkeeping for the lazily computed quantities of the transport model.
//!
//! Every cached quantity is a [`CacheEntry`]. Entries form a small acyclic graph: an
//! entry is computed from its prerequisites, and invalidating an entry invalidates
//! everything downstream of it. Temperature changes enter the graph at
//! [`CacheEntry::TemperatureTier`], composition changes at [`CacheEntry::MoleFractions`].
//!
//! ```text
//! TemperatureTier ─┬─> SpeciesViscosity ──┬─> ViscosityWeights
//!                  │                      └─> StarFunctions ─────┐
//!                  ├─> StarFunctions                             │
//!                  ├─> BinaryDiffusion ───> TranslationalBlock   ├─> LSolution
//!                  ├─> RotationalRelaxation ─────────────────────┤
//!                  └─> InternalHeatCapacity ─────────────────────┘
//! MoleFractions ──────> TranslationalBlock, LSolution
//! ```
//! SpeciesViscosity and BinaryDiffusion also feed LSolution directly.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheEntry {
    /// ln T and its powers, √T, T^1.5
    TemperatureTier,
    SpeciesViscosity,
    /// Wilke φ(k, j)
    ViscosityWeights,
    BinaryDiffusion,
    /// Ω22, A*, B*, C* per pair and the self-diffusion coefficients
    StarFunctions,
    RotationalRelaxation,
    InternalHeatCapacity,
    MoleFractions,
    /// L00,00 block of the assembled matrix
    TranslationalBlock,
    /// solution of the L-matrix system
    LSolution,
}

impl CacheEntry {
    pub const ALL: [CacheEntry; 10] = [
        CacheEntry::TemperatureTier,
        CacheEntry::SpeciesViscosity,
        CacheEntry::ViscosityWeights,
        CacheEntry::BinaryDiffusion,
        CacheEntry::StarFunctions,
        CacheEntry::RotationalRelaxation,
        CacheEntry::InternalHeatCapacity,
        CacheEntry::MoleFractions,
        CacheEntry::TranslationalBlock,
        CacheEntry::LSolution,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn prerequisites(self) -> &'static [CacheEntry] {
        use CacheEntry::*;
        match self {
            TemperatureTier | MoleFractions => &[],
            SpeciesViscosity | BinaryDiffusion | RotationalRelaxation | InternalHeatCapacity => {
                &[TemperatureTier]
            }
            ViscosityWeights => &[SpeciesViscosity],
            StarFunctions => &[TemperatureTier, SpeciesViscosity],
            TranslationalBlock => &[BinaryDiffusion, MoleFractions],
            LSolution => &[
                SpeciesViscosity,
                BinaryDiffusion,
                StarFunctions,
                RotationalRelaxation,
                InternalHeatCapacity,
                MoleFractions,
            ],
        }
    }

    pub fn dependents(self) -> impl Iterator<Item = CacheEntry> {
        CacheEntry::ALL
            .into_iter()
            .filter(move |e| e.prerequisites().contains(&self))
    }
}

#[derive(Debug, Clone, Default)]
pub struct PropertyCache {
    valid: [bool; 10],
    recomputed: [usize; 10],
}

impl PropertyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self, entry: CacheEntry) -> bool {
        self.valid[entry.index()]
    }

    /// Clears `entry` and, transitively, everything computed from it.
    pub fn invalidate(&mut self, entry: CacheEntry) {
        self.valid[entry.index()] = false;
        for dependent in entry.dependents() {
            if self.valid[dependent.index()] {
                self.invalidate(dependent);
            }
        }
    }

    pub fn invalidate_all(&mut self) {
        self.valid = [false; 10];
    }

    /// Records that `entry` was just recomputed. Its prerequisites must be valid.
    pub fn mark_valid(&mut self, entry: CacheEntry) {
        debug_assert!(
            self.prerequisites_valid(entry),
            "{:?} marked valid before its prerequisites",
            entry
        );
        self.valid[entry.index()] = true;
        self.recomputed[entry.index()] += 1;
    }

    pub fn prerequisites_valid(&self, entry: CacheEntry) -> bool {
        entry.prerequisites().iter().all(|p| self.is_valid(*p))
    }

    /// how many times `entry` has been recomputed since construction
    pub fn recompute_count(&self, entry: CacheEntry) -> usize {
        self.recomputed[entry.index()]
    }
}
