//! Conflict taxonomy, per-gene flags and penalty weights.

use crate::catalog::{RoomId, SpecializationId, TeacherId};

/// The five independently countable violation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConflictKind {
    /// Same teacher, two lectures in one (day, period).
    TeacherDoubleBooking,
    /// Lecture placed in one of the teacher's off-time slots.
    TeacherOfftime,
    /// Same room, two lectures in one (day, period).
    RoomDoubleBooking,
    /// Enrolled students exceed the room's seats.
    RoomCapacity,
    /// Two lectures required by one specialization in one (day, period).
    SpecializationOverlap,
}

impl ConflictKind {
    /// All kinds, in reporting order.
    pub const ALL: [ConflictKind; 5] = [
        ConflictKind::TeacherDoubleBooking,
        ConflictKind::TeacherOfftime,
        ConflictKind::RoomDoubleBooking,
        ConflictKind::RoomCapacity,
        ConflictKind::SpecializationOverlap,
    ];

    fn ordinal(self) -> usize {
        self as usize
    }

    /// Whether the kind involves a pair of genes.
    pub fn is_pairwise(self) -> bool {
        !matches!(self, ConflictKind::TeacherOfftime | ConflictKind::RoomCapacity)
    }

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ConflictKind::TeacherDoubleBooking => "teacher double-booked",
            ConflictKind::TeacherOfftime => "teacher off-time",
            ConflictKind::RoomDoubleBooking => "room double-booked",
            ConflictKind::RoomCapacity => "room over capacity",
            ConflictKind::SpecializationOverlap => "specialization overlap",
        }
    }
}

/// Set of conflict kinds a single gene takes part in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConflictFlags(u8);

impl ConflictFlags {
    pub fn insert(&mut self, kind: ConflictKind) {
        self.0 |= 1 << kind.ordinal();
    }

    pub fn contains(self, kind: ConflictKind) -> bool {
        self.0 & (1 << kind.ordinal()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Kinds present, in [`ConflictKind::ALL`] order.
    pub fn kinds(self) -> impl Iterator<Item = ConflictKind> {
        ConflictKind::ALL.into_iter().filter(move |&k| self.contains(k))
    }
}

/// One itemized violation, naming the genes involved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Conflict {
    TeacherDoubleBooking {
        teacher: TeacherId,
        genes: [usize; 2],
    },
    TeacherOfftime {
        teacher: TeacherId,
        gene: usize,
    },
    RoomDoubleBooking {
        room: RoomId,
        genes: [usize; 2],
    },
    RoomCapacity {
        room: RoomId,
        gene: usize,
        students: u32,
        capacity: u32,
    },
    SpecializationOverlap {
        specialization: SpecializationId,
        genes: [usize; 2],
    },
}

impl Conflict {
    pub fn kind(&self) -> ConflictKind {
        match self {
            Conflict::TeacherDoubleBooking { .. } => ConflictKind::TeacherDoubleBooking,
            Conflict::TeacherOfftime { .. } => ConflictKind::TeacherOfftime,
            Conflict::RoomDoubleBooking { .. } => ConflictKind::RoomDoubleBooking,
            Conflict::RoomCapacity { .. } => ConflictKind::RoomCapacity,
            Conflict::SpecializationOverlap { .. } => ConflictKind::SpecializationOverlap,
        }
    }

    /// Gene indices involved (one or two).
    pub fn genes(&self) -> &[usize] {
        match self {
            Conflict::TeacherDoubleBooking { genes, .. }
            | Conflict::RoomDoubleBooking { genes, .. }
            | Conflict::SpecializationOverlap { genes, .. } => genes,
            Conflict::TeacherOfftime { gene, .. } | Conflict::RoomCapacity { gene, .. } => {
                std::slice::from_ref(gene)
            }
        }
    }
}

/// Number of violations per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViolationCounts([u32; 5]);

impl ViolationCounts {
    pub fn get(&self, kind: ConflictKind) -> u32 {
        self.0[kind.ordinal()]
    }

    pub(crate) fn increment(&mut self, kind: ConflictKind) {
        self.0[kind.ordinal()] += 1;
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

/// Penalty added to fitness per violation, one weight per kind.
///
/// A weight of zero switches that kind off entirely: it is neither
/// penalized, counted, nor flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PenaltyWeights {
    pub teacher_double_booking: u32,
    pub teacher_offtime: u32,
    pub room_double_booking: u32,
    pub room_capacity: u32,
    pub specialization_overlap: u32,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            teacher_double_booking: 100,
            teacher_offtime: 50,
            room_double_booking: 100,
            room_capacity: 20,
            specialization_overlap: 80,
        }
    }
}

impl PenaltyWeights {
    /// Every kind weighted 1: fitness equals the number of violations.
    pub fn uniform() -> Self {
        Self::splat(1)
    }

    fn splat(weight: u32) -> Self {
        Self {
            teacher_double_booking: weight,
            teacher_offtime: weight,
            room_double_booking: weight,
            room_capacity: weight,
            specialization_overlap: weight,
        }
    }

    pub fn weight(&self, kind: ConflictKind) -> u32 {
        match kind {
            ConflictKind::TeacherDoubleBooking => self.teacher_double_booking,
            ConflictKind::TeacherOfftime => self.teacher_offtime,
            ConflictKind::RoomDoubleBooking => self.room_double_booking,
            ConflictKind::RoomCapacity => self.room_capacity,
            ConflictKind::SpecializationOverlap => self.specialization_overlap,
        }
    }

    /// Returns a copy with one kind re-weighted.
    pub fn with_weight(mut self, kind: ConflictKind, weight: u32) -> Self {
        let slot = match kind {
            ConflictKind::TeacherDoubleBooking => &mut self.teacher_double_booking,
            ConflictKind::TeacherOfftime => &mut self.teacher_offtime,
            ConflictKind::RoomDoubleBooking => &mut self.room_double_booking,
            ConflictKind::RoomCapacity => &mut self.room_capacity,
            ConflictKind::SpecializationOverlap => &mut self.specialization_overlap,
        };
        *slot = weight;
        self
    }

    /// Whether every kind is switched off.
    pub fn is_all_zero(&self) -> bool {
        *self == Self::splat(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut flags = ConflictFlags::default();
        assert!(flags.is_empty());
        flags.insert(ConflictKind::RoomCapacity);
        flags.insert(ConflictKind::TeacherDoubleBooking);
        flags.insert(ConflictKind::RoomCapacity);
        assert!(flags.contains(ConflictKind::RoomCapacity));
        assert!(!flags.contains(ConflictKind::TeacherOfftime));
        assert_eq!(
            flags.kinds().collect::<Vec<_>>(),
            vec![ConflictKind::TeacherDoubleBooking, ConflictKind::RoomCapacity]
        );
    }

    #[test]
    fn test_conflict_genes() {
        let pair = Conflict::RoomDoubleBooking {
            room: RoomId(0),
            genes: [1, 4],
        };
        assert_eq!(pair.genes(), &[1, 4]);
        assert_eq!(pair.kind(), ConflictKind::RoomDoubleBooking);

        let single = Conflict::TeacherOfftime {
            teacher: TeacherId(2),
            gene: 3,
        };
        assert_eq!(single.genes(), &[3]);
        assert!(pair.kind().is_pairwise());
        assert!(!single.kind().is_pairwise());
    }

    #[test]
    fn test_weights() {
        let w = PenaltyWeights::default().with_weight(ConflictKind::RoomCapacity, 7);
        assert_eq!(w.weight(ConflictKind::RoomCapacity), 7);
        assert_eq!(w.weight(ConflictKind::TeacherDoubleBooking), 100);
        assert!(!w.is_all_zero());
        assert!(PenaltyWeights::splat(0).is_all_zero());
        assert_eq!(PenaltyWeights::uniform().weight(ConflictKind::TeacherOfftime), 1);
    }

    #[test]
    fn test_counts() {
        let mut counts = ViolationCounts::default();
        counts.increment(ConflictKind::SpecializationOverlap);
        counts.increment(ConflictKind::SpecializationOverlap);
        counts.increment(ConflictKind::TeacherOfftime);
        assert_eq!(counts.get(ConflictKind::SpecializationOverlap), 2);
        assert_eq!(counts.total(), 3);
    }
}
