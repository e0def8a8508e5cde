//! Typed indices into the catalog.
//!
//! Every reference from a lecture to reference data is a small `Copy`
//! index resolved against the [`Catalog`](super::Catalog), never an owned
//! entity or a pointer.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Position in the owning catalog table.
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Builds an id from a table position.
            pub fn from_index(index: usize) -> Self {
                Self(u32::try_from(index).expect(concat!(stringify!($name), " overflow")))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Index of a [`Course`](super::Course).
    CourseId
);
define_id!(
    /// Index of a [`Teacher`](super::Teacher).
    TeacherId
);
define_id!(
    /// Index of a [`Room`](super::Room).
    RoomId
);
define_id!(
    /// Index of a [`Specialization`](super::Specialization).
    SpecializationId
);
define_id!(
    /// Day within the [`TimeGrid`](super::TimeGrid).
    DayId
);
define_id!(
    /// Period within a day of the [`TimeGrid`](super::TimeGrid).
    PeriodId
);
