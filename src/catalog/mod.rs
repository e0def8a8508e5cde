//! Read-only reference data for one semester.
//!
//! A [`Catalog`] is built once through [`CatalogBuilder`], validated, and
//! then only read: the optimizer resolves typed ids against it and never
//! mutates it, which is what makes parallel evaluation safe.
//!
//! # Example
//!
//! ```
//! use u_timetable::catalog::{CatalogBuilder, Course, Room, Specialization, Teacher, TimeGrid};
//!
//! let mut builder = CatalogBuilder::new(TimeGrid::weekdays(4));
//! let ada = builder.add_teacher(Teacher::new("Ada").with_offtime(0, 0));
//! builder.add_room(Room::new("A101", 40));
//! let algebra = builder.add_course(Course::new("Algebra", ada, 2));
//! builder.add_specialization(Specialization::new("Math", 30, vec![algebra]));
//!
//! let catalog = builder.build().unwrap();
//! assert_eq!(catalog.lecture_count(), 2);
//! assert_eq!(catalog.students_on_course(algebra), 30);
//! ```

mod ids;
mod model;

pub use ids::{CourseId, DayId, PeriodId, RoomId, SpecializationId, TeacherId};
pub use model::{Course, Room, Specialization, Teacher, TimeGrid};

/// Catalog construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("time grid must have at least one day and one period")]
    EmptyGrid,
    #[error("catalog has no rooms")]
    NoRooms,
    #[error("catalog has no lectures to schedule")]
    NoLectures,
    #[error("course {course} references unknown teacher {teacher}")]
    UnknownTeacher { course: CourseId, teacher: TeacherId },
    #[error("specialization {specialization} references unknown course {course}")]
    UnknownCourse {
        specialization: SpecializationId,
        course: CourseId,
    },
    #[error("teacher {teacher} has off-time ({day}, {period}) outside the grid")]
    OfftimeOutsideGrid {
        teacher: TeacherId,
        day: DayId,
        period: PeriodId,
    },
}

/// Collects catalog entities and hands out their ids.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    grid: TimeGrid,
    teachers: Vec<Teacher>,
    rooms: Vec<Room>,
    courses: Vec<Course>,
    specializations: Vec<Specialization>,
}

impl CatalogBuilder {
    pub fn new(grid: TimeGrid) -> Self {
        Self {
            grid,
            teachers: Vec::new(),
            rooms: Vec::new(),
            courses: Vec::new(),
            specializations: Vec::new(),
        }
    }

    pub fn add_teacher(&mut self, teacher: Teacher) -> TeacherId {
        self.teachers.push(teacher);
        TeacherId::from_index(self.teachers.len() - 1)
    }

    pub fn add_room(&mut self, room: Room) -> RoomId {
        self.rooms.push(room);
        RoomId::from_index(self.rooms.len() - 1)
    }

    pub fn add_course(&mut self, course: Course) -> CourseId {
        self.courses.push(course);
        CourseId::from_index(self.courses.len() - 1)
    }

    pub fn add_specialization(&mut self, specialization: Specialization) -> SpecializationId {
        self.specializations.push(specialization);
        SpecializationId::from_index(self.specializations.len() - 1)
    }

    /// Validates references and precomputes the lookup tables.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let grid = self.grid;
        if grid.slot_count() == 0 {
            return Err(CatalogError::EmptyGrid);
        }
        if self.rooms.is_empty() {
            return Err(CatalogError::NoRooms);
        }

        for (i, course) in self.courses.iter().enumerate() {
            if course.teacher.index() >= self.teachers.len() {
                return Err(CatalogError::UnknownTeacher {
                    course: CourseId::from_index(i),
                    teacher: course.teacher,
                });
            }
        }

        let mut offtime = vec![false; self.teachers.len() * grid.slot_count()];
        for (t, teacher) in self.teachers.iter().enumerate() {
            for &(day, period) in &teacher.offtimes {
                if !grid.contains(day, period) {
                    return Err(CatalogError::OfftimeOutsideGrid {
                        teacher: TeacherId::from_index(t),
                        day,
                        period,
                    });
                }
                offtime[t * grid.slot_count() + grid.slot_index(day, period)] = true;
            }
        }

        let mut students = vec![0u32; self.courses.len()];
        let mut course_specializations = vec![Vec::new(); self.courses.len()];
        for (s, spec) in self.specializations.iter().enumerate() {
            let spec_id = SpecializationId::from_index(s);
            for &course in &spec.courses {
                let Some(count) = students.get_mut(course.index()) else {
                    return Err(CatalogError::UnknownCourse {
                        specialization: spec_id,
                        course,
                    });
                };
                // A cohort listing the same course twice still counts once.
                let members: &mut Vec<SpecializationId> =
                    &mut course_specializations[course.index()];
                if !members.contains(&spec_id) {
                    members.push(spec_id);
                    *count = count.saturating_add(spec.students);
                }
            }
        }

        let lecture_count: usize = self.courses.iter().map(|c| c.lectures as usize).sum();
        if lecture_count == 0 {
            return Err(CatalogError::NoLectures);
        }

        Ok(Catalog {
            grid,
            teachers: self.teachers,
            rooms: self.rooms,
            courses: self.courses,
            specializations: self.specializations,
            offtime,
            students,
            course_specializations,
            lecture_count,
        })
    }
}

/// Validated, immutable semester reference data.
#[derive(Debug, Clone)]
pub struct Catalog {
    grid: TimeGrid,
    teachers: Vec<Teacher>,
    rooms: Vec<Room>,
    courses: Vec<Course>,
    specializations: Vec<Specialization>,
    /// teacher-major bitmap over grid slots
    offtime: Vec<bool>,
    students: Vec<u32>,
    course_specializations: Vec<Vec<SpecializationId>>,
    lecture_count: usize,
}

impl Catalog {
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn specializations(&self) -> &[Specialization] {
        &self.specializations
    }

    pub fn teacher(&self, id: TeacherId) -> &Teacher {
        &self.teachers[id.index()]
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.index()]
    }

    pub fn course(&self, id: CourseId) -> &Course {
        &self.courses[id.index()]
    }

    pub fn specialization(&self, id: SpecializationId) -> &Specialization {
        &self.specializations[id.index()]
    }

    /// Whether the teacher declared (day, period) unavailable.
    pub fn has_offtime(&self, teacher: TeacherId, day: DayId, period: PeriodId) -> bool {
        if !self.grid.contains(day, period) {
            return false;
        }
        let slot = self.grid.slot_index(day, period);
        self.offtime
            .get(teacher.index() * self.grid.slot_count() + slot)
            .copied()
            .unwrap_or(false)
    }

    /// Students attending a course, summed over the specializations that
    /// require it.
    pub fn students_on_course(&self, course: CourseId) -> u32 {
        self.students[course.index()]
    }

    /// Seats in a room.
    pub fn room_capacity(&self, room: RoomId) -> u32 {
        self.rooms[room.index()].capacity
    }

    /// Specializations requiring a course, in ascending id order.
    pub fn specializations_of(&self, course: CourseId) -> &[SpecializationId] {
        &self.course_specializations[course.index()]
    }

    /// Total weekly lectures across all courses: the gene count.
    pub fn lecture_count(&self) -> usize {
        self.lecture_count
    }
}
