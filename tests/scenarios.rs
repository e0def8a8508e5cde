//! End-to-end timetabling scenarios.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use u_timetable::catalog::{
    Catalog, CatalogBuilder, CatalogError, Course, Room, Specialization, Teacher, TimeGrid,
};
use u_timetable::ga::{ConfigError, ExhaustReason, GaConfig, GaProblem, Population, RunStatus};
use u_timetable::random::create_rng;
use u_timetable::timetable::{
    double_booked_rooms, specialization_timetable, ConflictKind, PenaltyWeights, Placement,
    SolverConfig, TimetableError, TimetableProblem, TimetableSolver,
};

fn ga(population: usize, generations: usize, seed: u64) -> GaConfig {
    GaConfig::default()
        .with_population_size(population)
        .with_max_generations(generations)
        .with_seed(seed)
}

fn one_teacher_one_room() -> Catalog {
    let mut b = CatalogBuilder::new(TimeGrid::weekdays(4));
    let t = b.add_teacher(Teacher::new("Ada"));
    b.add_room(Room::new("A101", 30));
    let a = b.add_course(Course::new("Algebra", t, 2));
    let g = b.add_course(Course::new("Geometry", t, 2));
    b.add_specialization(Specialization::new("Math", 25, vec![a, g]));
    b.build().unwrap()
}

/// One slot, two rooms, two courses by the same teacher: the teacher
/// clash can never be resolved.
fn forced_single_slot() -> Catalog {
    let mut b = CatalogBuilder::new(TimeGrid::new(1, 1));
    let t = b.add_teacher(Teacher::new("Ada"));
    b.add_room(Room::new("A101", 10));
    b.add_room(Room::new("B204", 10));
    b.add_course(Course::new("Algebra", t, 1));
    b.add_course(Course::new("Logic", t, 1));
    b.build().unwrap()
}

#[test]
fn small_catalog_converges_to_zero() {
    let catalog = one_teacher_one_room();
    let config = SolverConfig::default().with_ga(ga(20, 500, 1));
    let solution = TimetableSolver::solve(&catalog, &config).unwrap();

    assert_eq!(solution.status, RunStatus::Converged);
    assert_eq!(solution.fitness, 0);
    assert!(solution.evaluation().conflicts.is_empty());
    assert!(double_booked_rooms(&solution.schedule).is_empty());

    let mut slots: Vec<_> = solution
        .schedule
        .lectures()
        .map(|l| (l.day, l.period))
        .collect();
    slots.sort();
    slots.dedup();
    assert_eq!(slots.len(), 4, "all four lectures in distinct slots");
}

#[test]
fn two_single_lecture_courses_converge() {
    let mut b = CatalogBuilder::new(TimeGrid::new(2, 2));
    let t = b.add_teacher(Teacher::new("Ada"));
    b.add_room(Room::new("A101", 30));
    let x = b.add_course(Course::new("Algebra", t, 1));
    let y = b.add_course(Course::new("Logic", t, 1));
    b.add_specialization(Specialization::new("Math", 20, vec![x]));
    b.add_specialization(Specialization::new("CS", 25, vec![y]));
    let catalog = b.build().unwrap();

    let config = SolverConfig::default().with_ga(ga(20, 500, 8));
    let solution = TimetableSolver::solve(&catalog, &config).unwrap();

    assert!(solution.status.is_converged());
    assert_eq!(solution.fitness, 0);
    let (a, b) = (solution.schedule.placement(0), solution.schedule.placement(1));
    assert_ne!((a.day, a.period), (b.day, b.period));
}

#[test]
fn unsatisfiable_catalog_exhausts_at_cap() {
    let catalog = forced_single_slot();
    let config = SolverConfig::default().with_ga(ga(20, 30, 5));
    let solution = TimetableSolver::solve(&catalog, &config).unwrap();

    assert_eq!(
        solution.status,
        RunStatus::Exhausted(ExhaustReason::GenerationCap)
    );
    assert_eq!(solution.generations, 30);
    assert_eq!(solution.fitness_history.len(), 31);
    assert_eq!(
        solution.fitness,
        PenaltyWeights::default().weight(ConflictKind::TeacherDoubleBooking)
    );
    let counts = solution.evaluation().counts;
    assert_eq!(counts.get(ConflictKind::TeacherDoubleBooking), 1);
    assert_eq!(counts.get(ConflictKind::RoomDoubleBooking), 0);
}

#[test]
fn specialization_overlap_flags_both_genes() {
    let mut b = CatalogBuilder::new(TimeGrid::new(2, 2));
    let t0 = b.add_teacher(Teacher::new("Ada"));
    let t1 = b.add_teacher(Teacher::new("Alan"));
    b.add_room(Room::new("A101", 50));
    b.add_room(Room::new("B204", 50));
    let x = b.add_course(Course::new("Algebra", t0, 1));
    let y = b.add_course(Course::new("Logic", t1, 1));
    b.add_specialization(Specialization::new("CS", 20, vec![x, y]));
    let catalog = b.build().unwrap();

    let problem = TimetableProblem::new(&catalog, PenaltyWeights::default());
    let mut schedule =
        problem.schedule_from(vec![Placement::new(1, 0, 0), Placement::new(1, 0, 1)]);
    let eval = schedule.evaluate(problem.evaluator()).clone();

    assert_eq!(eval.fitness, 80);
    assert_eq!(eval.counts.total(), 1);
    assert!(eval.flags[0].contains(ConflictKind::SpecializationOverlap));
    assert!(eval.flags[1].contains(ConflictKind::SpecializationOverlap));
    assert_eq!(eval.conflict_genes(), vec![0, 1]);

    let cohort = specialization_timetable(&catalog, &schedule, catalog.specializations_of(x)[0]);
    assert_eq!(cohort.len(), 2);
}

#[test]
fn evaluation_is_idempotent() {
    let catalog = one_teacher_one_room();
    let problem = TimetableProblem::new(&catalog, PenaltyWeights::default());
    let mut rng = create_rng(21);
    for _ in 0..20 {
        let mut schedule = problem.create_individual(&mut rng);
        let first = schedule.evaluate(problem.evaluator()).clone();
        let second = schedule.evaluate(problem.evaluator()).clone();
        assert_eq!(first, second);
    }
}

#[test]
fn elitism_keeps_best_fitness_monotone() {
    let catalog = forced_single_slot();
    for seed in 0..5 {
        let config = SolverConfig::default().with_ga(
            ga(10, 40, seed)
                .with_mutation_rate(0.5)
                .with_parallel(false),
        );
        let solution = TimetableSolver::solve(&catalog, &config).unwrap();
        for pair in solution.fitness_history.windows(2) {
            assert!(pair[1] <= pair[0], "history regressed: {pair:?}");
        }
    }
}

#[test]
fn initial_population_is_sorted_and_evaluated() {
    let catalog = one_teacher_one_room();
    let problem = TimetableProblem::new(&catalog, PenaltyWeights::default());
    let mut rng = create_rng(3);
    let population = Population::initialize(&problem, 30, &mut rng, false);

    assert_eq!(population.len(), 30);
    assert!(population.is_sorted());
    assert!(population.fitnesses().iter().all(Option::is_some));
}

#[test]
fn same_seed_same_schedule() {
    let catalog = one_teacher_one_room();
    let config = SolverConfig::default().with_ga(ga(16, 50, 99).with_target_fitness(None));
    let a = TimetableSolver::solve(&catalog, &config).unwrap();
    let b = TimetableSolver::solve(&catalog, &config).unwrap();

    assert_eq!(a.schedule.placements(), b.schedule.placements());
    assert_eq!(a.fitness_history, b.fitness_history);
    assert_eq!(a.seed, 99);
}

#[test]
fn offtime_is_avoided() {
    let mut b = CatalogBuilder::new(TimeGrid::new(2, 2));
    let t = b.add_teacher(
        Teacher::new("Ada")
            .with_offtime(0, 0)
            .with_offtime(0, 1)
            .with_offtime(1, 0),
    );
    b.add_room(Room::new("A101", 10));
    b.add_course(Course::new("Algebra", t, 1));
    let catalog = b.build().unwrap();

    let config = SolverConfig::default().with_ga(ga(10, 200, 4));
    let solution = TimetableSolver::solve(&catalog, &config).unwrap();
    assert!(solution.status.is_converged());
    assert_eq!(solution.schedule.placement(0), Placement::new(1, 1, 0));
}

#[test]
fn raised_cancel_flag_stops_after_first_generation() {
    let catalog = forced_single_slot();
    let config = SolverConfig::default().with_ga(ga(10, 1000, 2));
    let cancel = Arc::new(AtomicBool::new(true));
    let solution = TimetableSolver::solve_with_cancel(&catalog, &config, Some(cancel)).unwrap();

    assert_eq!(solution.status, RunStatus::Exhausted(ExhaustReason::Cancelled));
    assert_eq!(solution.generations, 0);
    assert_eq!(solution.fitness, solution.evaluation().fitness);
}

#[test]
fn invalid_configuration_is_rejected() {
    let catalog = one_teacher_one_room();

    let config = SolverConfig::default().with_ga(ga(1, 10, 0));
    assert_eq!(
        TimetableSolver::solve(&catalog, &config).unwrap_err(),
        TimetableError::Config(ConfigError::PopulationTooSmall(1))
    );

    let config = SolverConfig::default().with_ga(ga(10, 0, 0));
    assert_eq!(
        TimetableSolver::solve(&catalog, &config).unwrap_err(),
        TimetableError::Config(ConfigError::ZeroGenerations)
    );

    let config = SolverConfig::default().with_ga(ga(10, 10, 0).with_mutation_rate(1.5));
    assert!(matches!(
        TimetableSolver::solve(&catalog, &config),
        Err(TimetableError::Config(ConfigError::RateOutOfRange { .. }))
    ));
}

#[test]
fn empty_catalog_is_rejected() {
    let mut b = CatalogBuilder::new(TimeGrid::new(2, 2));
    let t = b.add_teacher(Teacher::new("Ada"));
    b.add_room(Room::new("A101", 10));
    b.add_course(Course::new("Seminar", t, 0));
    assert_eq!(b.build().unwrap_err(), CatalogError::NoLectures);
}
