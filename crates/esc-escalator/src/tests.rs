//! Unit and property tests for esc-escalator.

use esc_core::{EscalatorConfig, LaneId, PersonId};

use crate::{Escalator, EscalatorHooks, NoopHooks, Occupant, Person};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(length: usize, lane_count: usize, belt_velocity: f64) -> EscalatorConfig {
    EscalatorConfig { length, lane_count, belt_velocity }
}

fn person(id: u32, speed: f64) -> Person {
    Person::new(PersonId(id), speed)
}

/// Hooks that record every enter and exit in order.
#[derive(Default)]
struct Recorder {
    entered: Vec<(LaneId, PersonId)>,
    exited:  Vec<(LaneId, PersonId)>,
}

impl EscalatorHooks<Person> for Recorder {
    fn on_enter(&mut self, lane: LaneId, p: &Person) {
        self.entered.push((lane, p.id));
    }

    fn on_exit(&mut self, lane: LaneId, p: Person) {
        self.exited.push((lane, p.id));
    }
}

fn recorded(length: usize, lanes: usize, belt: f64) -> Escalator<Person, Recorder> {
    Escalator::new(&config(length, lanes, belt), Recorder::default()).unwrap()
}

/// Flattened view of the grid as ids, for before/after comparisons.
fn snapshot<H: EscalatorHooks<Person>>(esc: &Escalator<Person, H>) -> Vec<Option<PersonId>> {
    esc.lanes()
        .flat_map(|lane| lane.iter().map(|c| c.as_ref().map(|p| p.id)))
        .collect()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction_tests {
    use super::*;
    use crate::EscalatorError;

    #[test]
    fn builds_empty_grid_of_requested_shape() {
        let esc: Escalator<Person> = Escalator::without_hooks(&config(7, 3, 1.0)).unwrap();
        assert_eq!(esc.length(), 7);
        assert_eq!(esc.lane_count(), 3);
        assert_eq!(esc.lanes().count(), 3);
        assert!(esc.lanes().all(|lane| lane.len() == 7));
        assert!(esc.is_empty());
        assert_eq!(esc.config(), config(7, 3, 1.0));
    }

    #[test]
    fn zero_length_is_invalid_configuration() {
        let result = Escalator::<Person>::without_hooks(&config(0, 2, 1.0));
        assert!(matches!(result, Err(EscalatorError::InvalidConfiguration(_))));
    }

    #[test]
    fn zero_lanes_is_invalid_configuration() {
        let result = Escalator::<Person>::without_hooks(&config(5, 0, 1.0));
        assert!(matches!(result, Err(EscalatorError::InvalidConfiguration(_))));
    }

    #[test]
    fn negative_or_nan_belt_is_invalid_configuration() {
        for belt in [-0.5, f64::NAN, f64::INFINITY] {
            let result = Escalator::<Person>::without_hooks(&config(5, 1, belt));
            assert!(matches!(result, Err(EscalatorError::InvalidConfiguration(_))), "belt {belt}");
        }
    }

    #[test]
    fn default_config_builds() {
        let esc = Escalator::<Person>::without_hooks(&EscalatorConfig::default()).unwrap();
        assert_eq!(esc.length(), 20);
        assert_eq!(esc.lane_count(), 2);
        assert_eq!(esc.belt_velocity(), 1.0);
    }
}

// ── Entry state and admission ─────────────────────────────────────────────────

#[cfg(test)]
mod admission_tests {
    use super::*;
    use crate::{Admission, EntryState, EscalatorError};

    #[test]
    fn entry_states_are_distinct() {
        assert_ne!(EntryState::Empty, EntryState::Full);
        assert_eq!(EntryState::Empty.to_string(), "EMPTY");
        assert_eq!(EntryState::Full.to_string(), "FULL");
    }

    #[test]
    fn fresh_escalator_reports_every_lane_empty() {
        let esc = recorded(4, 3, 1.0);
        let state = esc.entry_state();
        assert_eq!(state.len(), 3);
        assert!(state.values().all(|s| s.is_empty()));
        assert_eq!(state.keys().copied().collect::<Vec<_>>(), [LaneId(0), LaneId(1), LaneId(2)]);
    }

    #[test]
    fn admission_places_at_cell_zero_and_fires_on_enter() {
        let mut esc = recorded(4, 2, 1.0);
        let outcome = esc.add_person(person(1, 0.0), 1).unwrap();
        assert!(outcome.is_admitted());
        assert_eq!(esc.occupant_at(1, 0).map(|p| p.id), Some(PersonId(1)));
        assert_eq!(esc.entry_state()[&LaneId(1)], EntryState::Full);
        assert_eq!(esc.entry_state()[&LaneId(0)], EntryState::Empty);
        assert_eq!(esc.hooks().entered, [(LaneId(1), PersonId(1))]);
    }

    #[test]
    fn full_entry_slot_rejects_and_returns_occupant() {
        let mut esc = recorded(4, 1, 1.0);
        assert!(esc.add_person(person(1, 0.0), 0).unwrap().is_admitted());
        let before = snapshot(&esc);

        let outcome = esc.add_person(person(2, 0.5), 0).unwrap();
        assert_eq!(outcome, Admission::Rejected(person(2, 0.5)));
        assert_eq!(snapshot(&esc), before);
        assert_eq!(esc.hooks().entered.len(), 1, "rejection must not call on_enter");
    }

    #[test]
    fn negative_lane_is_invalid_argument() {
        let mut esc = recorded(4, 2, 1.0);
        let err = esc.add_person(person(1, 0.0), -1).unwrap_err();
        assert!(matches!(err, EscalatorError::InvalidArgument { lane: -1, .. }));
        assert!(esc.is_empty());
    }

    #[test]
    fn lane_equal_to_count_is_invalid_argument() {
        let mut esc = recorded(4, 2, 1.0);
        assert!(esc.add_person(person(1, 0.0), 0).unwrap().is_admitted());
        let err = esc.add_person(person(2, 0.0), 2).unwrap_err();
        assert!(matches!(err, EscalatorError::InvalidArgument { lane: 2, .. }));
        assert_eq!(esc.occupant_count(), 1);
        assert!(esc.hooks().entered.len() == 1);
    }

    #[test]
    fn huge_lane_is_invalid_argument() {
        let mut esc = recorded(4, 2, 1.0);
        assert!(esc.add_person(person(1, 0.0), i64::MAX).is_err());
    }

    #[test]
    fn entry_reopens_after_step() {
        let mut esc = recorded(4, 1, 1.0);
        assert!(esc.add_person(person(1, 0.0), 0).unwrap().is_admitted());
        esc.step();
        assert_eq!(esc.entry_state()[&LaneId(0)], EntryState::Empty);
        assert!(esc.add_person(person(2, 0.0), 0).unwrap().is_admitted());
    }
}

// ── Step advancement ──────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;
    use crate::{Callbacks, EntryState};

    use std::cell::RefCell;
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;

    #[test]
    fn standing_rider_walks_the_whole_belt_then_exits_once() {
        let mut esc = recorded(5, 1, 1.0);
        assert!(esc.add_person(person(1, 0.0), 0).unwrap().is_admitted());
        assert_eq!(esc.entry_state()[&LaneId(0)], EntryState::Full);

        for expected in 1..=4 {
            let report = esc.step();
            assert_eq!(report.exited, 0);
            assert_eq!(esc.position_of(PersonId(1)), Some((LaneId(0), expected)));
        }

        let report = esc.step();
        assert_eq!(report.exited, 1);
        assert_eq!(esc.hooks().exited, [(LaneId(0), PersonId(1))]);
        assert_eq!(esc.entry_state()[&LaneId(0)], EntryState::Empty);
        assert!(esc.is_empty());

        // Nothing left to exit.
        esc.step();
        assert_eq!(esc.hooks().exited.len(), 1);
    }

    #[test]
    fn combined_speed_is_truncated_not_rounded() {
        let mut esc = recorded(3, 2, 0.5);
        assert!(esc.add_person(person(1, 0.4), 1).unwrap().is_admitted());
        for _ in 0..10 {
            let report = esc.step();
            assert_eq!(report.exited, 0);
            assert_eq!(esc.position_of(PersonId(1)), Some((LaneId(1), 0)));
        }
        assert_eq!(esc.entry_state()[&LaneId(1)], EntryState::Full);
        assert_eq!(esc.entry_state()[&LaneId(0)], EntryState::Empty);
        assert!(!esc.add_person(person(2, 0.0), 1).unwrap().is_admitted());
    }

    #[test]
    fn one_point_nine_moves_exactly_one_cell() {
        let mut esc = recorded(10, 1, 1.0);
        assert!(esc.add_person(person(1, 0.9), 0).unwrap().is_admitted());
        esc.step();
        assert_eq!(esc.position_of(PersonId(1)), Some((LaneId(0), 1)));
    }

    #[test]
    fn walker_exits_when_next_index_reaches_length() {
        // floor(1.0 + 2.0) = 3 from cell 0 lands exactly on length 3.
        let mut esc = recorded(3, 1, 1.0);
        assert!(esc.add_person(person(1, 2.0), 0).unwrap().is_admitted());
        let report = esc.step();
        assert_eq!(report.exited, 1);
        assert!(esc.is_empty());
    }

    #[test]
    fn lanes_advance_independently() {
        let mut esc = recorded(6, 2, 1.0);
        assert!(esc.add_person(person(1, 0.0), 0).unwrap().is_admitted());
        assert!(esc.add_person(person(2, 2.0), 1).unwrap().is_admitted());
        esc.step();
        assert_eq!(esc.position_of(PersonId(1)), Some((LaneId(0), 1)));
        assert_eq!(esc.position_of(PersonId(2)), Some((LaneId(1), 3)));
        esc.step();
        assert_eq!(esc.position_of(PersonId(1)), Some((LaneId(0), 2)));
        assert_eq!(esc.position_of(PersonId(2)), None);
        assert_eq!(esc.hooks().exited, [(LaneId(1), PersonId(2))]);
    }

    #[test]
    fn step_never_admits() {
        let mut esc = recorded(4, 2, 1.0);
        for _ in 0..5 {
            esc.step();
        }
        assert!(esc.is_empty());
        assert!(esc.hooks().entered.is_empty());
    }

    #[test]
    fn collision_keeps_later_processed_occupant() {
        // Belt 0: person 1 walks 1 cell/tick, person 2 walks 2.
        let mut esc = recorded(10, 1, 0.0);
        assert!(esc.add_person(person(1, 1.0), 0).unwrap().is_admitted());
        esc.step(); // person 1 → cell 1
        assert!(esc.add_person(person(2, 2.0), 0).unwrap().is_admitted());

        // Both compute next index 2; person 1 (from cell 1) is processed
        // after person 2 (from cell 0) and keeps the cell.
        let report = esc.step();
        assert_eq!(report.collisions, 1);
        assert_eq!(report.carried, 2);
        assert_eq!(report.on_board(), 1);
        assert_eq!(esc.occupant_at(0, 2).map(|p| p.id), Some(PersonId(1)));
        assert_eq!(esc.position_of(PersonId(2)), None);
        assert!(esc.hooks().exited.is_empty(), "lost occupant must not be reported as exited");
    }

    #[test]
    fn closure_callbacks_fire() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (enter_log, exit_log) = (Rc::clone(&log), Rc::clone(&log));
        let hooks = Callbacks::new()
            .on_enter(move |_, p: &Person| enter_log.borrow_mut().push(format!("enter {}", p.id.0)))
            .on_exit(move |_, p: Person| exit_log.borrow_mut().push(format!("exit {}", p.id.0)));

        let mut esc = Escalator::new(&config(2, 1, 1.0), hooks).unwrap();
        assert!(esc.add_person(person(4, 0.0), 0).unwrap().is_admitted());
        esc.step();
        esc.step();
        assert_eq!(*log.borrow(), ["enter 4", "exit 4"]);
    }

    #[test]
    fn borrowed_hooks_see_events() {
        let mut rec = Recorder::default();
        {
            let mut esc: Escalator<Person, _> =
                Escalator::new(&config(1, 1, 1.0), &mut rec).unwrap();
            assert!(esc.add_person(person(9, 0.0), 0).unwrap().is_admitted());
            esc.step();
        }
        assert_eq!(rec.entered, [(LaneId(0), PersonId(9))]);
        assert_eq!(rec.exited, [(LaneId(0), PersonId(9))]);
    }

    #[test]
    fn negative_speed_stays_put() {
        let mut esc: Escalator<Person, NoopHooks> =
            Escalator::without_hooks(&config(4, 1, 0.0)).unwrap();
        assert!(esc.add_person(person(1, -3.0), 0).unwrap().is_admitted());
        esc.step();
        assert_eq!(esc.position_of(PersonId(1)), Some((LaneId(0), 0)));
    }

    #[test]
    fn boxed_occupants_ride() {
        let mut esc: Escalator<Box<dyn Occupant>> =
            Escalator::without_hooks(&config(3, 1, 1.0)).unwrap();
        let rider: Box<dyn Occupant> = Box::new(person(5, 1.0));
        assert!(esc.add_person(rider, 0).unwrap().is_admitted());
        esc.step();
        assert_eq!(esc.occupant_at(0, 2).map(|p| p.id()), Some(PersonId(5)));
    }

    struct PanicOnExit;

    impl EscalatorHooks<Person> for PanicOnExit {
        fn on_exit(&mut self, _lane: LaneId, _p: Person) {
            panic!("exit hook failed");
        }
    }

    #[test]
    fn panicking_exit_hook_leaves_grid_fully_stepped() {
        // Belt 0, length 2: person 1 walks off the top, person 2 moves to cell 1.
        let mut esc = Escalator::new(&config(2, 2, 0.0), PanicOnExit).unwrap();
        assert!(esc.add_person(person(1, 2.0), 0).unwrap().is_admitted());
        assert!(esc.add_person(person(2, 1.0), 1).unwrap().is_admitted());

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| esc.step()));
        assert!(outcome.is_err());

        assert_eq!(esc.lanes().count(), 2);
        assert!(esc.lanes().all(|lane| lane.len() == 2));
        assert_eq!(snapshot(&esc), [None, None, None, Some(PersonId(2))]);
        assert_eq!(esc.entry_state()[&LaneId(1)], EntryState::Empty);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::{EntryState, EscalatorError};

    #[derive(Clone, Debug)]
    enum Op {
        Add { lane: i64, speed: f64 },
        Step,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-2i64..6, 0.0f64..3.0).prop_map(|(lane, speed)| Op::Add { lane, speed }),
            Just(Op::Step),
        ]
    }

    proptest! {
        #[test]
        fn invariants_hold_for_any_operation_sequence(
            length in 1usize..12,
            lanes in 1usize..4,
            belt in 0.0f64..2.5,
            ops in prop::collection::vec(arb_op(), 0..60),
        ) {
            let mut esc = recorded(length, lanes, belt);
            let mut next_id = 0u32;
            let mut admitted = 0usize;
            let mut lost = 0usize;

            for op in ops {
                match op {
                    Op::Add { lane, speed } => {
                        let before = snapshot(&esc);
                        let gate = usize::try_from(lane)
                            .ok()
                            .and_then(|l| esc.entry_state().get(&LaneId(l as u32)).copied());
                        let result = esc.add_person(person(next_id, speed), lane);
                        match gate {
                            None => {
                                let invalid = matches!(result, Err(EscalatorError::InvalidArgument { .. }));
                                prop_assert!(invalid);
                                prop_assert_eq!(snapshot(&esc), before);
                            }
                            Some(EntryState::Full) => {
                                prop_assert!(!result.unwrap().is_admitted());
                                prop_assert_eq!(snapshot(&esc), before);
                            }
                            Some(EntryState::Empty) => {
                                prop_assert!(result.unwrap().is_admitted());
                                prop_assert_eq!(
                                    esc.occupant_at(lane as usize, 0).map(|p| p.id),
                                    Some(PersonId(next_id))
                                );
                                admitted += 1;
                            }
                        }
                        next_id += 1;
                    }
                    Op::Step => {
                        lost += esc.step().collisions;
                    }
                }

                // Shape.
                prop_assert_eq!(esc.lanes().count(), lanes);
                prop_assert!(esc.lanes().all(|l| l.len() == length));

                // No duplication.
                let ids: Vec<PersonId> = esc.occupants().map(|(_, _, p)| p.id).collect();
                let unique: HashSet<PersonId> = ids.iter().copied().collect();
                prop_assert_eq!(ids.len(), unique.len());

                // Each exit reported once, and nobody vanishes unaccounted.
                let exited: HashSet<PersonId> = esc.hooks().exited.iter().map(|&(_, id)| id).collect();
                prop_assert_eq!(exited.len(), esc.hooks().exited.len());
                prop_assert_eq!(admitted, esc.occupant_count() + exited.len() + lost);

                // Entry state mirrors cell 0.
                for (lane, state) in esc.entry_state() {
                    let occupied = esc.occupant_at(lane.index(), 0).is_some();
                    prop_assert_eq!(state == EntryState::Full, occupied);
                }
            }
        }

        #[test]
        fn lone_rider_follows_advancement_law(
            length in 1usize..30,
            belt in 0.0f64..3.0,
            speed in 0.0f64..3.0,
            steps in 1usize..40,
        ) {
            let mut esc = recorded(length, 1, belt);
            prop_assert!(esc.add_person(person(0, speed), 0).unwrap().is_admitted());
            let displacement = (belt + speed).floor() as usize;
            let mut expected = Some(0usize);

            for _ in 0..steps {
                esc.step();
                expected = expected
                    .map(|p| p + displacement)
                    .filter(|&p| p < length);
                prop_assert_eq!(esc.position_of(PersonId(0)).map(|(_, p)| p), expected);
            }
            let exits = esc.hooks().exited.len();
            prop_assert_eq!(exits, usize::from(expected.is_none()));
        }
    }
}
