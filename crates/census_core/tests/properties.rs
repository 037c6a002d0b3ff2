//! Property tests for the entity table: live counting, slot reuse order,
//! and query results against a simple model.

use std::collections::BTreeSet;

use census_core::{sync, EntityIndex, EntityManager, Signature};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Create,
    CreateTagged(i32),
    Destroy(usize),
    Attach(usize, i32),
    Detach(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Create),
        3 => any::<i32>().prop_map(Op::CreateTagged),
        2 => any::<usize>().prop_map(Op::Destroy),
        2 => (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::Attach(i, v)),
        1 => any::<usize>().prop_map(Op::Detach),
    ]
}

/// Mirrors the table with plain collections.
#[derive(Default)]
struct Model {
    live: BTreeSet<u32>,
    tagged: BTreeSet<u32>,
    free: Vec<u32>,
    slots: u32,
}

impl Model {
    fn create(&mut self) -> u32 {
        let raw = self.free.pop().unwrap_or_else(|| {
            self.slots += 1;
            self.slots - 1
        });
        self.live.insert(raw);
        raw
    }

    fn pick(&self, seed: usize) -> Option<u32> {
        if self.live.is_empty() {
            None
        } else {
            self.live.iter().nth(seed % self.live.len()).copied()
        }
    }
}

proptest! {
    #[test]
    fn prop_table_matches_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut manager = EntityManager::new::<(i32,)>().unwrap();
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Create => {
                    let expected = model.create();
                    prop_assert_eq!(manager.create_entity(), EntityIndex::new(expected));
                }
                Op::CreateTagged(value) => {
                    let expected = model.create();
                    model.tagged.insert(expected);
                    let entity = manager.create_entity_with((value,)).unwrap();
                    prop_assert_eq!(entity, EntityIndex::new(expected));
                    prop_assert_eq!(*manager.get_component::<i32>(entity).unwrap(), value);
                }
                Op::Destroy(seed) => {
                    if let Some(raw) = model.pick(seed) {
                        model.live.remove(&raw);
                        model.tagged.remove(&raw);
                        model.free.push(raw);
                        manager.destroy_entity(EntityIndex::new(raw)).unwrap();
                        prop_assert!(manager.destroy_entity(EntityIndex::new(raw)).is_err());
                    }
                }
                Op::Attach(seed, value) => {
                    if let Some(raw) = model.pick(seed) {
                        model.tagged.insert(raw);
                        manager.set_component(EntityIndex::new(raw), value).unwrap();
                    }
                }
                Op::Detach(seed) => {
                    if let Some(raw) = model.pick(seed) {
                        model.tagged.remove(&raw);
                        manager.remove_component::<i32>(EntityIndex::new(raw)).unwrap();
                    }
                }
            }

            prop_assert_eq!(manager.entity_count(), model.live.len());
            prop_assert_eq!(manager.free_count(), model.free.len());
            prop_assert_eq!(manager.slot_count(), model.slots as usize);
        }

        let everyone: Vec<_> = model.live.iter().copied().map(EntityIndex::new).collect();
        let tagged: Vec<_> = model.tagged.iter().copied().map(EntityIndex::new).collect();
        prop_assert_eq!(manager.get_entities(Signature::EMPTY), everyone);
        prop_assert_eq!(manager.query::<(i32,)>().unwrap(), tagged);
    }

    #[test]
    fn prop_partition_covers_exactly(len in 0usize..500, parts in 0usize..20) {
        let runs = sync::partition(len, parts);
        let mut next = 0;
        for run in &runs {
            prop_assert_eq!(run.start, next);
            prop_assert!(!run.is_empty());
            next = run.end;
        }
        prop_assert_eq!(next, len);
        if let (Some(first), Some(last)) = (runs.first(), runs.last()) {
            prop_assert!(first.len() - last.len() <= 1);
        }
    }
}
