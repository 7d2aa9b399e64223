//! Property tests running random operation sequences against std models.

use std::{cell::Cell, rc::Rc};

use inplace_foundation::{
    collections::{FixedBuffer, FixedMap, FixedVec, History},
    handle::SharedPtr,
};
use proptest::prelude::*;
use proptest_derive::Arbitrary;

thread_local! {
    static CREATED: Cell<usize> = const { Cell::new(0) };
    static DROPPED: Cell<usize> = const { Cell::new(0) };
}

/// Element counting its constructions and drops in per-thread counters.
#[derive(Debug, PartialEq)]
struct Tracked(i16);

impl Tracked {
    fn new(value: i16) -> Self {
        CREATED.with(|c| c.set(c.get() + 1));
        Self(value)
    }
}

impl Default for Tracked {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(self.0)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        DROPPED.with(|d| d.set(d.get() + 1));
    }
}

fn live() -> usize {
    CREATED.with(Cell::get) - DROPPED.with(Cell::get)
}

struct DropCounter(Rc<Cell<usize>>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[derive(Debug, Clone, Arbitrary)]
enum TrackedOp {
    Push(i16),
    PushDefault,
    Pop,
    Insert(#[proptest(strategy = "0..12usize")] usize, i16),
    InsertN(#[proptest(strategy = "0..12usize")] usize, #[proptest(strategy = "0..4usize")] usize, i16),
    Erase(#[proptest(strategy = "0..12usize")] usize),
    EraseRange(#[proptest(strategy = "0..12usize")] usize, #[proptest(strategy = "0..12usize")] usize),
    Resize(#[proptest(strategy = "0..12usize")] usize),
    Extend(#[proptest(strategy = "prop::collection::vec(any::<i16>(), 0..5)")] Vec<i16>),
    CloneAndDrop,
    Clear,
}

const CAP: usize = 8;

#[derive(Debug, Clone, Arbitrary)]
enum VecOp {
    Push(i16),
    Pop,
    Insert(#[proptest(strategy = "0..12usize")] usize, i16),
    Erase(#[proptest(strategy = "0..12usize")] usize),
    Truncate(#[proptest(strategy = "0..12usize")] usize),
    Clear,
}

#[derive(Debug, Clone, Arbitrary)]
enum MapOp {
    Insert(#[proptest(strategy = "0..12u8")] u8, u16),
    InsertOrAssign(#[proptest(strategy = "0..12u8")] u8, u16),
    Remove(#[proptest(strategy = "0..12u8")] u8),
}

/// Permutations of `0..n` for `n` in `1..16`.
fn drop_orders() -> impl Strategy<Value = Vec<usize>> {
    (1..16usize).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
}

proptest! {
    #[test]
    fn vector_keeps_lifetimes_balanced(ops in prop::collection::vec(any::<TrackedOp>(), 0..48)) {
        let baseline = live();
        {
            let mut vec = FixedVec::<Tracked, CAP>::new();
            for op in ops {
                match op {
                    TrackedOp::Push(v) => drop(vec.push_back(Tracked::new(v))),
                    TrackedOp::PushDefault => drop(vec.push_default().map(|slot| slot.0)),
                    TrackedOp::Pop => drop(vec.pop_back()),
                    TrackedOp::Insert(index, v) => drop(vec.insert(index, Tracked::new(v))),
                    TrackedOp::InsertN(index, count, v) => drop(vec.insert_n(index, count, &Tracked::new(v))),
                    TrackedOp::Erase(index) => drop(vec.erase(index)),
                    TrackedOp::EraseRange(start, end) => drop(vec.erase_range(start..end)),
                    TrackedOp::Resize(len) => drop(vec.resize(len)),
                    TrackedOp::Extend(values) => {
                        let values: Vec<Tracked> = values.into_iter().map(Tracked::new).collect();
                        drop(vec.extend_from_slice(&values));
                    }
                    TrackedOp::CloneAndDrop => drop(vec.clone()),
                    TrackedOp::Clear => vec.clear(),
                }
                prop_assert!(vec.len() <= CAP);
                prop_assert_eq!(live() - baseline, vec.len());
            }
        }
        prop_assert_eq!(live(), baseline);
    }

    #[test]
    fn map_keeps_lifetimes_balanced(ops in prop::collection::vec(any::<MapOp>(), 0..48)) {
        let baseline = live();
        {
            let mut map = FixedMap::<u8, Tracked, CAP>::new();
            for op in ops {
                match op {
                    MapOp::Insert(k, v) => drop(map.insert(k, Tracked::new(v as i16))),
                    MapOp::InsertOrAssign(k, v) => drop(map.insert_or_assign(k, Tracked::new(v as i16))),
                    MapOp::Remove(k) => drop(map.remove(&k)),
                }
                prop_assert_eq!(live() - baseline, map.len());
            }
        }
        prop_assert_eq!(live(), baseline);
    }

    #[test]
    fn shared_value_destroyed_once_at_last_drop(order in drop_orders()) {
        let drops = Rc::new(Cell::new(0));
        let owner = SharedPtr::new(DropCounter(Rc::clone(&drops)));
        let mut owners: Vec<Option<SharedPtr<DropCounter>>> =
            (1..order.len()).map(|_| Some(owner.clone())).collect();
        owners.push(Some(owner));
        let observer = owners[0].as_ref().map(SharedPtr::downgrade).unwrap_or_default();

        for (dropped, &index) in order.iter().enumerate() {
            prop_assert_eq!(drops.get(), 0);
            prop_assert_eq!(observer.use_count(), order.len() - dropped);
            owners[index] = None;
        }
        prop_assert_eq!(drops.get(), 1);
        prop_assert!(observer.expired());
    }

    #[test]
    fn double_swap_restores_contents(
        left in prop::collection::vec(any::<i32>(), 0..=CAP),
        right in prop::collection::vec(any::<i32>(), 0..=CAP),
    ) {
        let mut a = FixedVec::<i32, CAP>::from_slice(&left).unwrap();
        let mut b = FixedVec::<i32, CAP>::from_slice(&right).unwrap();
        a.swap(&mut b);
        prop_assert_eq!(a.as_slice(), right.as_slice());
        prop_assert_eq!(b.as_slice(), left.as_slice());
        a.swap(&mut b);
        prop_assert_eq!(a.as_slice(), left.as_slice());
        prop_assert_eq!(b.as_slice(), right.as_slice());

        let mut m = FixedMap::<usize, i32, CAP>::new();
        let mut n = FixedMap::<usize, i32, CAP>::new();
        for (k, &v) in left.iter().enumerate() {
            m.insert(k, v).unwrap();
        }
        let snapshot = m.clone();
        m.swap(&mut n);
        n.swap(&mut m);
        prop_assert_eq!(&m, &snapshot);
        prop_assert!(n.is_empty());
    }

    #[test]
    fn vector_matches_model(ops in prop::collection::vec(any::<VecOp>(), 0..64)) {
        let mut vec = FixedVec::<i16, CAP>::new();
        let mut model: Vec<i16> = Vec::new();
        for op in ops {
            match op {
                VecOp::Push(v) => {
                    let fits = model.len() < CAP;
                    prop_assert_eq!(vec.push_back(v).is_ok(), fits);
                    if fits {
                        model.push(v);
                    }
                }
                VecOp::Pop => prop_assert_eq!(vec.pop_back().ok(), model.pop()),
                VecOp::Insert(index, v) => {
                    let ok = index <= model.len() && model.len() < CAP;
                    prop_assert_eq!(vec.insert(index, v).is_ok(), ok);
                    if ok {
                        model.insert(index, v);
                    }
                }
                VecOp::Erase(index) => {
                    let expected = (index < model.len()).then(|| model.remove(index));
                    prop_assert_eq!(vec.erase(index).ok(), expected);
                }
                VecOp::Truncate(len) => {
                    vec.truncate(len);
                    model.truncate(len);
                }
                VecOp::Clear => {
                    vec.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(vec.as_slice(), model.as_slice());
            prop_assert!(vec.len() <= vec.capacity());
        }
    }

    #[test]
    fn map_matches_model(ops in prop::collection::vec(any::<MapOp>(), 0..64)) {
        let mut map = FixedMap::<u8, u16, CAP>::new();
        let mut model = std::collections::BTreeMap::new();
        for op in ops {
            match op {
                MapOp::Insert(k, v) => {
                    let outcome = map.insert(k, v);
                    if model.contains_key(&k) {
                        prop_assert_eq!(outcome.ok(), Some(false));
                    } else if model.len() < CAP {
                        prop_assert_eq!(outcome.ok(), Some(true));
                        model.insert(k, v);
                    } else {
                        prop_assert!(outcome.is_err());
                    }
                }
                MapOp::InsertOrAssign(k, v) => {
                    let outcome = map.insert_or_assign(k, v);
                    if model.contains_key(&k) || model.len() < CAP {
                        prop_assert_eq!(outcome.ok(), Some(!model.contains_key(&k)));
                        model.insert(k, v);
                    } else {
                        prop_assert!(outcome.is_err());
                    }
                }
                MapOp::Remove(k) => prop_assert_eq!(map.remove(&k), model.remove(&k)),
            }
            prop_assert_eq!(map.len(), model.len());
            for (k, v) in &model {
                prop_assert_eq!(map.get(k), Some(v));
            }
        }
    }

    #[test]
    fn buffer_preserves_fifo_order(values in prop::collection::vec(any::<u32>(), 0..20)) {
        let mut buffer = FixedBuffer::<u32, CAP>::new();
        let accepted: Vec<u32> = values.iter().copied().filter(|&v| buffer.write(v).is_ok()).collect();
        prop_assert_eq!(accepted.len(), values.len().min(CAP));
        let mut drained = Vec::new();
        while let Ok(v) = buffer.read() {
            drained.push(v);
        }
        prop_assert_eq!(drained, accepted);
    }

    #[test]
    fn history_keeps_newest_and_extremes(samples in prop::collection::vec(any::<i32>(), 1..40)) {
        let mut history = History::<i32, 5>::new();
        for &sample in &samples {
            history.push(sample);
        }
        let newest: Vec<i32> = samples.iter().rev().take(5).copied().collect();
        prop_assert_eq!(history.as_slice(), newest.as_slice());
        prop_assert_eq!(history.min(), samples.iter().copied().min());
        prop_assert_eq!(history.max(), samples.iter().copied().max());
    }
}
