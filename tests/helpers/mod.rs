#![allow(dead_code)]

use std::cmp::Ordering;

use sorted_merge::{
    BinaryHeap, BinarySearchList, Buckets, Builder, Direction, LinearList, SortedArray, Strategy,
    UpdatableQueue,
};

/// Wrapper for an item and its source index
/// Has the same ordering as the item
#[derive(Debug, Clone, Copy)]
pub(crate) struct LabeledItem<T> {
    pub(crate) item: T,
    pub(crate) iter_idx: usize,
}

impl<T: Ord> Ord for LabeledItem<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.item.cmp(&other.item)
    }
}

impl<T: PartialOrd> PartialOrd for LabeledItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.item.partial_cmp(&other.item)
    }
}

impl<T: PartialEq> PartialEq for LabeledItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item
    }
}

impl<T> Eq for LabeledItem<T> where T: Eq {}

struct MergeChecker<'a, T> {
    items: Vec<&'a [T]>,
    orig: &'a Vec<Vec<T>>,
    direction: Direction,
}

impl<'a, T> MergeChecker<'a, T>
where
    T: core::fmt::Debug + Ord,
{
    fn new(items: &'a Vec<Vec<T>>, direction: Direction) -> Self {
        Self {
            orig: items,
            items: Vec::new(),
            direction,
        }
    }

    fn check_merge(&mut self, merge: impl IntoIterator<Item = LabeledItem<T>>) {
        // reset:
        self.items.clear();
        self.items
            .extend(self.orig.iter().map(AsRef::<[T]>::as_ref));
        merge
            .into_iter()
            .for_each(|choice| self.check_choice(&choice));

        assert!(
            self.items.iter().all(|it| it.is_empty()),
            "Some items are not consumed"
        );
    }

    fn check_choice(&mut self, choice: &LabeledItem<T>) {
        for (iter_idx, item) in self
            .items
            .iter()
            .enumerate()
            .filter_map(|(iter_idx, items)| items.first().map(|item| (iter_idx, item)))
        {
            if self.direction.apply(item.cmp(&choice.item)).is_lt() {
                panic!(
                    "chosen item {choice:?} comes after item {item:?} from source {iter_idx}",
                );
            }
        }
        let Some((item, rest)) = self.items[choice.iter_idx].split_first() else {
            panic!("item was consumed from empty source {}", choice.iter_idx);
        };

        assert_eq!(item, &choice.item);
        self.items[choice.iter_idx] = rest;
    }
}

fn labeled<T: Copy>(input: &[Vec<T>]) -> Option<(Vec<LabeledItem<T>>, Vec<Vec<LabeledItem<T>>>)> {
    let mut iters = input.iter().enumerate().map(|(iter_idx, items)| {
        items
            .iter()
            .map(|&item| LabeledItem { item, iter_idx })
            .collect::<Vec<_>>()
    });
    let primary = iters.next()?;
    Some((primary, iters.collect()))
}

/// Merges `input` with `strategy`, every item labeled with its source
pub(crate) fn merge_labels<T, St>(input: &[Vec<T>], strategy: St, direction: Direction) -> Vec<LabeledItem<T>>
where
    T: Ord + core::fmt::Debug + Copy,
    St: Strategy,
{
    let Some((primary, others)) = labeled(input) else {
        return Vec::new();
    };
    Builder::new()
        .primary(primary)
        .others(others)
        .direction(direction)
        .strategy(strategy)
        .build()
        .unwrap()
        .collect()
}

fn check_strategy<T, St>(input: &Vec<Vec<T>>, strategy: St, direction: Direction)
where
    T: Ord + core::fmt::Debug + Copy,
    St: Strategy + Copy + core::fmt::Debug,
{
    let mut checker = MergeChecker::new(input, direction);
    let first = merge_labels(input, strategy, direction);
    checker.check_merge(first.iter().copied());

    // ties are resolved the same way on every run
    let second = merge_labels(input, strategy, direction);
    assert!(
        first
            .iter()
            .zip(&second)
            .all(|(a, b)| a.iter_idx == b.iter_idx),
        "{strategy:?} yielded {first:?}, then {second:?}"
    );
}

pub(crate) fn test_all_merges<T>(input: &Vec<Vec<T>>)
where
    T: Ord + core::fmt::Debug + Copy,
{
    for direction in [Direction::Ascending, Direction::Descending] {
        check_strategy(input, BinaryHeap, direction);
        check_strategy(input, SortedArray, direction);
        check_strategy(input, BinarySearchList, direction);
        check_strategy(input, LinearList, direction);
        check_strategy(input, Buckets, direction);
        check_strategy(input, UpdatableQueue, direction);
    }
}
