#![cfg(test)]

use proptest::prelude::*;

use super::*;

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    Insert(usize, i32),
    Erase(usize),
    Resize(usize),
    Reserve(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::Push),
        Just(Op::Pop),
        (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        any::<usize>().prop_map(Op::Erase),
        (0_usize..64).prop_map(Op::Resize),
        (0_usize..128).prop_map(Op::Reserve),
    ]
}

proptest! {
    #[test]
    fn behaves_like_a_sequence(ops in proptest::collection::vec(arb_op(), 0..200)) {
        let mut arr = DynamicArray::new();
        // Plain model of the expected contents.
        let mut model = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    arr.push_back(v);
                    model.push(v);
                }
                Op::Pop => {
                    if !model.is_empty() {
                        arr.pop_back();
                        model.pop();
                    }
                }
                Op::Insert(i, v) => {
                    let i = i % (model.len() + 1);
                    prop_assert_eq!(arr.insert(i, v), i);
                    model.insert(i, v);
                }
                Op::Erase(i) => {
                    if !model.is_empty() {
                        let i = i % model.len();
                        prop_assert_eq!(arr.erase(i), i);
                        model.remove(i);
                    }
                }
                Op::Resize(n) => {
                    arr.resize(n);
                    model.resize(n, 0);
                }
                Op::Reserve(k) => {
                    let cap = arr.cap();
                    arr.reserve(k);
                    prop_assert!(arr.cap() >= k);
                    prop_assert!(arr.cap() >= cap);
                }
            }

            prop_assert_eq!(arr.as_slice(), model.as_slice());
            prop_assert!(arr.len() <= arr.cap());
        }
    }

    #[test]
    fn sized_construction_is_default_filled(n in 0_usize..256) {
        let arr = DynamicArray::<u64>::with_len(n);
        prop_assert_eq!(arr.len(), n);
        prop_assert!(arr.cap() >= n);
        prop_assert!(arr.iter().all(|v| *v == 0));
    }

    #[test]
    fn clones_are_independent(
        values in proptest::collection::vec(any::<i32>(), 1..64),
        index in any::<usize>(),
    ) {
        let original: DynamicArray<_> = values.iter().copied().collect();
        let mut copy = original.clone();
        prop_assert_eq!(&original, &copy);

        let index = index % copy.len();
        copy[index] = copy[index].wrapping_add(1);
        prop_assert_eq!(original.as_slice(), values.as_slice());
        prop_assert_ne!(&original, &copy);
    }

    #[test]
    fn reserve_preserves_contents(
        values in proptest::collection::vec(any::<i32>(), 0..64),
        k in 0_usize..256,
    ) {
        let mut arr: DynamicArray<_> = values.iter().copied().collect();
        let cap = arr.cap();
        arr.reserve(k);
        prop_assert_eq!(arr.cap(), cap.max(k));
        prop_assert_eq!(arr.as_slice(), values.as_slice());
    }

    #[test]
    fn pushes_keep_order_with_linear_relocations(n in 0_usize..2048) {
        let mut arr = DynamicArray::new();
        let mut relocations = 0;

        for i in 0..n {
            if arr.len() == arr.cap() {
                relocations += arr.len();
            }
            arr.push_back(i);
        }

        prop_assert!(arr.iter().copied().eq(0..n));
        prop_assert!(relocations <= 2 * n);
    }
}
