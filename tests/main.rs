use sort_test_tools::{instantiate_sort_tests, Sort};

mod slice {
    use super::*;

    struct SortImpl {}

    impl Sort for SortImpl {
        fn name() -> String {
            "timsort_slice".into()
        }

        fn sort<T>(arr: &mut [T])
        where
            T: Ord,
        {
            timsort::sort(arr);
        }

        fn sort_by<T, F>(arr: &mut [T], compare: F)
        where
            F: FnMut(&T, &T) -> std::cmp::Ordering,
        {
            timsort::sort_by(arr, compare);
        }
    }

    instantiate_sort_tests!(SortImpl);
}

mod sequential {
    use super::*;

    use timsort::{LessThan, Ordered, Sequential};

    struct SortImpl {}

    impl Sort for SortImpl {
        fn name() -> String {
            "timsort_sequential".into()
        }

        fn sort<T>(arr: &mut [T])
        where
            T: Ord,
        {
            timsort::sort_seq(&mut Sequential::new(arr), Ordered);
        }

        fn sort_by<T, F>(arr: &mut [T], mut compare: F)
        where
            F: FnMut(&T, &T) -> std::cmp::Ordering,
        {
            let is_less = |a: &T, b: &T| compare(a, b) == std::cmp::Ordering::Less;
            timsort::sort_seq(&mut Sequential::new(arr), LessThan(is_less));
        }
    }

    instantiate_sort_tests!(SortImpl);
}

mod zip2 {
    use super::*;

    use timsort::Zip2;

    // Sorts the values zipped with their original indices, the indices are a second component
    // that has to follow every move.
    fn check_companion(order: &[usize]) {
        let mut seen = vec![false; order.len()];
        for &idx in order {
            assert!(!seen[idx], "index {idx} appears twice: {order:?}");
            seen[idx] = true;
        }
    }

    struct SortImpl {}

    impl Sort for SortImpl {
        fn name() -> String {
            "timsort_zip2".into()
        }

        fn sort<T>(arr: &mut [T])
        where
            T: Ord,
        {
            let mut order: Vec<usize> = (0..arr.len()).collect();
            Zip2::new(arr, &mut order).sort_by(|a, b| a.0.cmp(b.0));
            check_companion(&order);
        }

        fn sort_by<T, F>(arr: &mut [T], mut compare: F)
        where
            F: FnMut(&T, &T) -> std::cmp::Ordering,
        {
            let mut order: Vec<usize> = (0..arr.len()).collect();

            // The companion is only checked if the comparison did not panic.
            Zip2::new(arr, &mut order).sort_by(|a, b| compare(a.0, b.0));
            check_companion(&order);
        }
    }

    instantiate_sort_tests!(SortImpl);
}
