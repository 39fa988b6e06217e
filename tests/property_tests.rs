use proptest::prelude::*;

use nnbits::NnDict;

proptest! {
    #[test]
    fn test_neighbor_queries_match_linear_scan(
        n in 1..2048usize,
        ops in prop::collection::vec((any::<usize>(), any::<bool>()), 1..300),
    ) {
        let mut dict = NnDict::new(n);
        let mut bits = vec![false; n];
        for &(raw, value) in &ops {
            let idx = raw % n;
            dict.set(idx, value).unwrap();
            bits[idx] = value;
        }

        for i in 0..n {
            prop_assert_eq!(dict.get(i).unwrap(), bits[i]);
        }

        // Check both walks against a linear scan at scattered probes
        for i in (0..n).step_by(7) {
            let expected_next = (i..n).find(|&j| bits[j]).unwrap_or(n);
            let expected_prev = (0..=i).rev().find(|&j| bits[j]).unwrap_or(n);
            prop_assert_eq!(dict.next(i).unwrap(), expected_next);
            prop_assert_eq!(dict.prev(i).unwrap(), expected_prev);
        }
    }

    #[test]
    fn test_ones_iterator_matches_reference(
        n in 1..2048usize,
        ops in prop::collection::vec((any::<usize>(), any::<bool>()), 1..300),
    ) {
        let mut dict = NnDict::new(n);
        let mut expected = std::collections::BTreeSet::new();
        for &(raw, value) in &ops {
            let idx = raw % n;
            dict.set(idx, value).unwrap();
            if value {
                expected.insert(idx);
            } else {
                expected.remove(&idx);
            }
        }

        let ascending: Vec<usize> = expected.iter().copied().collect();
        let forward: Vec<usize> = dict.ones().collect();
        prop_assert_eq!(&forward, &ascending);

        let mut backward: Vec<usize> = dict.ones().rev().collect();
        backward.reverse();
        prop_assert_eq!(&backward, &ascending);
    }
}

use std::collections::BTreeSet;
use std::io::Cursor;

proptest! {
    #[test]
    fn test_deep_trees_match_ordered_set(
        ops in prop::collection::vec((0..200_000usize, any::<bool>()), 1..500),
        probes in prop::collection::vec(0..200_000usize, 1..100),
    ) {
        // Two summary levels above the leaves
        let n = 200_000;
        let mut dict = NnDict::new(n);
        let mut expected = BTreeSet::new();
        for &(idx, value) in &ops {
            dict.set(idx, value).unwrap();
            if value {
                expected.insert(idx);
            } else {
                expected.remove(&idx);
            }
        }

        for &i in &probes {
            let expected_next = expected.range(i..).next().copied().unwrap_or(n);
            let expected_prev = expected.range(..=i).next_back().copied().unwrap_or(n);
            prop_assert_eq!(dict.next(i).unwrap(), expected_next);
            prop_assert_eq!(dict.prev(i).unwrap(), expected_prev);
        }
    }

    #[test]
    fn test_serialize_roundtrip_at_boundary_sizes(
        n in prop::sample::select(vec![1usize, 63, 64, 65, 4095, 4096, 4097, 1_000_000]),
        ops in prop::collection::vec(any::<usize>(), 0..100),
    ) {
        let mut dict = NnDict::new(n);
        let mut expected = BTreeSet::new();
        for &raw in &ops {
            let idx = raw % n;
            dict.set(idx, true).unwrap();
            expected.insert(idx);
        }

        let mut buf = Vec::new();
        let written = dict.serialize(&mut buf).unwrap();
        prop_assert_eq!(written, buf.len());

        let mut cursor = Cursor::new(&buf[..]);
        let loaded = NnDict::load(&mut cursor).unwrap();
        prop_assert_eq!(cursor.position() as usize, buf.len());
        prop_assert_eq!(loaded.len(), n);

        let ascending: Vec<usize> = expected.iter().copied().collect();
        let restored: Vec<usize> = loaded.ones().collect();
        prop_assert_eq!(restored, ascending);

        for &i in &expected {
            prop_assert_eq!(loaded.next(i).unwrap(), i);
            prop_assert_eq!(loaded.prev(i).unwrap(), i);
        }
    }
}
