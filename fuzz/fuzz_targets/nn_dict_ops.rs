#![no_main]
use libfuzzer_sys::fuzz_target;
use nnbits::NnDict;

fuzz_target!(|data: (usize, Vec<(usize, u8)>)| {
    let (n_raw, ops) = data;
    let n = n_raw % 70_000;
    if n == 0 {
        return;
    }

    let mut dict = NnDict::new(n);
    let mut model = vec![false; n];

    for &(raw, op) in &ops {
        let idx = raw % n;
        match op % 4 {
            0 => {
                dict.set(idx, true).unwrap();
                model[idx] = true;
            }
            1 => {
                dict.set(idx, false).unwrap();
                model[idx] = false;
            }
            2 => {
                let expected = (idx..n).find(|&j| model[j]).unwrap_or(n);
                assert_eq!(dict.next(idx).unwrap(), expected);
            }
            _ => {
                let expected = (0..=idx).rev().find(|&j| model[j]).unwrap_or(n);
                assert_eq!(dict.prev(idx).unwrap(), expected);
            }
        }
        assert_eq!(dict.get(idx).unwrap(), model[idx]);
    }
});
