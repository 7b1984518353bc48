//! Tests for the seeded random stream

#[cfg(test)]
mod tests {
    use crystalize::algorithm::random::RandomStream;

    // Tests equal seeds produce equal sequences
    // Verified by seeding from entropy
    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomStream::new(42);
        let mut b = RandomStream::new(42);

        let left: Vec<usize> = (0..64).map(|_| a.range_inclusive(0, 1000)).collect();
        let right: Vec<usize> = (0..64).map(|_| b.range_inclusive(0, 1000)).collect();

        assert_eq!(left, right);
    }

    // Tests different seeds diverge
    // Verified by ignoring the seed
    #[test]
    fn test_different_seeds_differ() {
        let mut a = RandomStream::new(1);
        let mut b = RandomStream::new(2);

        let left: Vec<usize> = (0..64).map(|_| a.range_inclusive(0, 1_000_000)).collect();
        let right: Vec<usize> = (0..64).map(|_| b.range_inclusive(0, 1_000_000)).collect();

        assert_ne!(left, right);
    }

    // Tests inclusive ranges reach both ends
    // Verified by using an exclusive upper bound
    #[test]
    fn test_range_inclusive_hits_both_ends() {
        let mut rng = RandomStream::new(3);
        let draws: Vec<usize> = (0..500).map(|_| rng.range_inclusive(10, 12)).collect();

        assert!(draws.iter().all(|d| (10..=12).contains(d)));
        assert!(draws.contains(&10));
        assert!(draws.contains(&12));
    }

    // Tests degenerate ranges return the lower bound
    // Verified by panicking on empty ranges
    #[test]
    fn test_degenerate_ranges() {
        let mut rng = RandomStream::new(4);

        assert_eq!(rng.range_inclusive(7, 7), 7);
        assert_eq!(rng.range_inclusive(9, 3), 9);
        assert_eq!(rng.byte_inclusive(200, 200), 200);
        assert_eq!(rng.offset(0), 0);
    }

    // Tests offsets are symmetric around zero
    // Verified by drawing only positive offsets
    #[test]
    fn test_offset_range() {
        let mut rng = RandomStream::new(5);
        let draws: Vec<i32> = (0..1000).map(|_| rng.offset(2)).collect();

        assert!(draws.iter().all(|d| (-2..=2).contains(d)));
        assert!(draws.contains(&-2));
        assert!(draws.contains(&2));
    }
}
