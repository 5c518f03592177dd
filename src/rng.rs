/// Mulberry32 generator. One instance is seeded per round so that a round can
/// be replayed from its seed.
#[derive(Clone, Debug)]
pub struct Rng {
    seed: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    pub fn next_f32(&mut self) -> f32 {
        self.seed = self.seed.wrapping_add(0x6d2b79f5);
        let mut t = self.seed;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        let out = t ^ (t >> 14);
        (out as f64 / 4_294_967_296.0) as f32
    }

    pub fn int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max - min + 1) as f32;
        (min + (self.next_f32() * span).floor() as i32).min(max)
    }

    pub fn bool(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }

    /// Roll in `0..100` compared against a whole-number percentage.
    pub fn percent(&mut self, chance: u32) -> bool {
        (self.int(0, 99) as u32) < chance
    }

    pub fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_f32() * len as f32).floor().min((len - 1) as f32) as usize
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.pick_index(items.len()))
    }

    /// Fisher-Yates, back to front.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.int(0, i as i32) as usize;
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_same_sequence() {
        let mut a = Rng::new(77);
        let mut b = Rng::new(77);
        for _ in 0..64 {
            assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits());
        }
    }

    #[test]
    fn int_stays_inside_inclusive_bounds() {
        let mut rng = Rng::new(3);
        for _ in 0..2_000 {
            let value = rng.int(-2, 2);
            assert!((-2..=2).contains(&value));
        }
        assert_eq!(rng.int(5, 5), 5);
        assert_eq!(rng.int(9, 1), 9);
    }

    #[test]
    fn shuffle_keeps_every_element() {
        let mut rng = Rng::new(11);
        let mut values: Vec<u32> = (0..16).collect();
        rng.shuffle(&mut values);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn pick_on_empty_slice_is_none() {
        let mut rng = Rng::new(1);
        let empty: [u8; 0] = [];
        assert!(rng.pick(&empty).is_none());
        assert_eq!(rng.pick(&[4u8]), Some(&4));
    }

    #[test]
    fn percent_extremes_are_absolute() {
        let mut rng = Rng::new(123);
        for _ in 0..500 {
            assert!(!rng.percent(0));
            assert!(rng.percent(100));
        }
    }
}
