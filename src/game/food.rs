use rand::Rng;

use super::config::{GRID_HEIGHT, GRID_WIDTH};
use super::state::Position;

/// The single piece of food on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Place food on a random cell outside `excluding`
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, excluding: &[Position]) -> Self {
        let mut food = Self {
            position: Position::new(0, 0),
        };
        food.randomize(rng, excluding);
        food
    }

    /// Resample the food cell until it lands outside `excluding`.
    ///
    /// Loops forever if every cell is excluded.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, excluding: &[Position]) {
        loop {
            let x = rng.gen_range(0..GRID_WIDTH) as i32;
            let y = rng.gen_range(0..GRID_HEIGHT) as i32;
            let pos = Position::new(x, y);

            if !excluding.contains(&pos) {
                self.position = pos;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_food_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let food = Food::spawn(&mut rng, &[]);
            assert!(food.position.is_in_bounds());
        }
    }

    #[test]
    fn test_food_avoids_excluded_cells() {
        let mut rng = StdRng::seed_from_u64(2);
        // Fill every row but the last
        let excluded: Vec<Position> = (0..GRID_HEIGHT as i32 - 1)
            .flat_map(|y| (0..GRID_WIDTH as i32).map(move |x| Position::new(x, y)))
            .collect();

        let mut food = Food::spawn(&mut rng, &excluded);
        for _ in 0..50 {
            assert!(!excluded.contains(&food.position));
            assert_eq!(food.position.y, GRID_HEIGHT as i32 - 1);
            food.randomize(&mut rng, &excluded);
        }
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let mut rng = StdRng::seed_from_u64(9);
        let free = Position::new(7, 3);
        let excluded: Vec<Position> = (0..GRID_HEIGHT as i32)
            .flat_map(|y| (0..GRID_WIDTH as i32).map(move |x| Position::new(x, y)))
            .filter(|p| *p != free)
            .collect();

        let food = Food::spawn(&mut rng, &excluded);
        assert_eq!(food.position, free);
    }

    #[test]
    fn test_same_seed_same_placement() {
        let a = Food::spawn(&mut StdRng::seed_from_u64(42), &[]);
        let b = Food::spawn(&mut StdRng::seed_from_u64(42), &[]);
        assert_eq!(a, b);
    }
}
