use rand::rngs::SmallRng;
use rand::SeedableRng;

// For testing purposes: Easily creates a list of squares from their names.
// Panics on a bad name, so keep it out of non-test code.
#[macro_export]
macro_rules! square_vec {
    ( $( $x:expr ),* ) => {
        {
            #[allow(unused_mut)]
            let mut base: Vec<$crate::squares::Square> = Vec::new();
            $(
                base.push($x.parse::<$crate::squares::Square>().unwrap());
            )*
            base
        }
    };
}

/// The random source behind every randomised search, so a seed reproduces a run.
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
