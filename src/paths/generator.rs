// src/paths/generator.rs
use crate::error::{validation::validate_count, SimResult};
use crate::rng::RandomSource;

pub trait PathGenerator {
    type Path;

    /// Checks the generator's parameters without touching any randomness.
    fn validate(&self) -> SimResult<()>;

    fn generate(&self, source: &mut RandomSource) -> SimResult<Self::Path>;

    /// Independent realisations drawn back to back from the same stream.
    fn generate_many(
        &self,
        n_paths: usize,
        source: &mut RandomSource,
    ) -> SimResult<Vec<Self::Path>> {
        validate_count("n_paths", n_paths)?;
        self.validate()?;
        (0..n_paths).map(|_| self.generate(source)).collect()
    }
}
