use rand::Rng;
use thiserror::Error;

/// Status code the fixture has always returned: `201 Created`.
pub const CREATED: u16 = 201;

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("candidate status set is empty")]
    Empty,
}

/// Non-empty set of status codes to pick a replacement from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    codes: Vec<u16>,
}

impl CandidateSet {
    pub fn new(codes: Vec<u16>) -> Result<Self, StatusError> {
        if codes.is_empty() {
            return Err(StatusError::Empty);
        }
        Ok(Self { codes })
    }

    pub fn codes(&self) -> &[u16] {
        &self.codes
    }

    /// Uniform pick. Duplicates in the set weigh their code accordingly.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> u16 {
        self.codes[rng.gen_range(0..self.codes.len())]
    }
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self { codes: vec![CREATED] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_default_is_created() {
        let set = CandidateSet::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            assert_eq!(set.choose(&mut rng), 201);
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(CandidateSet::new(vec![]), Err(StatusError::Empty)));
    }

    #[test]
    fn test_choose_covers_members() -> Result<()> {
        let set = CandidateSet::new(vec![200, 201, 404, 500])?;
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<u16> = (0..500).map(|_| set.choose(&mut rng)).collect();
        assert_eq!(seen, set.codes().iter().copied().collect::<HashSet<_>>());
        Ok(())
    }

    #[test]
    fn test_choose_is_reproducible_with_seed() -> Result<()> {
        let set = CandidateSet::new(vec![200, 201, 202, 203, 204])?;
        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20).map(|_| set.choose(&mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(picks(9), picks(9));
        Ok(())
    }
}
