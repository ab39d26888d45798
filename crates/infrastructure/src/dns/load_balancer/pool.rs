use retryable_dns_domain::{DomainError, ResolverAddress};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Fixed set of resolvers with uniform random selection.
///
/// The random source is shared by every resolution using the pool. The lock
/// only covers drawing an index, never the exchange that follows.
pub struct ResolverPool {
    resolvers: Vec<ResolverAddress>,
    rng: Mutex<fastrand::Rng>,
}

impl ResolverPool {
    pub fn new(resolvers: Vec<ResolverAddress>) -> Result<Self, DomainError> {
        Self::with_rng(resolvers, fastrand::Rng::new())
    }

    /// Deterministic selection order, for tests and reproducible runs.
    pub fn with_seed(resolvers: Vec<ResolverAddress>, seed: u64) -> Result<Self, DomainError> {
        Self::with_rng(resolvers, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(resolvers: Vec<ResolverAddress>, rng: fastrand::Rng) -> Result<Self, DomainError> {
        if resolvers.is_empty() {
            return Err(DomainError::EmptyResolverPool);
        }
        Ok(Self {
            resolvers,
            rng: Mutex::new(rng),
        })
    }

    /// Picks a resolver uniformly at random, with replacement.
    pub fn pick(&self) -> &ResolverAddress {
        let index = {
            // The generator stays valid if another holder panicked.
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            rng.usize(..self.resolvers.len())
        };
        let resolver = &self.resolvers[index];
        debug!(resolver = %resolver, index, "Resolver picked");
        resolver
    }

    pub fn resolvers(&self) -> &[ResolverAddress] {
        &self.resolvers
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn addrs(list: &[&str]) -> Vec<ResolverAddress> {
        list.iter().map(|a| ResolverAddress::parse(a).unwrap()).collect()
    }

    #[test]
    fn test_empty_pool_rejected() {
        assert!(matches!(
            ResolverPool::new(vec![]),
            Err(DomainError::EmptyResolverPool)
        ));
    }

    #[test]
    fn test_pick_stays_in_pool() {
        let resolvers = addrs(&["8.8.8.8:53", "1.1.1.1:53", "9.9.9.9:53"]);
        let pool = ResolverPool::new(resolvers.clone()).unwrap();

        for _ in 0..1000 {
            assert!(resolvers.contains(pool.pick()));
        }
    }

    #[test]
    fn test_pick_reaches_every_resolver() {
        let pool = ResolverPool::with_seed(addrs(&["8.8.8.8", "1.1.1.1", "9.9.9.9"]), 7).unwrap();

        let seen: HashSet<_> = (0..300).map(|_| pool.pick().clone()).collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_single_resolver_always_picked() {
        let pool = ResolverPool::new(addrs(&["192.0.2.1:53"])).unwrap();
        for _ in 0..10 {
            assert_eq!(pool.pick().as_str(), "192.0.2.1:53");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let list = addrs(&["8.8.8.8", "1.1.1.1", "9.9.9.9", "208.67.222.222"]);
        let a = ResolverPool::with_seed(list.clone(), 42).unwrap();
        let b = ResolverPool::with_seed(list, 42).unwrap();

        let seq_a: Vec<_> = (0..50).map(|_| a.pick().clone()).collect();
        let seq_b: Vec<_> = (0..50).map(|_| b.pick().clone()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_concurrent_picks() {
        let resolvers = addrs(&["8.8.8.8", "1.1.1.1", "9.9.9.9"]);
        let pool = Arc::new(ResolverPool::new(resolvers.clone()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = Arc::clone(&pool);
                std::thread::spawn(move || {
                    (0..500).map(|_| pool.pick().clone()).collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            let picks = handle.join().unwrap();
            assert_eq!(picks.len(), 500);
            assert!(picks.iter().all(|p| resolvers.contains(p)));
        }
    }
}
