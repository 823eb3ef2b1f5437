use std::collections::HashMap;
use std::sync::Mutex;

/// Fitness already measured in this run, keyed by `Individual::canonical_key`
pub struct FitnessMemo {
    data: Mutex<HashMap<String, f64>>,
    capacity: usize,
}

impl FitnessMemo {
    /// A capacity of zero disables memoisation.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Mutex::new(HashMap::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        if self.capacity == 0 {
            return None;
        }
        let data = self.data.lock().ok()?;
        data.get(key).copied()
    }

    pub fn set(&self, key: String, fitness: f64) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(mut data) = self.data.lock() {
            if data.len() >= self.capacity && !data.contains_key(&key) {
                // Simple eviction: start over when full.
                data.clear();
            }
            data.insert(key, fitness);
        }
    }

    pub fn len(&self) -> usize {
        self.data.lock().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clears_when_full() {
        let memo = FitnessMemo::new(2);
        memo.set("a".to_string(), 1.0);
        memo.set("b".to_string(), 2.0);
        memo.set("c".to_string(), 3.0);
        assert_eq!(memo.len(), 1);
        assert_eq!(memo.get("c"), Some(3.0));
        assert_eq!(memo.get("a"), None);
    }

    #[test]
    fn test_zero_capacity_disables() {
        let memo = FitnessMemo::new(0);
        memo.set("a".to_string(), 1.0);
        assert!(memo.get("a").is_none());
        assert!(memo.is_empty());
    }
}
