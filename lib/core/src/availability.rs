use crate::Result;

/// Readiness of one artifact group
///
/// A group that failed to load keeps the diagnostic so queries against it can
/// be rejected with a useful message instead of crashing.
#[derive(Debug, Clone)]
pub enum Availability<T> {
    Ready(T),
    Unavailable(String),
}

impl<T> Availability<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Availability::Ready(value),
            Err(e) => Availability::Unavailable(e.to_string()),
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, Availability::Ready(_))
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        match self {
            Availability::Ready(value) => Some(value),
            Availability::Unavailable(_) => None,
        }
    }

    /// Diagnostic for an unavailable group
    #[inline]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Availability::Ready(_) => None,
            Availability::Unavailable(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_from_result() {
        let ready = Availability::from_result(Ok(3));
        assert!(ready.is_ready());
        assert_eq!(ready.get(), Some(&3));

        let down: Availability<u32> = Availability::from_result(Err(Error::ArtifactMissing {
            artifact: "popular".to_string(),
            path: "data/popular.json".to_string(),
        }));
        assert!(!down.is_ready());
        assert!(down.reason().unwrap().contains("data/popular.json"));
    }
}
