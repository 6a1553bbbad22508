//! Location sources used by the startup sequence.

use std::future::Future;
use std::time::Duration;

use crate::types::{Coordinates, LocationError};

/// Something that can report the user's position
pub trait LocationSource {
    fn locate(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// A position supplied up front, e.g. from the command line
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

impl LocationSource for FixedLocation {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// No positioning available on this system
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationSource for NoLocation {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::ServiceUnavailable)
    }
}

/// Ask `source` for a position, giving up after `timeout`
pub async fn get_current_location<S: LocationSource>(
    source: &S,
    timeout: Duration,
) -> Result<Coordinates, LocationError> {
    match tokio::time::timeout(timeout, source.locate()).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverAnswers;

    impl LocationSource for NeverAnswers {
        async fn locate(&self) -> Result<Coordinates, LocationError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_fixed_location() {
        let source = FixedLocation(Coordinates::new(19.076, 72.8777));
        let coords = get_current_location(&source, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(coords, Coordinates::new(19.076, 72.8777));
    }

    #[tokio::test]
    async fn test_no_location() {
        let err = get_current_location(&NoLocation, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, LocationError::ServiceUnavailable));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let err = get_current_location(&NeverAnswers, Duration::from_secs(15))
            .await
            .unwrap_err();
        assert!(matches!(err, LocationError::Timeout));
    }
}
