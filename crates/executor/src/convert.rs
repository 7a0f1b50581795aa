//! Error conversion from engine error types.

use marquee_core::MarqueeError;

use crate::Error;

/// Convert a MarqueeError to an executor Error, preserving every field.
impl From<MarqueeError> for Error {
    fn from(err: MarqueeError) -> Self {
        match err {
            MarqueeError::UnknownGeneration { name } => Error::UnknownGeneration { name },
            MarqueeError::SwitchInProgress => Error::SwitchInProgress,
            MarqueeError::MalformedSource {
                source_desc,
                line,
                reason,
            } => Error::MalformedSource {
                source_desc,
                line,
                reason,
            },
            MarqueeError::DimensionMismatch {
                source_desc,
                expected,
                actual,
            } => Error::DimensionMismatch {
                source_desc,
                expected,
                actual,
            },
            MarqueeError::Configuration {
                source_desc,
                reason,
            } => Error::Configuration {
                source_desc,
                reason,
            },
            // Only raised while building the catalog at boot
            err @ MarqueeError::DuplicateId { .. } => Error::InvalidInput {
                reason: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_errors_keep_fields() {
        let err: Error = MarqueeError::malformed("file:item.csv", 3, "non-numeric component 'x'").into();
        assert_eq!(
            err,
            Error::MalformedSource {
                source_desc: "file:item.csv".into(),
                line: 3,
                reason: "non-numeric component 'x'".into(),
            }
        );

        let err: Error = MarqueeError::DimensionMismatch {
            source_desc: "namespace:i2vEmb:".into(),
            expected: 2,
            actual: 3,
        }
        .into();
        assert!(matches!(err, Error::DimensionMismatch { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn test_display_matches_engine() {
        let engine = MarqueeError::UnknownGeneration { name: "HUGE".into() };
        let message = engine.to_string();
        let err: Error = engine.into();
        assert_eq!(err.to_string(), message);
        assert_eq!(Error::from(MarqueeError::SwitchInProgress), Error::SwitchInProgress);
    }

    #[test]
    fn test_duplicate_id_is_invalid_input() {
        let err: Error = MarqueeError::DuplicateId { entity: "movie", id: 7 }.into();
        match err {
            Error::InvalidInput { reason } => assert!(reason.contains("movie id 7")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_every_variant_has_an_engine_source() {
        let converted: Vec<Error> = vec![
            MarqueeError::UnknownGeneration { name: "X".into() },
            MarqueeError::SwitchInProgress,
            MarqueeError::malformed("file:a.csv", 1, "bad"),
            MarqueeError::DimensionMismatch {
                source_desc: "file:u.csv".into(),
                expected: 2,
                actual: 3,
            },
            MarqueeError::configuration("file:a.csv", "missing"),
            MarqueeError::DuplicateId { entity: "user", id: 1 },
        ]
        .into_iter()
        .map(Error::from)
        .collect();

        // Exhaustive: a new variant needs a producer in this list
        let mut seen = [false; 6];
        for err in &converted {
            let slot = match err {
                Error::UnknownGeneration { .. } => 0,
                Error::SwitchInProgress => 1,
                Error::MalformedSource { .. } => 2,
                Error::DimensionMismatch { .. } => 3,
                Error::Configuration { .. } => 4,
                Error::InvalidInput { .. } => 5,
            };
            seen[slot] = true;
        }
        assert!(seen.iter().all(|s| *s), "unreached variants: {:?}", seen);
    }
}
