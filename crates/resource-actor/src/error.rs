//! Errors produced by the actor plumbing.

/// Errors that can occur while talking to a [`ResourceActor`](crate::ResourceActor).
///
/// `ActorClosed`, `ActorDropped` and `NotFound` come from the framework itself.
/// `EntityError` wraps the error returned by an entity hook, boxed so that it can
/// cross the response channel; use [`FrameworkError::downcast_entity`] to get the
/// typed error back on the client side.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type.
    ///
    /// Returns `Err(self)` unchanged when this is not an `EntityError`, or when the
    /// boxed error is of a different type.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }

    /// True for failures of the actor runtime itself rather than of the entity.
    pub fn is_channel_failure(&self) -> bool {
        matches!(self, FrameworkError::ActorClosed | FrameworkError::ActorDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of stock")]
    struct OutOfStock;

    #[derive(Debug, thiserror::Error)]
    #[error("other")]
    struct Other;

    #[test]
    fn downcast_recovers_typed_entity_error() {
        let err = FrameworkError::EntityError(Box::new(OutOfStock));
        assert_eq!(err.downcast_entity::<OutOfStock>().unwrap(), OutOfStock);
    }

    #[test]
    fn downcast_keeps_foreign_errors_boxed() {
        let err = FrameworkError::EntityError(Box::new(Other));
        let back = err.downcast_entity::<OutOfStock>().unwrap_err();
        assert!(matches!(back, FrameworkError::EntityError(_)));
        assert_eq!(back.to_string(), "Entity error: other");
    }

    #[test]
    fn channel_failures_are_not_entity_errors() {
        let err = FrameworkError::ActorClosed;
        assert!(err.is_channel_failure());
        assert!(matches!(
            err.downcast_entity::<OutOfStock>(),
            Err(FrameworkError::ActorClosed)
        ));
    }
}
