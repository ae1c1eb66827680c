//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the injection runtime
///
/// Resolution failures abort the wiring of the instance being created and
/// propagate to the caller of the top-level `create`/`resolve` entry point.
/// Failures raised by interceptors or intercepted methods pass through the
/// proxy unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// Capability declaration text could not be parsed
    #[error("Malformed descriptor '{declaration}': {reason}")]
    MalformedDescriptor {
        /// The offending declaration text
        declaration: String,
        /// Why the declaration was rejected
        reason: String,
    },

    /// A concrete type name is not part of the registry
    #[error("Unknown type: {type_name}")]
    UnknownType {
        /// The type name that was looked up
        type_name: String,
    },

    /// An interceptor name is not part of the registry
    #[error("Unknown interceptor: {name}")]
    UnknownInterceptor {
        /// The interceptor name that was looked up
        name: String,
    },

    /// No registered type satisfies the request
    #[error("No implementation found for {descriptor}: {reason}")]
    NoImplementationFound {
        /// The request that could not be satisfied
        descriptor: String,
        /// Why no implementation qualified
        reason: String,
    },

    /// More than one registered type satisfies the request
    #[error(
        "Ambiguous implementation for {descriptor}: candidates are [{}]; add a binding to choose one",
        .candidates.join(", ")
    )]
    AmbiguousImplementation {
        /// The request that matched several types
        descriptor: String,
        /// Every matching type, sorted by name
        candidates: Vec<String>,
    },

    /// `execute` was called on an invocation whose method already ran
    #[error("Invocation of '{method}' already completed")]
    InvocationAlreadyCompleted {
        /// The intercepted method
        method: String,
    },

    /// A component was asked to fill a slot it does not declare
    #[error("Type {type_name} has no injection slot named '{slot}'")]
    UnknownSlot {
        /// The owning type
        type_name: String,
        /// The requested slot
        slot: String,
    },

    /// A resolved instance cannot be viewed as the requested type
    #[error("Type {type_name} cannot be viewed as {requested}")]
    CapabilityMismatch {
        /// The resolved type
        type_name: String,
        /// The requested Rust type or capability
        requested: String,
    },

    /// The same type name was registered twice
    #[error("Type {type_name} is registered more than once")]
    DuplicateType {
        /// The duplicated name
        type_name: String,
    },

    /// Wiring a type requires the type itself
    #[error("Circular dependency: {}", .path.join(" -> "))]
    CircularDependency {
        /// Types being wired, outermost first, ending with the repeated type
        path: Vec<String>,
    },

    /// A type declares interceptors but provides no proxy decorator
    #[error("Type {type_name} declares interceptors but has no proxy decorator")]
    MissingProxy {
        /// The intercepted type
        type_name: String,
    },

    /// An invocation argument or return value had an unexpected shape
    #[error("Invalid argument: {message}")]
    Argument {
        /// Description of the conversion failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failure of an infrastructure service (logging, configuration sources)
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON conversion error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Error raised by application code running behind a proxy
    #[error("{0}")]
    Generic(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// Internal runtime error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a malformed descriptor error
    pub fn malformed_descriptor<D: Into<String>, R: Into<String>>(declaration: D, reason: R) -> Self {
        Self::MalformedDescriptor {
            declaration: declaration.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown type error
    pub fn unknown_type<S: Into<String>>(type_name: S) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
        }
    }

    /// Create an unknown interceptor error
    pub fn unknown_interceptor<S: Into<String>>(name: S) -> Self {
        Self::UnknownInterceptor { name: name.into() }
    }

    /// Create a no implementation error
    pub fn no_implementation<D: Into<String>, R: Into<String>>(descriptor: D, reason: R) -> Self {
        Self::NoImplementationFound {
            descriptor: descriptor.into(),
            reason: reason.into(),
        }
    }

    /// Create an ambiguity error; candidates are sorted for stable messages
    pub fn ambiguous<D, I, S>(descriptor: D, candidates: I) -> Self
    where
        D: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut candidates: Vec<String> = candidates.into_iter().map(Into::into).collect();
        candidates.sort();
        Self::AmbiguousImplementation {
            descriptor: descriptor.into(),
            candidates,
        }
    }

    /// Create an unknown slot error
    pub fn unknown_slot<T: Into<String>, S: Into<String>>(type_name: T, slot: S) -> Self {
        Self::UnknownSlot {
            type_name: type_name.into(),
            slot: slot.into(),
        }
    }

    /// Create a capability mismatch error
    pub fn capability_mismatch<T: Into<String>, R: Into<String>>(type_name: T, requested: R) -> Self {
        Self::CapabilityMismatch {
            type_name: type_name.into(),
            requested: requested.into(),
        }
    }
}

// Interception error creation methods
impl Error {
    /// Create an invocation already completed error
    pub fn invocation_completed<S: Into<String>>(method: S) -> Self {
        Self::InvocationAlreadyCompleted {
            method: method.into(),
        }
    }

    /// Create an argument error
    pub fn argument<S: Into<String>>(message: S) -> Self {
        Self::Argument {
            message: message.into(),
            source: None,
        }
    }

    /// Create an argument error with source
    pub fn argument_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Argument {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a generic error from application code
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into().into())
    }
}

// Configuration and internal error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl Error {
    /// Whether this error comes from the resolution engine rather than from
    /// application code or the environment
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedDescriptor { .. }
                | Self::UnknownType { .. }
                | Self::UnknownInterceptor { .. }
                | Self::NoImplementationFound { .. }
                | Self::AmbiguousImplementation { .. }
                | Self::UnknownSlot { .. }
                | Self::CapabilityMismatch { .. }
                | Self::DuplicateType { .. }
                | Self::CircularDependency { .. }
                | Self::MissingProxy { .. }
        )
    }
}
