use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid domain name format: {name}")]
    InvalidNameFormat { name: String },

    #[error("Domain name already registered: {name}")]
    DuplicateName { name: String },

    #[error("Domain {name} overlaps with existing domain {existing}")]
    OverlappingDomain { name: String, existing: String },

    #[error("Wildcard serving for {name} is in use by host-specific routes")]
    WildcardInUse { name: String },

    #[error("Space {space} does not belong to the organization owning {name}")]
    InvalidSpaceRelation { name: String, space: String },

    #[error("Organization {organization} cannot be associated with owned domain {name}")]
    InvalidOrganizationRelation { name: String, organization: String },

    #[error("Only privileged actors may create shared domains")]
    UnauthorizedSharedDomainCreation,

    #[error("Domain not found: {name}")]
    DomainNotFound { name: String },

    #[error("Space not found: {space}")]
    SpaceNotFound { space: String },

    #[error("Transaction conflict, caller may retry: {message}")]
    TransactionConflict { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
