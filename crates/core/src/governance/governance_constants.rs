/// Signatures required before an action may execute
pub const REQUIRED_SIGNATURES: usize = 3;

/// Size of the admin registry; also the signature cap per action
pub const ADMIN_REGISTRY_SIZE: usize = 5;
