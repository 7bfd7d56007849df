//! Per-request value objects exchanged with the identity provider.
//!
//! Every type here lives for a single gateway operation: it is built when
//! the operation starts and discarded when it returns. Records mirrored
//! from the provider keep the provider's own field values verbatim.

#![forbid(unsafe_code)]

mod client;
mod role;
mod token;
mod user;

pub use client::ClientRecord;
pub use role::{
    AssignRoleRequest, AssignRoleResult, AssignedRole, CreateRoleRequest, CreateRoleResult,
    RoleRecord,
};
pub use token::{LoginRequest, TokenResponse};
pub use user::{RegisterRequest, RegisterResult, UserCredential, UserRecord};
