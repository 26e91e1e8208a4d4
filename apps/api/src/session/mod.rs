// Session state: the API credential and the routes that manage it.

pub mod credential;
pub mod handlers;

pub use credential::{CredentialError, CredentialStore};
