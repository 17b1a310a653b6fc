//! Async Rust client for the NAKIVO Backup & Replication director.
//!
//! Every call is a JSON-RPC envelope POSTed to `https://{host}:{port}/c/router`.
//! `Client` owns the transport; `AuthenticationService` and `JobService` are
//! thin per-action views over it.
//!
//! ```no_run
//! use nakivo_api::{CallContext, Client};
//! use secrecy::SecretString;
//!
//! # async fn run() -> Result<(), nakivo_api::Error> {
//! let client = Client::new("director.example.com", 4443)?;
//! let ctx = CallContext::new();
//!
//! let password: SecretString = "secret".to_string().into();
//! client.authentication().login(&ctx, "admin", &password, false).await?;
//! let _groups = client.jobs().list_job_groups(&ctx, 0, true).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod context;
pub mod envelope;
pub mod error;
pub mod jobs;
pub mod models;
pub mod transport;

pub use auth::{AUTHENTICATION_ACTION, AuthenticationService};
pub use client::{Client, RawResponse, Reply, ROUTER_PATH};
pub use context::CallContext;
pub use envelope::{DEFAULT_TID, DecodeError, RPC_TYPE, RequestEnvelope, ResponseEnvelope};
pub use error::{ApiError, Error};
pub use jobs::{JOB_ACTION, JobService};
pub use transport::{TlsMode, TransportConfig};
