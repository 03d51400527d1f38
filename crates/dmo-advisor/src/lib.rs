//! # dmo-advisor -- Advisory completion client
//!
//! The seam to the external free-text completion service. Given a question
//! about a dataset (and, optionally, the dataset's descriptor), it:
//!
//! 1. gates the question to the data-classification topic,
//! 2. assembles a prompt listing the classification levels from the
//!    taxonomy registry,
//! 3. calls the completion service under a timeout.
//!
//! ## Authority
//!
//! Everything this crate returns is advisory text. It holds no reference to
//! any assessment and cannot change one; callers snapshot what they need
//! before awaiting and release all locks first.
//!
//! ## Cancellation
//!
//! [`Advisor::consult`] is an ordinary future. Dropping it (for example
//! because the HTTP request that triggered it was abandoned) cancels the
//! in-flight call.

pub mod client;
pub mod config;
pub mod error;
pub mod prompt;

pub use client::{Advice, Advisor, CompletionClient, HttpCompletionClient};
pub use config::{AdvisorConfig, ConfigError};
pub use error::AdvisorError;
