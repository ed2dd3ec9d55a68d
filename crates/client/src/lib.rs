//! openmrs-client library crate
//!
//! Session handling, patient reads and writes, location lookup and the
//! interactive shell for an OpenMRS REST service. The binary entrypoint is
//! in `main.rs`.

pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod reader;
pub mod session;
pub mod shell;
pub mod writer;

pub use client::OpenMrsClient;
pub use config::{Config, Credentials};
pub use error::{ClientError, ConfigError, ShellError};
pub use location::LocationResolver;
pub use reader::PatientReader;
pub use session::{Session, SessionManager};
pub use shell::{MenuChoice, Shell};
pub use writer::PatientWriter;
