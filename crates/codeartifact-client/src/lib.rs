//! # CodeArtifact Client
//!
//! Async HTTP client for the CodeArtifact control-plane API.
//!
//! The client sends the request types from [`codeartifact_model`] and
//! decodes their results. Service failures come back as typed exceptions
//! inside [`ClientError::Service`].
//!
//! ## Features
//!
//! - **All operations**: one async method per control-plane operation
//! - **Client-side validation**: requests are checked before they are sent
//!   (configurable through [`ValidationMode`])
//! - **Streaming assets**: package assets are streamed, with optional digest
//!   verification
//! - **Pluggable transport**: the [`Transport`] trait separates HTTP from
//!   request mapping
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use codeartifact_client::{ClientAuth, ClientConfig, CodeArtifactClient};
//! use codeartifact_client::model::{ListPackagesRequest, PackageFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::for_region("us-west-2")
//!         .with_auth(ClientAuth::bearer("token"));
//!     let client = CodeArtifactClient::new(config)?;
//!
//!     let page = client
//!         .list_packages(
//!             &ListPackagesRequest::default()
//!                 .with_domain("my-domain")
//!                 .with_repository("my-repo")
//!                 .with_format(PackageFormat::Npm),
//!         )
//!         .await?;
//!     println!("{:?}", page.packages);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   CodeArtifactClient                        │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  Validate   │  │  Operation  │  │   AssetContent      │  │
//! │  │  (model)    │  │  (mapping)  │  │   (streaming)       │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │               Transport (ReqwestTransport)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod client;
mod config;
mod error;
pub mod operation;
mod transport;

pub use codeartifact_model as model;

pub use asset::{
    AssetContent, HEADER_ASSET_NAME, HEADER_PACKAGE_VERSION, HEADER_PACKAGE_VERSION_REVISION,
};
pub use client::CodeArtifactClient;
pub use config::{
    ClientAuth, ClientConfig, TlsConfig, ValidationMode, ENV_ENDPOINT, ENV_REGION,
    ENV_TIMEOUT_SECS, ENV_TOKEN,
};
pub use error::ClientError;
pub use operation::{Operation, OPERATION_NAMES};
pub use transport::{BodyStream, HttpRequest, HttpResponse, ReqwestTransport, Transport};
