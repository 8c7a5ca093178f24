//! # copygen
//!
//! Generation client for AI copywriting backends: model invocation against a
//! Bedrock-style text-generation service, with response caching, bounded
//! retries, and usage accounting.
//!
//! ## Overview
//!
//! The client resolves a logical model class (`fast`, `quality`, `titan`) to a
//! concrete model identifier, shapes the request body for that model's schema
//! family, and invokes the service with a classified retry policy. Successful
//! results are cached under a deterministic digest of the request triple so
//! identical requests within the TTL never hit the wire twice.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use copygen::{ClientConfig, GenerationClientBuilder, GenerationRequest, ModelClass};
//!
//! #[tokio::main]
//! async fn main() -> copygen::Result<()> {
//!     let client = GenerationClientBuilder::new()
//!         .config(ClientConfig::new("https://bedrock.example.com").with_api_key("key"))
//!         .build()?;
//!
//!     let request = GenerationRequest::new("Buat deskripsi produk kopi arabika")
//!         .model_class(ModelClass::Quality)
//!         .max_tokens(600);
//!     let result = client.generate(&request).await?;
//!     println!("{} ({} tokens)", result.text, result.generated_tokens);
//!     Ok(())
//! }
//! ```
//!
//! ## Module organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Generation client, builder, and retry policy |
//! | [`config`] | Model-class mapping and endpoint configuration |
//! | [`family`] | Model family classification and request/response shapes |
//! | [`cache`] | Result caching with pluggable backends |
//! | [`transport`] | HTTP invocation and error classification |
//! | [`usage`] | Usage accounting sinks and cost estimation |
//! | [`types`] | Request/result types |

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod family;
pub mod transport;
pub mod types;
pub mod usage;

pub use client::{GenerationClient, GenerationClientBuilder};
pub use config::{ClientConfig, ModelClass, ModelMap};
pub use error::{Error, InvokeError};
pub use family::ModelFamily;
pub use transport::ModelInvoker;
pub use types::{ConnectionStatus, GenerationRequest, GenerationResult};

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;
