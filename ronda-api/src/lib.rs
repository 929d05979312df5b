mod analisador;
mod api_url;
mod auth;
mod client;
mod consolidacao;
pub mod domain;
mod error;
mod lookups;
mod ocorrencias;
mod rondas;
mod rondas_esporadicas;

pub(crate) use api_url::*;

pub use analisador::{fallback_relatorio, AnaliseOrigem, AnaliseRelatorio};
pub use auth::*;
pub use client::*;
pub use error::*;
