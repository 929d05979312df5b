//! Pure patrol and report logic. Nothing in here touches the terminal or
//! the network.

mod clock;
mod countdown;
mod error;
pub mod form_state;
mod ocorrencia;
mod patrol;
mod reconcile;
mod report;
mod shift;
mod validation;
mod whatsapp;

pub use clock::*;
pub use countdown::*;
pub use error::PatrolError;
pub use ocorrencia::*;
pub use patrol::*;
pub use reconcile::{condominiums_to_confirm, pending_condominiums};
pub use report::*;
pub use shift::*;
pub use validation::*;
pub use whatsapp::*;
