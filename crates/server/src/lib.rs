pub mod api;
mod error;
pub mod tx_builder;


pub use api::{PreconfApiServer, PreconfState, BUILD_BLOCK, HEALTH};
pub use error::{ErrorMessage, PreconfApiError, PreconfApiResult};
pub use tx_builder::{BlockTransactionBuilder, CalldataTransactionBuilder};
