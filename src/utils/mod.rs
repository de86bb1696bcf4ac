pub mod cpf;
pub mod date;
pub mod error;
pub mod path;

pub use cpf::{validate_cpf, CpfError};
pub use error::{AppError, AppResult};
