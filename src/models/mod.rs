pub mod person;
pub mod vaccine;
pub mod vaccine_card;
pub mod vaccine_record;
pub mod config;

pub use person::*;
pub use vaccine::*;
pub use vaccine_card::*;
pub use vaccine_record::*;
pub use config::*;
