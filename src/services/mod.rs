//! Tjänster för vaccinationsregistret
//!
//! Innehåller affärslogik som inte hör hemma i HTTP-lagret eller databasen.

pub mod vaccination;

pub use vaccination::VaccinationService;
