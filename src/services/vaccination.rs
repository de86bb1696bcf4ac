//! Regler för registrering och borttagning av personer, vacciner, kort och vaccinationer
//!
//! Varje registrering kontrollerar sina villkor i fast ordning och returnerar
//! det första felet. Dubblettkontrollen görs här först; databasens unika index
//! fångar kapplöpningar och ger samma meddelande.

use chrono::Utc;
use tracing::{debug, info};

use crate::db::person_repo::DUPLICATE_CPF;
use crate::db::vaccine_card_repo::DUPLICATE_CARD;
use crate::db::vaccine_repo::DUPLICATE_VACCINE;
use crate::db::{Database, PersonFilter, RecordFilter};
use crate::models::{
    CardHistory, Dose, HistoryEntry, NewVaccineRecord, Person, Vaccine, VaccineCard,
    VaccineRecord,
};
use crate::utils::date::parse_application_date;
use crate::utils::{AppError, AppResult};

pub const VACCINE_NOT_FOUND: &str = "Provided vaccine does not exist";
pub const PERSON_NOT_FOUND: &str = "Provided person does not exist";
pub const CARD_NOT_FOUND: &str = "Provided vaccine card does not exist";

/// Vaccinationsregistret
#[derive(Debug)]
pub struct VaccinationService<'a> {
    db: &'a Database,
}

impl<'a> VaccinationService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    // --- Personer ---

    /// Registrera person: CPF, namn och sedan unikt CPF
    pub fn register_person(&self, mut person: Person) -> AppResult<Person> {
        if let Err(e) = person.validate() {
            debug!("Avvisade person: {}", e);
            return Err(e.into());
        }

        let persons = self.db.persons();
        if persons.is_cpf_taken(&person.cpf)? {
            debug!("Avvisade person: CPF används redan");
            return Err(AppError::already_exists(DUPLICATE_CPF));
        }

        let id = persons.create(&mut person)?;
        info!("Registrerade person {}", id);

        Ok(person)
    }

    pub fn list_persons(&self, filter: &PersonFilter) -> AppResult<Vec<Person>> {
        self.db.persons().list(filter)
    }

    pub fn delete_person(&self, id: i64) -> AppResult<()> {
        let removed = self.db.persons().delete(id)?;
        info!("Tog bort person {} och {} vaccinationer", id, removed);
        Ok(())
    }

    // --- Vacciner ---

    /// Registrera vaccin: namn, tillverkare och sedan unikt par
    pub fn register_vaccine(&self, mut vaccine: Vaccine) -> AppResult<Vaccine> {
        if let Err(e) = vaccine.validate() {
            debug!("Avvisade vaccin: {}", e);
            return Err(e.into());
        }

        let vaccines = self.db.vaccines();
        if vaccines.exists_with(&vaccine.name, &vaccine.manufacturer)? {
            debug!("Avvisade vaccin: {} / {} finns redan", vaccine.name, vaccine.manufacturer);
            return Err(AppError::already_exists(DUPLICATE_VACCINE));
        }

        let id = vaccines.create(&mut vaccine)?;
        info!("Registrerade vaccin {} ({})", id, vaccine.name);

        Ok(vaccine)
    }

    pub fn list_vaccines(&self) -> AppResult<Vec<Vaccine>> {
        self.db.vaccines().find_all()
    }

    pub fn delete_vaccine(&self, id: i64) -> AppResult<()> {
        let removed = self.db.vaccines().delete(id)?;
        info!("Tog bort vaccin {} och {} vaccinationer", id, removed);
        Ok(())
    }

    // --- Vaccinationskort ---

    pub fn register_card(&self, mut card: VaccineCard) -> AppResult<VaccineCard> {
        if let Err(e) = card.validate() {
            debug!("Avvisade kort: {}", e);
            return Err(e.into());
        }

        let cards = self.db.vaccine_cards();
        if cards.is_name_taken(&card.name)? {
            debug!("Avvisade kort: namnet {} används redan", card.name);
            return Err(AppError::already_exists(DUPLICATE_CARD));
        }

        let id = cards.create(&mut card)?;
        info!("Registrerade vaccinationskort {} ({})", id, card.name);

        Ok(card)
    }

    pub fn list_cards(&self) -> AppResult<Vec<VaccineCard>> {
        self.db.vaccine_cards().find_all()
    }

    pub fn delete_card(&self, id: i64) -> AppResult<()> {
        let removed = self.db.vaccine_cards().delete(id)?;
        info!("Tog bort vaccinationskort {} och {} vaccinationer", id, removed);
        Ok(())
    }

    // --- Vaccinationer ---

    /// Registrera vaccination: dos och datum, sedan vaccin, person och kort
    pub fn register_record(&self, input: NewVaccineRecord) -> AppResult<VaccineRecord> {
        let dose = Dose::try_from(input.dose).map_err(|e| {
            debug!("Avvisade vaccination: dos {}", input.dose);
            AppError::from(e)
        })?;

        let application_date = match input.application_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_application_date(raw)
                .ok_or_else(|| AppError::validation("Invalid application date"))?,
            _ => Utc::now(),
        };

        if !self.db.vaccines().exists(input.vaccine_id)? {
            return Err(AppError::not_found(VACCINE_NOT_FOUND));
        }

        if !self.db.persons().exists(input.person_id)? {
            return Err(AppError::not_found(PERSON_NOT_FOUND));
        }

        if !self.db.vaccine_cards().exists(input.vaccine_card_id)? {
            return Err(AppError::not_found(CARD_NOT_FOUND));
        }

        let mut record =
            VaccineRecord::new(input.person_id, input.vaccine_id, input.vaccine_card_id, dose)
                .with_application_date(application_date);

        let id = self.db.records().create(&mut record)?;
        info!(
            "Registrerade vaccination {} (person {}, vaccin {}, dos {})",
            id,
            record.person_id,
            record.vaccine_id,
            i64::from(dose)
        );

        Ok(record)
    }

    pub fn list_records(&self, filter: &RecordFilter) -> AppResult<Vec<VaccineRecord>> {
        self.db.records().list(filter)
    }

    pub fn delete_record(&self, id: i64) -> AppResult<()> {
        self.db.records().delete(id)?;
        info!("Tog bort vaccination {}", id);
        Ok(())
    }

    /// Vaccinationshistorik för en person. Okänd person ger tom lista.
    pub fn person_history(&self, person_id: i64) -> AppResult<Vec<HistoryEntry>> {
        self.db.records().find_history_by_person(person_id)
    }

    /// Vaccinationshistorik grupperad per kort
    pub fn person_history_by_card(&self, person_id: i64) -> AppResult<Vec<CardHistory>> {
        self.db.records().find_history_grouped(person_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn new_record(person_id: i64, vaccine_id: i64, vaccine_card_id: i64, dose: i64) -> NewVaccineRecord {
        NewVaccineRecord {
            person_id,
            vaccine_id,
            vaccine_card_id,
            dose,
            application_date: None,
        }
    }

    fn message(err: AppError) -> String {
        err.to_string()
    }

    #[test]
    fn test_register_person() {
        let db = setup_db();
        let service = VaccinationService::new(&db);

        let person = service
            .register_person(Person::new("John Doe", "52998224725"))
            .unwrap();
        assert!(person.id.is_some());
        assert_eq!(service.list_persons(&PersonFilter::default()).unwrap().len(), 1);
    }

    #[test]
    fn test_register_person_validation_order() {
        let db = setup_db();
        let service = VaccinationService::new(&db);

        // Ogiltigt CPF vinner över tomt namn
        let err = service.register_person(Person::new("", "111")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(message(err), "CPF must have 11 digits");

        let err = service
            .register_person(Person::new("", "52998224725"))
            .unwrap_err();
        assert_eq!(message(err), "Invalid name");

        let err = service
            .register_person(Person::new("Ana", "11111111111"))
            .unwrap_err();
        assert_eq!(message(err), "Invalid CPF");
    }

    #[test]
    fn test_register_person_duplicate_cpf() {
        let db = setup_db();
        let service = VaccinationService::new(&db);

        service
            .register_person(Person::new("Jane Doe", "52998224725"))
            .unwrap();
        let err = service
            .register_person(Person::new("John Doe", "52998224725"))
            .unwrap_err();

        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(message(err), DUPLICATE_CPF);
    }

    #[test]
    fn test_register_vaccine() {
        let db = setup_db();
        let service = VaccinationService::new(&db);

        let err = service.register_vaccine(Vaccine::new("", "")).unwrap_err();
        assert_eq!(message(err), "Invalid name");

        let err = service.register_vaccine(Vaccine::new("BCG", "")).unwrap_err();
        assert_eq!(message(err), "Invalid Manufacturer");

        service
            .register_vaccine(Vaccine::new("BCG", "Butantan"))
            .unwrap();
        let err = service
            .register_vaccine(Vaccine::new("BCG", "Butantan"))
            .unwrap_err();
        assert_eq!(message(err), DUPLICATE_VACCINE);

        assert_eq!(service.list_vaccines().unwrap().len(), 1);
    }

    #[test]
    fn test_register_card() {
        let db = setup_db();
        let service = VaccinationService::new(&db);

        let err = service.register_card(VaccineCard::new("")).unwrap_err();
        assert_eq!(message(err), "Invalid name");

        service.register_card(VaccineCard::new("Adult")).unwrap();
        let err = service.register_card(VaccineCard::new("Adult")).unwrap_err();
        assert_eq!(message(err), DUPLICATE_CARD);
    }

    #[test]
    fn test_register_record_checks_in_order() {
        let db = setup_db();
        let service = VaccinationService::new(&db);

        let person = service
            .register_person(Person::new("Ana", "52998224725"))
            .unwrap()
            .id
            .unwrap();
        let vaccine = service
            .register_vaccine(Vaccine::new("BCG", "Butantan"))
            .unwrap()
            .id
            .unwrap();
        let card = service
            .register_card(VaccineCard::new("Adult"))
            .unwrap()
            .id
            .unwrap();

        let err = service.register_record(new_record(99, 99, 99, 99)).unwrap_err();
        assert_eq!(message(err), "Invalid dose. Use: 1, 2, 3, 4 or 5");

        let err = service.register_record(new_record(99, 99, 99, 1)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(Some(ref m)) if m == VACCINE_NOT_FOUND));

        let err = service.register_record(new_record(99, vaccine, 99, 1)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(Some(ref m)) if m == PERSON_NOT_FOUND));

        let err = service.register_record(new_record(person, vaccine, 99, 1)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(Some(ref m)) if m == CARD_NOT_FOUND));

        let record = service.register_record(new_record(person, vaccine, card, 5)).unwrap();
        assert_eq!(record.dose, Dose::SecondBooster);
        assert!(record.id.is_some());
    }

    #[test]
    fn test_register_record_application_date() {
        let db = setup_db();
        let service = VaccinationService::new(&db);

        let person = service
            .register_person(Person::new("Ana", "52998224725"))
            .unwrap()
            .id
            .unwrap();
        let vaccine = service
            .register_vaccine(Vaccine::new("BCG", "Butantan"))
            .unwrap()
            .id
            .unwrap();
        let card = service
            .register_card(VaccineCard::new("Adult"))
            .unwrap()
            .id
            .unwrap();

        let before = Utc::now();
        let record = service.register_record(new_record(person, vaccine, card, 1)).unwrap();
        assert!(record.application_date >= before);

        let mut input = new_record(person, vaccine, card, 2);
        input.application_date = Some("2023-05-10T08:00:00Z".to_string());
        let record = service.register_record(input).unwrap();
        assert_eq!(record.application_date.to_rfc3339(), "2023-05-10T08:00:00+00:00");

        let mut input = new_record(person, vaccine, card, 2);
        input.application_date = Some("inte ett datum".to_string());
        let err = service.register_record(input).unwrap_err();
        assert_eq!(message(err), "Invalid application date");
    }

    #[test]
    fn test_register_record_date_checked_before_lookups() {
        let db = setup_db();
        let service = VaccinationService::new(&db);

        let mut input = new_record(99, 99, 99, 1);
        input.application_date = Some("2024-02-30".to_string());
        let err = service.register_record(input).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Invalid application date"));

        // Dosen kontrolleras fortfarande först
        let mut input = new_record(99, 99, 99, 7);
        input.application_date = Some("2024-02-30".to_string());
        let err = service.register_record(input).unwrap_err();
        assert_eq!(message(err), "Invalid dose. Use: 1, 2, 3, 4 or 5");
    }

    #[test]
    fn test_delete_person_cascades_and_is_not_idempotent() {
        let db = setup_db();
        let service = VaccinationService::new(&db);

        let person = service
            .register_person(Person::new("Ana", "52998224725"))
            .unwrap()
            .id
            .unwrap();
        let vaccine = service
            .register_vaccine(Vaccine::new("BCG", "Butantan"))
            .unwrap()
            .id
            .unwrap();
        let card = service
            .register_card(VaccineCard::new("Adult"))
            .unwrap()
            .id
            .unwrap();
        service.register_record(new_record(person, vaccine, card, 1)).unwrap();

        service.delete_person(person).unwrap();

        let filter = RecordFilter {
            person_id: Some(person),
        };
        assert!(service.list_records(&filter).unwrap().is_empty());
        assert!(service.person_history(person).unwrap().is_empty());
        assert!(matches!(
            service.delete_person(person),
            Err(AppError::NotFound(None))
        ));
    }
}
