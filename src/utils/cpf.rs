//! Validering av CPF (brasilianskt personnummer, 11 siffror varav två kontrollsiffror)

/// Antal tecken i ett CPF
pub const CPF_LENGTH: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CpfError {
    #[error("CPF must have 11 digits")]
    WrongLength,
    #[error("CPF must contain only numbers")]
    NotNumeric,
    #[error("Invalid CPF")]
    Invalid,
}

/// Validera ett CPF.
///
/// Kontrollerna körs i fast ordning (längd, teckenuppsättning, upprepade
/// siffror, första och andra kontrollsiffran) eftersom felmeddelandet beror
/// på vilken kontroll som fallerar först.
pub fn validate_cpf(cpf: &str) -> Result<(), CpfError> {
    if cpf.chars().count() != CPF_LENGTH {
        return Err(CpfError::WrongLength);
    }

    if !cpf.chars().all(|c| c.is_ascii_digit()) {
        return Err(CpfError::NotNumeric);
    }

    let digits: Vec<u32> = cpf.bytes().map(|b| u32::from(b - b'0')).collect();

    if digits.iter().all(|&d| d == digits[0]) {
        return Err(CpfError::Invalid);
    }

    if check_digit(&digits[..9]) != digits[9] {
        return Err(CpfError::Invalid);
    }

    if check_digit(&digits[..10]) != digits[10] {
        return Err(CpfError::Invalid);
    }

    Ok(())
}

/// Beräkna kontrollsiffran för de givna siffrorna.
///
/// Vikterna börjar på `len + 1` och minskar med ett per position. En rest på
/// 10 viks ner till 0.
fn check_digit(digits: &[u32]) -> u32 {
    let top_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top_weight).rev())
        .map(|(d, w)| d * w)
        .sum();

    sum * 10 % 11 % 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cpfs() {
        assert_eq!(validate_cpf("52998224725"), Ok(()));
        assert_eq!(validate_cpf("43813879100"), Ok(()));
        assert_eq!(validate_cpf("11144477735"), Ok(()));
    }

    #[test]
    fn test_wrong_length() {
        for cpf in ["", "111", "5299822472", "529982247250", "52998224725 "] {
            assert_eq!(validate_cpf(cpf), Err(CpfError::WrongLength), "{cpf:?}");
        }
    }

    #[test]
    fn test_length_checked_before_charset() {
        assert_eq!(validate_cpf("abc"), Err(CpfError::WrongLength));
        assert_eq!(validate_cpf("529.982.247-25"), Err(CpfError::WrongLength));
    }

    #[test]
    fn test_non_numeric() {
        assert_eq!(validate_cpf("5299822472a"), Err(CpfError::NotNumeric));
        assert_eq!(validate_cpf("529 8224725"), Err(CpfError::NotNumeric));
        assert_eq!(validate_cpf("-5299822472"), Err(CpfError::NotNumeric));
    }

    #[test]
    fn test_multibyte_counts_as_one_character() {
        // 10 siffror + 'é' = 11 tecken men 12 bytes
        assert_eq!(validate_cpf("5299822472é"), Err(CpfError::NotNumeric));
    }

    #[test]
    fn test_repeated_digits() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(11);
            assert_eq!(validate_cpf(&cpf), Err(CpfError::Invalid), "{cpf}");
        }
    }

    #[test]
    fn test_checksum_mismatch() {
        assert_eq!(validate_cpf("43813879101"), Err(CpfError::Invalid));
        assert_eq!(validate_cpf("52998224715"), Err(CpfError::Invalid));
        assert_eq!(validate_cpf("12345678901"), Err(CpfError::Invalid));
    }

    #[test]
    fn test_check_digit_folds_ten_to_zero() {
        // 1*10 + 1*2 = 12, 120 mod 11 = 10 -> 0
        let digits = [1, 0, 0, 0, 0, 0, 0, 0, 1];
        assert_eq!(check_digit(&digits), 0);
        assert_eq!(validate_cpf("12345678909"), Ok(()));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CpfError::WrongLength.to_string(), "CPF must have 11 digits");
        assert_eq!(CpfError::NotNumeric.to_string(), "CPF must contain only numbers");
        assert_eq!(CpfError::Invalid.to_string(), "Invalid CPF");
    }
}
