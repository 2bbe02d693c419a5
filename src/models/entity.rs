// file: src/models/entity.rs
// description: pii entity kinds and detected span model
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    EmailAddress,
    PhoneNumber,
    CreditCard,
    UsSsn,
    IpAddress,
    Url,
    IbanCode,
    CryptoWallet,
    DateTime,
    Person,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::EmailAddress => "EMAIL_ADDRESS",
            EntityType::PhoneNumber => "PHONE_NUMBER",
            EntityType::CreditCard => "CREDIT_CARD",
            EntityType::UsSsn => "US_SSN",
            EntityType::IpAddress => "IP_ADDRESS",
            EntityType::Url => "URL",
            EntityType::IbanCode => "IBAN_CODE",
            EntityType::CryptoWallet => "CRYPTO",
            EntityType::DateTime => "DATE_TIME",
            EntityType::Person => "PERSON",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected span, as byte offsets into the analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizerResult {
    pub entity_type: EntityType,
    pub start: usize,
    pub end: usize,
    pub score: f32,
}

impl RecognizerResult {
    pub fn new(entity_type: EntityType, start: usize, end: usize, score: f32) -> Self {
        Self {
            entity_type,
            start,
            end,
            score: score.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_names() {
        assert_eq!(EntityType::EmailAddress.as_str(), "EMAIL_ADDRESS");
        assert_eq!(EntityType::UsSsn.to_string(), "US_SSN");
    }

    #[test]
    fn test_score_is_clamped() {
        let result = RecognizerResult::new(EntityType::Url, 0, 3, 1.7);
        assert_eq!(result.score, 1.0);
    }
}
