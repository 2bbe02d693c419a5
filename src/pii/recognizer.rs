// file: src/pii/recognizer.rs
// description: pattern-based pii recognizers and the built-in english registry
// reference: https://docs.rs/regex

use crate::models::{EntityType, RecognizerResult};
use crate::pii::patterns;
use crate::pii::validators;
use regex::Regex;

/// A source of PII spans for one entity type.
pub trait Recognizer: Send + Sync {
    fn name(&self) -> &str;

    fn entity_type(&self) -> EntityType;

    fn analyze(&self, text: &str) -> Vec<RecognizerResult>;
}

#[derive(Clone)]
pub struct Pattern {
    pub regex: &'static Regex,
    pub score: f32,
    /// capture group holding the entity; 0 is the whole match
    pub group: usize,
}

impl Pattern {
    pub fn new(regex: &'static Regex, score: f32) -> Self {
        Self {
            regex,
            score,
            group: 0,
        }
    }

    pub fn with_group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }
}

pub struct PatternRecognizer {
    name: String,
    entity_type: EntityType,
    patterns: Vec<Pattern>,
    validator: Option<fn(&str) -> bool>,
}

impl PatternRecognizer {
    pub fn new(name: &str, entity_type: EntityType, patterns: Vec<Pattern>) -> Self {
        Self {
            name: name.to_string(),
            entity_type,
            patterns,
            validator: None,
        }
    }

    /// Candidates failing `validator` are dropped.
    pub fn with_validator(mut self, validator: fn(&str) -> bool) -> Self {
        self.validator = Some(validator);
        self
    }
}

impl Recognizer for PatternRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    fn analyze(&self, text: &str) -> Vec<RecognizerResult> {
        let mut results = Vec::new();

        for pattern in &self.patterns {
            for caps in pattern.regex.captures_iter(text) {
                let Some(found) = caps.get(pattern.group) else {
                    continue;
                };

                if found.as_str().is_empty() {
                    continue;
                }

                if let Some(validate) = self.validator
                    && !validate(found.as_str())
                {
                    continue;
                }

                results.push(RecognizerResult::new(
                    self.entity_type,
                    found.start(),
                    found.end(),
                    pattern.score,
                ));
            }
        }

        results
    }
}

/// The fixed English recognizer set.
pub fn default_recognizers() -> Vec<Box<dyn Recognizer>> {
    vec![
        Box::new(PatternRecognizer::new(
            "EmailRecognizer",
            EntityType::EmailAddress,
            vec![Pattern::new(&patterns::EMAIL, 1.0)],
        )),
        Box::new(PatternRecognizer::new(
            "UrlRecognizer",
            EntityType::Url,
            vec![Pattern::new(&patterns::URL, 0.6)],
        )),
        Box::new(PatternRecognizer::new(
            "PhoneRecognizer",
            EntityType::PhoneNumber,
            vec![
                Pattern::new(&patterns::PHONE_NANP, 0.7),
                Pattern::new(&patterns::PHONE_COMPACT, 0.5),
                Pattern::new(&patterns::PHONE_INTERNATIONAL, 0.6),
            ],
        )),
        Box::new(
            PatternRecognizer::new(
                "CreditCardRecognizer",
                EntityType::CreditCard,
                vec![Pattern::new(&patterns::CREDIT_CARD, 1.0)],
            )
            .with_validator(validators::is_valid_credit_card),
        ),
        Box::new(
            PatternRecognizer::new(
                "UsSsnRecognizer",
                EntityType::UsSsn,
                vec![Pattern::new(&patterns::US_SSN, 0.85)],
            )
            .with_validator(validators::is_valid_ssn),
        ),
        Box::new(
            PatternRecognizer::new(
                "IbanRecognizer",
                EntityType::IbanCode,
                vec![Pattern::new(&patterns::IBAN, 1.0)],
            )
            .with_validator(validators::is_valid_iban),
        ),
        Box::new(PatternRecognizer::new(
            "IpV4Recognizer",
            EntityType::IpAddress,
            vec![Pattern::new(&patterns::IPV4, 0.6)],
        )),
        Box::new(
            PatternRecognizer::new(
                "IpV6Recognizer",
                EntityType::IpAddress,
                vec![Pattern::new(&patterns::IPV6_CANDIDATE, 0.6)],
            )
            .with_validator(validators::is_valid_ipv6),
        ),
        Box::new(PatternRecognizer::new(
            "CryptoRecognizer",
            EntityType::CryptoWallet,
            vec![
                Pattern::new(&patterns::BTC_ADDRESS, 0.5),
                Pattern::new(&patterns::ETH_ADDRESS, 0.8),
            ],
        )),
        Box::new(PatternRecognizer::new(
            "DateTimeRecognizer",
            EntityType::DateTime,
            vec![
                Pattern::new(&patterns::NUMERIC_DATE, 0.6),
                Pattern::new(&patterns::ISO_DATE, 0.6),
                Pattern::new(&patterns::MONTH_DAY, 0.6),
                Pattern::new(&patterns::MONTH_YEAR, 0.5),
                Pattern::new(&patterns::CLOCK_TIME, 0.4),
            ],
        )),
        Box::new(PatternRecognizer::new(
            "PersonRecognizer",
            EntityType::Person,
            vec![
                Pattern::new(&patterns::HONORIFIC_NAME, 0.7),
                Pattern::new(&patterns::SIGN_OFF_NAME, 0.5).with_group(1),
            ],
        )),
        Box::new(
            PatternRecognizer::new(
                "SalutationRecognizer",
                EntityType::Person,
                vec![
                    Pattern::new(&patterns::GREETING_NAME, 0.6).with_group(1),
                    Pattern::new(&patterns::NAME_LINE, 0.5).with_group(1),
                ],
            )
            .with_validator(validators::is_probable_name),
        ),
        Box::new(
            PatternRecognizer::new(
                "FullNameRecognizer",
                EntityType::Person,
                vec![Pattern::new(&patterns::FULL_NAME, 0.4)],
            )
            .with_validator(validators::is_probable_name),
        ),
    ]
}
