// file: src/pii/patterns.rs
// description: compiled regex patterns for pii recognition
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Contact details
    pub static ref EMAIL: Regex = Regex::new(
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"
    ).expect("EMAIL regex is valid");

    pub static ref URL: Regex = Regex::new(
        r#"(?i)\b(?:https?://|www\.)[^\s<>"']*[^\s<>"'.,;:!?)\]]"#
    ).expect("URL regex is valid");

    pub static ref PHONE_NANP: Regex = Regex::new(
        r"(?:\+1[\s.-]?)?(?:\(\d{3}\)\s?|\b\d{3}[\s.-])\d{3}[\s.-]\d{4}\b"
    ).expect("PHONE_NANP regex is valid");

    // Ten undelimited digits with valid NANP area code and exchange
    pub static ref PHONE_COMPACT: Regex = Regex::new(
        r"\b[2-9]\d{2}[2-9]\d{6}\b"
    ).expect("PHONE_COMPACT regex is valid");

    pub static ref PHONE_INTERNATIONAL: Regex = Regex::new(
        r"\+[2-9]\d{0,2}[\s.-]?\d{1,4}(?:[\s.-]?\d{2,4}){2,4}\b"
    ).expect("PHONE_INTERNATIONAL regex is valid");

    // Financial and government identifiers
    pub static ref CREDIT_CARD: Regex = Regex::new(
        r"\b(?:\d[ -]?){12,18}\d\b"
    ).expect("CREDIT_CARD regex is valid");

    pub static ref US_SSN: Regex = Regex::new(
        r"\b\d{3}[- .]\d{2}[- .]\d{4}\b"
    ).expect("US_SSN regex is valid");

    pub static ref IBAN: Regex = Regex::new(
        r"\b[A-Z]{2}\d{2}(?: ?[A-Z0-9]{4}){2,7}(?: ?[A-Z0-9]{1,3})?\b"
    ).expect("IBAN regex is valid");

    // Network identifiers
    pub static ref IPV4: Regex = Regex::new(
        r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b"
    ).expect("IPV4 regex is valid");

    pub static ref IPV6_CANDIDATE: Regex = Regex::new(
        r"(?i)(?:[0-9a-f]{0,4}:){2,7}[0-9a-f]{0,4}"
    ).expect("IPV6_CANDIDATE regex is valid");

    // Cryptocurrency wallets
    pub static ref BTC_ADDRESS: Regex = Regex::new(
        r"\b(bc1[a-z0-9]{39,59}|[13][a-km-zA-HJ-NP-Z1-9]{25,34})\b"
    ).expect("BTC_ADDRESS regex is valid");

    pub static ref ETH_ADDRESS: Regex = Regex::new(
        r"\b0x[a-fA-F0-9]{40}\b"
    ).expect("ETH_ADDRESS regex is valid");

    // Dates and times
    pub static ref NUMERIC_DATE: Regex = Regex::new(
        r"\b\d{1,2}/\d{1,2}/(?:\d{4}|\d{2})\b"
    ).expect("NUMERIC_DATE regex is valid");

    pub static ref ISO_DATE: Regex = Regex::new(
        r"\b\d{4}-\d{2}-\d{2}\b"
    ).expect("ISO_DATE regex is valid");

    pub static ref MONTH_DAY: Regex = Regex::new(
        r"\b(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?\s+\d{1,2}(?:st|nd|rd|th)?(?:,?\s+\d{4})?\b"
    ).expect("MONTH_DAY regex is valid");

    pub static ref MONTH_YEAR: Regex = Regex::new(
        r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{4}\b"
    ).expect("MONTH_YEAR regex is valid");

    pub static ref CLOCK_TIME: Regex = Regex::new(
        r"\b(?:[01]?\d|2[0-3]):[0-5]\d(?::[0-5]\d)?(?:\s?[AaPp]\.?[Mm]\b\.?)?"
    ).expect("CLOCK_TIME regex is valid");

    // Person names
    pub static ref HONORIFIC_NAME: Regex = Regex::new(
        r"\b(?:Mr|Mrs|Ms|Miss|Dr|Prof)\.?[ \t]+[A-Z][a-z'-]+(?:[ \t]+[A-Z]\.)?(?:[ \t]+[A-Z][a-z'-]+)?"
    ).expect("HONORIFIC_NAME regex is valid");

    // Name on its own line after a short sign-off; group 1 is the name
    pub static ref SIGN_OFF_NAME: Regex = Regex::new(
        r"(?m)^[ \t]*(?:Thanks|Thank you|Regards|Cheers|Best|Love|Take care)[ \t]*[,.!]?[ \t]*\n[ \t]*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?)[ \t]*$"
    ).expect("SIGN_OFF_NAME regex is valid");

    // Name after an opening greeting; group 1 is the name
    pub static ref GREETING_NAME: Regex = Regex::new(
        r"(?m)^[ \t]*(?:Hi|Hello|Hey|Dear|Good morning|Good afternoon|Good evening)[ \t]+([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?)(?:[ \t]*[,:!.]|[ \t]*$)"
    ).expect("GREETING_NAME regex is valid");

    // Salutation line holding only a name and a comma; group 1 is the name
    pub static ref NAME_LINE: Regex = Regex::new(
        r"(?m)^[ \t]*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?)[ \t]*,[ \t]*$"
    ).expect("NAME_LINE regex is valid");

    // Two capitalized words, optional middle initial, inside running text
    pub static ref FULL_NAME: Regex = Regex::new(
        r"\b[A-Z][a-z]+(?:[ \t]+[A-Z]\.)?[ \t]+[A-Z][a-z]+(?:-[A-Z][a-z]+)?\b"
    ).expect("FULL_NAME regex is valid");
}
