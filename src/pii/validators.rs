// file: src/pii/validators.rs
// description: checksum and structure validation for regex pii candidates
// reference: luhn (ISO/IEC 7812), iban mod-97 (ISO 13616), ssa ssn rules

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::net::Ipv6Addr;
use std::str::FromStr;

fn digits_of(candidate: &str) -> Vec<u32> {
    candidate.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Luhn check over the digits of `candidate`; separators are ignored.
pub fn is_valid_credit_card(candidate: &str) -> bool {
    let digits = digits_of(candidate);
    if !(13..=19).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(idx, &d)| {
            if idx % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// ISO 13616 mod-97 check; whitespace is ignored.
pub fn is_valid_iban(candidate: &str) -> bool {
    let compact: String = candidate.chars().filter(|c| !c.is_whitespace()).collect();
    if !(15..=34).contains(&compact.len()) || !compact.is_ascii() {
        return false;
    }

    let (head, tail) = compact.split_at(4);
    let mut remainder: u32 = 0;

    for c in tail.chars().chain(head.chars()) {
        let value = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'A'..='Z' => c as u32 - 'A' as u32 + 10,
            _ => return false,
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }

    remainder == 1
}

/// Structural SSN rules: consistent separators, no 000/666/9xx area,
/// no 00 group, no 0000 serial, not one repeated digit.
pub fn is_valid_ssn(candidate: &str) -> bool {
    let chars: Vec<char> = candidate.chars().collect();
    if chars.len() != 11 || chars[3] != chars[6] {
        return false;
    }

    let digits: String = chars.iter().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 9 {
        return false;
    }

    let area = &digits[0..3];
    let group = &digits[3..5];
    let serial = &digits[5..9];

    if area == "000" || area == "666" || area.starts_with('9') {
        return false;
    }
    if group == "00" || serial == "0000" {
        return false;
    }

    let first = digits.as_bytes()[0];
    !digits.bytes().all(|b| b == first)
}

/// At least three populated groups, so bare `::` or `a::b` prose is not
/// taken for an address.
pub fn is_valid_ipv6(candidate: &str) -> bool {
    let populated = candidate.split(':').filter(|group| !group.is_empty()).count();
    populated >= 3 && Ipv6Addr::from_str(candidate).is_ok()
}

lazy_static! {
    // Capitalized words that start sentences or name places, firms and
    // calendar terms rather than people
    static ref NON_NAME_WORDS: HashSet<&'static str> = [
        "A", "An", "The", "This", "That", "These", "Those", "There", "Here",
        "It", "We", "They", "You", "He", "She", "I", "My", "Our", "Your",
        "If", "When", "What", "Why", "How", "Where", "Who", "And", "But",
        "Or", "So", "Also", "Please", "Thanks", "Thank", "Regards", "Best",
        "Sincerely", "Cheers", "Hi", "Hello", "Hey", "Dear", "Sir", "Madam",
        "All", "Team", "Everyone", "Folks", "Good", "Morning", "Afternoon",
        "Evening", "Yes", "No", "Ok", "Okay", "Let", "Call", "See", "Note",
        "Attached", "Re", "Fw", "Fwd", "Monday", "Tuesday", "Wednesday",
        "Thursday", "Friday", "Saturday", "Sunday", "January", "February",
        "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December", "Enron", "Corp", "Inc", "Company",
        "Energy", "Gas", "Power", "Services", "Capital", "Trade", "Trading",
        "Online", "North", "South", "East", "West", "New", "York", "Houston",
        "Texas", "California", "America", "American", "United", "States",
        "Board", "Directors", "Department", "Group", "Office", "President",
        "Vice", "Chairman", "Meeting", "Conference", "Street", "Avenue",
        "Center", "Building", "Bank", "University",
    ]
    .into_iter()
    .collect();
}

/// Rejects person candidates containing a word that is more likely the
/// start of a sentence, an organization or a calendar term.
pub fn is_probable_name(candidate: &str) -> bool {
    candidate
        .split(|c: char| c.is_whitespace() || c == '-')
        .map(|word| word.trim_end_matches('.'))
        .filter(|word| !word.is_empty())
        .all(|word| !NON_NAME_WORDS.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_card_luhn() {
        assert!(is_valid_credit_card("4111 1111 1111 1111"));
        assert!(is_valid_credit_card("4012-8888-8888-1881"));
        assert!(is_valid_credit_card("5555555555554444"));
        assert!(!is_valid_credit_card("4111 1111 1111 1112"));
        assert!(!is_valid_credit_card("4111"));
    }

    #[test]
    fn test_iban_mod97() {
        assert!(is_valid_iban("GB82 WEST 1234 5698 7654 32"));
        assert!(is_valid_iban("DE89370400440532013000"));
        assert!(!is_valid_iban("GB82 WEST 1234 5698 7654 33"));
        assert!(!is_valid_iban("GB82"));
    }

    #[test]
    fn test_ssn_rules() {
        assert!(is_valid_ssn("536-22-1234"));
        assert!(is_valid_ssn("536 22 1234"));
        assert!(!is_valid_ssn("536-22 1234"));
        assert!(!is_valid_ssn("000-22-1234"));
        assert!(!is_valid_ssn("666-22-1234"));
        assert!(!is_valid_ssn("912-22-1234"));
        assert!(!is_valid_ssn("536-00-1234"));
        assert!(!is_valid_ssn("536-22-0000"));
        assert!(!is_valid_ssn("555-55-5555"));
    }

    #[test]
    fn test_ipv6() {
        assert!(is_valid_ipv6("2001:db8:85a3::8a2e:370:7334"));
        assert!(is_valid_ipv6("fe80:0:0:0:202:b3ff:fe1e:8329"));
        assert!(!is_valid_ipv6("::"));
        assert!(!is_valid_ipv6("12:30:45"));
    }

    #[test]
    fn test_probable_name() {
        assert!(is_probable_name("Ken Lay"));
        assert!(is_probable_name("Jeffrey K. Skilling"));
        assert!(is_probable_name("Sara Smith-Jones"));
        assert!(!is_probable_name("Thanks"));
        assert!(!is_probable_name("The Board"));
        assert!(!is_probable_name("North America"));
        assert!(!is_probable_name("Enron Corp"));
        assert!(!is_probable_name("Friday Morning"));
    }
}
