// file: src/cleaner/boilerplate.rs
// description: strips forwarded headers, quoted replies and signatures from email bodies
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Forwarded message marker and everything after it
    static ref ORIGINAL_MESSAGE: Regex = Regex::new(
        r"(?is)-----Original Message-----.*"
    ).expect("ORIGINAL_MESSAGE regex is valid");

    // Inline header lines, up to end of line
    static ref FROM_LINE: Regex = Regex::new(r"From:.*").expect("FROM_LINE regex is valid");
    static ref TO_LINE: Regex = Regex::new(r"To:.*").expect("TO_LINE regex is valid");
    static ref SENT_LINE: Regex = Regex::new(r"Sent:.*").expect("SENT_LINE regex is valid");
    static ref SUBJECT_LINE: Regex = Regex::new(r"Subject:.*").expect("SUBJECT_LINE regex is valid");

    // Quoted reply text
    static ref QUOTED_REPLY: Regex = Regex::new(r">.*").expect("QUOTED_REPLY regex is valid");

    // Sign-offs and trailers, through end of text
    static ref SINCERELY: Regex = Regex::new(r"(?is)Sincerely.*").expect("SINCERELY regex is valid");
    static ref BEST_REGARDS: Regex = Regex::new(r"(?is)Best regards.*").expect("BEST_REGARDS regex is valid");
    static ref CONFIDENTIALITY_NOTICE: Regex = Regex::new(
        r"(?is)Confidentiality Notice.*"
    ).expect("CONFIDENTIALITY_NOTICE regex is valid");
}

pub struct BoilerplateCleaner {
    passes: Vec<&'static Regex>,
}

impl BoilerplateCleaner {
    pub fn new() -> Self {
        // order matters: later passes only ever see what earlier ones kept
        let passes: Vec<&'static Regex> = vec![
            &*ORIGINAL_MESSAGE,
            &*FROM_LINE,
            &*TO_LINE,
            &*SENT_LINE,
            &*SUBJECT_LINE,
            &*QUOTED_REPLY,
            &*SINCERELY,
            &*BEST_REGARDS,
            &*CONFIDENTIALITY_NOTICE,
        ];

        Self { passes }
    }

    pub fn clean(&self, text: &str) -> String {
        let mut cleaned = text.to_string();

        for pattern in &self.passes {
            if pattern.is_match(&cleaned) {
                cleaned = pattern.replace_all(&cleaned, "").into_owned();
            }
        }

        self.drop_blank_lines(&cleaned)
    }

    fn drop_blank_lines(&self, text: &str) -> String {
        text.split('\n')
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

impl Default for BoilerplateCleaner {
    fn default() -> Self {
        Self::new()
    }
}
