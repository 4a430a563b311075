// piiscan-context/src/keywords/mod.rs
use core::fmt;

use daachorse::DoubleArrayAhoCorasick;

/// Scans a line of text for marker keywords with word-boundary awareness.
pub struct KeywordScanner {
    automaton: DoubleArrayAhoCorasick<usize>,
}

impl fmt::Debug for KeywordScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordScanner")
            .field("automaton", &"<DoubleArrayAhoCorasick>")
            .finish()
    }
}

impl KeywordScanner {
    /// Creates a scanner over the given lowercase keyword list.
    pub fn new(patterns: &[&str]) -> Self {
        let automaton = DoubleArrayAhoCorasick::new(patterns.iter().copied())
            .expect("Failed to build Aho-Corasick automaton for keyword scanning");

        Self { automaton }
    }

    /// Vocabulary that suggests example/placeholder content.
    pub fn placeholder_markers() -> Self {
        Self::new(&[
            "example", "e.g", "sample", "dummy", "fake", "fictional", "placeholder",
            "test", "testing", "demo", "lorem", "ipsum", "mock", "fixture", "seed",
            "stub", "not real", "for example",
        ])
    }

    /// Vocabulary that suggests real-world contact or verification content.
    pub fn contact_markers() -> Self {
        Self::new(&[
            "contact", "call", "reach", "email", "mail", "phone", "mobile",
            "whatsapp", "support", "helpdesk", "customer", "client", "employee",
            "user", "applicant", "verification", "otp", "kyc", "uidai", "aadhaar",
        ])
    }

    /// Returns true if any keyword occurs in the line as a whole word.
    /// Employs word-boundary checks to ensure "demo" doesn't match "demographics".
    pub fn matches_line(&self, line: &str) -> bool {
        let lowered = line.to_lowercase();
        let hay = lowered.as_bytes();

        for matched in self.automaton.find_overlapping_iter(hay) {
            let m_start = matched.start();
            let m_end = matched.end();

            let prefix_ok = m_start == 0 || !hay[m_start - 1].is_ascii_alphanumeric();
            let suffix_ok = m_end == hay.len() || !hay[m_end].is_ascii_alphanumeric();

            if prefix_ok && suffix_ok {
                return true;
            }
        }
        false
    }
}
