use std::sync::OnceLock;

use regex::Regex;

use idscan_core::nationality::nationality_or_sentinel;
use idscan_core::{DocumentFields, DocumentKind};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// MRZ line: `P<` + issuing country + surname + `<` + given names padded with `<`.
re!(re_mrz_name, r"P<[A-Z]{3}([A-Z]+)<([A-Z<]+)");
re!(re_mrz_issuer, r"P<([A-Z]{3})");

// License layout: the field marker `1` on its own line, name on the next.
re!(re_license_name, r"(?m)^1\n([A-Z][A-Z ]*)$");
re!(re_dl_number, r"\b(W\d{6})\b");
// Marker `1` at end of line, a blank line, then two address lines.
re!(re_address, r"\b1\n\n([^\n]+)\n([^\n]+)");

re!(re_passport_number, r"(?m)^(\d{9})$");

// MRZ date-of-birth digits run straight into the sex character.
re!(re_gender_mrz, r"\d{6}([MF<])");
re!(re_gender_label, r"\bSex\s?([MF])\b");

re!(re_dob_compact, r"\b(\d{1,2}[A-Za-z]{3}\s\d{4})\b");
// `3D0B` is the usual OCR garbling of the license `DOB` label.
re!(re_dob_label, r"\b3D0B(\d{2}/\d{2}/\d{4})\b");

re!(re_date_spaced, r"\b(\d{1,2}\s[A-Za-z]{3}\s\d{4})\b");
re!(re_expiry_label, r"\bExp(\d{2}/\d{2}/\d{4})");

// Positional: `Place of birth` line, at most one line between, the `Sex`
// line, then the captured line. Brittle to any other layout drift — that is
// inherent to position-based capture on linearized OCR output.
re!(re_place_of_birth, r"Place of birth[^\n]*\n(?:[^\n]*\n)?Sex[^\n]*\n([^\n]+)");

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Classify the document type from recognized text.
    ///
    /// `PASSPORT` is checked before `LICENSE`. An MRZ token counts as
    /// passport evidence even when the cover word itself was not read.
    pub fn classify(text: &str) -> DocumentKind {
        if text.contains("PASSPORT") {
            DocumentKind::Passport
        } else if text.contains("LICENSE") {
            DocumentKind::License
        } else if re_mrz_issuer().is_match(text) {
            DocumentKind::Passport
        } else {
            DocumentKind::Unknown
        }
    }

    /// Extract identity fields from raw OCR text.
    ///
    /// Total and infallible: any input shape yields a (possibly empty)
    /// mapping. Layout-specific rules are skipped once the document is
    /// classified as the other type; an `Unknown` document tries everything.
    pub fn extract(text: &str) -> DocumentFields {
        let kind = Self::classify(text);
        let mut fields = DocumentFields {
            id_type: kind.id_type_label().map(str::to_owned),
            ..Default::default()
        };

        if kind.may_be_passport() {
            if let Some((last, first)) = Self::mrz_name(text) {
                fields.last_name = Some(last);
                fields.first_name = first;
            }
            fields.nationality = Self::nationality(text);
            fields.passport_number = Self::passport_number(text);
            fields.place_of_birth = Self::place_of_birth(text);
        }

        if kind.may_be_license() {
            fields.name = Self::license_name(text);
            fields.dl_number = Self::dl_number(text);
            let (line_1, line_2) = Self::address(text);
            fields.address_line_1 = line_1;
            fields.address_line_2 = line_2;
        }

        fields.gender = Self::gender(text);
        fields.dob = Self::date_of_birth(text);
        fields.date_of_issue = Self::date_of_issue(text);
        fields.expiry_date = Self::expiry_date(text, kind);

        fields
    }

    // ── Names ────────────────────────────────────────────────────────────────

    /// Surname plus given names from the MRZ line. Given names may be all
    /// filler (`<`), in which case only the surname is reported.
    fn mrz_name(text: &str) -> Option<(String, Option<String>)> {
        let c = re_mrz_name().captures(text)?;
        let last = c.get(1)?.as_str().to_string();
        let first = non_empty(&c.get(2)?.as_str().replace('<', " "));
        Some((last, first))
    }

    fn license_name(text: &str) -> Option<String> {
        let c = re_license_name().captures(text)?;
        non_empty(c.get(1)?.as_str())
    }

    // ── Numbers ──────────────────────────────────────────────────────────────

    /// A line consisting of exactly nine digits. Line-anchored so a longer
    /// digit run is never split into a false passport number.
    fn passport_number(text: &str) -> Option<String> {
        let c = re_passport_number().captures(text)?;
        Some(c.get(1)?.as_str().to_string())
    }

    fn dl_number(text: &str) -> Option<String> {
        let c = re_dl_number().captures(text)?;
        Some(c.get(1)?.as_str().to_string())
    }

    // ── Nationality ──────────────────────────────────────────────────────────

    /// Issuing-country code from the MRZ, mapped through the fixed table.
    /// An unrecognized code still sets the field — to the sentinel.
    fn nationality(text: &str) -> Option<String> {
        let c = re_mrz_issuer().captures(text)?;
        Some(nationality_or_sentinel(c.get(1)?.as_str()).to_string())
    }

    // ── Gender ───────────────────────────────────────────────────────────────

    /// MRZ form first, `Sex` label as the license fallback.
    fn gender(text: &str) -> Option<String> {
        if let Some(c) = re_gender_mrz().captures(text) {
            return Some(c.get(1)?.as_str().to_string());
        }
        let c = re_gender_label().captures(text)?;
        Some(c.get(1)?.as_str().to_string())
    }

    // ── Dates ────────────────────────────────────────────────────────────────

    fn date_of_birth(text: &str) -> Option<String> {
        if let Some(c) = re_dob_compact().captures(text) {
            return Some(c.get(1)?.as_str().to_string());
        }
        let c = re_dob_label().captures(text)?;
        Some(c.get(1)?.as_str().to_string())
    }

    /// First occurrence of the spaced date shape, verbatim.
    fn date_of_issue(text: &str) -> Option<String> {
        let c = re_date_spaced().captures(text)?;
        Some(c.get(1)?.as_str().to_string())
    }

    /// License-typed documents require the `Exp` label. Everything else
    /// takes the bare date shape first, so a document with a single spaced
    /// date reports it as both issue and expiry: the two fields share one
    /// text shape and only the license layout carries a distinguishing
    /// label. Deliberate, preserved behavior.
    fn expiry_date(text: &str, kind: DocumentKind) -> Option<String> {
        let labeled = || {
            re_expiry_label()
                .captures(text)
                .and_then(|c| c.get(1).map(|m| m.as_str().to_string()))
        };
        if kind == DocumentKind::License {
            return labeled();
        }
        Self::date_of_issue(text).or_else(labeled)
    }

    // ── Positional fields ────────────────────────────────────────────────────

    fn place_of_birth(text: &str) -> Option<String> {
        let c = re_place_of_birth().captures(text)?;
        non_empty(c.get(1)?.as_str())
    }

    fn address(text: &str) -> (Option<String>, Option<String>) {
        match re_address().captures(text) {
            Some(c) => (
                c.get(1).and_then(|m| non_empty(m.as_str())),
                c.get(2).and_then(|m| non_empty(m.as_str())),
            ),
            None => (None, None),
        }
    }
}

/// Absence is encoded as a missing key, never an empty value.
fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
