use unicode_normalization::UnicodeNormalization;

use super::resolver::check_mx;
use super::types::MxStatus;

/// TLDs tried, in this fixed declared order, when guessing a company's
/// domain from its name.
const CANDIDATE_TLDS: &[&str] = &[".com", ".io", ".co", ".net", ".org", ".ai"];

/// Legal-entity suffixes stripped from a company name before domain
/// candidates are generated.
static LEGAL_SUFFIXES: phf::Set<&'static str> = phf::phf_set! {
    "inc",
    "incorporated",
    "llc",
    "ltd",
    "limited",
    "corp",
    "corporation",
    "co",
    "company",
    "group",
    "holdings",
    "plc",
};

/// Folds `name` to a bare ASCII slug suitable for use as a domain label:
/// lowercases, strips diacritics via NFKD decomposition, drops legal-entity
/// suffix words, and removes anything that is not an ASCII letter or digit.
pub fn slugify_company_name(name: &str) -> String {
    let folded: String = name
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let words: Vec<&str> = folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .filter(|w| !LEGAL_SUFFIXES.contains(w))
        .collect();

    words.join("")
}

fn is_combining_mark(c: char) -> bool {
    matches!(c as u32, 0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF)
}

/// Finds the first candidate domain (slug + one of [`CANDIDATE_TLDS`], in
/// order) that has at least one MX record.
///
/// Returns `None` if the slug is empty or no candidate resolves.
pub fn guess_domain(company_name: &str) -> Option<String> {
    let slug = slugify_company_name(company_name);
    if slug.is_empty() {
        return None;
    }

    for tld in CANDIDATE_TLDS {
        let candidate = format!("{slug}{tld}");
        if let Ok(MxStatus::Records(records)) = check_mx(&candidate) {
            if !records.is_empty() {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_strips_legal_suffix_and_punctuation() {
        assert_eq!(slugify_company_name("Analytical Engines"), "analyticalengines");
        assert_eq!(slugify_company_name("Acme, Inc."), "acme");
        assert_eq!(slugify_company_name("Acme Corp"), "acme");
    }

    #[test]
    fn slugify_folds_diacritics() {
        assert_eq!(slugify_company_name("Café René"), "caferene");
    }

    #[test]
    fn slugify_empty_name_is_empty() {
        assert_eq!(slugify_company_name("Inc."), "");
    }
}
