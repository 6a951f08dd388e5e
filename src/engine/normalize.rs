use icu_normalizer::ComposingNormalizerBorrowed;

/// Greek vowels carrying a tone mark, mapped to the toneless vowel.
const TONED_VOWELS: [(char, char); 16] = [
    ('ά', 'α'),
    ('έ', 'ε'),
    ('ή', 'η'),
    ('ί', 'ι'),
    ('ό', 'ο'),
    ('ύ', 'υ'),
    ('ώ', 'ω'),
    ('Ά', 'Α'),
    ('Έ', 'Ε'),
    ('Ή', 'Η'),
    ('Ί', 'Ι'),
    ('Ό', 'Ο'),
    ('Ύ', 'Υ'),
    ('Ώ', 'Ω'),
    ('ΐ', 'ι'),
    ('ΰ', 'υ'),
];

/// Trim, lowercase and compose (NFC).
pub fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    ComposingNormalizerBorrowed::new_nfc()
        .normalize(&lowered)
        .to_string()
}

fn strip_tone(ch: char) -> char {
    TONED_VOWELS
        .iter()
        .find(|(toned, _)| *toned == ch)
        .map(|&(_, bare)| bare)
        .unwrap_or(ch)
}

pub fn normalize_without_tones(text: &str) -> String {
    normalize(text).chars().map(strip_tone).collect()
}

/// True when the user's answer equals any accepted spelling after
/// normalization. With `ignore_tones`, tone marks on either side are dropped
/// before comparing.
pub fn check_answer<S: AsRef<str>>(
    user_answer: &str,
    correct_answers: &[S],
    ignore_tones: bool,
) -> bool {
    let canon: fn(&str) -> String = if ignore_tones {
        normalize_without_tones
    } else {
        normalize
    };
    let user = canon(user_answer);
    correct_answers
        .iter()
        .any(|answer| canon(answer.as_ref()) == user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Είμαι \n"), "είμαι");
        assert_eq!(normalize("ΕΧΩ"), "εχω");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_composes_combining_tone() {
        // alpha + combining acute accent
        let decomposed = "\u{03B1}\u{0301}";
        assert_eq!(normalize(decomposed), "ά");
        // Greek oxia form is canonically equivalent to tonos
        assert_eq!(normalize("\u{1F71}"), "ά");
    }

    #[test]
    fn test_normalize_final_sigma() {
        assert_eq!(normalize("ΓΡΆΦΕΙΣ"), "γράφεις");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["  Είμαι", "ΈΧΟΥΜΕ ", "\u{03B5}\u{0301}\u{03C7}\u{03C9}", "Hello World", ""] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_normalize_without_tones_strips_all_table_entries() {
        assert_eq!(normalize_without_tones("άέήίόύώ"), "αεηιουω");
        assert_eq!(normalize_without_tones("ΆΈΉΊΌΎΏ"), "αεηιουω");
        assert_eq!(normalize_without_tones("ΐΰ"), "ιυ");
        // diaeresis without tone is left alone
        assert_eq!(normalize_without_tones("ϊϋ"), "ϊϋ");
        assert_eq!(normalize_without_tones("abc"), "abc");
    }

    #[test]
    fn test_normalize_without_tones_is_projection() {
        for input in ["Είμαι", "έγραψα", "ΰ", "  ΑΥΤΌΣ "] {
            let once = normalize_without_tones(input);
            assert_eq!(normalize_without_tones(&once), once);
        }
    }

    #[test]
    fn test_check_answer_tone_sensitivity() {
        assert!(!check_answer("ειμαι", &["είμαι"], false));
        assert!(check_answer("ειμαι", &["είμαι"], true));
        assert!(check_answer("είμαι", &["είμαι"], false));
    }

    #[test]
    fn test_check_answer_misplaced_tone() {
        assert!(!check_answer("ειμάι", &["είμαι"], false));
        assert!(check_answer("ειμάι", &["είμαι"], true));
        // a different word still fails once tones are stripped
        assert!(!check_answer("είσαι", &["είμαι"], true));
    }

    #[test]
    fn test_check_answer_any_variant() {
        let variants = ["έχουν", "έχουνε"];
        assert!(check_answer("Έχουνε ", &variants, false));
        assert!(check_answer("έχουν", &variants, false));
        assert!(!check_answer("έχει", &variants, false));
    }

    #[test]
    fn test_check_answer_empty_inputs() {
        let none: [&str; 0] = [];
        assert!(!check_answer("είμαι", &none, false));
        assert!(!check_answer("", &none, true));
        assert!(!check_answer("", &["είμαι"], false));
    }
}
