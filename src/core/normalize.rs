use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Folds `text` for accent- and case-insensitive comparison: lowercases,
/// decomposes (NFD) and drops combining marks, so `"Açúcar"` becomes `"acucar"`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accents_and_case_fold_together() {
        assert_eq!(normalize("café"), normalize("CAFE"));
        assert_eq!(normalize("açúcar"), "acucar");
        assert_eq!(normalize("Algodão"), "algodao");
        assert_eq!(normalize("Hortifrúti"), "hortifruti");
    }

    #[test]
    fn test_output_is_lowercase_and_mark_free() {
        for input in ["MAÇÃ", "Melão", "ÉÈÊË", "İstanbul", "naïve Ünïcödé", ""] {
            let folded = normalize(input);
            assert_eq!(folded, folded.to_lowercase(), "input {input:?}");
            assert!(
                !folded.nfd().any(is_combining_mark),
                "combining mark left in {folded:?}"
            );
        }
    }

    #[test]
    fn test_idempotent() {
        for input in ["Café", "AÇÚCAR", "trigo", "İ", "ǅ", "Ωμέγα"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_plain_ascii_unchanged_except_case() {
        assert_eq!(normalize("Soja"), "soja");
        assert_eq!(normalize("mais valores"), "mais valores");
    }
}
