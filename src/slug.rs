/// Fold common Latin accented letters to their ASCII base letter
fn fold_char(c: char) -> Option<char> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'ñ' | 'ń' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => 'u',
        'ý' | 'ÿ' => 'y',
        'ß' => 's',
        'ž' | 'ź' | 'ż' => 'z',
        'š' | 'ś' => 's',
        'ł' => 'l',
        _ => return None,
    };
    Some(folded)
}

/// Lower-case, ASCII, hyphen-separated URL slug
///
/// Example: `"Glow & Co. / Springfield"` → `"glow-co-springfield"`
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        let c = if c.is_ascii() { Some(c) } else { fold_char(c) };
        match c {
            Some(c) if c.is_ascii_alphanumeric() => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(c);
            }
            _ => pending_dash = true,
        }
    }

    slug
}

/// Slugify each non-empty part and join them with `-`
pub fn slugify_parts(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| slugify(part))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Glow Studio"), "glow-studio");
        assert_eq!(slugify("  Nails & Spa!! "), "nails-spa");
        assert_eq!(slugify("L'Atelier #5"), "l-atelier-5");
    }

    #[test]
    fn test_slugify_folds_accents() {
        assert_eq!(slugify("Café Beauté"), "cafe-beaute");
        assert_eq!(slugify("Español"), "espanol");
    }

    #[test]
    fn test_slugify_drops_unmapped_characters() {
        assert_eq!(slugify("美容院 42"), "42");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_parts_skips_empty() {
        assert_eq!(slugify_parts(&["", "Illinois", "Glow", "5"]), "illinois-glow-5");
        assert_eq!(slugify_parts(&["Springfield", "IL1"]), "springfield-il1");
    }
}
