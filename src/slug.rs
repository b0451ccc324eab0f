use std::collections::HashSet;

const ID_LEN: usize = 9;
const FALLBACK_SLUG: &str = "page";

/// Normalizes a title into a URL-safe slug without checking uniqueness.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.to_lowercase().chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
            continue;
        }

        let folded = if c.is_ascii_alphanumeric() {
            None
        } else {
            match fold_diacritic(c) {
                Some(folded) => Some(folded),
                None => continue,
            }
        };

        if pending_separator && !out.is_empty() {
            out.push('-');
        }
        pending_separator = false;
        match folded {
            Some(folded) => out.push_str(folded),
            None => out.push(c),
        }
    }

    out
}

/// Derives a slug from `title` that is absent from `existing`, appending
/// `-1`, `-2`, ... as needed.
pub fn generate_unique_slug<'a, I>(title: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();

    let mut base = slugify(title);
    if base.is_empty() {
        base = FALLBACK_SLUG.to_owned();
    }

    if !taken.contains(base.as_str()) {
        return base;
    }

    let mut counter = 1usize;
    loop {
        let candidate = format!("{base}-{counter}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        counter += 1;
    }
}

pub fn generate_id() -> String {
    let mut value = uuid::Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(ID_LEN);
    while out.len() < ID_LEN {
        let digit = (value % 36) as u32;
        value /= 36;
        out.push(char::from_digit(digit, 36).unwrap_or('0'));
    }
    out
}

fn fold_diacritic(c: char) -> Option<&'static str> {
    let folded = match c {
        'ä' | 'æ' => "ae",
        'ö' | 'ø' | 'œ' => "oe",
        'ü' => "ue",
        'ß' => "ss",
        'å' => "aa",
        'á' | 'à' | 'â' | 'ã' | 'ā' | 'ą' => "a",
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => "e",
        'í' | 'ì' | 'î' | 'ï' | 'ī' => "i",
        'ó' | 'ò' | 'ô' | 'õ' | 'ō' => "o",
        'ú' | 'ù' | 'û' | 'ū' | 'ů' => "u",
        'ý' | 'ÿ' => "y",
        'ç' | 'č' | 'ć' => "c",
        'ñ' | 'ń' | 'ň' => "n",
        'š' | 'ś' => "s",
        'ž' | 'ź' | 'ż' => "z",
        'ł' => "l",
        'đ' | 'ď' => "d",
        'ř' => "r",
        'ť' => "t",
        _ => return None,
    };
    Some(folded)
}
