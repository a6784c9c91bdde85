//! Display name and validation code generation for gate staff.
//!
//! When a ticket is redeemed the gate screen shows a short whimsical French
//! name and an eight-character code so staff can confirm verbally which
//! redemption they are looking at. Both are cosmetic: neither value is
//! stored nor checked against anything.

use rand::seq::SliceRandom;
use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "Magique",
    "Fantastique",
    "Brillant",
    "Étoilé",
    "Lumineux",
    "Joyeux",
    "Festif",
    "Coloré",
    "Dansant",
    "Musicale",
    "Éclatant",
    "Radieux",
    "Pétillant",
    "Vibrant",
    "Harmonieux",
    "Céleste",
    "Merveilleux",
    "Enchanté",
    "Scintillant",
    "Triumphant",
];

const NOUNS: &[&str] = &[
    "Papillon",
    "Étoile",
    "Diamant",
    "Cristal",
    "Perle",
    "Licorne",
    "Dragon",
    "Phénix",
    "Aigle",
    "Lion",
    "Orchidée",
    "Rose",
    "Tournesol",
    "Iris",
    "Jasmin",
    "Océan",
    "Montagne",
    "Aurore",
    "Comète",
    "Galaxie",
    "Symphonie",
    "Mélodie",
    "Harmonie",
    "Rythme",
    "Accord",
];

const COLORS: &[&str] = &[
    "Doré",
    "Argenté",
    "Azur",
    "Pourpre",
    "Émeraude",
    "Saphir",
    "Rubis",
    "Ambre",
    "Jade",
    "Corail",
    "Turquoise",
    "Violet",
    "Indigo",
    "Cyan",
    "Magenta",
];

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LENGTH: usize = 8;

/// Generates a whimsical display name for a redeemed ticket.
pub fn generate_display_name() -> String {
    let mut rng = rand::thread_rng();

    // Slices are non-empty constants, choose never returns None.
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("Magique");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("Papillon");
    let color = COLORS.choose(&mut rng).copied().unwrap_or("Doré");

    match rng.gen_range(0..5) {
        0 => format!("{adjective} {noun}"),
        1 => format!("{noun} {color}"),
        2 => format!("{adjective} {noun} {color}"),
        3 => format!("{color} {adjective}"),
        _ => format!("L'{adjective} {noun}"),
    }
}

/// Generates an eight-character uppercase alphanumeric code.
pub fn generate_validation_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_uses_known_words() {
        for _ in 0..50 {
            let name = generate_display_name();
            assert!(!name.is_empty());
            let stripped = name.trim_start_matches("L'");
            let first_word = stripped.split(' ').next().unwrap();
            assert!(
                ADJECTIVES.contains(&first_word)
                    || NOUNS.contains(&first_word)
                    || COLORS.contains(&first_word),
                "unexpected first word: {first_word}"
            );
        }
    }

    #[test]
    fn validation_code_is_eight_uppercase_alphanumerics() {
        for _ in 0..50 {
            let code = generate_validation_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }
}
