use crate::error::ParseError;

const UNIT_ORDINALS: [&str; 19] = [
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
    "sixth",
    "seventh",
    "eighth",
    "ninth",
    "tenth",
    "eleventh",
    "twelfth",
    "thirteenth",
    "fourteenth",
    "fifteenth",
    "sixteenth",
    "seventeenth",
    "eighteenth",
    "nineteenth",
];

// Index 0 is twenty.
const TENS_CARDINALS: [&str; 8] = [
    "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const TENS_ORDINALS: [&str; 8] = [
    "twentieth",
    "thirtieth",
    "fortieth",
    "fiftieth",
    "sixtieth",
    "seventieth",
    "eightieth",
    "ninetieth",
];

/// Converts a spelled-out ordinal ("Second", "twenty-first") to its value.
pub fn ordinal_to_number(word: &str) -> Result<u32, ParseError> {
    let lower = word.trim().to_lowercase();

    if let Some(value) = simple_ordinal(&lower) {
        return Ok(value);
    }

    if let Some((tens, unit)) = lower.split_once(['-', ' ']) {
        let tens_value = TENS_CARDINALS
            .iter()
            .position(|t| *t == tens)
            .map(|i| (i as u32 + 2) * 10);
        let unit_value = UNIT_ORDINALS[..9]
            .iter()
            .position(|u| *u == unit)
            .map(|i| i as u32 + 1);
        if let (Some(tens_value), Some(unit_value)) = (tens_value, unit_value) {
            return Ok(tens_value + unit_value);
        }
    }

    Err(ParseError::UnknownOrdinal(word.to_string()))
}

fn simple_ordinal(lower: &str) -> Option<u32> {
    if let Some(i) = UNIT_ORDINALS.iter().position(|u| *u == lower) {
        return Some(i as u32 + 1);
    }
    if let Some(i) = TENS_ORDINALS.iter().position(|t| *t == lower) {
        return Some((i as u32 + 2) * 10);
    }
    if lower == "hundredth" {
        return Some(100);
    }
    None
}

/// Short ordinal form of a number: 1 -> "1st", 12 -> "12th", 22 -> "22nd".
pub fn short_ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_words() {
        let cases = vec![
            ("First", 1),
            ("second", 2),
            ("THIRD", 3),
            ("Fourth", 4),
            ("Twelfth", 12),
            ("Nineteenth", 19),
            ("Twentieth", 20),
            ("Twenty-First", 21),
            ("thirty-second", 32),
            ("Ninetieth", 90),
            ("hundredth", 100),
        ];

        for (input, expected) in cases {
            assert_eq!(ordinal_to_number(input), Ok(expected), "input: {}", input);
        }
    }

    #[test]
    fn test_unknown_ordinal_words() {
        for input in ["Anniversary", "Global", "Bilingual", "twenty-tenth", ""] {
            assert_eq!(
                ordinal_to_number(input),
                Err(ParseError::UnknownOrdinal(input.to_string()))
            );
        }
    }

    #[test]
    fn test_short_ordinal() {
        let cases = vec![
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (10, "10th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (102, "102nd"),
            (111, "111th"),
        ];

        for (input, expected) in cases {
            assert_eq!(short_ordinal(input), expected);
        }
    }
}
