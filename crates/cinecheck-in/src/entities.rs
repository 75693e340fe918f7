//! Value extraction for claim shapes.
//!
//! Parses the typed pieces of a movie claim:
//! - titles (quotes, "the film" prefixes and trailing years removed)
//! - person name lists ("Leonardo DiCaprio and Kate Winslet")
//! - counts, including number words ("three Oscars")
//! - money amounts ("$2.1 billion", "839 million dollars")
//! - durations ("194 minutes", "2 hours and 28 minutes")

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TITLE_PREFIX: Regex = Regex::new(r"(?i)^(?:the\s+)?(?:film|movie|picture)\s+").unwrap();
    static ref TITLE_SUFFIX: Regex = Regex::new(r"(?i)(?:\s+\((?:18|19|20)\d{2}\)|\s+in\s+(?:18|19|20)\d{2}|\s*,.*)$").unwrap();

    /// Relative clauses and role descriptions trailing a name list
    static ref NAME_TAIL: Regex = Regex::new(
        r"(?i)(?:,?\s+(?:who|which|that)\b.*|\s+as\s+.*|\s+in\s+(?:the\s+)?(?:lead|leading|main|title)\s+roles?.*|\s+in\s+\d{4}.*)$"
    ).unwrap();
    static ref NAME_SEPARATOR: Regex = Regex::new(r"(?i)\s*,\s*(?:and\s+)?|\s+and\s+|\s*&\s*").unwrap();
    static ref NAME_PREFIX: Regex = Regex::new(r"(?i)^(?:actors?|actress(?:es)?|director|filmmaker)\s+").unwrap();

    static ref MONEY: Regex = Regex::new(
        r"(?i)\$?\s*(?P<num>\d+(?:,\d{3})*(?:\.\d+)?)\s*(?P<unit>billion|bn|b|million|mil|mn|m|thousand|k)?\b"
    ).unwrap();
    static ref MONEY_WORDS: Regex = Regex::new(
        r"(?i)\b(?P<word>[a-z]+)\s+(?P<unit>billion|million|thousand)\b"
    ).unwrap();

    static ref HOURS_MINUTES: Regex = Regex::new(
        r"(?i)(?P<h>\d+)\s*(?:hours?|hrs?|h)\b(?:\s*(?:and\s+)?(?P<m>\d+)\s*(?:minutes?|mins?|m)\b)?"
    ).unwrap();
    static ref MINUTES: Regex = Regex::new(r"(?i)(?P<m>\d+)\s*(?:minutes?|mins?)\b").unwrap();
}

/// Canonical movie title from a captured subject.
pub fn clean_title(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace());
    let no_prefix = TITLE_PREFIX.replace(trimmed, "");
    TITLE_SUFFIX.replace(&no_prefix, "").trim().to_string()
}

/// Split a list of person names, dropping trailing role descriptions.
pub fn split_names(raw: &str) -> Vec<String> {
    let head = NAME_TAIL.replace(raw.trim(), "");
    NAME_SEPARATOR
        .split(&head)
        .map(|n| NAME_PREFIX.replace(n.trim(), "").trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Cardinal number from digits or an English number word up to twenty.
pub fn parse_count(raw: &str) -> Option<u32> {
    let word = raw.trim().to_lowercase();
    if let Ok(n) = word.parse() {
        return Some(n);
    }
    let n = match word.as_str() {
        "zero" | "no" => 0,
        "a" | "an" | "one" | "single" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        _ => return None,
    };
    Some(n)
}

fn unit_multiplier(unit: Option<&str>) -> f64 {
    match unit.map(|u| u.to_lowercase()).as_deref() {
        Some("billion" | "bn" | "b") => 1e9,
        Some("million" | "mil" | "mn" | "m") => 1e6,
        Some("thousand" | "k") => 1e3,
        _ => 1.0,
    }
}

/// Money amount in dollars.
pub fn parse_money(raw: &str) -> Option<f64> {
    if let Some(caps) = MONEY.captures(raw) {
        let num: f64 = caps["num"].replace(',', "").parse().ok()?;
        return Some(num * unit_multiplier(caps.name("unit").map(|m| m.as_str())));
    }
    let caps = MONEY_WORDS.captures(raw)?;
    let n = parse_count(&caps["word"])?;
    Some(n as f64 * unit_multiplier(Some(&caps["unit"])))
}

/// Duration in minutes.
pub fn parse_minutes(raw: &str) -> Option<u32> {
    if let Some(caps) = HOURS_MINUTES.captures(raw) {
        let hours: u32 = caps["h"].parse().ok()?;
        let minutes: u32 = match caps.name("m") {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        return hours.checked_mul(60)?.checked_add(minutes);
    }
    let caps = MINUTES.captures(raw)?;
    caps["m"].parse().ok()
}

/// Four-digit year between 1800 and 2099.
pub fn parse_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.trim().parse().ok()?;
    (1800..2100).contains(&year).then_some(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("\"Titanic\""), "Titanic");
        assert_eq!(clean_title("the film Inception"), "Inception");
        assert_eq!(clean_title("Braveheart in 1995"), "Braveheart");
        assert_eq!(clean_title("Avatar (2009)"), "Avatar");
        assert_eq!(clean_title("The Revenant"), "The Revenant");
    }

    #[test]
    fn test_split_names() {
        assert_eq!(
            split_names("Leonardo DiCaprio and Kate Winslet"),
            vec!["Leonardo DiCaprio", "Kate Winslet"]
        );
        assert_eq!(
            split_names("Leonardo DiCaprio, Kate Winslet, and Billy Zane"),
            vec!["Leonardo DiCaprio", "Kate Winslet", "Billy Zane"]
        );
        assert_eq!(split_names("Mel Gibson as William Wallace"), vec!["Mel Gibson"]);
        assert_eq!(split_names("James Cameron, who also made Avatar"), vec!["James Cameron"]);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("three"), Some(3));
        assert_eq!(parse_count("11"), Some(11));
        assert_eq!(parse_count("many"), None);
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("$2.1 billion"), Some(2.1e9));
        assert_eq!(parse_money("839 million dollars"), Some(839e6));
        assert_eq!(parse_money("$2,264,743,305 worldwide"), Some(2_264_743_305.0));
        assert_eq!(parse_money("$533m"), Some(533e6));
        assert_eq!(parse_money("two billion dollars"), Some(2e9));
        assert_eq!(parse_money("a lot of money"), None);
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("194 minutes"), Some(194));
        assert_eq!(parse_minutes("2 hours and 28 minutes"), Some(148));
        assert_eq!(parse_minutes("3 hours"), Some(180));
        assert_eq!(parse_minutes("long"), None);
        assert_eq!(parse_minutes("99999999 hours"), None);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("1997"), Some(1997));
        assert_eq!(parse_year("3000"), None);
    }
}
