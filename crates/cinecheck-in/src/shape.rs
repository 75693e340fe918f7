//! Claim-shape parsing: which movie, which attribute, which value.
//!
//! Patterns are tried in a fixed order; the first that yields a usable value
//! wins. Claims matching none are `Freeform`.

use crate::entities::{clean_title, parse_count, parse_minutes, parse_money, parse_year, split_names};
use cinecheck_core::Attribute;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref DIRECTED_BY: Regex = Regex::new(
        r"(?i)^(?P<movie>.+?)\s+(?:was|is)\s+(?:also\s+)?(?:co-)?directed\s+by\s+(?P<people>.+)$"
    ).unwrap();
    static ref PERSON_DIRECTED: Regex = Regex::new(
        r"(?i)^(?P<people>.+?)\s+(?:also\s+)?(?:co-)?directed\s+(?:the\s+(?:film|movie)\s+)?(?P<movie>.+)$"
    ).unwrap();
    static ref STARRED_IN: Regex = Regex::new(
        r"(?i)^(?P<people>.+?)\s+(?:also\s+)?(?:starred|stars|acted|appeared|played)\s+in\s+(?P<movie>.+)$"
    ).unwrap();
    static ref MOVIE_STARRED: Regex = Regex::new(
        r"(?i)^(?P<movie>.+?)\s+(?:starred|stars|starring|featured|features|co-starred)\s+(?P<people>.+)$"
    ).unwrap();
    static ref RELEASED: Regex = Regex::new(
        r"(?i)^(?P<movie>.+?)\s+(?:was\s+|is\s+)?(?:first\s+|originally\s+)?(?:released|came\s+out|premiered|debuted|opened)\b.*?\b(?P<year>(?:18|19|20)\d{2})\b"
    ).unwrap();
    static ref YEAR_FILM: Regex = Regex::new(
        r"(?i)^(?P<movie>.+?)\s+(?:is|was)\s+an?\s+(?P<year>(?:18|19|20)\d{2})\s+(?:[\w-]+\s+)*?(?:film|movie|picture)\b"
    ).unwrap();
    static ref OSCAR_COUNT: Regex = Regex::new(
        r"(?i)^(?P<movie>.+?)\s+(?:won|wins|received|earned|took\s+home|garnered|picked\s+up)\s+(?:(?P<qual>a\s+total\s+of|at\s+least|over|more\s+than)\s+)?(?P<count>\d+|[a-z]{3,})\s+(?:academy\s+awards?|oscars?)\b"
    ).unwrap();
    static ref OSCAR_ANY: Regex = Regex::new(
        r"(?i)^(?P<movie>.+?)\s+(?:won|received|earned)\s+(?:an?|the|his|her|their)\s+(?:best\s+(?:[\w-]+\s+){1,3}?)?(?:academy\s+award|oscar)\b(?:\s+for\s+(?P<for>.+))?$"
    ).unwrap();
    static ref BEST_CATEGORY_FOR: Regex = Regex::new(r"(?i)^best\s+.+?\s+for\s+(?P<movie>.+)$").unwrap();
    static ref NOMINATION: Regex = Regex::new(r"(?i)^[\s-]*nominat").unwrap();
    static ref MONEY_VERB: Regex = Regex::new(
        r"(?i)^(?P<movie>.+?)\s+(?:has\s+)?(?:made|grossed|earned|took\s+in|brought\s+in|raked\s+in|generated)\s+(?P<amount>.+)$"
    ).unwrap();
    static ref RUNTIME: Regex = Regex::new(
        r"(?i)^(?P<movie>.+?)\s+(?:runs(?:\s+for)?|ran(?:\s+for)?|lasts|lasted|is|was|has\s+a\s+(?:runtime|running\s+time|run\s+time)\s+of|clocks\s+in\s+at)\s+(?:about\s+|around\s+|roughly\s+|approximately\s+|nearly\s+|over\s+)?(?P<amount>\d+\s*(?:hours?|hrs?|minutes?|mins?)\b.*)$"
    ).unwrap();
    static ref GENRE: Regex = Regex::new(
        r"(?i)^(?P<movie>.+?)\s+(?:is|was)\s+(?:an?\s+)?(?:(?:american|british|epic|classic)\s+)?(?P<genre>romantic\s+drama|historical\s+drama|war\s+drama|science\s+fiction|sci-fi|drama|comedy|romance|thriller|horror|animated|animation|action|war|historical|crime|fantasy|adventure|documentary|musical|western|mystery|biographical|biopic)\b"
    ).unwrap();
}

/// Typed value a claim asserts.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimValue {
    Names(Vec<String>),
    Text(String),
    Year(i32),
    /// `at_least` for "won an Oscar" style claims
    Count { n: u32, at_least: bool },
    Money(f64),
    Minutes(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClaimShape {
    Movie {
        movie: String,
        attribute: Attribute,
        value: ClaimValue,
        /// The claim names the person first ("Mel Gibson directed Braveheart")
        person_subject: bool,
    },
    Freeform,
}

impl ClaimShape {
    fn movie_claim(movie: &str, attribute: Attribute, value: ClaimValue) -> Option<Self> {
        let movie = clean_title(movie);
        if movie.is_empty() {
            return None;
        }
        Some(ClaimShape::Movie {
            movie,
            attribute,
            value,
            person_subject: false,
        })
    }

    fn people_claim(caps: &Captures, attribute: Attribute, person_subject: bool) -> Option<Self> {
        let names = split_names(&caps["people"]);
        if names.is_empty() {
            return None;
        }
        let movie = clean_title(&caps["movie"]);
        if movie.is_empty() {
            return None;
        }
        Some(ClaimShape::Movie {
            movie,
            attribute,
            value: ClaimValue::Names(names),
            person_subject,
        })
    }

    /// "<person> won an Oscar for <film>"
    fn award_claim(person: &str, film: &str) -> Option<Self> {
        let names = split_names(person);
        if names.is_empty() {
            return None;
        }
        let movie = clean_title(film);
        if movie.is_empty() {
            return None;
        }
        Some(ClaimShape::Movie {
            movie,
            attribute: Attribute::OscarWinners,
            value: ClaimValue::Names(names),
            person_subject: true,
        })
    }

    pub fn movie(&self) -> Option<&str> {
        match self {
            ClaimShape::Movie { movie, .. } => Some(movie),
            ClaimShape::Freeform => None,
        }
    }

    pub fn attribute(&self) -> Option<Attribute> {
        match self {
            ClaimShape::Movie { attribute, .. } => Some(*attribute),
            ClaimShape::Freeform => None,
        }
    }

    pub fn value(&self) -> Option<&ClaimValue> {
        match self {
            ClaimShape::Movie { value, .. } => Some(value),
            ClaimShape::Freeform => None,
        }
    }

    /// First person named by a director, cast or award claim.
    pub fn person(&self) -> Option<&str> {
        match self {
            ClaimShape::Movie {
                value: ClaimValue::Names(names),
                ..
            } => names.first().map(String::as_str),
            _ => None,
        }
    }

    /// Whether the sentence subject is the person rather than the movie.
    pub fn has_person_subject(&self) -> bool {
        matches!(self, ClaimShape::Movie { person_subject: true, .. })
    }

    pub fn is_freeform(&self) -> bool {
        matches!(self, ClaimShape::Freeform)
    }
}

/// Parse the canonical claim text into its shape.
pub fn parse_claim(text: &str) -> ClaimShape {
    let text = text.trim().trim_end_matches(['.', '!', ';']);
    parse_people(text)
        .or_else(|| parse_release(text))
        .or_else(|| parse_oscars(text))
        .or_else(|| parse_box_office(text))
        .or_else(|| parse_runtime(text))
        .or_else(|| parse_genre(text))
        .unwrap_or(ClaimShape::Freeform)
}

fn parse_people(text: &str) -> Option<ClaimShape> {
    if let Some(caps) = DIRECTED_BY.captures(text) {
        return ClaimShape::people_claim(&caps, Attribute::Director, false);
    }
    if let Some(caps) = STARRED_IN.captures(text) {
        return ClaimShape::people_claim(&caps, Attribute::Cast, true);
    }
    if let Some(caps) = PERSON_DIRECTED.captures(text) {
        // "Titanic, directed by James Cameron, ..." is not person-first
        if !caps["movie"].to_lowercase().starts_with("by ") {
            return ClaimShape::people_claim(&caps, Attribute::Director, true);
        }
    }
    let caps = MOVIE_STARRED.captures(text)?;
    ClaimShape::people_claim(&caps, Attribute::Cast, false)
}

fn parse_release(text: &str) -> Option<ClaimShape> {
    let caps = RELEASED.captures(text).or_else(|| YEAR_FILM.captures(text))?;
    let year = parse_year(&caps["year"])?;
    ClaimShape::movie_claim(&caps["movie"], Attribute::ReleaseYear, ClaimValue::Year(year))
}

fn parse_oscars(text: &str) -> Option<ClaimShape> {
    if let Some(caps) = OSCAR_COUNT.captures(text) {
        // "14 Oscar nominations" says nothing about wins
        if is_nomination(text, &caps) {
            return None;
        }
        let n = parse_count(&caps["count"])?;
        let value = match caps.name("qual").map(|q| q.as_str().to_lowercase()) {
            Some(q) if q == "at least" => ClaimValue::Count { n, at_least: true },
            Some(q) if q == "over" || q.starts_with("more") => ClaimValue::Count {
                n: n.checked_add(1)?,
                at_least: true,
            },
            _ => ClaimValue::Count { n, at_least: false },
        };
        return ClaimShape::movie_claim(&caps["movie"], Attribute::OscarWins, value);
    }

    let caps = OSCAR_ANY.captures(text)?;
    let subject = &caps["movie"];
    // "X won an Oscar for <movie>" credits a person; "for Best Picture" or
    // "for its score" is about the subject film itself
    let film = match caps.name("for").map(|f| f.as_str()) {
        Some(target) if target.to_lowercase().starts_with("best ") => {
            BEST_CATEGORY_FOR.captures(target).map(|inner| inner["movie"].to_string())
        }
        Some(target) if target.starts_with(char::is_uppercase) || target.starts_with('"') => {
            Some(target.to_string())
        }
        _ => None,
    };
    match film {
        Some(film) => ClaimShape::award_claim(subject, &film),
        None => {
            let value = ClaimValue::Count { n: 1, at_least: true };
            ClaimShape::movie_claim(subject, Attribute::OscarWins, value)
        }
    }
}

fn is_nomination(text: &str, caps: &Captures) -> bool {
    caps.get(0).is_some_and(|m| NOMINATION.is_match(&text[m.end()..]))
}

fn parse_box_office(text: &str) -> Option<ClaimShape> {
    let caps = MONEY_VERB.captures(text)?;
    let amount = parse_money(&caps["amount"])?;
    ClaimShape::movie_claim(&caps["movie"], Attribute::BoxOffice, ClaimValue::Money(amount))
}

fn parse_runtime(text: &str) -> Option<ClaimShape> {
    let caps = RUNTIME.captures(text)?;
    let minutes = parse_minutes(&caps["amount"])?;
    ClaimShape::movie_claim(&caps["movie"], Attribute::Runtime, ClaimValue::Minutes(minutes))
}

fn parse_genre(text: &str) -> Option<ClaimShape> {
    let caps = GENRE.captures(text)?;
    let genre = match caps["genre"].to_lowercase().as_str() {
        "sci-fi" => "science fiction".to_string(),
        "animated" => "animation".to_string(),
        "biopic" | "biographical" => "biography".to_string(),
        other => other.split_whitespace().collect::<Vec<_>>().join(" "),
    };
    ClaimShape::movie_claim(&caps["movie"], Attribute::Genre, ClaimValue::Text(genre))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_of(text: &str) -> String {
        parse_claim(text).movie().unwrap_or_default().to_string()
    }

    #[test]
    fn test_directed_by() {
        let shape = parse_claim("Braveheart was directed by Mel Gibson");
        assert_eq!(shape.attribute(), Some(Attribute::Director));
        assert_eq!(shape.movie(), Some("Braveheart"));
        assert_eq!(shape.value(), Some(&ClaimValue::Names(vec!["Mel Gibson".into()])));
        assert!(!shape.has_person_subject());
    }

    #[test]
    fn test_person_directed() {
        let shape = parse_claim("Christopher Nolan directed Inception");
        assert_eq!(shape.attribute(), Some(Attribute::Director));
        assert_eq!(shape.movie(), Some("Inception"));
        assert_eq!(shape.person(), Some("Christopher Nolan"));
        assert!(shape.has_person_subject());
    }

    #[test]
    fn test_cast_both_directions() {
        let a = parse_claim("Leonardo DiCaprio starred in Titanic");
        assert_eq!(a.attribute(), Some(Attribute::Cast));
        assert_eq!(a.movie(), Some("Titanic"));

        let b = parse_claim("Titanic starred Leonardo DiCaprio and Kate Winslet");
        assert_eq!(
            b.value(),
            Some(&ClaimValue::Names(vec!["Leonardo DiCaprio".into(), "Kate Winslet".into()]))
        );
    }

    #[test]
    fn test_release_year() {
        assert_eq!(
            parse_claim("Braveheart was released in 1995").value(),
            Some(&ClaimValue::Year(1995))
        );
        assert_eq!(
            parse_claim("Titanic is a 1997 American romantic drama film").value(),
            Some(&ClaimValue::Year(1997))
        );
        assert_eq!(
            parse_claim("Avatar premiered in December 2009").value(),
            Some(&ClaimValue::Year(2009))
        );
    }

    #[test]
    fn test_oscar_counts() {
        assert_eq!(
            parse_claim("Braveheart won three Oscars").value(),
            Some(&ClaimValue::Count { n: 3, at_least: false })
        );
        assert_eq!(
            parse_claim("Titanic won 11 Academy Awards").value(),
            Some(&ClaimValue::Count { n: 11, at_least: false })
        );
        assert_eq!(
            parse_claim("Inception won at least two Oscars").value(),
            Some(&ClaimValue::Count { n: 2, at_least: true })
        );
    }

    #[test]
    fn test_won_an_oscar() {
        let shape = parse_claim("Titanic won an Oscar for Best Picture");
        assert_eq!(shape.movie(), Some("Titanic"));
        assert_eq!(shape.attribute(), Some(Attribute::OscarWins));
        assert_eq!(shape.value(), Some(&ClaimValue::Count { n: 1, at_least: true }));

        let own = parse_claim("Titanic won an Oscar for its visual effects");
        assert_eq!(own.attribute(), Some(Attribute::OscarWins));
        assert_eq!(own.movie(), Some("Titanic"));
    }

    #[test]
    fn test_person_won_oscar_for_film() {
        let shape = parse_claim("Leonardo DiCaprio won an Oscar for The Revenant");
        assert_eq!(shape.attribute(), Some(Attribute::OscarWinners));
        assert_eq!(shape.movie(), Some("The Revenant"));
        assert_eq!(shape.person(), Some("Leonardo DiCaprio"));
        assert!(shape.has_person_subject());

        let category = parse_claim("Kate Winslet won an Oscar for Best Actress for Titanic");
        assert_eq!(category.attribute(), Some(Attribute::OscarWinners));
        assert_eq!(category.movie(), Some("Titanic"));
        assert_eq!(category.person(), Some("Kate Winslet"));

        let named = parse_claim("Heath Ledger won the Best Supporting Actor Oscar for The Dark Knight");
        assert_eq!(named.attribute(), Some(Attribute::OscarWinners));
        assert_eq!(named.movie(), Some("The Dark Knight"));

        assert_eq!(movie_of("Tom Hardy won an Oscar for \"The Revenant\""), "The Revenant");
    }

    #[test]
    fn test_nominations_are_not_wins() {
        assert!(parse_claim("Titanic received 14 Oscar nominations").is_freeform());
        assert!(parse_claim("Inception earned eight Academy Award nominations").is_freeform());
        assert!(parse_claim("Leonardo DiCaprio received an Oscar nomination for Titanic").is_freeform());
    }

    #[test]
    fn test_oscar_count_overflow() {
        assert!(parse_claim("Titanic won over 4294967295 Oscars").is_freeform());
        assert_eq!(
            parse_claim("Titanic won over 4294967294 Oscars").value(),
            Some(&ClaimValue::Count { n: u32::MAX, at_least: true })
        );
    }

    #[test]
    fn test_box_office() {
        let shape = parse_claim("Avatar grossed over $2.9 billion worldwide");
        assert_eq!(shape.attribute(), Some(Attribute::BoxOffice));
        assert_eq!(shape.value(), Some(&ClaimValue::Money(2.9e9)));
        assert_eq!(
            parse_claim("Titanic made 2 billion dollars").value(),
            Some(&ClaimValue::Money(2e9))
        );
    }

    #[test]
    fn test_earned_oscars_is_not_money() {
        assert_eq!(parse_claim("The Revenant earned 3 Oscars").attribute(), Some(Attribute::OscarWins));
    }

    #[test]
    fn test_runtime() {
        assert_eq!(
            parse_claim("Titanic runs 194 minutes").value(),
            Some(&ClaimValue::Minutes(194))
        );
        assert_eq!(
            parse_claim("Inception is 2 hours and 28 minutes long").value(),
            Some(&ClaimValue::Minutes(148))
        );
        assert!(parse_claim("Titanic runs 99999999 hours").is_freeform());
    }

    #[test]
    fn test_genre() {
        let shape = parse_claim("Toy Story is an animated film");
        assert_eq!(shape.attribute(), Some(Attribute::Genre));
        assert_eq!(shape.value(), Some(&ClaimValue::Text("animation".into())));
    }

    #[test]
    fn test_freeform() {
        assert!(parse_claim("Titanic was filmed in Baja California").is_freeform());
    }
}
