//! Reference record for one movie and its conversion into evidence.

use cinecheck_core::{Attribute, ClaimId, Evidence};
use cinecheck_in::fuzzy::tokens;
use cinecheck_in::ClaimShape;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    /// Competitive Academy Award wins; unknown for sources that do not track it
    #[serde(default)]
    pub oscar_wins: Option<u32>,
    /// People credited with those wins
    #[serde(default)]
    pub oscar_winners: Vec<String>,
    /// Worldwide gross in US dollars
    #[serde(default)]
    pub box_office_usd: Option<u64>,
    #[serde(default)]
    pub runtime_minutes: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub overview: String,
}

impl MovieRecord {
    /// "The Revenant" (2015) → "the-revenant-2015"
    pub fn slug(&self) -> String {
        let mut parts = tokens(&self.title);
        parts.push(self.year.to_string());
        parts.join("-")
    }

    /// Values the record holds for an attribute, `None` when unknown.
    ///
    /// An empty `OscarWinners` list is returned only for a film known to
    /// have won nothing.
    pub fn values(&self, attribute: Attribute) -> Option<Vec<String>> {
        let values = match attribute {
            Attribute::Director => self.directors.clone(),
            Attribute::Cast => self.cast.clone(),
            Attribute::Genre => self.genres.clone(),
            Attribute::ReleaseYear => vec![self.year.to_string()],
            Attribute::OscarWins => vec![self.oscar_wins?.to_string()],
            Attribute::OscarWinners if self.oscar_wins == Some(0) => return Some(Vec::new()),
            Attribute::OscarWinners => self.oscar_winners.clone(),
            Attribute::BoxOffice => vec![self.box_office_usd?.to_string()],
            Attribute::Runtime => vec![self.runtime_minutes?.to_string()],
        };
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }

    /// One-line description used as the excerpt for statements that do not
    /// fit a known attribute.
    pub fn synopsis(&self) -> String {
        let mut line = format!("{} ({})", self.title, self.year);
        if !self.directors.is_empty() {
            line.push_str(&format!(", directed by {}", self.directors.join(", ")));
        }
        if !self.cast.is_empty() {
            line.push_str(&format!(", starring {}", self.cast.join(", ")));
        }
        line.push('.');
        if !self.overview.is_empty() {
            line.push(' ');
            line.push_str(&self.overview);
        }
        line
    }

    fn display_values(&self, attribute: Attribute, values: &[String]) -> String {
        match attribute {
            Attribute::BoxOffice => format!("${}", values.join(", ")),
            Attribute::Runtime => format!("{} minutes", values.join(", ")),
            Attribute::OscarWinners if values.is_empty() => "none".to_string(),
            _ => values.join(", "),
        }
    }
}

/// Evidence a record offers for a parsed claim. Empty when the record does
/// not know the claimed attribute.
pub fn evidence_for(
    record: &MovieRecord,
    shape: &ClaimShape,
    claim_id: ClaimId,
    source_ref: &str,
) -> Vec<Evidence> {
    match shape.attribute() {
        Some(attribute) => match record.values(attribute) {
            Some(values) => {
                let excerpt = format!(
                    "{} {}: {}",
                    record.title,
                    attribute,
                    record.display_values(attribute, &values)
                );
                vec![Evidence::new(claim_id, source_ref, excerpt).with_fact(attribute, values)]
            }
            None => Vec::new(),
        },
        None => vec![Evidence::new(claim_id, source_ref, record.synopsis())],
    }
}
