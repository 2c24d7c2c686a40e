//! Visit descriptions
//!
//! A visited place's description is kept as a pair: an optional canned
//! sentence chosen from the rating, and the user's own words. The sentence
//! is rendered against the place name on output, so re-rating a place swaps
//! the sentence without touching the user's comment.

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

/// Canned opening sentence of a generated description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionTemplate {
    /// Rating 5
    Unforgettable,
    /// Rating 4
    VeryGood,
    /// Rating 3
    Nice,
    /// Rating 2
    Average,
    /// Rating 1
    Disappointing,
    /// No usable rating
    Visited,
}

impl DescriptionTemplate {
    /// Order in which free text is matched against the templates
    pub const EXTRACTION_ORDER: [DescriptionTemplate; 6] = [
        DescriptionTemplate::Unforgettable,
        DescriptionTemplate::VeryGood,
        DescriptionTemplate::Nice,
        DescriptionTemplate::Average,
        DescriptionTemplate::Disappointing,
        DescriptionTemplate::Visited,
    ];

    pub fn for_rating(rating: Option<i32>) -> Self {
        match rating {
            Some(5) => DescriptionTemplate::Unforgettable,
            Some(4) => DescriptionTemplate::VeryGood,
            Some(3) => DescriptionTemplate::Nice,
            Some(2) => DescriptionTemplate::Average,
            Some(1) => DescriptionTemplate::Disappointing,
            _ => DescriptionTemplate::Visited,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptionTemplate::Unforgettable => "unforgettable",
            DescriptionTemplate::VeryGood => "very_good",
            DescriptionTemplate::Nice => "nice",
            DescriptionTemplate::Average => "average",
            DescriptionTemplate::Disappointing => "disappointing",
            DescriptionTemplate::Visited => "visited",
        }
    }

    /// Fixed text around the place name in the rendered sentence
    fn parts(&self) -> (&'static str, &'static str) {
        match self {
            DescriptionTemplate::Unforgettable => ("An incredible, unforgettable experience at ", "!"),
            DescriptionTemplate::VeryGood => ("A very good experience at ", "!"),
            DescriptionTemplate::Nice => ("A nice experience at ", "!"),
            DescriptionTemplate::Average => ("An average experience at ", "."),
            DescriptionTemplate::Disappointing => ("A disappointing experience at ", "."),
            DescriptionTemplate::Visited => ("We visited ", "!"),
        }
    }

    pub fn render(&self, name: &str) -> String {
        let (prefix, suffix) = self.parts();
        format!("{}{}{}", prefix, name, suffix)
    }

    /// Sentence for `place_name` at the start of a text, optionally followed
    /// by a comment. The name is matched literally, ignoring case.
    fn pattern(&self, place_name: &str) -> Result<Regex, regex::Error> {
        let (prefix, suffix) = self.parts();
        Regex::new(&format!(
            r"(?s)^{}(?i:{}){}(?:\s+(?P<comment>.*))?$",
            regex::escape(prefix),
            regex::escape(place_name),
            regex::escape(suffix)
        ))
    }
}

impl std::fmt::Display for DescriptionTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DescriptionTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::EXTRACTION_ORDER
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Invalid description template: {}", s))
    }
}

impl sqlx::Type<Postgres> for DescriptionTemplate {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for DescriptionTemplate {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for DescriptionTemplate {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Stored description of a visited place
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    #[sqlx(rename = "description_template")]
    pub template: Option<DescriptionTemplate>,
    #[sqlx(rename = "description_comment")]
    pub comment: Option<String>,
}

fn non_empty(comment: Option<String>) -> Option<String> {
    comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

impl Description {
    /// Description generated from a rating plus the user's own words
    pub fn generated(rating: Option<i32>, comment: Option<String>) -> Self {
        Self {
            template: Some(DescriptionTemplate::for_rating(rating)),
            comment: non_empty(comment),
        }
    }

    /// Recover the structured form of a free-text description.
    ///
    /// Templates are tried in `EXTRACTION_ORDER` and the first one whose
    /// sentence names `place_name` wins; anything after it becomes the
    /// comment. Text that matches no template is kept whole as the comment.
    pub fn parse(place_name: &str, text: &str) -> Self {
        let text = text.trim();
        let place_name = place_name.trim();
        for template in DescriptionTemplate::EXTRACTION_ORDER {
            let caps = match template.pattern(place_name) {
                Ok(pattern) => pattern.captures(text),
                Err(e) => {
                    tracing::warn!("Skipping description template {}: {}", template, e);
                    None
                }
            };
            let Some(caps) = caps else {
                continue;
            };
            return Self {
                template: Some(template),
                comment: non_empty(caps.name("comment").map(|m| m.as_str().to_string())),
            };
        }
        Self {
            template: None,
            comment: non_empty(Some(text.to_string())),
        }
    }

    /// Same comment, sentence chosen from the new rating
    pub fn rerated(&self, rating: i32) -> Self {
        Self {
            template: Some(DescriptionTemplate::for_rating(Some(rating))),
            comment: self.comment.clone(),
        }
    }

    pub fn render(&self, place_name: &str) -> String {
        let head = self.template.map(|t| t.render(place_name));
        match (head, self.comment.as_deref()) {
            (Some(head), Some(comment)) => format!("{} {}", head, comment),
            (Some(head), None) => head,
            (None, Some(comment)) => comment.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Render the generated description for a rating and optional comment
pub fn generate(place_name: &str, rating: Option<i32>, comment: Option<&str>) -> String {
    Description::generated(rating, comment.map(str::to_string)).render(place_name)
}
