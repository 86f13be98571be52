//! Shared types for backend communication

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A book as returned by the recommendation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    #[serde(default)]
    pub author: String,
    /// The service sometimes sends the year as a string ("1965")
    #[serde(default, deserialize_with = "deserialize_year")]
    pub year: i32,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub rating: f64,
    #[serde(default)]
    pub description: String,
    /// Only present on recommendation results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_reason: Option<String>,
}

impl Book {
    /// Copy of this book as stored in the library, without the match reason.
    pub fn without_match_reason(&self) -> Self {
        Self {
            match_reason: None,
            ..self.clone()
        }
    }
}

fn deserialize_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct YearVisitor;

    impl<'de> Visitor<'de> for YearVisitor {
        type Value = i32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a year as integer or string")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i32::try_from(value).map_err(|_| E::custom(format!("year out of range: {value}")))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i32::try_from(value).map_err(|_| E::custom(format!("year out of range: {value}")))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value as i32)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            // "c. 1850" and friends carry no usable year
            Ok(value.trim().parse().unwrap_or(0))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0)
        }
    }

    deserializer.deserialize_any(YearVisitor)
}

/// Missing and `null` ratings both read as 0
fn deserialize_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Genre filter offered by the search form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    /// No filter, sent as an empty string
    #[default]
    #[serde(rename = "")]
    Any,
    Fiction,
    Fantasy,
    Mystery,
    Romance,
}

impl Genre {
    pub const ALL: [Genre; 5] = [
        Genre::Any,
        Genre::Fiction,
        Genre::Fantasy,
        Genre::Mystery,
        Genre::Romance,
    ];

    /// Value sent on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Any => "",
            Genre::Fiction => "fiction",
            Genre::Fantasy => "fantasy",
            Genre::Mystery => "mystery",
            Genre::Romance => "romance",
        }
    }

    /// Parse a user-supplied genre name; empty and "any" mean no filter.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "" | "any" => Some(Genre::Any),
            "fiction" => Some(Genre::Fiction),
            "fantasy" => Some(Genre::Fantasy),
            "mystery" => Some(Genre::Mystery),
            "romance" => Some(Genre::Romance),
            _ => None,
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Genre::Any => "Any genre",
            Genre::Fiction => "Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendRequest {
    pub query: String,
    pub genre: Genre,
    pub min_rating: f32,
}

/// Body of a recommendation response; exactly one field is expected
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub recommendations: Option<Vec<Book>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Whatever we can salvage from a non-success body
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
