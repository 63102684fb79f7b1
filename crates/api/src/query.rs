//! Query parameter types for API handlers.

use serde::Deserialize;

/// `?age=N`
#[derive(Debug, Deserialize)]
pub struct AgeParams {
    pub age: i32,
}

/// `?min=A&max=B`, inclusive on both ends.
#[derive(Debug, Deserialize)]
pub struct AgeRangeParams {
    pub min: i32,
    pub max: i32,
}

/// `?limit=N`
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: i64,
}

/// `?letter=X`; defaults to `A` when absent.
#[derive(Debug, Deserialize)]
pub struct LetterParams {
    pub letter: Option<String>,
}

/// `?color=C` for an exact color match, or `?searchStr=S` for a
/// case-insensitive name/color substring search.
#[derive(Debug, Deserialize)]
pub struct FacultyColorParams {
    pub color: Option<String>,
    #[serde(rename = "searchStr")]
    pub search_str: Option<String>,
}
