use serde::{Deserialize, Serialize};

/// Star-rating block shared by course and review pages.
/// Absent from pages that have not collected any ratings yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub starrating: String,
    pub nratings: String,
    pub nreviews: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    pub name: String,
    pub url: String,
}

/// Structured record extracted from one course landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseProfile {
    pub title: String,
    pub partner: String,
    pub content: String,
    pub skills: Vec<String>,
    pub glance: Vec<String>,
    pub nweeks: u32,
    pub instructors: Vec<Instructor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRating {
    pub author: String,
    pub date: String,
    pub review: String,
}

/// Structured record extracted from one course reviews page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewProfile {
    pub title: String,
    pub first_comment_date: String,
    #[serde(default)]
    pub top_ratings: Vec<TopRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingSummary>,
}

/// Envelope written to `<kind>/json/<slug>.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeRecord<T> {
    pub name: String,
    pub url: String,
    pub profile: T,
}
