use headless_chrome::Tab;

use super::{ExtractionProfile, COURSE_PATH_MARKER, COURSE_URL_PREFIX};
use crate::browser::wait::element_present;
use crate::browser::{BrowserSession, CompositeWaitCondition};
use crate::error::ScrapeError;
use crate::models::ReviewProfile;

const REVIEWS_SUFFIX: &str = "/reviews";

/// Jumps to the last page of the review pagination so the earliest comment
/// is loaded. Courses with a single page of reviews have no such button, in
/// which case this is a no-op.
const LAST_PAGE_JS: &str = r#"
{
    const query = "nav[aria-label='Pagination Controls'] li:nth-last-child(2)>button";
    const lastPageButton = document.querySelector(query);
    if (lastPageButton) lastPageButton.click();
}
"#;

/// Element that proves the post-pagination-click review list has loaded
const LAST_REVIEW_DATE_SELECTOR: &str = ".rc-ReviewsSection .review:last-child .dateOfReview";

const EXTRACT_JS: &str = r#"
JSON.stringify((() => {
    const reviewProfile = {
        title: document.querySelector(".CourseReviewTitle h1").textContent,
        first_comment_date: document.querySelector('.rc-ReviewsSection .review:last-child .dateOfReview').textContent,
    };

    const topRatings = document.querySelectorAll(".rc-TopRatings div[class^='Col']");
    if (topRatings) {
        reviewProfile.top_ratings = Array.from(topRatings).map(x => ({
            author: x.querySelector('.text-secondary:nth-child(2)').textContent,
            date: x.querySelector('.text-secondary:nth-child(3)').textContent,
            review: x.querySelector(':scope > p').textContent,
        }));
    }

    const courseRating = document.querySelector(".CourseRating");
    if (courseRating) {
        reviewProfile.rating = ({
            starrating: courseRating.querySelector("div[class^='StarRating']~span").textContent,
            nratings: courseRating.querySelector("div[class^='StarRating']~div").textContent,
            nreviews: courseRating.querySelector(":scope>div:last-child span").textContent,
        });
    }

    return reviewProfile;
})())
"#;

/// Extraction profile for course review pages
/// (`https://www.coursera.org/learn/[course]/reviews`)
pub struct ReviewPage;

impl ExtractionProfile for ReviewPage {
    type Record = ReviewProfile;

    fn kind(&self) -> &'static str {
        "review"
    }

    fn validate_url(&self, url: &str) -> Result<(), ScrapeError> {
        if !url.contains(COURSE_PATH_MARKER) || !url.ends_with(REVIEWS_SUFFIX) {
            return Err(ScrapeError::InvalidUrlFormat(
                "Url must look like... coursera.org/learn/[course]/reviews".into(),
            ));
        }
        Ok(())
    }

    fn slug(&self, url: &str) -> String {
        url.replace(COURSE_URL_PREFIX, "")
            .replace(REVIEWS_SUFFIX, "")
    }

    fn ready_condition(&self) -> CompositeWaitCondition<Tab> {
        CompositeWaitCondition::new(vec![
            element_present("div.rc-TopRatings"),
            element_present("div.rc-ReviewsSection"),
        ])
    }

    fn prepare_page(&self, session: &BrowserSession) -> Result<(), ScrapeError> {
        session.click_if_present(LAST_PAGE_JS)
    }

    fn extract(&self, session: &BrowserSession) -> Result<ReviewProfile, ScrapeError> {
        // The pagination click replaces the review list; wait for the date of
        // the last loaded entry before reading anything.
        session.wait_for_selector(LAST_REVIEW_DATE_SELECTOR)?;
        parse_review_profile(session.evaluate_json(EXTRACT_JS)?)
    }
}

fn parse_review_profile(value: serde_json::Value) -> Result<ReviewProfile, ScrapeError> {
    serde_json::from_value(value)
        .map_err(|e| ScrapeError::Extraction(format!("unexpected review page structure: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_review_urls() {
        let profile = ReviewPage;
        assert!(profile
            .validate_url("https://www.coursera.org/learn/machine-learning/reviews")
            .is_ok());
    }

    #[test]
    fn rejects_course_url_without_reviews_suffix() {
        let profile = ReviewPage;
        let err = profile
            .validate_url("https://www.coursera.org/learn/machine-learning")
            .unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidUrlFormat(_)));
    }

    #[test]
    fn rejects_reviews_outside_learn_path() {
        let profile = ReviewPage;
        assert!(profile
            .validate_url("https://www.coursera.org/specializations/x/reviews")
            .is_err());
    }

    #[test]
    fn slug_strips_prefix_and_suffix() {
        let profile = ReviewPage;
        assert_eq!(
            profile.slug("https://www.coursera.org/learn/machine-learning/reviews"),
            "machine-learning"
        );
    }

    #[test]
    fn parses_review_payload() {
        let value = json!({
            "title": "Machine Learning",
            "first_comment_date": "Dec 2, 2016",
            "top_ratings": [
                {"author": "By RS", "date": "Aug 30, 2019", "review": "Great course."},
                {"author": "By JD", "date": "Mar 16, 2017", "review": "Very thorough."}
            ],
            "rating": {
                "starrating": "4.9",
                "nratings": "167,519 ratings",
                "nreviews": "41,423 reviews"
            }
        });

        let profile = parse_review_profile(value).unwrap();
        assert_eq!(profile.first_comment_date, "Dec 2, 2016");
        assert_eq!(profile.top_ratings.len(), 2);
        assert_eq!(profile.top_ratings[1].author, "By JD");
        assert!(profile.rating.is_some());
    }

    #[test]
    fn rating_and_top_ratings_are_optional() {
        let value = json!({
            "title": "Machine Learning",
            "first_comment_date": "Dec 2, 2016"
        });

        let profile = parse_review_profile(value).unwrap();
        assert!(profile.top_ratings.is_empty());
        assert!(profile.rating.is_none());
    }
}
