use headless_chrome::Tab;

use super::{ExtractionProfile, COURSE_PATH_MARKER, COURSE_URL_PREFIX};
use crate::browser::wait::element_present;
use crate::browser::{BrowserSession, CompositeWaitCondition};
use crate::error::ScrapeError;
use crate::models::CourseProfile;

/// Clicks the "Show More" control that collapses the long course
/// description. There is no stable identifier for it, so it is located by
/// its visible button text; a page without the control is a no-op.
const SHOW_MORE_JS: &str = r#"
{
    const xpathExpression = "//button/span[contains(.,'Show More')]";
    const button = document.evaluate(xpathExpression, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;
    if (button) {
        button.click();
    }
}
"#;

/// In-page extraction for a course landing page. The rating block is only
/// read when a star-rating element exists; new courses legitimately have
/// none, so its absence is not an error.
const EXTRACT_JS: &str = r#"
JSON.stringify((() => {
    const profile = {
        title: document.querySelector('.BannerTitle>h1').textContent,
        partner: document.querySelector("div[class^='partnerBanner'] img").getAttribute('alt'),
        content: document.querySelector('.about-section>.content').innerText,

        skills: Array.from(document.querySelectorAll('.Skills>div>span')).map(x => x.innerText),
        glance: Array.from(document.querySelectorAll('.ProductGlance h4')).map(x => x.innerText),

        nweeks: document.querySelectorAll('.SyllabusWeek').length,
        instructors: Array.from(document.querySelectorAll('.Instructors h3>a')).map(x => (
            {
                name: x.innerText,
                url: x.href
            }
        )),
    };

    if (document.querySelector("div[class^='StarRating']")) {
        profile.rating = {
            starrating: document.querySelector("div[class^='StarRating']~span").innerText,
            nratings: document.querySelector("div[class^='StarRating']~div").innerText,
            nreviews: document.querySelector(".CourseRating:last-child span").innerText,
        };
    }

    return profile;
})())
"#;

/// Extraction profile for course landing pages
/// (`https://www.coursera.org/learn/[course]`)
pub struct CoursePage;

impl ExtractionProfile for CoursePage {
    type Record = CourseProfile;

    fn kind(&self) -> &'static str {
        "course"
    }

    fn validate_url(&self, url: &str) -> Result<(), ScrapeError> {
        if !url.contains(COURSE_PATH_MARKER) {
            return Err(ScrapeError::InvalidUrlFormat(
                "Url must look like... coursera.org/learn/[course]".into(),
            ));
        }
        Ok(())
    }

    fn slug(&self, url: &str) -> String {
        url.replace(COURSE_URL_PREFIX, "")
    }

    fn ready_condition(&self) -> CompositeWaitCondition<Tab> {
        CompositeWaitCondition::new(vec![
            element_present("div.AboutCourse"),
            element_present("div.Syllabus"),
        ])
    }

    fn prepare_page(&self, session: &BrowserSession) -> Result<(), ScrapeError> {
        session.click_if_present(SHOW_MORE_JS)?;
        session.scroll_to_bottom()
    }

    fn extract(&self, session: &BrowserSession) -> Result<CourseProfile, ScrapeError> {
        parse_course_profile(session.evaluate_json(EXTRACT_JS)?)
    }
}

fn parse_course_profile(value: serde_json::Value) -> Result<CourseProfile, ScrapeError> {
    serde_json::from_value(value)
        .map_err(|e| ScrapeError::Extraction(format!("unexpected course page structure: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_learn_urls() {
        let profile = CoursePage;
        assert!(profile
            .validate_url("https://www.coursera.org/learn/machine-learning")
            .is_ok());
    }

    #[test]
    fn rejects_specialization_urls() {
        let profile = CoursePage;
        let err = profile
            .validate_url("https://www.coursera.org/specializations/x")
            .unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidUrlFormat(_)));
    }

    #[test]
    fn slug_strips_url_prefix() {
        let profile = CoursePage;
        assert_eq!(
            profile.slug("https://www.coursera.org/learn/machine-learning"),
            "machine-learning"
        );
    }

    #[test]
    fn parses_page_without_rating_block() {
        let value = json!({
            "title": "Machine Learning",
            "partner": "Stanford University",
            "content": "Machine learning is the science of getting computers to act.",
            "skills": ["Logistic Regression", "Neural Networks"],
            "glance": ["100% online", "Approx. 60 hours"],
            "nweeks": 11,
            "instructors": [
                {"name": "Andrew Ng", "url": "https://www.coursera.org/instructor/andrewng"}
            ]
        });

        let profile = parse_course_profile(value).unwrap();
        assert_eq!(profile.title, "Machine Learning");
        assert_eq!(profile.partner, "Stanford University");
        assert_eq!(profile.nweeks, 11);
        assert_eq!(profile.skills.len(), 2);
        assert_eq!(profile.instructors[0].name, "Andrew Ng");
        assert!(profile.rating.is_none());
    }

    #[test]
    fn parses_page_with_rating_block() {
        let value = json!({
            "title": "Machine Learning",
            "partner": "Stanford University",
            "content": "About.",
            "skills": [],
            "glance": [],
            "nweeks": 11,
            "instructors": [],
            "rating": {
                "starrating": "4.9",
                "nratings": "167,519 ratings",
                "nreviews": "41,423 reviews"
            }
        });

        let profile = parse_course_profile(value).unwrap();
        let rating = profile.rating.unwrap();
        assert_eq!(rating.starrating, "4.9");
    }

    #[test]
    fn missing_mandatory_field_is_an_extraction_error() {
        let value = json!({"title": "Machine Learning"});
        let err = parse_course_profile(value).unwrap_err();
        assert!(matches!(err, ScrapeError::Extraction(_)));
    }
}
