//! GraphQL requests for the BlackBox endpoint methods.
//!
//! Shared by the async and blocking sessions: each function looks up its
//! template, fills it in and returns the body for the GraphQL gateway.

use serde_json::json;

use dvfu_core::templates::{QueryTemplate, placeholder, replace_first};
use dvfu_core::{LessonGuid, LessonsQuery, Result, TemplateStore};

use super::endpoints::GraphqlRequest;
use super::endpoints::template::*;

/// The query templates shipped with this crate.
pub fn bundled_templates() -> TemplateStore {
    TemplateStore::from_templates([
        QueryTemplate::new(READ_PROFILE, include_str!("../../queries/ReadProfile.gql")),
        QueryTemplate::new(READ_NEWS, include_str!("../../queries/ReadNews.gql")),
        QueryTemplate::new(NEWS_ITEM, include_str!("../../queries/newsItem.gql")),
        QueryTemplate::new(
            USER_QR_PASS_KEY,
            include_str!("../../queries/userQrPassKey.gql"),
        ),
        QueryTemplate::new(READ_LESSONS, include_str!("../../queries/ReadLessons.gql")),
        QueryTemplate::new(
            READ_LESSON_FEEDBACK,
            include_str!("../../queries/ReadLessonFeedback.gql"),
        ),
        QueryTemplate::new(
            UPDATE_LESSON_FEEDBACK,
            include_str!("../../queries/UpdateLessonFeedback.gql"),
        ),
    ])
}

pub(crate) fn profile(templates: &TemplateStore) -> Result<GraphqlRequest> {
    Ok(GraphqlRequest::new(templates.get(READ_PROFILE)?.body()))
}

pub(crate) fn news(templates: &TemplateStore) -> Result<GraphqlRequest> {
    Ok(GraphqlRequest::new(templates.get(READ_NEWS)?.body())
        .with_variables(json!({ "catalogCodes": ["mobile"] })))
}

pub(crate) fn news_item(templates: &TemplateStore, news_id: u64) -> Result<GraphqlRequest> {
    Ok(GraphqlRequest::new(templates.get(NEWS_ITEM)?.body())
        .with_variables(json!({ "id": news_id.to_string() })))
}

pub(crate) fn qr_code(templates: &TemplateStore) -> Result<GraphqlRequest> {
    Ok(GraphqlRequest::new(templates.get(USER_QR_PASS_KEY)?.body()))
}

pub(crate) fn lessons(templates: &TemplateStore, query: &LessonsQuery) -> Result<GraphqlRequest> {
    let template = templates.get(READ_LESSONS)?;
    Ok(GraphqlRequest::new(query.render(template.body())))
}

pub(crate) fn can_lesson_feedback(
    templates: &TemplateStore,
    guid: &LessonGuid,
) -> Result<GraphqlRequest> {
    let template = templates.get(READ_LESSON_FEEDBACK)?;
    Ok(GraphqlRequest::new(replace_first(
        template.body(),
        placeholder::LESSON_GUID,
        guid.as_str(),
    )))
}
