//! Field rules for each writable resource

use super::{FieldRule, Kind};

/// Accepted skill categories
pub const SKILL_CATEGORIES: &[&str] = &["frontend", "backend", "database", "devops", "tools", "other"];

/// `projects` collection
pub const PROJECT_RULES: &[FieldRule] = &[
    FieldRule::required("title", Kind::Text { min: 1, max: 200 }),
    FieldRule::required("description", Kind::Text { min: 1, max: 2000 }),
    FieldRule::optional("technologies", Kind::TextList),
    FieldRule::optional("category", Kind::Text { min: 0, max: 50 }),
    FieldRule::optional("featured", Kind::Boolean),
    FieldRule::optional("githubUrl", Kind::Url),
    FieldRule::optional("liveUrl", Kind::Url),
    FieldRule::optional("imageUrl", Kind::Url),
];

/// `skills` collection
pub const SKILL_RULES: &[FieldRule] = &[
    FieldRule::required("name", Kind::Text { min: 1, max: 50 }),
    FieldRule::required("category", Kind::OneOf(SKILL_CATEGORIES)),
    FieldRule::required("level", Kind::Integer { min: 0, max: 100 }),
    FieldRule::optional("icon", Kind::Text { min: 0, max: 100 }),
];

/// `experience` collection
pub const EXPERIENCE_RULES: &[FieldRule] = &[
    FieldRule::required("company", Kind::Text { min: 1, max: 100 }),
    FieldRule::required("position", Kind::Text { min: 1, max: 100 }),
    FieldRule::required("startDate", Kind::Date { nullable: false }),
    FieldRule::optional("endDate", Kind::Date { nullable: true }),
    FieldRule::optional("current", Kind::Boolean),
    FieldRule::optional("description", Kind::Text { min: 0, max: 2000 }),
    FieldRule::optional("location", Kind::Text { min: 0, max: 100 }),
];

/// `services` collection
pub const SERVICE_RULES: &[FieldRule] = &[
    FieldRule::required("title", Kind::Text { min: 1, max: 100 }),
    FieldRule::required("description", Kind::Text { min: 1, max: 1000 }),
    FieldRule::optional("icon", Kind::Text { min: 0, max: 100 }),
    FieldRule::optional("price", Kind::Number { min: 0.0 }),
    FieldRule::optional("features", Kind::TextList),
];

/// `profile` singleton. Always applied in update mode.
pub const PROFILE_RULES: &[FieldRule] = &[
    FieldRule::optional("name", Kind::Text { min: 1, max: 100 }),
    FieldRule::optional("title", Kind::Text { min: 0, max: 100 }),
    FieldRule::optional("bio", Kind::Text { min: 0, max: 5000 }),
    FieldRule::optional("email", Kind::Email),
    FieldRule::optional("location", Kind::Text { min: 0, max: 100 }),
    FieldRule::optional("avatar", Kind::Url),
    FieldRule::optional("socialLinks", Kind::UrlMap),
];

/// `analytics` singleton
pub const ANALYTICS_RULES: &[FieldRule] = &[
    FieldRule::optional("pageViews", Kind::Integer { min: 0, max: i64::MAX }),
    FieldRule::optional("uniqueVisitors", Kind::Integer { min: 0, max: i64::MAX }),
    FieldRule::optional("projectViews", Kind::Array),
];

/// Login request body
pub const LOGIN_RULES: &[FieldRule] = &[
    FieldRule::required("email", Kind::Email),
    FieldRule::required("password", Kind::Text { min: 1, max: 1024 }),
];
