use services::CourseWithTopics;

use crate::vm::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub created_at_str: String,
    pub topics: Vec<String>,
}

impl CourseCardVm {
    #[must_use]
    pub fn topic_summary(&self) -> String {
        match self.topics.len() {
            0 => "No topics yet".to_owned(),
            1 => "1 topic".to_owned(),
            n => format!("{n} topics"),
        }
    }
}

impl From<&CourseWithTopics> for CourseCardVm {
    fn from(item: &CourseWithTopics) -> Self {
        Self {
            id: item.course.id().value(),
            name: item.course.name().to_owned(),
            description: item.course.description().map(str::to_owned),
            created_at_str: format_date(item.course.created_at()),
            topics: item.topics.iter().map(|t| t.name().to_owned()).collect(),
        }
    }
}

#[must_use]
pub fn map_course_cards(items: &[CourseWithTopics]) -> Vec<CourseCardVm> {
    items.iter().map(CourseCardVm::from).collect()
}
