pub mod model;
pub mod schema;

pub use model::{Homework, HomeworkStatus};
pub use schema::{EmptyHomeworksPolicy, HomeworkStatuses};
