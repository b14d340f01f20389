//! 预导入模块，方便使用

pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::event_courses::{
    ActiveModel as EventCourseActiveModel, Entity as EventCourses, Model as EventCourseModel,
};
pub use super::events::{ActiveModel as EventActiveModel, Entity as Events, Model as EventModel};
pub use super::feedback_responses::{
    ActiveModel as FeedbackResponseActiveModel, Entity as FeedbackResponses,
    Model as FeedbackResponseModel,
};
pub use super::general_feedback::{
    ActiveModel as GeneralFeedbackActiveModel, Entity as GeneralFeedbacks,
    Model as GeneralFeedbackModel,
};
pub use super::question_responses::{
    ActiveModel as QuestionResponseActiveModel, Entity as QuestionResponses,
    Model as QuestionResponseModel,
};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::staff::{ActiveModel as StaffActiveModel, Entity as Staff, Model as StaffModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
