pub mod auth;
pub mod courses;
pub mod events;
pub mod feedback;
pub mod general_feedback;
pub mod questions;
pub mod results;
pub mod students;
pub mod users;

pub use auth::AuthService;
pub use courses::CourseService;
pub use events::EventService;
pub use feedback::FeedbackService;
pub use general_feedback::GeneralFeedbackService;
pub use questions::QuestionService;
pub use results::ResultService;
pub use students::StudentService;
pub use users::UserService;
