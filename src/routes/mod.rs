pub mod auth;

pub mod users;

pub mod students;

pub mod events;

pub mod courses;

pub mod questions;

pub mod feedback;

pub mod results;

pub mod general_feedback;

pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use events::configure_event_routes;
pub use feedback::configure_feedback_routes;
pub use general_feedback::configure_general_feedback_routes;
pub use questions::configure_question_routes;
pub use results::configure_result_routes;
pub use students::configure_student_routes;
pub use users::configure_user_routes;
