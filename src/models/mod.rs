pub mod curator;
pub mod job_post;
pub mod select_option;
