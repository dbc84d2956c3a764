pub mod assembly_service;
pub mod binding_service;
pub mod job_creator;
pub mod option_source;
pub mod submission_service;
