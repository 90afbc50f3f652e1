pub mod contest;
pub mod contest_problem;
pub mod custom_input;
pub mod prefile;
pub mod problem;
pub mod solution;
pub mod source_code;
pub mod source_code_user;
pub mod topic;
pub mod topic_problem;
