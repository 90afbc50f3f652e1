/// Value written to `solution.judger` for a freshly admitted submission.
///
/// Judge hosts poll for rows carrying this marker and overwrite it with their
/// own name when they claim the job, so the literal is part of the wire
/// contract and must not be translated.
pub const UNASSIGNED_JUDGER: &str = "待分配";
