pub mod schedule_id;
pub mod time;
