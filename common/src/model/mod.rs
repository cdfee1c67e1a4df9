pub mod entity;
pub mod preview;
pub mod responses;
pub mod row_error;
