pub mod bulk_upload;
pub mod drop_zone;
pub mod preview_table;
pub mod toast;
