//! Uploading bank statements.
//!
//! The upload page accepts a single PDF, either picked with the file input
//! or dropped onto the page, and the endpoint forwards it to the backend.

mod endpoint;
mod page;

pub use endpoint::{UPLOAD_BODY_LIMIT, upload_statement};
pub use page::get_upload_page;
