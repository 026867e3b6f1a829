pub mod form;
pub mod health;
pub mod submit_blocklist;
pub mod verify_email;
