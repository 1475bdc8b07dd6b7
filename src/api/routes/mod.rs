pub mod meta;
pub mod rating;
pub mod status;
