pub mod civicinfo;
pub mod keys;
