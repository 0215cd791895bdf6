pub mod notify;
pub mod policy;
pub mod slots;
