pub mod company;
pub mod donation;
pub mod donor;
