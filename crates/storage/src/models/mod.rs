mod company;
mod donation;
mod donor;
mod donor_contact;
mod donor_place;
mod place;
mod reference;

pub use company::Company;
pub use donation::Donation;
pub use donor::Donor;
pub use donor_contact::{ContactType, DonorContact};
pub use donor_place::DonorPlace;
pub use place::Place;
pub use reference::{Bank, Country, DonationMethod, DonorAddressType, Organization};
