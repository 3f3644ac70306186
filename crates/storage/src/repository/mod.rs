pub mod company;
pub mod contact;
pub mod donation;
pub mod donor;
pub mod place;
pub mod reference;
pub mod reset;

pub use company::CompanyRepository;
pub use contact::ContactRepository;
pub use donation::DonationRepository;
pub use donor::DonorRepository;
pub use place::PlaceRepository;
pub use reference::ReferenceRepository;
pub use reset::{ResetRepository, SeedTable};
