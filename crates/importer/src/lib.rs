pub mod currency;
pub mod error;
pub mod matching;
pub mod names;
pub mod reference;
pub mod seeder;
pub mod session;
pub mod source;
pub mod store;
pub mod summary;
pub mod traits;

pub use error::{ImporterError, Result};
pub use seeder::Seeder;
pub use session::ImportSession;
pub use source::{SourceData, SourceValidator, ValidationReport};
pub use store::{MemoryStore, PgSeedStore};
pub use summary::ImportSummary;
pub use traits::SeedStore;
