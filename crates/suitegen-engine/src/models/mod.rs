pub mod suite;
pub mod test_case;

pub use suite::{FixtureFile, Suite};
pub use test_case::CanonicalTestCase;
