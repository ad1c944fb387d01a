pub mod preferences;
pub mod trip;
