pub mod de;
pub mod listing;
pub mod profile;
