// UI Components

pub mod profile_card;

pub use profile_card::DcloginProfile;
