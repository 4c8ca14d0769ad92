pub mod estimate;
pub mod run;
pub mod version;
