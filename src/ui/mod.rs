pub mod icons;
pub mod report;
