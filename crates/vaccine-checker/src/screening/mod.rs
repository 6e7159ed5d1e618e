//! Age computation, age banding, and the vaccine and lab classifiers built on them.
//!
//! Every function here is pure. The reference date is always passed in by the
//! caller so results are reproducible.

pub mod age;
pub mod band;
pub mod labs;
pub mod report;
pub mod vaccines;

pub use age::{compute_age, parse_birth_date, AgeBreakdown, AgeError};
pub use band::{classify_age_band, AgeBand};
pub use labs::{recommend_labs, recommend_labs_with, LabRecommendation, LabRule};
pub use report::{GroupCounts, ScreeningOutcome, ScreeningReport};
pub use vaccines::{
    classify_vaccines, ClassifiedVaccine, StatusType, TableColumns, VaccineGroups, VaccineRecord,
    VaccineTable, VaccineTableError,
};
