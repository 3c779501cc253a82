/// Medication record
pub mod model;

/// Input DTOs
pub mod inputs;

/// Response views
pub mod view;

pub use inputs::{MedicationChanges, NewMedication};
pub use model::{Medication, Unit, ENTITY};
pub use view::{MedicationDetail, MedicationSummary};
