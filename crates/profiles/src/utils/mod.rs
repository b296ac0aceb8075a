pub mod validation;

pub use validation::assure_id_consistent;
