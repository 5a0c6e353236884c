//! Core library for a clinical-dietetics planning client: patient intake
//! math (BMI, Mifflin-St Jeor BMR, TDEE, macro splits), a food-exchange
//! catalog, the weekly meal plan with its aggregation engine, PDF export of
//! finished plans, typed collaborators for the remote dietetics API and the
//! session layer that ties them together.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod exchange;
pub mod export;
pub mod logging;
pub mod nutrition;
pub mod plan;
pub mod session;

#[cfg(test)]
pub(crate) mod testutil;
