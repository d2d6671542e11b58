//! Economic indices module - macro indicators with multi-horizon deltas.

mod economic_indices_model;
mod economic_indices_service;
mod economic_indices_traits;

#[cfg(test)]
mod economic_indices_model_tests;

pub use economic_indices_model::{
    plan_index_upsert, EconomicIndex, EconomicIndexUpdate, IndexDeltas,
};
pub use economic_indices_service::EconomicIndexService;
pub use economic_indices_traits::{EconomicIndexRepositoryTrait, EconomicIndexServiceTrait};
