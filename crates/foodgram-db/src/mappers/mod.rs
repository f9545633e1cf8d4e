//! Model to entity mappers
//!
//! - `From<Model> for Entity`: convert database rows to domain objects
//! - [`assemble_recipes`]: attach tag and ingredient rows to recipe rows

mod recipe;
mod reference;
mod user;

pub use recipe::assemble_recipes;
