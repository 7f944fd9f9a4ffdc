mod pet;
mod pet_card;

pub use pet::Pet;
pub use pet_card::{top_liked, PetCard};
