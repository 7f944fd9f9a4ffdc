mod pet_repo;
mod sample_pets;

pub use pet_repo::PetRepo;
pub use sample_pets::SamplePets;
