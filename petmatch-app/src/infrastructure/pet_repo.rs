use async_trait::async_trait;
use petmatch_errors::AppError;

use crate::domain::Pet;

/// The single seam to the data layer. Implementations decide where the pets
/// come from; consumers only ever see the list or a typed error.
#[async_trait]
pub trait PetRepo: Send + Sync {
    async fn get_pets(&self) -> Result<Vec<Pet>, AppError>;
}
