mod settings;
mod view_model;

pub use settings::FeedSettings;
pub use view_model::PetsViewModel;
