pub mod alerts;
pub mod input;
pub mod refresh;
pub mod state;

pub use state::App;
